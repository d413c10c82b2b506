//! Integration tests for the campaign-store assignment engine.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p fieldops-server)
//!
//! Run with: cargo test -p fieldops-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use fieldops_integration_tests::TestContext;

// ============================================================================
// Single add / remove
// ============================================================================

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn adding_a_store_twice_reports_message_not_error() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let url = format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url);

    let resp = ctx
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("first add failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["is_done"], false, "new assignment starts not done");

    // Second add of the same pair: success envelope with a message, no error.
    let resp = ctx
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("second add failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "store already assigned to campaign");

    // Still exactly one assignment.
    let resp = ctx
        .client
        .get(&url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["count"], 1);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn add_without_store_id_is_rejected() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;

    let resp = ctx
        .client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn removing_an_unassigned_store_returns_404() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let resp = ctx
        .client
        .delete(format!(
            "{}/api/campaigns/{campaign_id}/stores/{store_id}",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Bulk reconciliation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn bulk_reconcile_applies_adds_and_removes_atomically() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_a = ctx.create_store(&token).await;
    let store_b = ctx.create_store(&token).await;
    let store_c = ctx.create_store(&token).await;

    let bulk_url = format!("{}/api/campaigns/{campaign_id}/stores/bulk", ctx.base_url);

    // Start with A and B assigned.
    let resp = ctx
        .client
        .post(&bulk_url)
        .bearer_auth(&token)
        .json(&json!({"addIds": [store_a, store_b], "removeIds": []}))
        .send()
        .await
        .expect("bulk failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["added"], 2);
    assert_eq!(body["data"]["removed"], 0);

    // Add C, remove A, in one call.
    let resp = ctx
        .client
        .post(&bulk_url)
        .bearer_auth(&token)
        .json(&json!({"addIds": [store_c], "removeIds": [store_a]}))
        .send()
        .await
        .expect("bulk failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["added"], 1);
    assert_eq!(body["data"]["removed"], 1);

    // Final set is {B, C}.
    let resp = ctx
        .client
        .get(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["count"], 2);

    let assigned: Vec<&str> = body["data"]
        .as_array()
        .expect("data not array")
        .iter()
        .map(|row| row["store_id"].as_str().expect("row missing store_id"))
        .collect();
    assert!(assigned.contains(&store_b.as_str()));
    assert!(assigned.contains(&store_c.as_str()));
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn bulk_reconcile_is_idempotent() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let bulk_url = format!("{}/api/campaigns/{campaign_id}/stores/bulk", ctx.base_url);
    let request_body = json!({"addIds": [store_id], "removeIds": []});

    let resp = ctx
        .client
        .post(&bulk_url)
        .bearer_auth(&token)
        .json(&request_body)
        .send()
        .await
        .expect("bulk failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["added"], 1);

    // Same body again: nothing changes.
    let resp = ctx
        .client
        .post(&bulk_url)
        .bearer_auth(&token)
        .json(&request_body)
        .send()
        .await
        .expect("bulk failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["added"], 0);
    assert_eq!(body["data"]["removed"], 0);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn store_in_both_bulk_sets_ends_up_removed() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let resp = ctx
        .client
        .post(format!(
            "{}/api/campaigns/{campaign_id}/stores/bulk",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({"addIds": [store_id], "removeIds": [store_id]}))
        .send()
        .await
        .expect("bulk failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["count"], 0, "a store requested in both sets must not be assigned");
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn failed_bulk_reconcile_leaves_no_partial_state() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let assigned = ctx.create_store(&token).await;
    let valid_add = ctx.create_store(&token).await;
    let bogus_add = uuid::Uuid::new_v4().to_string();

    // Start with one store assigned.
    let resp = ctx
        .client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": assigned}))
        .send()
        .await
        .expect("add failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // One add references a store that doesn't exist, so the whole call
    // fails partway through.
    let resp = ctx
        .client
        .post(format!(
            "{}/api/campaigns/{campaign_id}/stores/bulk",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({
            "addIds": [valid_add, bogus_add],
            "removeIds": [assigned],
        }))
        .send()
        .await
        .expect("bulk failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Nothing committed: the valid add is absent and the removal did not
    // happen.
    let resp = ctx
        .client
        .get(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["store_id"], assigned.as_str());
}

// ============================================================================
// Done-flag toggle
// ============================================================================

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn toggle_flips_the_done_flag() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let resp = ctx
        .client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("add failed");
    let body: Value = resp.json().await.expect("body not JSON");
    let assignment_id = body["data"]["id"].as_str().expect("missing id").to_string();

    let toggle_url = format!(
        "{}/api/campaigns/{campaign_id}/stores/{assignment_id}",
        ctx.base_url
    );

    let resp = ctx
        .client
        .patch(&toggle_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("toggle failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["is_done"], true);

    // Toggling again flips it back.
    let resp = ctx
        .client
        .patch(&toggle_url)
        .bearer_auth(&token)
        .send()
        .await
        .expect("toggle failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["is_done"], false);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn toggle_under_the_wrong_campaign_returns_404() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_a = ctx.create_campaign(&token).await;
    let campaign_b = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let resp = ctx
        .client
        .post(format!("{}/api/campaigns/{campaign_a}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("add failed");
    let body: Value = resp.json().await.expect("body not JSON");
    let assignment_id = body["data"]["id"].as_str().expect("missing id");

    // The assignment belongs to campaign A; campaign B's path must not
    // reach it.
    let resp = ctx
        .client
        .patch(format!(
            "{}/api/campaigns/{campaign_b}/stores/{assignment_id}",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("toggle failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Folder link
// ============================================================================

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn folder_link_can_be_set_replaced_and_cleared() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    let resp = ctx
        .client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("add failed");
    let body: Value = resp.json().await.expect("body not JSON");
    let assignment_id = body["data"]["id"].as_str().expect("missing id").to_string();

    let folder_url = format!(
        "{}/api/campaigns/{campaign_id}/stores/{assignment_id}/folder",
        ctx.base_url
    );

    // Set.
    let resp = ctx
        .client
        .patch(&folder_url)
        .bearer_auth(&token)
        .json(&json!({"drive_folder_url": "https://drive.example.com/a"}))
        .send()
        .await
        .expect("set folder failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["drive_folder_url"], "https://drive.example.com/a");

    // Replace.
    let resp = ctx
        .client
        .patch(&folder_url)
        .bearer_auth(&token)
        .json(&json!({"drive_folder_url": "https://drive.example.com/b"}))
        .send()
        .await
        .expect("replace folder failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["drive_folder_url"], "https://drive.example.com/b");

    // Clear.
    let resp = ctx
        .client
        .patch(&folder_url)
        .bearer_auth(&token)
        .json(&json!({"drive_folder_url": null}))
        .send()
        .await
        .expect("clear folder failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert!(body["data"]["drive_folder_url"].is_null());
}

// ============================================================================
// Cascade delete and listings
// ============================================================================

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn deleting_a_campaign_removes_its_assignments() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    ctx.client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("add failed");

    let resp = ctx
        .client
        .delete(format!("{}/api/campaigns/{campaign_id}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // The campaign and its assignment listing are both gone.
    let resp = ctx
        .client
        .get(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The store itself survives.
    let resp = ctx
        .client
        .get(format!("{}/api/stores/{store_id}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("get store failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn end_to_end_assignment_lifecycle() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_1 = ctx.create_store(&token).await;
    let store_2 = ctx.create_store(&token).await;

    // Assign store 1 and mark it done.
    let resp = ctx
        .client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": store_1}))
        .send()
        .await
        .expect("add failed");
    let body: Value = resp.json().await.expect("body not JSON");
    let assignment_id = body["data"]["id"].as_str().expect("missing id").to_string();

    let resp = ctx
        .client
        .patch(format!(
            "{}/api/campaigns/{campaign_id}/stores/{assignment_id}",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("toggle failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Swap store 1 out for store 2 in one reconcile.
    let resp = ctx
        .client
        .post(format!(
            "{}/api/campaigns/{campaign_id}/stores/bulk",
            ctx.base_url
        ))
        .bearer_auth(&token)
        .json(&json!({"addIds": [store_2], "removeIds": [store_1]}))
        .send()
        .await
        .expect("bulk failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["added"], 1);
    assert_eq!(body["data"]["removed"], 1);

    // The campaign now holds exactly store 2, fresh and not done.
    let resp = ctx
        .client
        .get(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["store_id"], store_2.as_str());
    assert_eq!(body["data"][0]["is_done"], false);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn global_listing_includes_campaign_and_store_identity() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;
    let campaign_id = ctx.create_campaign(&token).await;
    let store_id = ctx.create_store(&token).await;

    ctx.client
        .post(format!("{}/api/campaigns/{campaign_id}/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"store_id": store_id}))
        .send()
        .await
        .expect("add failed");

    let resp = ctx
        .client
        .get(format!("{}/api/campaigns/campaign-stores", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body not JSON");
    let rows = body["data"].as_array().expect("data not array");
    let row = rows
        .iter()
        .find(|r| r["store_id"] == store_id.as_str())
        .expect("assignment missing from global listing");

    assert_eq!(row["campaign_id"], campaign_id.as_str());
    assert!(row["campaign_name"].is_string());
    assert!(row["store_code"].is_string());
}
