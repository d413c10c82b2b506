//! Integration tests for authentication and role-based access.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p fieldops-server)
//!
//! Run with: cargo test -p fieldops-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use fieldops_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn request_without_token_is_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(format!("{}/api/campaigns", ctx.base_url))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn garbage_token_is_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .get(format!("{}/api/campaigns", ctx.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn parttime_can_read_but_not_write() {
    let ctx = TestContext::new();
    let (token, _) = ctx.register_and_login().await;

    // Reads are allowed.
    let resp = ctx
        .client
        .get(format!("{}/api/campaigns", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Writes are admin only.
    let resp = ctx
        .client
        .post(format!("{}/api/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"board_name": "Chain", "store_code": "PT-1"}))
        .send()
        .await
        .expect("create failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn registration_cannot_grant_admin_role() {
    let ctx = TestContext::new();
    let email = format!("escalate-{}@example.com", Uuid::new_v4());
    let password = "integration-test-password";

    // The open registration route ignores a role field in the body.
    let resp = ctx
        .client
        .post(format!("{}/api/auth/register", ctx.base_url))
        .json(&json!({
            "full_name": "Would-Be Admin",
            "email": email,
            "password": password,
            "role": "admin",
        }))
        .send()
        .await
        .expect("register failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["data"]["role"], "parttime");

    // And the account really cannot perform admin writes.
    let token = ctx.login(&email, password).await;
    let resp = ctx
        .client
        .post(format!("{}/api/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"board_name": "Chain", "store_code": "ESC-1"}))
        .send()
        .await
        .expect("create failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn duplicate_email_registration_conflicts() {
    let ctx = TestContext::new();
    let email = format!("dup-{}@example.com", Uuid::new_v4());
    let body = json!({
        "full_name": "Duplicate",
        "email": email,
        "password": "integration-test-password",
    });

    let resp = ctx
        .client
        .post(format!("{}/api/auth/register", ctx.base_url))
        .json(&body)
        .send()
        .await
        .expect("register failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ctx
        .client
        .post(format!("{}/api/auth/register", ctx.base_url))
        .json(&body)
        .send()
        .await
        .expect("register failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn login_with_wrong_password_is_rejected() {
    let ctx = TestContext::new();
    let (_, email) = ctx.register_and_login().await;

    let resp = ctx
        .client
        .post(format!("{}/api/auth/login", ctx.base_url))
        .json(&json!({"email": email, "password": "wrong-password"}))
        .send()
        .await
        .expect("login failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn campaign_with_reversed_dates_is_rejected() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;

    let resp = ctx
        .client
        .post(format!("{}/api/campaigns", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Backwards",
            "start_date": "2026-09-30",
            "end_date": "2026-09-01",
        }))
        .send()
        .await
        .expect("create failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running fieldops server and database"]
async fn chain_listing_filters_by_board_name() {
    let ctx = TestContext::new();
    let token = ctx.admin_token().await;

    let chain = format!("Chain-{}", Uuid::new_v4());
    let resp = ctx
        .client
        .post(format!("{}/api/stores", ctx.base_url))
        .bearer_auth(&token)
        .json(&json!({"board_name": chain, "store_code": "CH-1"}))
        .send()
        .await
        .expect("create failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ctx
        .client
        .get(format!("{}/api/stores/chain/{chain}", ctx.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body not JSON");
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["board_name"], chain.as_str());
}
