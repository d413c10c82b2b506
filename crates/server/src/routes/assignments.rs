//! Campaign-store assignment routes.
//!
//! The write routes are admin only; field staff and admins can both read
//! the per-campaign and global listings.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::Deserialize;

use fieldops_core::{AssignmentId, CampaignId, StoreId};

use crate::db::{AssignmentRepository, CampaignRepository, assignments::ReconcileSummary};
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{AddOutcome, Assignment, AssignmentOverviewRow, CampaignStoreRow};
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    // The capture is named `{id}` to match the sibling campaign routes this
    // router is merged with; the router rejects mixed names at one position.
    // PATCH takes an assignment ID in the second segment, DELETE a store ID.
    Router::new()
        .route("/campaign-stores", get(list_all_assignments))
        .route("/{id}/stores", get(list_campaign_stores).post(add_store))
        .route("/{id}/stores/bulk", post(bulk_reconcile))
        .route(
            "/{id}/stores/{child_id}",
            patch(toggle_done).delete(remove_store),
        )
        .route("/{id}/stores/{child_id}/folder", patch(set_folder))
}

#[derive(Debug, Deserialize)]
struct AddStoreRequest {
    store_id: Option<StoreId>,
}

#[derive(Debug, Deserialize)]
struct BulkRequest {
    #[serde(default, rename = "addIds")]
    add_ids: Vec<StoreId>,
    #[serde(default, rename = "removeIds")]
    remove_ids: Vec<StoreId>,
}

#[derive(Debug, Deserialize)]
struct FolderRequest {
    drive_folder_url: Option<String>,
}

/// `GET /api/campaigns/campaign-stores` - every assignment in the system,
/// joined with campaign name and store identity.
async fn list_all_assignments(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AssignmentOverviewRow>>>, AppError> {
    let rows = AssignmentRepository::new(state.pool()).list_all().await?;
    Ok(Json(ApiResponse::list(rows)))
}

/// `GET /api/campaigns/{id}/stores` - the stores assigned to one campaign.
///
/// 404 if the campaign itself does not exist; an existing campaign with no
/// assignments returns an empty list.
async fn list_campaign_stores(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
) -> Result<Json<ApiResponse<Vec<CampaignStoreRow>>>, AppError> {
    ensure_campaign_exists(&state, id).await?;

    let rows = AssignmentRepository::new(state.pool())
        .list_for_campaign(id)
        .await?;

    Ok(Json(ApiResponse::list(rows)))
}

/// `POST /api/campaigns/{id}/stores` - assign one store to a campaign.
///
/// Already-assigned stores are reported with a message instead of an error,
/// so the client can retry freely.
async fn add_store(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
    Json(body): Json<AddStoreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Assignment>>), AppError> {
    let store_id = body
        .store_id
        .ok_or_else(|| AppError::BadRequest("store_id is required".to_owned()))?;

    let outcome = AssignmentRepository::new(state.pool())
        .add(id, store_id)
        .await?;

    match outcome {
        AddOutcome::Created(assignment) => {
            tracing::info!(campaign_id = %id, store_id = %store_id, "store assigned");
            Ok((StatusCode::CREATED, Json(ApiResponse::data(assignment))))
        }
        AddOutcome::AlreadyAssigned => Ok((
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: None,
                message: Some("store already assigned to campaign".to_owned()),
                count: None,
            }),
        )),
    }
}

/// `POST /api/campaigns/{id}/stores/bulk` - atomically apply a set of
/// additions and removals.
///
/// A store ID present in both sets ends up removed. Re-submitting the same
/// body after a successful call reports zero changes.
async fn bulk_reconcile(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
    Json(body): Json<BulkRequest>,
) -> Result<Json<ApiResponse<ReconcileSummary>>, AppError> {
    ensure_campaign_exists(&state, id).await?;

    let summary = AssignmentRepository::new(state.pool())
        .reconcile(id, &body.add_ids, &body.remove_ids)
        .await?;

    tracing::info!(
        campaign_id = %id,
        added = summary.added,
        removed = summary.removed,
        "assignments reconciled"
    );

    Ok(Json(ApiResponse::data(summary)))
}

/// `PATCH /api/campaigns/{campaign_id}/stores/{assignment_id}` - flip the
/// completion flag of one assignment.
///
/// 404 if the assignment does not belong to the campaign in the path.
async fn toggle_done(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path((campaign_id, assignment_id)): Path<(CampaignId, AssignmentId)>,
) -> Result<Json<ApiResponse<Assignment>>, AppError> {
    let assignment = AssignmentRepository::new(state.pool())
        .toggle_done(campaign_id, assignment_id)
        .await?;

    Ok(Json(ApiResponse::data(assignment)))
}

/// `PATCH /api/campaigns/{campaign_id}/stores/{assignment_id}/folder` -
/// attach, replace, or clear the shared folder link of one assignment.
async fn set_folder(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path((campaign_id, assignment_id)): Path<(CampaignId, AssignmentId)>,
    Json(body): Json<FolderRequest>,
) -> Result<Json<ApiResponse<Assignment>>, AppError> {
    let assignment = AssignmentRepository::new(state.pool())
        .set_drive_folder(campaign_id, assignment_id, body.drive_folder_url.as_deref())
        .await?;

    Ok(Json(ApiResponse::data(assignment)))
}

/// `DELETE /api/campaigns/{campaign_id}/stores/{store_id}` - remove one
/// store from a campaign.
async fn remove_store(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path((campaign_id, store_id)): Path<(CampaignId, StoreId)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AssignmentRepository::new(state.pool())
        .remove(campaign_id, store_id)
        .await?;

    tracing::info!(campaign_id = %campaign_id, store_id = %store_id, "store unassigned");

    Ok(Json(ApiResponse::message("store removed from campaign")))
}

async fn ensure_campaign_exists(state: &AppState, id: CampaignId) -> Result<(), AppError> {
    CampaignRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("campaign not found".to_owned()))?;
    Ok(())
}
