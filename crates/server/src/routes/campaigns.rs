//! Campaign lifecycle management.
//!
//! Reads are open to any authenticated role; writes are admin only.
//! Assignment routes live in [`super::assignments`].

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use fieldops_core::{CampaignId, CampaignStatus};

use crate::db::{
    CampaignRepository,
    campaigns::{CampaignUpdate, NewCampaign},
};
use crate::error::AppError;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::Campaign;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_campaigns).post(create_campaign))
        .route(
            "/{id}",
            get(get_campaign)
                .put(update_campaign)
                .delete(delete_campaign),
        )
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<CampaignStatus>,
}

#[derive(Debug, Deserialize)]
struct CreateCampaignRequest {
    name: Option<String>,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct UpdateCampaignRequest {
    name: Option<String>,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: Option<CampaignStatus>,
}

/// `GET /api/campaigns` - list campaigns, optionally filtered by status.
async fn list_campaigns(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Campaign>>>, AppError> {
    let repo = CampaignRepository::new(state.pool());

    let campaigns = match query.status {
        Some(status) => repo.list_by_status(status).await?,
        None => repo.list_all().await?,
    };

    Ok(Json(ApiResponse::list(campaigns)))
}

/// `GET /api/campaigns/{id}` - fetch one campaign.
async fn get_campaign(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
) -> Result<Json<ApiResponse<Campaign>>, AppError> {
    let campaign = CampaignRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("campaign not found".to_owned()))?;

    Ok(Json(ApiResponse::data(campaign)))
}

/// `POST /api/campaigns` - create a campaign in `draft` status.
async fn create_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Campaign>>), AppError> {
    let (Some(name), Some(start_date), Some(end_date)) =
        (body.name, body.start_date, body.end_date)
    else {
        return Err(AppError::BadRequest(
            "name, start_date and end_date are required".to_owned(),
        ));
    };

    if end_date < start_date {
        return Err(AppError::BadRequest(
            "end_date must not be before start_date".to_owned(),
        ));
    }

    let campaign = CampaignRepository::new(state.pool())
        .create(NewCampaign {
            name: &name,
            description: body.description.as_deref(),
            start_date,
            end_date,
            created_by: admin.id,
        })
        .await?;

    tracing::info!(campaign_id = %campaign.id, "campaign created");

    Ok((StatusCode::CREATED, Json(ApiResponse::data(campaign))))
}

/// `PUT /api/campaigns/{id}` - update a campaign's editable fields.
///
/// Fields omitted from the body keep their current value.
async fn update_campaign(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
    Json(body): Json<UpdateCampaignRequest>,
) -> Result<Json<ApiResponse<Campaign>>, AppError> {
    let repo = CampaignRepository::new(state.pool());

    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("campaign not found".to_owned()))?;

    let name = body.name.unwrap_or(existing.name);
    let description = body.description.or(existing.description);
    let start_date = body.start_date.unwrap_or(existing.start_date);
    let end_date = body.end_date.unwrap_or(existing.end_date);
    let status = body.status.unwrap_or(existing.status);

    if end_date < start_date {
        return Err(AppError::BadRequest(
            "end_date must not be before start_date".to_owned(),
        ));
    }

    let campaign = repo
        .update(
            id,
            CampaignUpdate {
                name: &name,
                description: description.as_deref(),
                start_date,
                end_date,
                status,
            },
        )
        .await?;

    Ok(Json(ApiResponse::data(campaign)))
}

/// `DELETE /api/campaigns/{id}` - delete a campaign and its assignments.
async fn delete_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CampaignId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CampaignRepository::new(state.pool()).delete(id).await?;

    tracing::info!(campaign_id = %id, deleted_by = %admin.id, "campaign deleted");

    Ok(Json(ApiResponse::message(
        "campaign and its store assignments deleted",
    )))
}
