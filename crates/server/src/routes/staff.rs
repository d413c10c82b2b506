//! Field staff records (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use fieldops_core::StaffId;

use crate::db::{StaffRepository, staff::StaffFields};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Staff;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route(
            "/{id}",
            get(get_staff).put(update_staff).delete(delete_staff),
        )
}

/// `GET /api/staffs` - list all staff records.
async fn list_staff(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Staff>>>, AppError> {
    let staff = StaffRepository::new(state.pool()).list_all().await?;
    Ok(Json(ApiResponse::list(staff)))
}

/// `GET /api/staffs/{id}` - fetch one staff record.
async fn get_staff(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
) -> Result<Json<ApiResponse<Staff>>, AppError> {
    let staff = StaffRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("staff not found".to_owned()))?;

    Ok(Json(ApiResponse::data(staff)))
}

/// `POST /api/staffs` - create a staff record.
async fn create_staff(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(fields): Json<StaffFields>,
) -> Result<(StatusCode, Json<ApiResponse<Staff>>), AppError> {
    validate_fields(&fields)?;

    let staff = StaffRepository::new(state.pool()).create(&fields).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(staff))))
}

/// `PUT /api/staffs/{id}` - replace a staff record's fields.
async fn update_staff(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
    Json(fields): Json<StaffFields>,
) -> Result<Json<ApiResponse<Staff>>, AppError> {
    validate_fields(&fields)?;

    let staff = StaffRepository::new(state.pool()).update(id, &fields).await?;

    Ok(Json(ApiResponse::data(staff)))
}

/// `DELETE /api/staffs/{id}` - delete a staff record.
async fn delete_staff(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    StaffRepository::new(state.pool()).delete(id).await?;
    Ok(Json(ApiResponse::message("staff deleted")))
}

fn validate_fields(fields: &StaffFields) -> Result<(), AppError> {
    if fields.full_name.trim().is_empty() {
        return Err(AppError::BadRequest("full_name is required".to_owned()));
    }
    Ok(())
}
