//! User account management (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use fieldops_core::{Email, Role, UserId};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::User;
use crate::response::ApiResponse;
use crate::services::auth::hash_password;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone_number: Option<String>,
    role: Option<Role>,
}

#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    full_name: Option<String>,
    role: Option<Role>,
    is_active: Option<bool>,
}

/// `GET /api/users` - list all accounts.
async fn list_users(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    let users = UserRepository::new(state.pool()).list_all().await?;
    Ok(Json(ApiResponse::list(users)))
}

/// `GET /api/users/{id}` - fetch one account.
async fn get_user(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

    Ok(Json(ApiResponse::data(user)))
}

/// `POST /api/users` - create an account on someone's behalf.
async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let (Some(full_name), Some(email), Some(password)) =
        (body.full_name, body.email, body.password)
    else {
        return Err(AppError::BadRequest(
            "full_name, email and password are required".to_owned(),
        ));
    };

    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let role = body.role.unwrap_or(Role::Parttime);

    let password_hash =
        hash_password(&password).map_err(|e| AppError::Internal(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .create(
            &full_name,
            &email,
            &password_hash,
            body.phone_number.as_deref(),
            role,
        )
        .await?;

    tracing::info!(user_id = %user.id, created_by = %admin.id, "account created");

    Ok((StatusCode::CREATED, Json(ApiResponse::data(user))))
}

/// `PUT /api/users/{id}` - update name, role, or active flag.
///
/// Fields omitted from the body keep their current value.
async fn update_user(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let repo = UserRepository::new(state.pool());

    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

    let full_name = body.full_name.unwrap_or(existing.full_name);
    let role = body.role.unwrap_or(existing.role);
    let is_active = body.is_active.unwrap_or(existing.is_active);

    let user = repo.update(id, &full_name, role, is_active).await?;

    Ok(Json(ApiResponse::data(user)))
}

/// `DELETE /api/users/{id}` - delete an account.
async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if id == admin.id {
        return Err(AppError::BadRequest(
            "cannot delete your own account".to_owned(),
        ));
    }

    UserRepository::new(state.pool()).delete(id).await?;

    tracing::info!(user_id = %id, deleted_by = %admin.id, "account deleted");

    Ok(Json(ApiResponse::message("user deleted")))
}
