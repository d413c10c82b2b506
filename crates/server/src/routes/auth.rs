//! Account registration and login.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};

use fieldops_core::{Email, Role};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::response::ApiResponse;
use crate::services::auth::{hash_password, issue_token, verify_password};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Token plus the account it belongs to, returned on login.
#[derive(Debug, Serialize)]
struct LoginData {
    token: String,
    user: User,
}

/// `POST /api/auth/register` - create an account.
///
/// The route is open, so new accounts always get the restricted `parttime`
/// role; a `role` field in the body is ignored. Admins are created via
/// `fieldops-cli admin create` or the admin-only user management routes.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let (Some(full_name), Some(email), Some(password)) =
        (body.full_name, body.email, body.password)
    else {
        return Err(AppError::BadRequest(
            "full_name, email and password are required".to_owned(),
        ));
    };

    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_owned(),
        ));
    }

    let email = Email::parse(&email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let password_hash =
        hash_password(&password).map_err(|e| AppError::Internal(e.to_string()))?;

    let user = UserRepository::new(state.pool())
        .create(
            &full_name,
            &email,
            &password_hash,
            body.phone_number.as_deref(),
            Role::Parttime,
        )
        .await?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((StatusCode::CREATED, Json(ApiResponse::data(user))))
}

/// `POST /api/auth/login` - verify credentials and issue a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, AppError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::BadRequest(
            "email and password are required".to_owned(),
        ));
    };

    let email = Email::parse(&email)
        .map_err(|_| AppError::Unauthorized("invalid credentials".to_owned()))?;

    let credentials = UserRepository::new(state.pool())
        .get_credentials_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_owned()))?;

    let verified = verify_password(&password, &credentials.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !verified {
        return Err(AppError::Unauthorized("invalid credentials".to_owned()));
    }

    if !credentials.user.is_active {
        return Err(AppError::Unauthorized("account deactivated".to_owned()));
    }

    let config = state.config();
    let token = issue_token(
        config.jwt_secret_bytes(),
        config.jwt_ttl_hours,
        credentials.user.id,
        credentials.user.role,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %credentials.user.id, "login succeeded");

    Ok(Json(ApiResponse::data(LoginData {
        token,
        user: credentials.user,
    })))
}
