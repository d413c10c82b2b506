//! Authentication extractors.
//!
//! Every protected route takes one of these extractors. The bearer token is
//! validated and then resolved to a live `app_user` row, so a deleted or
//! deactivated account is rejected even while its token is still unexpired.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use fieldops_core::Role;

use crate::db::UserRepository;
use crate::models::CurrentUser;
use crate::response::ApiResponse;
use crate::services::auth::decode_token;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.full_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that additionally requires the `admin` role.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for failed authentication or authorization.
pub enum AuthRejection {
    /// No token, bad token, or no matching active principal.
    Unauthorized(&'static str),
    /// Authenticated, but the role does not permit the route.
    Forbidden(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_owned()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Resolve the bearer token in `parts` to a live principal.
async fn resolve_principal(
    parts: &Parts,
    state: &AppState,
) -> Result<CurrentUser, AuthRejection> {
    let header_value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthRejection::Unauthorized("not authorized, no token"))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::Unauthorized("not authorized, no token"))?;

    let claims = decode_token(state.config().jwt_secret_bytes(), token)
        .map_err(|_| AuthRejection::Unauthorized("not authorized, token failed"))?;

    let user = UserRepository::new(state.pool())
        .get_by_id(claims.sub)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "principal lookup failed");
            AuthRejection::Unauthorized("not authorized, token failed")
        })?
        .ok_or(AuthRejection::Unauthorized("user not found"))?;

    if !user.is_active {
        return Err(AuthRejection::Unauthorized("account deactivated"));
    }

    Ok(user.into())
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_principal(parts, state).await.map(Self)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_principal(parts, state).await?;

        if user.role != Role::Admin {
            return Err(AuthRejection::Forbidden(format!(
                "role '{}' is not authorized to access this route",
                user.role
            )));
        }

        Ok(Self(user))
    }
}
