//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fieldops_core::{Email, Role, UserId};

/// A back-office user account.
///
/// The password hash never leaves the database layer; this type is safe to
/// serialize into API responses.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Login email (unique).
    pub email: Email,
    /// Optional contact number.
    pub phone_number: Option<String>,
    /// Authorization role.
    pub role: Role,
    /// Whether the account can log in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The authenticated principal attached to a request.
///
/// Resolved from the bearer token by the auth extractor on every request,
/// so a deactivated or deleted user is rejected even with a live token.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Login email.
    pub email: Email,
    /// Authorization role.
    pub role: Role,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}
