//! Password hashing and bearer-token handling.
//!
//! Credentials are bcrypt hashes; sessions are stateless signed tokens
//! (HS256). The token carries the principal's ID and role, but the role in
//! the claim is advisory only - the auth extractor re-resolves the principal
//! from the database on every request.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fieldops_core::{Role, UserId};

/// Errors from credential or token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password hashing or verification failed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token could not be issued or validated.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Configured token lifetime does not fit in a timestamp.
    #[error("invalid token lifetime: {0} hours")]
    InvalidTtl(i64),
}

/// Claims carried by an issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal's user ID.
    pub sub: UserId,
    /// Role at issue time (advisory; re-checked against the database).
    pub role: Role,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

/// Hash a password for storage.
///
/// # Errors
///
/// Returns `AuthError::Hash` if bcrypt fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns `AuthError::Hash` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Issue a signed bearer token for a principal.
///
/// # Errors
///
/// Returns `AuthError` if the lifetime is out of range or signing fails.
pub fn issue_token(
    secret: &[u8],
    ttl_hours: i64,
    user_id: UserId,
    role: Role,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let expires = now
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or(AuthError::InvalidTtl(ttl_hours))?;

    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: expires.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Validate a bearer token and return its claims.
///
/// # Errors
///
/// Returns `AuthError::Token` for a bad signature, malformed token, or
/// expired claim.
pub fn decode_token(secret: &[u8], token: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn token_round_trips() {
        let user_id = UserId::generate();
        let token = issue_token(SECRET, 24, user_id, Role::Admin).expect("issue");
        let claims = decode_token(SECRET, &token).expect("decode");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(SECRET, 24, UserId::generate(), Role::Parttime).expect("issue");
        assert!(decode_token(b"another-secret-another-secret-ab", &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(decode_token(SECRET, "not.a.token").is_err());
    }

    #[test]
    fn password_verifies_against_own_hash_only() {
        let hash = hash_password("field-ops-2024").expect("hash");
        assert!(verify_password("field-ops-2024", &hash).expect("verify"));
        assert!(!verify_password("wrong-password", &hash).expect("verify"));
    }
}
