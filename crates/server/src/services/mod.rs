//! Business logic services.
//!
//! # Services
//!
//! - `auth` - password hashing and bearer-token issue/verify

pub mod auth;

pub use auth::{AuthError, Claims};
