//! Database layer for the FieldOps `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `app_user` - back-office accounts (bcrypt password hash, role)
//! - `staff` - field staff personnel records
//! - `store` - retail locations
//! - `campaign` - marketing campaigns
//! - `campaign_store` - campaign-store assignments (unique pair, done flag)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p fieldops-cli -- migrate
//! ```

pub mod assignments;
pub mod campaigns;
pub mod staff;
pub mod stores;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use assignments::AssignmentRepository;
pub use campaigns::CampaignRepository;
pub use staff::StaffRepository;
pub use stores::StoreRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, duplicate assignment).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify an sqlx error, turning unique-constraint violations into
    /// [`RepositoryError::Conflict`].
    ///
    /// This is the only place the engine looks at vendor error encodings;
    /// everything above works with the domain-level outcome.
    pub(crate) fn from_sqlx(e: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_msg.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is the only shared mutable resource in the process; every
/// transaction path acquires from it and releases on all exit paths
/// (sqlx transactions roll back on drop).
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
