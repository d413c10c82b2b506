//! Store repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldops_core::StoreId;

use super::RepositoryError;
use crate::models::Store;

/// Internal row type for `store` queries.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: Uuid,
    board_name: String,
    store_code: String,
    display_name: Option<String>,
    address: Option<String>,
    district: Option<String>,
    province: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.id),
            board_name: row.board_name,
            store_code: row.store_code,
            display_name: row.display_name,
            address: row.address,
            district: row.district,
            province: row.province,
            latitude: row.latitude,
            longitude: row.longitude,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Whitelisted store fields for create and update.
///
/// Requests deserialize into this shape before touching the database, so
/// unexpected body fields are dropped server-side.
#[derive(Debug, serde::Deserialize)]
pub struct StoreFields {
    /// Retail chain / board name.
    pub board_name: String,
    /// Human-readable store code.
    pub store_code: String,
    /// Display name shown in listings.
    pub display_name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// District.
    pub district: Option<String>,
    /// Province.
    pub province: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Whether the store is operating.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

const STORE_COLUMNS: &str = "id, board_name, store_code, display_name, address, district, \
                             province, latitude, longitude, is_active, created_at, updated_at";

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all stores, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM store ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the stores of one retail chain, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_chain(&self, board_name: &str) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM store WHERE board_name = $1 ORDER BY created_at DESC"
        ))
        .bind(board_name)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM store WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &StoreFields) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            r"
            INSERT INTO store (board_name, store_code, display_name, address, district,
                               province, latitude, longitude, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {STORE_COLUMNS}
            "
        ))
        .bind(&fields.board_name)
        .bind(&fields.store_code)
        .bind(&fields.display_name)
        .bind(&fields.address)
        .bind(&fields.district)
        .bind(&fields.province)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.is_active)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a store's whitelisted fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: StoreId,
        fields: &StoreFields,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            r"
            UPDATE store
            SET board_name = $1, store_code = $2, display_name = $3, address = $4,
                district = $5, province = $6, latitude = $7, longitude = $8,
                is_active = $9, updated_at = NOW()
            WHERE id = $10
            RETURNING {STORE_COLUMNS}
            "
        ))
        .bind(&fields.board_name)
        .bind(&fields.store_code)
        .bind(&fields.display_name)
        .bind(&fields.address)
        .bind(&fields.district)
        .bind(&fields.province)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.is_active)
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a store.
    ///
    /// Assignment rows referencing the store are removed by the cascading
    /// foreign key on `campaign_store.store_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn delete(&self, id: StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
