//! Staff repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldops_core::StaffId;

use super::RepositoryError;
use crate::models::Staff;

/// Internal row type for `staff` queries.
#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    id: Uuid,
    full_name: String,
    day_of_birth: Option<NaiveDate>,
    gender: Option<String>,
    address: Option<String>,
    id_number: Option<String>,
    id_issued_date: Option<NaiveDate>,
    tax_id: Option<String>,
    phone_number: Option<String>,
    bank_account: Option<String>,
    bank_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Self {
            id: StaffId::new(row.id),
            full_name: row.full_name,
            day_of_birth: row.day_of_birth,
            gender: row.gender,
            address: row.address,
            id_number: row.id_number,
            id_issued_date: row.id_issued_date,
            tax_id: row.tax_id,
            phone_number: row.phone_number,
            bank_account: row.bank_account,
            bank_name: row.bank_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Whitelisted staff fields for create and update.
#[derive(Debug, serde::Deserialize)]
pub struct StaffFields {
    /// Full legal name.
    pub full_name: String,
    /// Date of birth.
    pub day_of_birth: Option<NaiveDate>,
    /// Self-reported gender.
    pub gender: Option<String>,
    /// Home address.
    pub address: Option<String>,
    /// National ID number.
    pub id_number: Option<String>,
    /// National ID issue date.
    pub id_issued_date: Option<NaiveDate>,
    /// Tax identification number.
    pub tax_id: Option<String>,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Payout bank account number.
    pub bank_account: Option<String>,
    /// Payout bank name.
    pub bank_name: Option<String>,
}

const STAFF_COLUMNS: &str = "id, full_name, day_of_birth, gender, address, id_number, \
                             id_issued_date, tax_id, phone_number, bank_account, bank_name, \
                             created_at, updated_at";

/// Repository for staff database operations.
pub struct StaffRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new staff repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all staff, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Staff>, RepositoryError> {
        let rows = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a staff member by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StaffId) -> Result<Option<Staff>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a staff record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &StaffFields) -> Result<Staff, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            r"
            INSERT INTO staff (full_name, day_of_birth, gender, address, id_number,
                               id_issued_date, tax_id, phone_number, bank_account, bank_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {STAFF_COLUMNS}
            "
        ))
        .bind(&fields.full_name)
        .bind(fields.day_of_birth)
        .bind(&fields.gender)
        .bind(&fields.address)
        .bind(&fields.id_number)
        .bind(fields.id_issued_date)
        .bind(&fields.tax_id)
        .bind(&fields.phone_number)
        .bind(&fields.bank_account)
        .bind(&fields.bank_name)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a staff record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: StaffId,
        fields: &StaffFields,
    ) -> Result<Staff, RepositoryError> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            r"
            UPDATE staff
            SET full_name = $1, day_of_birth = $2, gender = $3, address = $4,
                id_number = $5, id_issued_date = $6, tax_id = $7, phone_number = $8,
                bank_account = $9, bank_name = $10, updated_at = NOW()
            WHERE id = $11
            RETURNING {STAFF_COLUMNS}
            "
        ))
        .bind(&fields.full_name)
        .bind(fields.day_of_birth)
        .bind(&fields.gender)
        .bind(&fields.address)
        .bind(&fields.id_number)
        .bind(fields.id_issued_date)
        .bind(&fields.tax_id)
        .bind(&fields.phone_number)
        .bind(&fields.bank_account)
        .bind(&fields.bank_name)
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a staff record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the record doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn delete(&self, id: StaffId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
