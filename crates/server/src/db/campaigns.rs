//! Campaign repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldops_core::{CampaignId, CampaignStatus, UserId};

use super::RepositoryError;
use crate::models::Campaign;

/// Internal row type for `campaign` queries.
#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: CampaignStatus,
    created_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Self {
            id: CampaignId::new(row.id),
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status,
            created_by: row.created_by.map(UserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields accepted when creating a campaign.
#[derive(Debug)]
pub struct NewCampaign<'a> {
    /// Campaign name.
    pub name: &'a str,
    /// Free-form description.
    pub description: Option<&'a str>,
    /// First day of the campaign.
    pub start_date: NaiveDate,
    /// Last day of the campaign.
    pub end_date: NaiveDate,
    /// Creating principal.
    pub created_by: UserId,
}

/// Fields accepted when updating a campaign.
#[derive(Debug)]
pub struct CampaignUpdate<'a> {
    /// Campaign name.
    pub name: &'a str,
    /// Free-form description.
    pub description: Option<&'a str>,
    /// First day of the campaign.
    pub start_date: NaiveDate,
    /// Last day of the campaign.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: CampaignStatus,
}

const CAMPAIGN_COLUMNS: &str =
    "id, name, description, start_date, end_date, status, created_by, created_at, updated_at";

/// Repository for campaign database operations.
pub struct CampaignRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CampaignRepository<'a> {
    /// Create a new campaign repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all campaigns, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Campaign>, RepositoryError> {
        let rows = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaign ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List campaigns in a given lifecycle status, newest start date first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: CampaignStatus,
    ) -> Result<Vec<Campaign>, RepositoryError> {
        let rows = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaign WHERE status = $1 ORDER BY start_date DESC"
        ))
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a campaign by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, RepositoryError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaign WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a campaign. New campaigns start in `draft` status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: NewCampaign<'_>) -> Result<Campaign, RepositoryError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            r"
            INSERT INTO campaign (name, description, start_date, end_date, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CAMPAIGN_COLUMNS}
            "
        ))
        .bind(new.name)
        .bind(new.description)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.created_by.as_uuid())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a campaign's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the campaign doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: CampaignId,
        update: CampaignUpdate<'_>,
    ) -> Result<Campaign, RepositoryError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            r"
            UPDATE campaign
            SET name = $1, description = $2, start_date = $3, end_date = $4,
                status = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {CAMPAIGN_COLUMNS}
            "
        ))
        .bind(update.name)
        .bind(update.description)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(update.status)
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a campaign and all of its assignments.
    ///
    /// The assignment rows go first, in the same transaction, so a failure
    /// at either step rolls the whole deletion back - orphaned assignments
    /// are never left behind.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the campaign doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn delete(&self, id: CampaignId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM campaign_store WHERE campaign_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM campaign WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Rolls back the assignment deletes on drop.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}
