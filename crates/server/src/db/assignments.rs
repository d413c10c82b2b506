//! Campaign-store assignment repository.
//!
//! Owns the many-to-many relation between campaigns and stores, including
//! the per-assignment completion flag. Single add/remove are idempotent at
//! the statement level (`ON CONFLICT DO NOTHING` / delete-if-present); bulk
//! reconciliation wraps both phases in one transaction so partial results
//! are never observable.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fieldops_core::{AssignmentId, CampaignId, StoreId};

use super::RepositoryError;
use crate::models::assignment::{
    AddOutcome, Assignment, AssignmentOverviewRow, CampaignStoreRow, ReconcilePlan,
};

/// Internal row type for `campaign_store` queries.
#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    campaign_id: Uuid,
    store_id: Uuid,
    is_done: bool,
    drive_folder_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: AssignmentId::new(row.id),
            campaign_id: CampaignId::new(row.campaign_id),
            store_id: StoreId::new(row.store_id),
            is_done: row.is_done,
            drive_folder_url: row.drive_folder_url,
            created_at: row.created_at,
        }
    }
}

/// Counts of rows actually changed by a bulk reconciliation.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ReconcileSummary {
    /// Assignment rows inserted.
    pub added: u64,
    /// Assignment rows deleted.
    pub removed: u64,
}

/// Repository for campaign-store assignment operations.
pub struct AssignmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AssignmentRepository<'a> {
    /// Create a new assignment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the assignments of one campaign, joined with store attributes,
    /// ordered by store code.
    ///
    /// A campaign with no assignments yields an empty vec, not an error;
    /// the campaign's own existence is the route's concern.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CampaignStoreRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, CampaignStoreRow>(
            r"
            SELECT cs.id AS assignment_id, cs.is_done, cs.drive_folder_url,
                   s.id AS store_id, s.store_code, s.board_name, s.display_name,
                   s.address, s.district, s.province, s.latitude, s.longitude
            FROM campaign_store cs
            JOIN store s ON s.id = cs.store_id
            WHERE cs.campaign_id = $1
            ORDER BY s.store_code, s.id
            ",
        )
        .bind(campaign_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List every assignment joined with campaign name and store identity.
    ///
    /// Feeds the map and reporting views. Unpaginated; see
    /// [`AssignmentOverviewRow`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<AssignmentOverviewRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, AssignmentOverviewRow>(
            r"
            SELECT cs.id AS assignment_id, cs.is_done, cs.drive_folder_url,
                   c.id AS campaign_id, c.name AS campaign_name,
                   s.id AS store_id, s.store_code, s.board_name
            FROM campaign_store cs
            JOIN campaign c ON c.id = cs.campaign_id
            JOIN store s ON s.id = cs.store_id
            ORDER BY c.name, s.store_code
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Assign one store to a campaign.
    ///
    /// Insert-or-ignore on the unique `(campaign_id, store_id)` pair: if the
    /// store is already assigned the call reports
    /// [`AddOutcome::AlreadyAssigned`] instead of failing, so retries are
    /// safe. New rows start with `is_done = false`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the campaign or store does not
    /// exist, `RepositoryError::Database` for other failures.
    pub async fn add(
        &self,
        campaign_id: CampaignId,
        store_id: StoreId,
    ) -> Result<AddOutcome, RepositoryError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r"
            INSERT INTO campaign_store (campaign_id, store_id)
            VALUES ($1, $2)
            ON CONFLICT (campaign_id, store_id) DO NOTHING
            RETURNING id, campaign_id, store_id, is_done, drive_folder_url, created_at
            ",
        )
        .bind(campaign_id.as_uuid())
        .bind(store_id.as_uuid())
        .fetch_optional(self.pool)
        .await
        .map_err(classify_reference_error)?;

        Ok(row.map_or(AddOutcome::AlreadyAssigned, |r| AddOutcome::Created(r.into())))
    }

    /// Remove one store from a campaign.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such mapping exists,
    /// `RepositoryError::Database` for other failures.
    pub async fn remove(
        &self,
        campaign_id: CampaignId,
        store_id: StoreId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM campaign_store
            WHERE campaign_id = $1 AND store_id = $2
            ",
        )
        .bind(campaign_id.as_uuid())
        .bind(store_id.as_uuid())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Atomically apply a set of additions and removals to one campaign.
    ///
    /// The current assignment set is read inside the transaction and diffed
    /// into a [`ReconcilePlan`]; additions run first, removals second, and a
    /// store requested in both sets ends up removed (removals win). Both
    /// phases commit together or not at all, and re-submitting the same sets
    /// after a successful commit changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an added store or the campaign
    /// does not exist, `RepositoryError::Database` for other failures. The
    /// transaction rolls back on any error.
    pub async fn reconcile(
        &self,
        campaign_id: CampaignId,
        add_ids: &[StoreId],
        remove_ids: &[StoreId],
    ) -> Result<ReconcileSummary, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Vec<Uuid> = sqlx::query_scalar(
            r"SELECT store_id FROM campaign_store WHERE campaign_id = $1",
        )
        .bind(campaign_id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;
        let current: Vec<StoreId> = current.into_iter().map(StoreId::new).collect();

        let plan = ReconcilePlan::compute(&current, add_ids, remove_ids);

        let mut added = 0;
        if !plan.to_add.is_empty() {
            let ids: Vec<Uuid> = plan.to_add.iter().map(|id| id.as_uuid()).collect();
            // ON CONFLICT keeps a concurrent insert of the same pair from
            // failing the whole transaction.
            added = sqlx::query(
                r"
                INSERT INTO campaign_store (campaign_id, store_id)
                SELECT $1, unnest($2::uuid[])
                ON CONFLICT (campaign_id, store_id) DO NOTHING
                ",
            )
            .bind(campaign_id.as_uuid())
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(classify_reference_error)?
            .rows_affected();
        }

        let mut removed = 0;
        if !plan.to_remove.is_empty() {
            let ids: Vec<Uuid> = plan.to_remove.iter().map(|id| id.as_uuid()).collect();
            removed = sqlx::query(
                r"
                DELETE FROM campaign_store
                WHERE campaign_id = $1 AND store_id = ANY($2::uuid[])
                ",
            )
            .bind(campaign_id.as_uuid())
            .bind(&ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        Ok(ReconcileSummary { added, removed })
    }

    /// Flip the completion flag of one assignment and return the updated row.
    ///
    /// The lookup is scoped to `(assignment_id, campaign_id)` so an
    /// assignment belonging to a different campaign cannot be toggled by
    /// reusing its row ID under another campaign path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the pair does not resolve to a
    /// row, `RepositoryError::Database` for other failures.
    pub async fn toggle_done(
        &self,
        campaign_id: CampaignId,
        assignment_id: AssignmentId,
    ) -> Result<Assignment, RepositoryError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r"
            UPDATE campaign_store
            SET is_done = NOT is_done
            WHERE id = $1 AND campaign_id = $2
            RETURNING id, campaign_id, store_id, is_done, drive_folder_url, created_at
            ",
        )
        .bind(assignment_id.as_uuid())
        .bind(campaign_id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Attach or replace the shared folder link of one assignment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the pair does not resolve to a
    /// row, `RepositoryError::Database` for other failures.
    pub async fn set_drive_folder(
        &self,
        campaign_id: CampaignId,
        assignment_id: AssignmentId,
        drive_folder_url: Option<&str>,
    ) -> Result<Assignment, RepositoryError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r"
            UPDATE campaign_store
            SET drive_folder_url = $3
            WHERE id = $1 AND campaign_id = $2
            RETURNING id, campaign_id, store_id, is_done, drive_folder_url, created_at
            ",
        )
        .bind(assignment_id.as_uuid())
        .bind(campaign_id.as_uuid())
        .bind(drive_folder_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}

/// Map a foreign-key violation (campaign or store missing) to `NotFound`;
/// everything else stays a database error.
fn classify_reference_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(e)
}
