//! Campaign-store assignment domain types.
//!
//! An assignment links one campaign to one store and carries a per-row
//! completion flag. The `(campaign_id, store_id)` pair is unique: a store is
//! assigned to a campaign at most once. The flag is meaningful only for that
//! pair - the same store can be done in one campaign and open in another.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use fieldops_core::{AssignmentId, CampaignId, StoreId};

/// A single campaign-store assignment row.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    /// Unique assignment ID.
    pub id: AssignmentId,
    /// Owning campaign.
    pub campaign_id: CampaignId,
    /// Assigned store.
    pub store_id: StoreId,
    /// Completion flag for this assignment.
    pub is_done: bool,
    /// Shared folder with field photos, if one has been attached.
    pub drive_folder_url: Option<String>,
    /// When the store was assigned.
    pub created_at: DateTime<Utc>,
}

/// Outcome of adding a single store to a campaign.
///
/// Adding an already-assigned store is not an error; the caller gets a
/// distinct signal so the operation stays idempotent.
#[derive(Debug, Clone)]
pub enum AddOutcome {
    /// A new assignment row was created (with `is_done = false`).
    Created(Assignment),
    /// The `(campaign, store)` pair already existed; nothing changed.
    AlreadyAssigned,
}

/// An assignment joined with store attributes, for the per-campaign listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CampaignStoreRow {
    /// Assignment row ID (used by the toggle endpoint).
    pub assignment_id: AssignmentId,
    /// Completion flag.
    pub is_done: bool,
    /// Attached folder link, if any.
    pub drive_folder_url: Option<String>,
    /// Assigned store ID.
    pub store_id: StoreId,
    /// Store code (listing sort key).
    pub store_code: String,
    /// Retail chain name.
    pub board_name: String,
    /// Store display name.
    pub display_name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// District.
    pub district: Option<String>,
    /// Province.
    pub province: Option<String>,
    /// Latitude for the map view.
    pub latitude: Option<f64>,
    /// Longitude for the map view.
    pub longitude: Option<f64>,
}

/// An assignment joined with campaign and store identity, for the global
/// map/reporting view.
///
/// Not paginated: the data volume is small today and the map view wants the
/// full set. Revisit if store counts grow past a few thousand.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AssignmentOverviewRow {
    /// Assignment row ID.
    pub assignment_id: AssignmentId,
    /// Owning campaign.
    pub campaign_id: CampaignId,
    /// Campaign name.
    pub campaign_name: String,
    /// Assigned store.
    pub store_id: StoreId,
    /// Store code.
    pub store_code: String,
    /// Retail chain name.
    pub board_name: String,
    /// Completion flag.
    pub is_done: bool,
    /// Attached folder link, if any.
    pub drive_folder_url: Option<String>,
}

/// The effective add/remove sets for a bulk reconciliation, computed from
/// the current assignment set and the caller's requested changes.
///
/// The plan is a plain set union/difference, independent of how the
/// repository applies it:
///
/// - a store requested in both `add_ids` and `remove_ids` is removed
///   (removals win - the overlap is treated as "undo the add"),
/// - adds already present and removes already absent drop out, so applying
///   the same plan twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Stores to insert (not currently assigned, requested, not removed).
    pub to_add: Vec<StoreId>,
    /// Stores to delete (currently assigned and requested for removal).
    pub to_remove: Vec<StoreId>,
}

impl ReconcilePlan {
    /// Compute the plan for one campaign.
    ///
    /// `current` is the set of store IDs currently assigned; `add_ids` and
    /// `remove_ids` are the caller's requested changes, duplicates allowed.
    #[must_use]
    pub fn compute(current: &[StoreId], add_ids: &[StoreId], remove_ids: &[StoreId]) -> Self {
        let current: BTreeSet<_> = current.iter().map(StoreId::as_uuid).collect();
        let removes: BTreeSet<_> = remove_ids.iter().map(StoreId::as_uuid).collect();
        let adds: BTreeSet<_> = add_ids
            .iter()
            .map(StoreId::as_uuid)
            .filter(|id| !removes.contains(id))
            .collect();

        let to_add = adds
            .iter()
            .filter(|id| !current.contains(*id))
            .map(|id| StoreId::new(*id))
            .collect();
        let to_remove = removes
            .iter()
            .filter(|id| current.contains(*id))
            .map(|id| StoreId::new(*id))
            .collect();

        Self { to_add, to_remove }
    }

    /// True when applying the plan would change nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<StoreId> {
        (0..n).map(|_| StoreId::generate()).collect()
    }

    #[test]
    fn plan_adds_only_missing_stores() {
        let stores = ids(3);
        let current = vec![stores[0]];
        let plan = ReconcilePlan::compute(&current, &stores, &[]);

        assert_eq!(plan.to_add.len(), 2);
        assert!(!plan.to_add.contains(&stores[0]));
        assert!(plan.to_remove.is_empty());
    }

    #[test]
    fn plan_removes_only_present_stores() {
        let stores = ids(2);
        let current = vec![stores[0]];
        let plan = ReconcilePlan::compute(&current, &[], &stores);

        assert_eq!(plan.to_remove, vec![stores[0]]);
        assert!(plan.to_add.is_empty());
    }

    #[test]
    fn overlapping_id_ends_up_removed() {
        let store = StoreId::generate();

        // Not currently assigned: the add is cancelled, nothing happens.
        let plan = ReconcilePlan::compute(&[], &[store], &[store]);
        assert!(plan.is_noop());

        // Currently assigned: the remove wins.
        let plan = ReconcilePlan::compute(&[store], &[store], &[store]);
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove, vec![store]);
    }

    #[test]
    fn reapplying_a_committed_plan_is_a_noop() {
        let stores = ids(3);
        let current = vec![stores[2]];
        let plan = ReconcilePlan::compute(&current, &stores[..2].to_vec(), &[stores[2]]);

        // Simulate the commit: current becomes (current + to_add) - to_remove.
        let mut after: Vec<StoreId> = current;
        after.extend(&plan.to_add);
        after.retain(|id| !plan.to_remove.contains(id));

        let replay = ReconcilePlan::compute(&after, &stores[..2].to_vec(), &[stores[2]]);
        assert!(replay.is_noop());
    }

    #[test]
    fn duplicate_requested_ids_collapse() {
        let store = StoreId::generate();
        let plan = ReconcilePlan::compute(&[], &[store, store, store], &[]);
        assert_eq!(plan.to_add, vec![store]);
    }
}
