//! Marketing campaign domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use fieldops_core::{CampaignId, CampaignStatus, UserId};

/// A marketing campaign.
///
/// Store assignments live in the campaign-store relation, not here; see
/// [`crate::models::assignment`].
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    /// Unique campaign ID.
    pub id: CampaignId,
    /// Campaign name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// First day of the campaign.
    pub start_date: NaiveDate,
    /// Last day of the campaign.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: CampaignStatus,
    /// User who created the campaign.
    pub created_by: Option<UserId>,
    /// When the campaign was created.
    pub created_at: DateTime<Utc>,
    /// When the campaign was last updated.
    pub updated_at: DateTime<Utc>,
}
