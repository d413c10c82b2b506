//! Store (retail location) domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fieldops_core::StoreId;

/// A retail location that campaigns can be assigned to.
///
/// `store_code` is the human-readable code printed on site paperwork; it is
/// unique within a chain but not across chains, so [`StoreId`] is the only
/// reliable reference.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Retail chain / board the store belongs to.
    pub board_name: String,
    /// Human-readable store code.
    pub store_code: String,
    /// Display name shown in listings.
    pub display_name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// District (normalized).
    pub district: Option<String>,
    /// Province (normalized).
    pub province: Option<String>,
    /// Latitude for the map view.
    pub latitude: Option<f64>,
    /// Longitude for the map view.
    pub longitude: Option<f64>,
    /// Whether the store is operating.
    pub is_active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}
