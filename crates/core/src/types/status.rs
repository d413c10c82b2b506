//! Status enums for campaign lifecycle.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Campaign lifecycle status.
///
/// This is the canonical representation; earlier schema snapshots carried a
/// bare `is_active` boolean instead, which collapses into
/// `Running`/`Completed` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "campaign_status", rename_all = "snake_case")
)]
pub enum CampaignStatus {
    /// Being drafted, not yet visible to field staff.
    #[default]
    Draft,
    /// Scheduled but not yet started.
    Planned,
    /// Currently active in the field.
    Running,
    /// Finished; assignments are kept for reporting.
    Completed,
}

impl CampaignStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Planned => "planned",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_draft() {
        assert_eq!(CampaignStatus::default(), CampaignStatus::Draft);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&CampaignStatus::Running).expect("serialize"),
            "\"running\""
        );
        let parsed: CampaignStatus =
            serde_json::from_str("\"completed\"").expect("deserialize");
        assert_eq!(parsed, CampaignStatus::Completed);
    }
}
