//! Domain models for the FieldOps API.
//!
//! These are the validated shapes handed to route handlers and serialized
//! into the response envelope. Database row structs live next to the
//! repositories in [`crate::db`].

pub mod assignment;
pub mod campaign;
pub mod staff;
pub mod store;
pub mod user;

pub use assignment::{
    AddOutcome, Assignment, AssignmentOverviewRow, CampaignStoreRow, ReconcilePlan,
};
pub use campaign::Campaign;
pub use staff::Staff;
pub use store::Store;
pub use user::{CurrentUser, User};
