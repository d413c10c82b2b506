//! Field staff personnel records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use fieldops_core::StaffId;

/// A field staff member (personnel record, not a login account).
#[derive(Debug, Clone, Serialize)]
pub struct Staff {
    /// Unique staff ID.
    pub id: StaffId,
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
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}
