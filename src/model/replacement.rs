use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReplacementStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReplacementStatus {
    /// Approved and rejected requests never change again.
    pub fn is_terminal(self) -> bool {
        !matches!(self, ReplacementStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReplacementRequest {
    pub id: u64,
    pub shift: u64,
    pub original_employee: u64,
    pub replacement_employee: u64,
    pub status: ReplacementStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub reviewer_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ReplacementFilter {
    pub shift: Option<u64>,
    pub replacement_employee: Option<u64>,
    pub status: Option<ReplacementStatus>,
    /// Requests for shifts of this company
    pub company: Option<u64>,
}

/// Body sent to the remote API when a co-worker bids for a shift.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewReplacementRequest {
    pub shift: u64,
    pub original_employee: u64,
    pub replacement_employee: u64,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewNotes {
    #[schema(example = "Covered by the night team instead")]
    pub reviewer_notes: Option<String>,
}
