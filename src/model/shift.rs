use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShiftStatus {
    Scheduled,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 42,
    "employee": 7,
    "company": 1,
    "team": null,
    "start_time": "2026-03-02T09:00:00Z",
    "end_time": "2026-03-02T17:00:00Z",
    "status": "scheduled",
    "is_missed": false,
    "replacement_employee": null,
    "replacement_approved_at": null,
    "replacement_started_at": null,
    "created_at": "2026-02-20T12:00:00Z"
}))]
pub struct Shift {
    pub id: u64,
    pub employee: u64,
    pub company: u64,
    #[serde(default)]
    pub team: Option<u64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: ShiftStatus,
    #[serde(default)]
    pub is_missed: bool,
    #[serde(default)]
    pub replacement_employee: Option<u64>,
    #[serde(default)]
    pub replacement_approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub replacement_started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Shift {
    /// Created after its own start, i.e. entered retroactively.
    pub fn is_retroactive(&self) -> bool {
        self.created_at > self.start_time
    }

    /// The employee holding an approved replacement for this shift, if any.
    pub fn approved_replacement(&self) -> Option<u64> {
        match (self.replacement_employee, self.replacement_approved_at) {
            (Some(employee), Some(_)) => Some(employee),
            _ => None,
        }
    }

    /// Who is expected to work the shift right now.
    pub fn assignee(&self) -> u64 {
        self.approved_replacement().unwrap_or(self.employee)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ShiftFilter {
    pub status: Option<ShiftStatus>,
    pub is_missed: Option<bool>,
    pub employee: Option<u64>,
    /// Shifts covered by this employee
    pub replacement_employee: Option<u64>,
    pub company: Option<u64>,
    /// Shifts starting on or after this instant
    pub start_after: Option<DateTime<Utc>>,
    /// Shifts starting before this instant
    pub start_before: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateShift {
    pub employee: u64,
    pub company: u64,
    pub team: Option<u64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: Option<String>,
}
