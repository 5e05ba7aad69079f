//! Shift workflows built on top of [`SchedulerApi`](crate::client::SchedulerApi):
//! miss detection, replacement requests, the time clock and the display
//! status overlay.

pub mod missed;
pub mod notifications;
pub mod poller;
pub mod reconcile;
pub mod replacement;
pub mod time_clock;

#[cfg(test)]
pub(crate) mod fake;

use crate::client::ApiError;
use actix_web::http::StatusCode;
use derive_more::Display;

/// Business rule failures detected client-side by re-reading remote state.
#[derive(Debug, Clone, Display, PartialEq)]
pub enum WorkflowError {
    #[display(fmt = "Your account is not linked to an employee record")]
    NoEmployeeProfile,
    #[display(fmt = "Only managers can review replacement requests")]
    ManagersOnly,
    #[display(fmt = "This shift is not open for replacement")]
    ShiftNotMissed,
    #[display(fmt = "You cannot request to replace your own shift")]
    OwnShift,
    #[display(fmt = "This shift has already ended")]
    ShiftEnded,
    #[display(fmt = "This shift already has an approved replacement")]
    ReplacementTaken,
    #[display(fmt = "You have already requested to cover this shift")]
    AlreadyRequested,
    #[display(fmt = "This replacement request has already been processed")]
    AlreadyProcessed,
    #[display(fmt = "You are not the approved replacement for this shift")]
    NotApprovedForShift,
    #[display(fmt = "You are already clocked in")]
    AlreadyClockedIn,
    #[display(fmt = "You are not clocked in")]
    NotClockedIn,
    #[display(fmt = "You are already on a break")]
    AlreadyOnBreak,
    #[display(fmt = "You are not on a break")]
    NotOnBreak,
    #[display(fmt = "{}", _0)]
    Api(ApiError),
}

impl std::error::Error for WorkflowError {}

impl From<ApiError> for WorkflowError {
    fn from(e: ApiError) -> Self {
        WorkflowError::Api(e)
    }
}

impl WorkflowError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WorkflowError::NoEmployeeProfile
            | WorkflowError::ManagersOnly
            | WorkflowError::NotApprovedForShift => StatusCode::FORBIDDEN,
            WorkflowError::OwnShift => StatusCode::BAD_REQUEST,
            WorkflowError::Api(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::CONFLICT,
        }
    }
}
