use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeClockEntry {
    pub id: u64,
    pub employee: u64,
    #[serde(default)]
    pub shift: Option<u64>,
    pub clock_in: DateTime<Utc>,
    #[serde(default)]
    pub clock_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_end: Option<DateTime<Utc>>,
}

impl TimeClockEntry {
    pub fn is_active(&self) -> bool {
        self.clock_out.is_none()
    }

    pub fn on_break(&self) -> bool {
        self.break_start.is_some() && self.break_end.is_none()
    }

    /// Closed break time; an open break counts nothing.
    pub fn break_duration(&self) -> Duration {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) if end > start => end - start,
            _ => Duration::zero(),
        }
    }

    /// Time between clock-in and clock-out minus breaks, `None` while active.
    pub fn worked(&self) -> Option<Duration> {
        let out = self.clock_out?;
        let gross = out - self.clock_in;
        Some((gross - self.break_duration()).max(Duration::zero()))
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct TimeEntryFilter {
    pub employee: Option<u64>,
    pub shift: Option<u64>,
    /// Entries of this company's employees
    pub company: Option<u64>,
    /// Entries clocked in on or after this instant
    pub clock_in_after: Option<DateTime<Utc>>,
    /// Entries clocked in before this instant
    pub clock_in_before: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClockInRequest {
    pub shift: Option<u64>,
}
