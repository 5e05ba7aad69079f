use crate::client::{ApiError, SchedulerApi};
use crate::model::shift::{Shift, ShiftFilter, ShiftStatus};
use crate::model::time_clock::{TimeClockEntry, TimeEntryFilter};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

pub const GRACE_PERIOD_MINUTES: i64 = 15;

/// How early an unlinked clock-in may happen and still count for a shift.
pub const EARLY_CLOCK_IN_MINUTES: i64 = 60;

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct SweepReport {
    /// Overdue shifts looked at
    pub scanned: usize,
    /// Shifts marked missed in this run
    pub marked: Vec<u64>,
    /// Created after their own start time, left alone
    pub skipped_retroactive: usize,
    /// A matching clock-in was found
    pub clocked_in: usize,
    /// Lookups or mark calls that failed; retried on the next sweep
    pub failed: Vec<u64>,
}

/// Finds scheduled shifts nobody clocked into within the grace period and
/// marks them missed.
#[derive(Debug, Clone, Copy)]
pub struct MissedShiftDetector {
    grace: Duration,
}

impl Default for MissedShiftDetector {
    fn default() -> Self {
        Self::new(GRACE_PERIOD_MINUTES)
    }
}

impl MissedShiftDetector {
    pub fn new(grace_minutes: i64) -> Self {
        Self {
            grace: Duration::minutes(grace_minutes),
        }
    }

    pub fn is_overdue(&self, shift: &Shift, now: DateTime<Utc>) -> bool {
        shift.status == ShiftStatus::Scheduled && !shift.is_missed && shift.start_time + self.grace < now
    }

    /// One pass over the overdue shifts. Only the initial listing can fail the
    /// whole sweep; per-shift failures are recorded and skipped.
    pub async fn sweep<A>(&self, api: &A, now: DateTime<Utc>) -> Result<SweepReport, ApiError>
    where
        A: SchedulerApi + ?Sized,
    {
        let filter = ShiftFilter {
            status: Some(ShiftStatus::Scheduled),
            is_missed: Some(false),
            start_before: Some(now - self.grace),
            ..Default::default()
        };

        let shifts = api.list_shifts(&filter).await?;
        let mut report = SweepReport::default();

        for shift in shifts.iter().filter(|s| self.is_overdue(s, now)) {
            report.scanned += 1;

            if shift.is_retroactive() {
                debug!(shift_id = shift.id, "Shift created after its start, not a no-show");
                report.skipped_retroactive += 1;
                continue;
            }

            let entries = match api.list_time_entries(&entry_window(shift)).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(shift_id = shift.id, error = %e, "Failed to load time-clock entries");
                    report.failed.push(shift.id);
                    continue;
                }
            };

            if has_matching_entry(shift, &entries) {
                report.clocked_in += 1;
                continue;
            }

            match api.mark_missed(shift.id).await {
                Ok(()) => {
                    info!(shift_id = shift.id, employee_id = shift.employee, "Shift marked missed");
                    report.marked.push(shift.id);
                }
                Err(e) => {
                    warn!(shift_id = shift.id, error = %e, "Failed to mark shift missed");
                    report.failed.push(shift.id);
                }
            }
        }

        Ok(report)
    }
}

fn entry_window(shift: &Shift) -> TimeEntryFilter {
    TimeEntryFilter {
        employee: Some(shift.assignee()),
        clock_in_after: Some(shift.start_time - Duration::minutes(EARLY_CLOCK_IN_MINUTES)),
        clock_in_before: Some(shift.end_time),
        ..Default::default()
    }
}

/// An entry linked to the shift, or an unlinked entry of the assignee that
/// clocked in between an hour before start and the end of the shift.
pub fn has_matching_entry(shift: &Shift, entries: &[TimeClockEntry]) -> bool {
    let earliest = shift.start_time - Duration::minutes(EARLY_CLOCK_IN_MINUTES);
    entries.iter().any(|entry| match entry.shift {
        Some(id) => id == shift.id,
        None => {
            entry.employee == shift.assignee()
                && entry.clock_in >= earliest
                && entry.clock_in <= shift.end_time
        }
    })
}
