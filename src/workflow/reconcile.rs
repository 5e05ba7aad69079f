use crate::client::SchedulerApi;
use crate::model::shift::{Shift, ShiftStatus};
use crate::model::time_clock::{TimeClockEntry, TimeEntryFilter};
use futures::future::join_all;
use serde::Serialize;
use strum_macros::Display;
use tracing::warn;
use utoipa::ToSchema;

/// Status shown to users. Derived for rendering only, never written back.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DisplayStatus {
    Scheduled,
    Missed,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShiftView {
    #[serde(flatten)]
    pub shift: Shift,
    pub display_status: DisplayStatus,
}

pub fn nominal_status(shift: &Shift) -> DisplayStatus {
    match shift.status {
        ShiftStatus::Completed => DisplayStatus::Completed,
        ShiftStatus::InProgress => DisplayStatus::InProgress,
        ShiftStatus::Scheduled if shift.is_missed && shift.approved_replacement().is_none() => {
            DisplayStatus::Missed
        }
        ShiftStatus::Scheduled => DisplayStatus::Scheduled,
    }
}

/// Overlay clock-in/clock-out presence of the shift's entries on its nominal
/// status: a clock-out means completed, a clock-in means in progress.
pub fn overlay(shift: &Shift, entries: &[TimeClockEntry]) -> DisplayStatus {
    let nominal = nominal_status(shift);
    if nominal == DisplayStatus::Completed {
        return nominal;
    }

    let linked = entries.iter().filter(|e| e.shift == Some(shift.id));
    let mut clocked_in = false;
    for entry in linked {
        if entry.clock_out.is_some() {
            return DisplayStatus::Completed;
        }
        clocked_in = true;
    }

    if clocked_in {
        DisplayStatus::InProgress
    } else {
        nominal
    }
}

/// Display status for a batch of shifts. Only shifts with a replacement
/// employee cost a time-clock lookup; lookups run concurrently and a failed
/// one falls back to the nominal status.
pub async fn shift_views<A>(api: &A, shifts: Vec<Shift>) -> Vec<ShiftView>
where
    A: SchedulerApi + ?Sized,
{
    join_all(shifts.into_iter().map(|shift| async move {
        let display_status = if shift.replacement_employee.is_none() {
            nominal_status(&shift)
        } else {
            let filter = TimeEntryFilter {
                shift: Some(shift.id),
                ..Default::default()
            };
            match api.list_time_entries(&filter).await {
                Ok(entries) => overlay(&shift, &entries),
                Err(e) => {
                    warn!(shift_id = shift.id, error = %e, "Falling back to nominal shift status");
                    nominal_status(&shift)
                }
            }
        };
        ShiftView {
            shift,
            display_status,
        }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fake::{FakeApi, entry, shift_at};
    use chrono::{Duration, Utc};

    fn replaced_shift() -> Shift {
        let mut shift = shift_at(1, 7, Utc::now() - Duration::hours(1));
        shift.is_missed = true;
        shift.replacement_employee = Some(8);
        shift.replacement_approved_at = Some(Utc::now() - Duration::minutes(50));
        shift
    }

    #[test]
    fn missed_without_replacement_shows_missed() {
        let mut shift = shift_at(1, 7, Utc::now());
        shift.is_missed = true;
        assert_eq!(nominal_status(&shift), DisplayStatus::Missed);
    }

    #[test]
    fn approved_replacement_without_clock_in_shows_scheduled() {
        assert_eq!(overlay(&replaced_shift(), &[]), DisplayStatus::Scheduled);
    }

    #[test]
    fn clock_in_and_out_advance_the_status() {
        let shift = replaced_shift();
        let mut e = entry(5, 8, Some(1), Utc::now() - Duration::minutes(30));
        assert_eq!(overlay(&shift, &[e.clone()]), DisplayStatus::InProgress);

        e.clock_out = Some(Utc::now());
        assert_eq!(overlay(&shift, &[e]), DisplayStatus::Completed);
    }

    #[actix_web::test]
    async fn views_use_time_clock_for_replaced_shifts_only() {
        let api = FakeApi::default();
        let replaced = replaced_shift();
        let plain = shift_at(2, 9, Utc::now());
        api.add_entry(entry(5, 8, Some(1), Utc::now() - Duration::minutes(30)));

        let views = shift_views(&api, vec![replaced, plain]).await;

        assert_eq!(views[0].display_status, DisplayStatus::InProgress);
        assert_eq!(views[1].display_status, DisplayStatus::Scheduled);
        // overlay is not written back
        assert_eq!(views[0].shift.status, ShiftStatus::Scheduled);
    }
}
