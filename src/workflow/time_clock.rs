use super::WorkflowError;
use crate::auth::auth::Viewer;
use crate::client::{ApiError, SchedulerApi};
use crate::model::shift::{Shift, ShiftStatus};
use crate::model::time_clock::{ClockInRequest, TimeClockEntry, TimeEntryFilter};
use tracing::info;

/// The employee's open entry, if any. The remote API keeps at most one.
pub async fn active_entry<A>(api: &A, employee: u64) -> Result<Option<TimeClockEntry>, ApiError>
where
    A: SchedulerApi + ?Sized,
{
    let entries = api
        .list_time_entries(&TimeEntryFilter {
            employee: Some(employee),
            ..Default::default()
        })
        .await?;
    Ok(entries
        .into_iter()
        .find(|e| e.employee == employee && e.is_active()))
}

/// Clock in, optionally against a shift. A shift may only be worked by its
/// assignee: the owner, or the approved replacement once one exists.
pub async fn clock_in<A>(
    api: &A,
    viewer: &Viewer,
    shift_id: Option<u64>,
) -> Result<TimeClockEntry, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;

    if let Some(id) = shift_id {
        let shift = api.get_shift(id).await?;
        ensure_assignee(&shift, me)?;
    }

    clock_in_unchecked(api, me, shift_id).await
}

pub(crate) fn ensure_assignee(shift: &Shift, me: u64) -> Result<(), WorkflowError> {
    if shift.assignee() != me {
        return Err(WorkflowError::NotApprovedForShift);
    }
    if shift.status == ShiftStatus::Completed {
        return Err(WorkflowError::ShiftEnded);
    }
    Ok(())
}

pub(crate) async fn clock_in_unchecked<A>(
    api: &A,
    me: u64,
    shift_id: Option<u64>,
) -> Result<TimeClockEntry, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    if active_entry(api, me).await?.is_some() {
        return Err(WorkflowError::AlreadyClockedIn);
    }

    let entry = api.clock_in(&ClockInRequest { shift: shift_id }).await?;
    info!(employee_id = me, shift_id = ?shift_id, entry_id = entry.id, "Clocked in");
    Ok(entry)
}

pub async fn clock_out<A>(api: &A, viewer: &Viewer) -> Result<TimeClockEntry, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;
    if active_entry(api, me).await?.is_none() {
        return Err(WorkflowError::NotClockedIn);
    }

    let entry = api.clock_out().await?;
    info!(employee_id = me, entry_id = entry.id, "Clocked out");
    Ok(entry)
}

pub async fn start_break<A>(api: &A, viewer: &Viewer) -> Result<TimeClockEntry, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;
    match active_entry(api, me).await? {
        None => Err(WorkflowError::NotClockedIn),
        Some(entry) if entry.on_break() => Err(WorkflowError::AlreadyOnBreak),
        Some(_) => Ok(api.start_break().await?),
    }
}

pub async fn end_break<A>(api: &A, viewer: &Viewer) -> Result<TimeClockEntry, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;
    match active_entry(api, me).await? {
        None => Err(WorkflowError::NotClockedIn),
        Some(entry) if !entry.on_break() => Err(WorkflowError::NotOnBreak),
        Some(_) => Ok(api.end_break().await?),
    }
}
