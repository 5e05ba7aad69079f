use super::WorkflowError;
use super::time_clock::{clock_in_unchecked, ensure_assignee};
use crate::auth::auth::Viewer;
use crate::client::SchedulerApi;
use crate::model::replacement::{
    NewReplacementRequest, ReplacementFilter, ReplacementRequest, ReplacementStatus, ReviewNotes,
};
use crate::model::shift::{Shift, ShiftFilter};
use crate::model::time_clock::TimeClockEntry;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{info, warn};

/// Whether `employee` may bid for `shift` right now.
pub fn check_eligible(shift: &Shift, employee: u64, now: DateTime<Utc>) -> Result<(), WorkflowError> {
    if !shift.is_missed {
        return Err(WorkflowError::ShiftNotMissed);
    }
    if shift.employee == employee {
        return Err(WorkflowError::OwnShift);
    }
    if shift.approved_replacement().is_some() {
        return Err(WorkflowError::ReplacementTaken);
    }
    if shift.end_time <= now {
        return Err(WorkflowError::ShiftEnded);
    }
    Ok(())
}

/// Missed shifts of the viewer's company that the viewer could cover.
pub async fn available_shifts<A>(
    api: &A,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> Result<Vec<Shift>, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;
    let shifts = api
        .list_shifts(&ShiftFilter {
            is_missed: Some(true),
            company: viewer.company_id,
            ..Default::default()
        })
        .await?;

    Ok(shifts
        .into_iter()
        .filter(|s| viewer.company_id.is_none_or(|c| s.company == c))
        .filter(|s| check_eligible(s, me, now).is_ok())
        .collect())
}

/// Shifts `me` owns plus the ones `me` was approved to cover, by start time.
/// Other criteria of `filter` apply to both lists.
pub async fn assigned_shifts<A>(api: &A, me: u64, filter: ShiftFilter) -> Result<Vec<Shift>, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let owned = ShiftFilter {
        employee: Some(me),
        replacement_employee: None,
        ..filter.clone()
    };
    let covered = ShiftFilter {
        employee: None,
        replacement_employee: Some(me),
        ..filter
    };
    let (owned, covered) = futures::try_join!(api.list_shifts(&owned), api.list_shifts(&covered))?;

    let mut seen = HashSet::new();
    let mut shifts: Vec<Shift> = owned
        .into_iter()
        .filter(|s| s.employee == me)
        .chain(covered.into_iter().filter(|s| s.approved_replacement() == Some(me)))
        .filter(|s| seen.insert(s.id))
        .collect();
    shifts.sort_by_key(|s| s.start_time);
    Ok(shifts)
}

/// Bid to cover a missed shift. The duplicate check is a read followed by a
/// write, so two quick submissions can still both land.
pub async fn request_replacement<A>(
    api: &A,
    viewer: &Viewer,
    shift_id: u64,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> Result<ReplacementRequest, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;
    let shift = api.get_shift(shift_id).await?;
    check_eligible(&shift, me, now)?;

    let pending = api
        .list_replacement_requests(&ReplacementFilter {
            shift: Some(shift_id),
            replacement_employee: Some(me),
            status: Some(ReplacementStatus::Pending),
            ..Default::default()
        })
        .await?;
    if pending
        .iter()
        .any(|r| r.shift == shift_id && r.replacement_employee == me && r.status == ReplacementStatus::Pending)
    {
        return Err(WorkflowError::AlreadyRequested);
    }

    let created = api
        .create_replacement_request(&NewReplacementRequest {
            shift: shift_id,
            original_employee: shift.employee,
            replacement_employee: me,
            notes,
        })
        .await?;
    info!(request_id = created.id, shift_id, employee_id = me, "Replacement requested");
    Ok(created)
}

async fn load_pending<A>(api: &A, viewer: &Viewer, id: u64) -> Result<ReplacementRequest, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    if !viewer.role.is_manager_or_admin() {
        return Err(WorkflowError::ManagersOnly);
    }
    let request = api.get_replacement_request(id).await?;
    if request.status.is_terminal() {
        return Err(WorkflowError::AlreadyProcessed);
    }
    Ok(request)
}

/// Approve a pending request. The remote API assigns the replacement to the
/// shift as part of the same call.
pub async fn approve<A>(api: &A, viewer: &Viewer, id: u64) -> Result<ReplacementRequest, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let mut request = load_pending(api, viewer, id).await?;
    api.approve_replacement_request(id).await?;
    info!(
        request_id = id,
        shift_id = request.shift,
        employee_id = request.replacement_employee,
        reviewer = %viewer.username,
        "Replacement approved"
    );

    request.status = ReplacementStatus::Approved;
    request.reviewed_at = Some(Utc::now());
    Ok(reread(api, request).await)
}

pub async fn reject<A>(
    api: &A,
    viewer: &Viewer,
    id: u64,
    notes: &ReviewNotes,
) -> Result<ReplacementRequest, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let mut request = load_pending(api, viewer, id).await?;
    api.reject_replacement_request(id, notes).await?;
    info!(
        request_id = id,
        shift_id = request.shift,
        reviewer = %viewer.username,
        "Replacement rejected"
    );

    request.status = ReplacementStatus::Rejected;
    request.reviewer_notes = notes.reviewer_notes.clone();
    request.reviewed_at = Some(Utc::now());
    Ok(reread(api, request).await)
}

/// The stored copy of a request that was just reviewed. The review already
/// happened, so a failed read falls back to the local copy.
async fn reread<A>(api: &A, local: ReplacementRequest) -> ReplacementRequest
where
    A: SchedulerApi + ?Sized,
{
    match api.get_replacement_request(local.id).await {
        Ok(stored) => stored,
        Err(e) => {
            warn!(request_id = local.id, error = %e, "Failed to re-read reviewed request");
            local
        }
    }
}

/// Clock in to a shift the viewer was approved to cover, after re-reading it.
pub async fn start_replacement_shift<A>(
    api: &A,
    viewer: &Viewer,
    shift_id: u64,
) -> Result<TimeClockEntry, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let me = viewer.employee_id()?;
    let shift = api.get_shift(shift_id).await?;
    if shift.approved_replacement() != Some(me) {
        return Err(WorkflowError::NotApprovedForShift);
    }
    ensure_assignee(&shift, me)?;
    clock_in_unchecked(api, me, Some(shift_id)).await
}

/// Managers see the requests of their company; employees only their own bids.
pub async fn list_visible<A>(
    api: &A,
    viewer: &Viewer,
    mut filter: ReplacementFilter,
) -> Result<Vec<ReplacementRequest>, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    if viewer.role.is_manager_or_admin() {
        filter.company = viewer.scope_company(filter.company);
    } else {
        filter.replacement_employee = Some(viewer.employee_id()?);
    }
    Ok(api.list_replacement_requests(&filter).await?)
}
