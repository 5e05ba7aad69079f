//! In-memory stand-in for the remote scheduler API.

use crate::client::{ApiError, SchedulerApi};
use crate::model::replacement::{
    NewReplacementRequest, ReplacementFilter, ReplacementRequest, ReplacementStatus, ReviewNotes,
};
use crate::model::shift::{Shift, ShiftFilter, ShiftStatus};
use crate::model::time_clock::{ClockInRequest, TimeClockEntry, TimeEntryFilter};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct State {
    shifts: BTreeMap<u64, Shift>,
    entries: Vec<TimeClockEntry>,
    requests: Vec<ReplacementRequest>,
    failing_marks: HashSet<u64>,
    acting_employee: Option<u64>,
    approve_calls: usize,
    clock_in_calls: usize,
    failing_reads_after_review: bool,
    reads_failing: bool,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not found.".into(),
    }
}

/// Company of the shift an entry or request points at; entries without a
/// shift belong to none.
fn company_of(state: &State, shift: Option<u64>) -> Option<u64> {
    shift.and_then(|id| state.shifts.get(&id)).map(|s| s.company)
}

pub fn shift_at(id: u64, employee: u64, start: DateTime<Utc>) -> Shift {
    Shift {
        id,
        employee,
        company: 1,
        team: None,
        start_time: start,
        end_time: start + Duration::hours(8),
        status: ShiftStatus::Scheduled,
        is_missed: false,
        replacement_employee: None,
        replacement_approved_at: None,
        replacement_started_at: None,
        created_at: start - Duration::days(1),
        notes: None,
    }
}

pub fn entry(id: u64, employee: u64, shift: Option<u64>, clock_in: DateTime<Utc>) -> TimeClockEntry {
    TimeClockEntry {
        id,
        employee,
        shift,
        clock_in,
        clock_out: None,
        break_start: None,
        break_end: None,
    }
}

impl FakeApi {
    pub fn acting_as(employee: u64) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().acting_employee = Some(employee);
        api
    }

    pub fn add_shift(&self, shift: Shift) {
        self.state.lock().unwrap().shifts.insert(shift.id, shift);
    }

    pub fn add_entry(&self, entry: TimeClockEntry) {
        self.state.lock().unwrap().entries.push(entry);
    }

    pub fn add_request(&self, request: ReplacementRequest) {
        self.state.lock().unwrap().requests.push(request);
    }

    pub fn fail_mark_missed(&self, shift: u64) {
        self.state.lock().unwrap().failing_marks.insert(shift);
    }

    /// Request reads start failing once a request was approved or rejected.
    pub fn fail_reads_after_review(&self) {
        self.state.lock().unwrap().failing_reads_after_review = true;
    }

    pub fn shift(&self, id: u64) -> Shift {
        self.state.lock().unwrap().shifts[&id].clone()
    }

    pub fn entries(&self) -> Vec<TimeClockEntry> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn approve_calls(&self) -> usize {
        self.state.lock().unwrap().approve_calls
    }

    pub fn clock_in_calls(&self) -> usize {
        self.state.lock().unwrap().clock_in_calls
    }

    fn with_active<F>(&self, f: F) -> Result<TimeClockEntry, ApiError>
    where
        F: FnOnce(&mut TimeClockEntry),
    {
        let mut state = self.state.lock().unwrap();
        let me = state.acting_employee.ok_or(ApiError::Unauthorized)?;
        let active = state
            .entries
            .iter_mut()
            .find(|e| e.employee == me && e.clock_out.is_none())
            .ok_or_else(not_found)?;
        f(active);
        Ok(active.clone())
    }
}

#[async_trait]
impl SchedulerApi for FakeApi {
    async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<Shift>, ApiError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .shifts
            .values()
            .filter(|s| filter.status.is_none_or(|st| s.status == st))
            .filter(|s| filter.is_missed.is_none_or(|m| s.is_missed == m))
            .filter(|s| filter.employee.is_none_or(|e| s.employee == e))
            .filter(|s| filter.replacement_employee.is_none_or(|e| s.replacement_employee == Some(e)))
            .filter(|s| filter.company.is_none_or(|c| s.company == c))
            .filter(|s| filter.start_after.is_none_or(|t| s.start_time >= t))
            .filter(|s| filter.start_before.is_none_or(|t| s.start_time < t))
            .cloned()
            .collect())
    }

    async fn get_shift(&self, id: u64) -> Result<Shift, ApiError> {
        self.state
            .lock()
            .unwrap()
            .shifts
            .get(&id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn mark_missed(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_marks.contains(&id) {
            return Err(ApiError::Status {
                status: 500,
                message: "Server error".into(),
            });
        }
        let shift = state.shifts.get_mut(&id).ok_or_else(not_found)?;
        shift.is_missed = true;
        Ok(())
    }

    async fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeClockEntry>, ApiError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entries
            .iter()
            .filter(|e| filter.employee.is_none_or(|id| e.employee == id))
            .filter(|e| filter.shift.is_none_or(|id| e.shift == Some(id)))
            .filter(|e| filter.company.is_none_or(|c| company_of(&state, e.shift) == Some(c)))
            .filter(|e| filter.clock_in_after.is_none_or(|t| e.clock_in >= t))
            .filter(|e| filter.clock_in_before.is_none_or(|t| e.clock_in < t))
            .cloned()
            .collect())
    }

    async fn clock_in(&self, request: &ClockInRequest) -> Result<TimeClockEntry, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.clock_in_calls += 1;
        let me = state.acting_employee.ok_or(ApiError::Unauthorized)?;
        let id = state.entries.len() as u64 + 100;
        let created = entry(id, me, request.shift, Utc::now());
        if let Some(shift) = request.shift.and_then(|s| state.shifts.get_mut(&s)) {
            shift.status = ShiftStatus::InProgress;
        }
        state.entries.push(created.clone());
        Ok(created)
    }

    async fn clock_out(&self) -> Result<TimeClockEntry, ApiError> {
        self.with_active(|e| e.clock_out = Some(Utc::now()))
    }

    async fn start_break(&self) -> Result<TimeClockEntry, ApiError> {
        self.with_active(|e| e.break_start = Some(Utc::now()))
    }

    async fn end_break(&self) -> Result<TimeClockEntry, ApiError> {
        self.with_active(|e| e.break_end = Some(Utc::now()))
    }

    async fn list_replacement_requests(
        &self,
        filter: &ReplacementFilter,
    ) -> Result<Vec<ReplacementRequest>, ApiError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .requests
            .iter()
            .filter(|r| filter.shift.is_none_or(|id| r.shift == id))
            .filter(|r| filter.replacement_employee.is_none_or(|id| r.replacement_employee == id))
            .filter(|r| filter.status.is_none_or(|st| r.status == st))
            .filter(|r| filter.company.is_none_or(|c| company_of(&state, Some(r.shift)) == Some(c)))
            .cloned()
            .collect())
    }

    async fn get_replacement_request(&self, id: u64) -> Result<ReplacementRequest, ApiError> {
        let state = self.state.lock().unwrap();
        if state.reads_failing {
            return Err(ApiError::Status {
                status: 503,
                message: "Service unavailable".into(),
            });
        }
        state
            .requests
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_replacement_request(
        &self,
        request: &NewReplacementRequest,
    ) -> Result<ReplacementRequest, ApiError> {
        let mut state = self.state.lock().unwrap();
        let created = ReplacementRequest {
            id: state.requests.len() as u64 + 1,
            shift: request.shift,
            original_employee: request.original_employee,
            replacement_employee: request.replacement_employee,
            status: ReplacementStatus::Pending,
            notes: request.notes.clone(),
            reviewer_notes: None,
            created_at: Utc::now(),
            reviewed_at: None,
        };
        state.requests.push(created.clone());
        Ok(created)
    }

    // Deliberately lenient: the client must catch repeated approvals itself.
    async fn approve_replacement_request(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.approve_calls += 1;
        state.reads_failing = state.failing_reads_after_review;
        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(not_found)?;
        request.status = ReplacementStatus::Approved;
        request.reviewed_at = Some(Utc::now());
        let (shift_id, replacement) = (request.shift, request.replacement_employee);
        if let Some(shift) = state.shifts.get_mut(&shift_id) {
            shift.replacement_employee = Some(replacement);
            shift.replacement_approved_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn reject_replacement_request(&self, id: u64, notes: &ReviewNotes) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.reads_failing = state.failing_reads_after_review;
        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(not_found)?;
        request.status = ReplacementStatus::Rejected;
        request.reviewer_notes = notes.reviewer_notes.clone();
        request.reviewed_at = Some(Utc::now());
        Ok(())
    }
}
