use super::{ApiClient, ApiError};
use crate::model::{
    replacement::{NewReplacementRequest, ReplacementFilter, ReplacementRequest, ReviewNotes},
    shift::{Shift, ShiftFilter},
    time_clock::{ClockInRequest, TimeClockEntry, TimeEntryFilter},
};
use async_trait::async_trait;
use serde_json::json;

/// Remote operations the shift workflows are built from.
///
/// Implemented by [`ApiClient`]; tests substitute an in-memory fake.
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<Shift>, ApiError>;
    async fn get_shift(&self, id: u64) -> Result<Shift, ApiError>;
    async fn mark_missed(&self, id: u64) -> Result<(), ApiError>;

    async fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeClockEntry>, ApiError>;
    async fn clock_in(&self, request: &ClockInRequest) -> Result<TimeClockEntry, ApiError>;
    async fn clock_out(&self) -> Result<TimeClockEntry, ApiError>;
    async fn start_break(&self) -> Result<TimeClockEntry, ApiError>;
    async fn end_break(&self) -> Result<TimeClockEntry, ApiError>;

    async fn list_replacement_requests(
        &self,
        filter: &ReplacementFilter,
    ) -> Result<Vec<ReplacementRequest>, ApiError>;
    async fn get_replacement_request(&self, id: u64) -> Result<ReplacementRequest, ApiError>;
    async fn create_replacement_request(
        &self,
        request: &NewReplacementRequest,
    ) -> Result<ReplacementRequest, ApiError>;
    async fn approve_replacement_request(&self, id: u64) -> Result<(), ApiError>;
    async fn reject_replacement_request(&self, id: u64, notes: &ReviewNotes) -> Result<(), ApiError>;
}

#[async_trait]
impl SchedulerApi for ApiClient {
    async fn list_shifts(&self, filter: &ShiftFilter) -> Result<Vec<Shift>, ApiError> {
        self.list("/scheduler/shifts/", filter).await
    }

    async fn get_shift(&self, id: u64) -> Result<Shift, ApiError> {
        self.get(&format!("/scheduler/shifts/{id}/")).await
    }

    async fn mark_missed(&self, id: u64) -> Result<(), ApiError> {
        self.post_unit(&format!("/scheduler/shifts/{id}/mark_missed/"), &json!({}))
            .await
    }

    async fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeClockEntry>, ApiError> {
        self.list("/scheduler/time-clock/", filter).await
    }

    async fn clock_in(&self, request: &ClockInRequest) -> Result<TimeClockEntry, ApiError> {
        self.post("/scheduler/time-clock/clock_in/", request).await
    }

    async fn clock_out(&self) -> Result<TimeClockEntry, ApiError> {
        self.post("/scheduler/time-clock/clock_out/", &json!({})).await
    }

    async fn start_break(&self) -> Result<TimeClockEntry, ApiError> {
        self.post("/scheduler/time-clock/start_break/", &json!({})).await
    }

    async fn end_break(&self) -> Result<TimeClockEntry, ApiError> {
        self.post("/scheduler/time-clock/end_break/", &json!({})).await
    }

    async fn list_replacement_requests(
        &self,
        filter: &ReplacementFilter,
    ) -> Result<Vec<ReplacementRequest>, ApiError> {
        self.list("/scheduler/replacement-requests/", filter).await
    }

    async fn get_replacement_request(&self, id: u64) -> Result<ReplacementRequest, ApiError> {
        self.get(&format!("/scheduler/replacement-requests/{id}/")).await
    }

    async fn create_replacement_request(
        &self,
        request: &NewReplacementRequest,
    ) -> Result<ReplacementRequest, ApiError> {
        self.post("/scheduler/replacement-requests/", request).await
    }

    async fn approve_replacement_request(&self, id: u64) -> Result<(), ApiError> {
        self.post_unit(
            &format!("/scheduler/replacement-requests/{id}/approve/"),
            &json!({}),
        )
        .await
    }

    async fn reject_replacement_request(&self, id: u64, notes: &ReviewNotes) -> Result<(), ApiError> {
        self.post_unit(&format!("/scheduler/replacement-requests/{id}/reject/"), notes)
            .await
    }
}
