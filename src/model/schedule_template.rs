use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recurring weekly shift pattern the remote API expands into shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleTemplate {
    pub id: u64,
    pub company: u64,
    pub name: String,
    pub weekday: u8,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub employee: Option<u64>,
    #[serde(default)]
    pub team: Option<u64>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateScheduleTemplate {
    pub company: u64,
    #[schema(example = "Weekday opening")]
    pub name: String,
    pub weekday: u8,
    #[schema(value_type = String, example = "06:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "14:00:00")]
    pub end_time: NaiveTime,
    pub employee: Option<u64>,
    pub team: Option<u64>,
    pub is_active: bool,
}
