use crate::auth::auth::AuthSession;
use crate::client::SchedulerApi;
use crate::errors::AppError;
use crate::model::time_clock::{ClockInRequest, TimeClockEntry, TimeEntryFilter};
use crate::workflow::time_clock::{active_entry, clock_in, clock_out, end_break, start_break};
use actix_web::{HttpResponse, web};

#[utoipa::path(
    get,
    path = "/api/time-clock/active",
    responses(
        (status = 200, description = "Open entry, or null when clocked out", body = Option<TimeClockEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Time Clock"
)]
pub async fn active(session: AuthSession) -> Result<HttpResponse, AppError> {
    let me = session.viewer.employee_id()?;
    let entry = active_entry(&session.client, me).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[utoipa::path(
    get,
    path = "/api/time-clock",
    params(TimeEntryFilter),
    responses(
        (status = 200, description = "Time entries", body = [TimeClockEntry]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Time Clock"
)]
pub async fn list_entries(
    session: AuthSession,
    query: web::Query<TimeEntryFilter>,
) -> Result<HttpResponse, AppError> {
    let mut filter = query.into_inner();
    if session.viewer.role.is_manager_or_admin() {
        filter.company = session.viewer.scope_company(filter.company);
    } else {
        filter.employee = Some(session.viewer.employee_id()?);
    }
    let entries = session.client.list_time_entries(&filter).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Clock in, with or without a shift
#[utoipa::path(
    post,
    path = "/api/time-clock/clock-in",
    request_body = ClockInRequest,
    responses(
        (status = 200, description = "Clocked in", body = TimeClockEntry),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not assigned to this shift"),
        (status = 409, description = "Already clocked in")
    ),
    security(("bearer_auth" = [])),
    tag = "Time Clock"
)]
pub async fn clock_in_handler(
    session: AuthSession,
    payload: Option<web::Json<ClockInRequest>>,
) -> Result<HttpResponse, AppError> {
    let shift = payload.and_then(|p| p.into_inner().shift);
    let entry = clock_in(&session.client, &session.viewer, shift).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[utoipa::path(
    post,
    path = "/api/time-clock/clock-out",
    responses(
        (status = 200, description = "Clocked out", body = TimeClockEntry),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Not clocked in")
    ),
    security(("bearer_auth" = [])),
    tag = "Time Clock"
)]
pub async fn clock_out_handler(session: AuthSession) -> Result<HttpResponse, AppError> {
    let entry = clock_out(&session.client, &session.viewer).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[utoipa::path(
    post,
    path = "/api/time-clock/break/start",
    responses(
        (status = 200, description = "Break started", body = TimeClockEntry),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Not clocked in or already on break")
    ),
    security(("bearer_auth" = [])),
    tag = "Time Clock"
)]
pub async fn break_start(session: AuthSession) -> Result<HttpResponse, AppError> {
    let entry = start_break(&session.client, &session.viewer).await?;
    Ok(HttpResponse::Ok().json(entry))
}

#[utoipa::path(
    post,
    path = "/api/time-clock/break/end",
    responses(
        (status = 200, description = "Break ended", body = TimeClockEntry),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Not on break")
    ),
    security(("bearer_auth" = [])),
    tag = "Time Clock"
)]
pub async fn break_end(session: AuthSession) -> Result<HttpResponse, AppError> {
    let entry = end_break(&session.client, &session.viewer).await?;
    Ok(HttpResponse::Ok().json(entry))
}
