use crate::auth::auth::{AuthSession, Viewer};
use crate::client::SchedulerApi;
use crate::config::Config;
use crate::errors::AppError;
use crate::model::shift::{CreateShift, Shift, ShiftFilter};
use crate::model::time_clock::TimeClockEntry;
use crate::utils::patch::validate_patch;
use crate::workflow::missed::{MissedShiftDetector, SweepReport};
use crate::workflow::reconcile::{ShiftView, shift_views};
use crate::workflow::replacement::{assigned_shifts, available_shifts, start_replacement_shift};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::{Value, json};

const SHIFT_PATCH_FIELDS: &[&str] = &["employee", "team", "start_time", "end_time", "notes"];

/// Employees may open their own shifts, ones they cover, and missed shifts
/// that are up for grabs.
fn can_view(viewer: &Viewer, shift: &Shift) -> bool {
    if viewer.role.is_manager_or_admin() {
        return true;
    }
    match viewer.employee_id {
        Some(me) => shift.employee == me || shift.replacement_employee == Some(me) || shift.is_missed,
        None => false,
    }
}

/// List shifts with their display status
#[utoipa::path(
    get,
    path = "/api/shifts",
    params(ShiftFilter),
    responses(
        (status = 200, description = "Shifts with the time-clock overlay applied", body = [ShiftView]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn list_shifts(
    session: AuthSession,
    query: web::Query<ShiftFilter>,
) -> Result<HttpResponse, AppError> {
    let mut filter = query.into_inner();
    let shifts = if session.viewer.role.is_manager_or_admin() {
        filter.company = session.viewer.scope_company(filter.company);
        session.client.list_shifts(&filter).await?
    } else {
        assigned_shifts(&session.client, session.viewer.employee_id()?, filter).await?
    };
    Ok(HttpResponse::Ok().json(shift_views(&session.client, shifts).await))
}

#[utoipa::path(
    get,
    path = "/api/shifts/{id}",
    params(("id" = u64, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift", body = Shift),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Shift not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn get_shift(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    let shift = session.client.get_shift(path.into_inner()).await?;
    if !can_view(&session.viewer, &shift) {
        return Err(AppError::Forbidden("You cannot view this shift".into()));
    }
    Ok(HttpResponse::Ok().json(shift))
}

#[utoipa::path(
    post,
    path = "/api/shifts",
    request_body = CreateShift,
    responses(
        (status = 201, description = "Shift created", body = Shift),
        (status = 400, description = "Invalid shift times"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn create_shift(
    session: AuthSession,
    payload: web::Json<CreateShift>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    if payload.end_time <= payload.start_time {
        return Err(AppError::BadRequest("Shift must end after it starts".into()));
    }

    let shift = session.client.create_shift(&payload).await?;
    tracing::info!(shift_id = shift.id, employee_id = shift.employee, "Shift created");
    Ok(HttpResponse::Created().json(shift))
}

#[utoipa::path(
    patch,
    path = "/api/shifts/{id}",
    params(("id" = u64, Path, description = "Shift ID")),
    request_body(content = Object, description = "Partial update", example = json!({
        "employee": 9,
        "notes": "Swapped with Dana"
    })),
    responses(
        (status = 200, description = "Shift updated", body = Shift),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn patch_shift(
    session: AuthSession,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    validate_patch(&payload, SHIFT_PATCH_FIELDS)?;

    let shift = session.client.update_shift(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(shift))
}

#[utoipa::path(
    post,
    path = "/api/shifts/{id}/mark-missed",
    params(("id" = u64, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift marked missed", body = Object, example = json!({
            "message": "Shift marked as missed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn mark_missed(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let id = path.into_inner();
    session.client.mark_missed(id).await?;
    tracing::info!(shift_id = id, reviewer = %session.viewer.username, "Shift marked missed by hand");
    Ok(HttpResponse::Ok().json(json!({ "message": "Shift marked as missed" })))
}

/// Run the missed-shift sweep now instead of waiting for the next tick.
#[utoipa::path(
    post,
    path = "/api/shifts/sweep",
    responses(
        (status = 200, description = "Sweep result", body = SweepReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn sweep(session: AuthSession, config: web::Data<Config>) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let report = MissedShiftDetector::new(config.miss_grace_minutes)
        .sweep(&session.client, Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Missed shifts the viewer could volunteer for
#[utoipa::path(
    get,
    path = "/api/shifts/available",
    responses(
        (status = 200, description = "Open missed shifts", body = [Shift]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn available(session: AuthSession) -> Result<HttpResponse, AppError> {
    let shifts = available_shifts(&session.client, &session.viewer, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(shifts))
}

#[utoipa::path(
    post,
    path = "/api/shifts/{id}/start-replacement",
    params(("id" = u64, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Clocked in to the covered shift", body = TimeClockEntry),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the approved replacement"),
        (status = 409, description = "Already clocked in")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn start_replacement(
    session: AuthSession,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let entry = start_replacement_shift(&session.client, &session.viewer, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(entry))
}
