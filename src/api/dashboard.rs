use super::day_bounds;
use crate::auth::auth::{AuthSession, Viewer};
use crate::client::directory::CompanyScope;
use crate::client::{ApiClient, ApiError, SchedulerApi};
use crate::errors::AppError;
use crate::model::replacement::{ReplacementFilter, ReplacementRequest, ReplacementStatus};
use crate::model::role::Role;
use crate::model::shift::{Shift, ShiftFilter};
use crate::model::time_clock::{TimeClockEntry, TimeEntryFilter};
use crate::workflow::notifications::Notification;
use crate::workflow::reconcile::{DisplayStatus, ShiftView, shift_views};
use crate::workflow::replacement::{assigned_shifts, available_shifts};
use crate::workflow::time_clock::active_entry;
use actix_web::HttpResponse;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

const UPCOMING_DAYS: i64 = 7;
const MISSED_LOOKBACK_DAYS: i64 = 7;

#[derive(Serialize, ToSchema)]
pub struct AdminDashboard {
    pub role: Role,
    pub companies: usize,
    pub employees: usize,
    pub teams: usize,
    pub shifts_today: Vec<ShiftView>,
    pub missed_today: usize,
}

#[derive(Serialize, ToSchema)]
pub struct ManagerDashboard {
    pub role: Role,
    pub shifts_today: Vec<ShiftView>,
    pub missed_shifts: Vec<ShiftView>,
    pub pending_requests: Vec<ReplacementRequest>,
    pub clocked_in: Vec<TimeClockEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeDashboard {
    pub role: Role,
    pub upcoming_shifts: Vec<ShiftView>,
    pub active_entry: Option<TimeClockEntry>,
    pub available_shifts: Vec<Shift>,
    pub my_requests: Vec<ReplacementRequest>,
    pub notifications: Vec<Notification>,
}

fn today(viewer: &Viewer, now: DateTime<Utc>) -> ShiftFilter {
    let (start, end) = day_bounds(now);
    ShiftFilter {
        company: viewer.scope_company(None),
        start_after: Some(start),
        start_before: Some(end),
        ..Default::default()
    }
}

async fn admin_dashboard(client: &ApiClient, viewer: &Viewer, now: DateTime<Utc>) -> Result<AdminDashboard, ApiError> {
    let scope = CompanyScope::default();
    let day = today(viewer, now);
    let (companies, employees, teams, shifts) = futures::try_join!(
        client.list_companies(),
        client.list_employees(&scope),
        client.list_teams(&scope),
        client.list_shifts(&day),
    )?;

    let shifts_today = shift_views(client, shifts).await;
    let missed_today = shifts_today
        .iter()
        .filter(|v| v.display_status == DisplayStatus::Missed)
        .count();

    Ok(AdminDashboard {
        role: Role::Admin,
        companies: companies.len(),
        employees: employees.len(),
        teams: teams.len(),
        shifts_today,
        missed_today,
    })
}

async fn manager_dashboard(client: &ApiClient, viewer: &Viewer, now: DateTime<Utc>) -> Result<ManagerDashboard, ApiError> {
    let company = viewer.scope_company(None);
    let day = today(viewer, now);
    let missed = ShiftFilter {
        is_missed: Some(true),
        company,
        start_after: Some(now - Duration::days(MISSED_LOOKBACK_DAYS)),
        ..Default::default()
    };
    let pending = ReplacementFilter {
        status: Some(ReplacementStatus::Pending),
        company,
        ..Default::default()
    };
    let entries = TimeEntryFilter {
        company,
        clock_in_after: Some(day_bounds(now).0 - Duration::days(1)),
        ..Default::default()
    };

    let (shifts, missed, pending_requests, entries) = futures::try_join!(
        client.list_shifts(&day),
        client.list_shifts(&missed),
        client.list_replacement_requests(&pending),
        client.list_time_entries(&entries),
    )?;

    Ok(ManagerDashboard {
        role: Role::Manager,
        shifts_today: shift_views(client, shifts).await,
        missed_shifts: shift_views(client, missed).await,
        pending_requests,
        clocked_in: entries.into_iter().filter(TimeClockEntry::is_active).collect(),
    })
}

async fn employee_dashboard(
    session: &AuthSession,
    now: DateTime<Utc>,
) -> Result<EmployeeDashboard, AppError> {
    let client = &session.client;
    let viewer = &session.viewer;
    let me = viewer.employee_id()?;

    let upcoming = ShiftFilter {
        start_after: Some(day_bounds(now).0),
        start_before: Some(now + Duration::days(UPCOMING_DAYS)),
        ..Default::default()
    };
    let mine = ReplacementFilter {
        replacement_employee: Some(me),
        ..Default::default()
    };

    let (active_entry, my_requests) = futures::try_join!(
        active_entry(client, me),
        client.list_replacement_requests(&mine),
    )?;
    let shifts = assigned_shifts(client, me, upcoming).await?;
    let available_shifts = available_shifts(client, viewer, now).await?;

    Ok(EmployeeDashboard {
        role: Role::Employee,
        upcoming_shifts: shift_views(client, shifts).await,
        active_entry,
        available_shifts,
        my_requests,
        notifications: session.inbox().unread().to_vec(),
    })
}

/// Role-specific landing page data.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard for the viewer's role; one of the three shapes",
         body = Object),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(session: AuthSession) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let body = match session.viewer.role {
        Role::Admin => {
            serde_json::to_value(admin_dashboard(&session.client, &session.viewer, now).await?)
        }
        Role::Manager => {
            serde_json::to_value(manager_dashboard(&session.client, &session.viewer, now).await?)
        }
        Role::Employee => serde_json::to_value(employee_dashboard(&session, now).await?),
    }
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize dashboard");
        AppError::Internal
    })?;

    Ok(HttpResponse::Ok().json(body))
}
