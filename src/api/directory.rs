//! Company, employee, team, availability and schedule-template management.

use crate::auth::auth::AuthSession;
use crate::client::directory::{CompanyScope, EmployeeScope};
use crate::errors::AppError;
use crate::model::availability::{Availability, CreateAvailability};
use crate::model::company::{Company, CreateCompany};
use crate::model::employee::{CreateEmployee, Employee};
use crate::model::schedule_template::{CreateScheduleTemplate, ScheduleTemplate};
use crate::model::team::{CreateTeam, Team};
use crate::utils::patch::validate_patch;
use actix_web::{HttpResponse, web};
use serde_json::Value;

const COMPANY_PATCH_FIELDS: &[&str] = &["name", "address", "phone", "email"];
const EMPLOYEE_PATCH_FIELDS: &[&str] = &[
    "team",
    "first_name",
    "last_name",
    "email",
    "phone",
    "employee_code",
    "position",
    "is_active",
    "hourly_rate",
];
const TEAM_PATCH_FIELDS: &[&str] = &["name", "manager"];

fn not_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("`{field}` is required")));
    }
    Ok(())
}

/// Managers are kept inside their own company; admins may pick any.
fn company_scope(session: &AuthSession, requested: Option<u64>) -> CompanyScope {
    CompanyScope {
        company: session.viewer.scope_company(requested),
    }
}

#[derive(serde::Deserialize, utoipa::IntoParams)]
pub struct CompanyQuery {
    pub company: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/companies",
    responses(
        (status = 200, description = "All companies", body = [Company]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn list_companies(session: AuthSession) -> Result<HttpResponse, AppError> {
    session.viewer.require_admin()?;
    Ok(HttpResponse::Ok().json(session.client.list_companies().await?))
}

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn create_company(
    session: AuthSession,
    payload: web::Json<CreateCompany>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_admin()?;
    not_blank("name", &payload.name)?;
    let company = session.client.create_company(&payload).await?;
    tracing::info!(company_id = company.id, "Company created");
    Ok(HttpResponse::Created().json(company))
}

#[utoipa::path(
    patch,
    path = "/api/companies/{id}",
    params(("id" = u64, Path, description = "Company ID")),
    request_body(content = Object, description = "Partial update"),
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn patch_company(
    session: AuthSession,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_admin()?;
    validate_patch(&payload, COMPANY_PATCH_FIELDS)?;
    let company = session.client.update_company(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(company))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(("id" = u64, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn delete_company(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    session.viewer.require_admin()?;
    let id = path.into_inner();
    session.client.delete_company(id).await?;
    tracing::info!(company_id = id, "Company deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(CompanyQuery),
    responses(
        (status = 200, description = "Employees", body = [Employee]),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn list_employees(
    session: AuthSession,
    query: web::Query<CompanyQuery>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let scope = company_scope(&session, query.company);
    Ok(HttpResponse::Ok().json(session.client.list_employees(&scope).await?))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn create_employee(
    session: AuthSession,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    not_blank("first_name", &payload.first_name)?;
    not_blank("employee_code", &payload.employee_code)?;

    let employee = session.client.create_employee(&payload).await?;
    tracing::info!(employee_id = employee.id, company_id = employee.company, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    request_body(content = Object, description = "Partial update", example = json!({
        "position": "Shift lead",
        "hourly_rate": 17.0
    })),
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn patch_employee(
    session: AuthSession,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    validate_patch(&payload, EMPLOYEE_PATCH_FIELDS)?;
    let employee = session.client.update_employee(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn delete_employee(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let id = path.into_inner();
    session.client.delete_employee(id).await?;
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/teams",
    params(CompanyQuery),
    responses(
        (status = 200, description = "Teams", body = [Team]),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn list_teams(
    session: AuthSession,
    query: web::Query<CompanyQuery>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let scope = company_scope(&session, query.company);
    Ok(HttpResponse::Ok().json(session.client.list_teams(&scope).await?))
}

#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn create_team(
    session: AuthSession,
    payload: web::Json<CreateTeam>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    not_blank("name", &payload.name)?;
    let team = session.client.create_team(&payload).await?;
    Ok(HttpResponse::Created().json(team))
}

#[utoipa::path(
    patch,
    path = "/api/teams/{id}",
    params(("id" = u64, Path, description = "Team ID")),
    request_body(content = Object, description = "Partial update"),
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn patch_team(
    session: AuthSession,
    path: web::Path<u64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    validate_patch(&payload, TEAM_PATCH_FIELDS)?;
    let team = session.client.update_team(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(team))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id" = u64, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn delete_team(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    session.client.delete_team(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[derive(serde::Deserialize, utoipa::IntoParams)]
pub struct EmployeeQuery {
    pub employee: Option<u64>,
}

/// Employees see their own slots; managers may look at anyone's.
#[utoipa::path(
    get,
    path = "/api/availability",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Availability slots", body = [Availability]),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn list_availability(
    session: AuthSession,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let employee = if session.viewer.role.is_manager_or_admin() {
        query.employee
    } else {
        Some(session.viewer.employee_id()?)
    };
    let slots = session
        .client
        .list_availability(&EmployeeScope { employee })
        .await?;
    Ok(HttpResponse::Ok().json(slots))
}

#[utoipa::path(
    post,
    path = "/api/availability",
    request_body = CreateAvailability,
    responses(
        (status = 201, description = "Slot saved", body = Availability),
        (status = 400, description = "Invalid slot"),
        (status = 403, description = "No employee profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn create_availability(
    session: AuthSession,
    payload: web::Json<CreateAvailability>,
) -> Result<HttpResponse, AppError> {
    let mut slot = payload.into_inner();
    if slot.weekday > 6 {
        return Err(AppError::BadRequest("`weekday` must be between 0 and 6".into()));
    }
    if slot.end_time <= slot.start_time {
        return Err(AppError::BadRequest("Availability must end after it starts".into()));
    }
    if !session.viewer.role.is_manager_or_admin() || slot.employee.is_none() {
        slot.employee = Some(session.viewer.employee_id()?);
    }

    let saved = session.client.create_availability(&slot).await?;
    Ok(HttpResponse::Created().json(saved))
}

#[utoipa::path(
    get,
    path = "/api/schedule-templates",
    params(CompanyQuery),
    responses(
        (status = 200, description = "Schedule templates", body = [ScheduleTemplate]),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn list_templates(
    session: AuthSession,
    query: web::Query<CompanyQuery>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let scope = company_scope(&session, query.company);
    Ok(HttpResponse::Ok().json(session.client.list_schedule_templates(&scope).await?))
}

#[utoipa::path(
    post,
    path = "/api/schedule-templates",
    request_body = CreateScheduleTemplate,
    responses(
        (status = 201, description = "Template created", body = ScheduleTemplate),
        (status = 400, description = "Invalid template"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn create_template(
    session: AuthSession,
    payload: web::Json<CreateScheduleTemplate>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    not_blank("name", &payload.name)?;
    if payload.weekday > 6 {
        return Err(AppError::BadRequest("`weekday` must be between 0 and 6".into()));
    }
    let template = session.client.create_schedule_template(&payload).await?;
    tracing::info!(template_id = template.id, "Schedule template created");
    Ok(HttpResponse::Created().json(template))
}

/// Deleting a template also drops the future shifts generated from it.
#[utoipa::path(
    delete,
    path = "/api/schedule-templates/{id}",
    params(("id" = u64, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Directory"
)]
pub async fn delete_template(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    let id = path.into_inner();
    session.client.delete_schedule_template(id).await?;
    tracing::info!(template_id = id, "Schedule template deleted");
    Ok(HttpResponse::NoContent().finish())
}
