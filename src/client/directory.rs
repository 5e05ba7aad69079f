//! Company, employee, team, availability and schedule-template resources.

use super::{ApiClient, ApiError};
use crate::model::{
    availability::{Availability, CreateAvailability},
    company::{Company, CreateCompany},
    employee::{CreateEmployee, Employee},
    schedule_template::{CreateScheduleTemplate, ScheduleTemplate},
    shift::{CreateShift, Shift},
    team::{CreateTeam, Team},
};
use serde::Serialize;
use serde_json::Value;

/// Query for the company-scoped directory listings.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CompanyScope {
    pub company: Option<u64>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct EmployeeScope {
    pub employee: Option<u64>,
}

impl ApiClient {
    pub async fn list_companies(&self) -> Result<Vec<Company>, ApiError> {
        self.list_all("/scheduler/companies/").await
    }

    pub async fn create_company(&self, body: &CreateCompany) -> Result<Company, ApiError> {
        self.post("/scheduler/companies/", body).await
    }

    pub async fn update_company(&self, id: u64, patch: &Value) -> Result<Company, ApiError> {
        self.patch(&format!("/scheduler/companies/{id}/"), patch).await
    }

    pub async fn delete_company(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/scheduler/companies/{id}/")).await
    }

    pub async fn list_employees(&self, scope: &CompanyScope) -> Result<Vec<Employee>, ApiError> {
        self.list("/scheduler/employees/", scope).await
    }

    pub async fn create_employee(&self, body: &CreateEmployee) -> Result<Employee, ApiError> {
        self.post("/scheduler/employees/", body).await
    }

    pub async fn update_employee(&self, id: u64, patch: &Value) -> Result<Employee, ApiError> {
        self.patch(&format!("/scheduler/employees/{id}/"), patch).await
    }

    pub async fn delete_employee(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/scheduler/employees/{id}/")).await
    }

    pub async fn list_teams(&self, scope: &CompanyScope) -> Result<Vec<Team>, ApiError> {
        self.list("/scheduler/teams/", scope).await
    }

    pub async fn create_team(&self, body: &CreateTeam) -> Result<Team, ApiError> {
        self.post("/scheduler/teams/", body).await
    }

    pub async fn update_team(&self, id: u64, patch: &Value) -> Result<Team, ApiError> {
        self.patch(&format!("/scheduler/teams/{id}/"), patch).await
    }

    pub async fn delete_team(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/scheduler/teams/{id}/")).await
    }

    pub async fn list_availability(&self, scope: &EmployeeScope) -> Result<Vec<Availability>, ApiError> {
        self.list("/scheduler/availability/", scope).await
    }

    pub async fn create_availability(&self, body: &CreateAvailability) -> Result<Availability, ApiError> {
        self.post("/scheduler/availability/", body).await
    }

    pub async fn list_schedule_templates(&self, scope: &CompanyScope) -> Result<Vec<ScheduleTemplate>, ApiError> {
        self.list("/scheduler/schedule-templates/", scope).await
    }

    pub async fn create_schedule_template(
        &self,
        body: &CreateScheduleTemplate,
    ) -> Result<ScheduleTemplate, ApiError> {
        self.post("/scheduler/schedule-templates/", body).await
    }

    /// Also removes the future shifts generated from the template (server-side).
    pub async fn delete_schedule_template(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/scheduler/schedule-templates/{id}/")).await
    }

    pub async fn create_shift(&self, body: &CreateShift) -> Result<Shift, ApiError> {
        self.post("/scheduler/shifts/", body).await
    }

    pub async fn update_shift(&self, id: u64, patch: &Value) -> Result<Shift, ApiError> {
        self.patch(&format!("/scheduler/shifts/{id}/"), patch).await
    }
}
