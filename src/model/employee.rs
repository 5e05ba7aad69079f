use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "user": 12,
        "company": 1,
        "team": 3,
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@company.com",
        "phone": "+8801712345678",
        "employee_code": "EMP-007",
        "position": "Barista",
        "is_active": true,
        "hourly_rate": 14.5
    })
)]
pub struct Employee {
    pub id: u64,
    #[serde(default)]
    pub user: Option<u64>,
    pub company: u64,
    #[serde(default)]
    pub team: Option<u64>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub employee_code: String,
    #[serde(default)]
    pub position: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

fn active_by_default() -> bool {
    true
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployee {
    pub company: u64,
    pub team: Option<u64>,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john@email.com", format = "email")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "EMP-007")]
    pub employee_code: String,
    #[schema(example = "Barista")]
    pub position: String,
    pub hourly_rate: Option<f64>,
}
