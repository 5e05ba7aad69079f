use super::{ApiClient, ApiError};
use crate::model::user::{TokenPair, User};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterAccount {
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "jane@company.com", format = "email")]
    pub email: String,
    pub password: String,
    /// Company created together with the owner account
    #[schema(example = "Northside Coffee")]
    pub company_name: Option<String>,
}

impl ApiClient {
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        self.post(
            "/auth/login/",
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Sign-in for staff who only hold an employee code and PIN.
    pub async fn employee_login(&self, employee_code: &str, pin: &str) -> Result<TokenPair, ApiError> {
        self.post(
            "/auth/employee-login/",
            &json!({ "employee_code": employee_code, "pin": pin }),
        )
        .await
    }

    pub async fn register(&self, account: &RegisterAccount) -> Result<(), ApiError> {
        self.post_unit("/auth/register/", account).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get("/auth/user/").await
    }
}
