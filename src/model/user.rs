use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account as returned by `/auth/user/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Raw role name, parsed into [`crate::model::role::Role`] at sign-in
    pub role: String,
    #[serde(default)]
    pub employee_id: Option<u64>,
    #[serde(default)]
    pub company_id: Option<u64>,
}

/// Login response of the remote API. Sessions live server-side and end on
/// the first 401, so only the access token is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
}
