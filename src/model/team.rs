use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub id: u64,
    pub company: u64,
    pub name: String,
    #[serde(default)]
    pub manager: Option<u64>,
    #[serde(default)]
    pub members: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTeam {
    pub company: u64,
    #[schema(example = "Morning crew")]
    pub name: String,
    pub manager: Option<u64>,
    #[serde(default)]
    pub members: Vec<u64>,
}
