use super::middleware::{bearer_token, resolve_session};
use super::session::{Session, SessionStore};
use crate::config::Config;
use crate::errors::AppError;
use crate::model::{role::Role, user::User};
use crate::workflow::WorkflowError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{LocalBoxFuture, Ready, ready};
use serde::Serialize;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

/// The signed-in user as the front-end sees them.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Viewer {
    pub user_id: u64,
    pub username: String,
    pub role: Role,

    /// Present only if this account is linked to an employee record
    pub employee_id: Option<u64>,
    pub company_id: Option<u64>,
}

impl Viewer {
    pub fn new(
        user_id: u64,
        username: String,
        role: Role,
        employee_id: Option<u64>,
        company_id: Option<u64>,
    ) -> Self {
        Self {
            user_id,
            username,
            role,
            employee_id,
            company_id,
        }
    }

    pub fn from_user(user: &User) -> Result<Self, AppError> {
        let role = Role::from_str(&user.role)
            .map_err(|_| AppError::Forbidden(format!("Unsupported role: {}", user.role)))?;
        Ok(Self::new(
            user.id,
            user.username.clone(),
            role,
            user.employee_id,
            user.company_id,
        ))
    }

    pub fn employee_id(&self) -> Result<u64, WorkflowError> {
        self.employee_id.ok_or(WorkflowError::NoEmployeeProfile)
    }

    /// Company filter to apply to listings: admins pick any company, everyone
    /// else is held to their own.
    pub fn scope_company(&self, requested: Option<u64>) -> Option<u64> {
        match self.role {
            Role::Admin => requested,
            _ => self.company_id.or(requested),
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin only".into()))
        }
    }

    pub fn require_manager_or_admin(&self) -> Result<(), AppError> {
        if self.role.is_manager_or_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Manager/Admin only".into()))
        }
    }
}

/// Session placed in the request by [`auth_middleware`](super::middleware::auth_middleware).
pub struct AuthSession(pub Arc<Session>);

impl Deref for AuthSession {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.0
    }
}

impl FromRequest for AuthSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Arc<Session>>()
                .cloned()
                .map(AuthSession)
                .ok_or_else(|| AppError::Unauthorized("Not signed in".into())),
        )
    }
}

/// Session for routes open to anonymous visitors; `None` when the request
/// carries no valid session token.
pub struct MaybeSession(pub Option<Arc<Session>>);

impl FromRequest for MaybeSession {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let store = req.app_data::<Data<SessionStore>>().cloned();
        let config = req.app_data::<Data<Config>>().cloned();
        let token = bearer_token(req.headers()).map(str::to_string);

        Box::pin(async move {
            let (Some(store), Some(config), Some(token)) = (store, config, token) else {
                return Ok(MaybeSession(None));
            };
            Ok(MaybeSession(
                resolve_session(&store, &config.session_secret, &token)
                    .await
                    .ok(),
            ))
        })
    }
}
