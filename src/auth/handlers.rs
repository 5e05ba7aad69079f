use super::auth::{AuthSession, MaybeSession, Viewer};
use super::jwt::generate_session_token;
use super::session::{Session, SessionStore};
use crate::access::pages::default_dashboard;
use crate::access::sidebar::{SidebarSection, sidebar};
use crate::client::auth::RegisterAccount;
use crate::client::{ApiClient, ApiError};
use crate::config::Config;
use crate::errors::AppError;
use crate::model::user::TokenPair;
use crate::workflow::poller::spawn_for_session;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "jane")]
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct EmployeeLoginDto {
    #[schema(example = "EMP-007")]
    pub employee_code: String,
    #[schema(example = "4821")]
    pub pin: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Session token for the `Authorization: Bearer` header
    pub token: String,
    pub viewer: Viewer,
    /// Path of the viewer's default dashboard
    #[schema(example = "/manager-dashboard")]
    pub home: String,
    pub sidebar: Vec<SidebarSection>,
}

#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub viewer: Viewer,
    pub home: String,
    pub sidebar: Vec<SidebarSection>,
}

fn rejected_credentials(e: ApiError) -> AppError {
    match e {
        ApiError::Unauthorized => AppError::Unauthorized("Invalid credentials".into()),
        other => AppError::Api(other),
    }
}

/// Load the account behind fresh remote tokens and keep it as a session.
async fn open_session(
    tokens: TokenPair,
    anon: &ApiClient,
    store: &SessionStore,
    config: &Config,
) -> Result<LoginResponse, AppError> {
    let client = anon.with_token(tokens.access);

    debug!("Fetching account details");
    let user = client.current_user().await?;
    let viewer = Viewer::from_user(&user)?;

    let session = store.insert(Session::new(viewer.clone(), client)).await;
    spawn_for_session(store, &session, config);

    let token = generate_session_token(
        session.id,
        &viewer.username,
        &viewer.role.to_string(),
        &config.session_secret,
        config.session_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign session token");
        AppError::Internal
    })?;

    Ok(LoginResponse {
        token,
        home: default_dashboard(viewer.role).path(),
        sidebar: sidebar(viewer.role).to_vec(),
        viewer,
    })
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(anon, store, config, body),
    fields(username = %body.username)
)]
pub async fn login(
    body: web::Json<LoginReqDto>,
    anon: web::Data<ApiClient>,
    store: web::Data<SessionStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest("Username or password required".into()));
    }

    let tokens = anon
        .login(body.username.trim(), &body.password)
        .await
        .map_err(|e| {
            info!(error = %e, "Remote login refused");
            rejected_credentials(e)
        })?;

    let resp = open_session(tokens, &anon, &store, &config).await?;
    info!(role = %resp.viewer.role, "Login successful");
    Ok(HttpResponse::Ok().json(resp))
}

#[utoipa::path(
    post,
    path = "/auth/employee-login",
    request_body = EmployeeLoginDto,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Invalid employee code or PIN")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_employee_login",
    skip(anon, store, config, body),
    fields(employee_code = %body.employee_code)
)]
pub async fn employee_login(
    body: web::Json<EmployeeLoginDto>,
    anon: web::Data<ApiClient>,
    store: web::Data<SessionStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    if body.employee_code.trim().is_empty() || body.pin.is_empty() {
        return Err(AppError::BadRequest("Employee code and PIN required".into()));
    }

    let tokens = anon
        .employee_login(body.employee_code.trim(), &body.pin)
        .await
        .map_err(rejected_credentials)?;

    let resp = open_session(tokens, &anon, &store, &config).await?;
    info!("Employee login successful");
    Ok(HttpResponse::Ok().json(resp))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterAccount,
    responses(
        (status = 201, description = "Account created", body = Object, example = json!({
            "message": "Account created, please sign in"
        })),
        (status = 400, description = "Rejected by the scheduler API")
    ),
    tag = "Auth"
)]
pub async fn register(
    body: web::Json<RegisterAccount>,
    anon: web::Data<ApiClient>,
) -> Result<HttpResponse, AppError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password must not be empty".into(),
        ));
    }

    anon.register(&body).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Account created, please sign in"
    })))
}

/// Always succeeds, even without a live session.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Signed out")),
    tag = "Auth"
)]
pub async fn logout(session: MaybeSession, store: web::Data<SessionStore>) -> HttpResponse {
    if let MaybeSession(Some(session)) = session {
        store.remove(&session.id).await;
        info!(session_id = %session.id, "Signed out");
    }
    HttpResponse::NoContent().finish()
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current viewer", body = MeResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(session: AuthSession) -> HttpResponse {
    let viewer = session.viewer.clone();
    HttpResponse::Ok().json(MeResponse {
        home: default_dashboard(viewer.role).path(),
        sidebar: sidebar(viewer.role).to_vec(),
        viewer,
    })
}
