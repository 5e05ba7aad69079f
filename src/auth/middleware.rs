use super::jwt::verify_token;
use super::session::{Session, SessionStore};
use crate::config::Config;
use crate::errors::AppError;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, HeaderMap},
    web::Data,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Verify the session token and load its live session.
pub(crate) async fn resolve_session(
    store: &SessionStore,
    secret: &str,
    token: &str,
) -> Result<Arc<Session>, AppError> {
    let claims = verify_token(token, secret)
        .map_err(|e| AppError::Unauthorized(format!("Invalid or expired token: {e}")))?;

    match store.get(&claims.sid).await {
        Some(session) => Ok(session),
        None => {
            debug!(session_id = %claims.sid, "Session gone, asking for a new sign-in");
            Err(AppError::Unauthorized(
                "Your session has expired, please sign in again".into(),
            ))
        }
    }
}

pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;
    let store = req
        .app_data::<Data<SessionStore>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Session store missing"))?;

    let token = match bearer_token(req.headers()) {
        Some(t) => t.to_string(),
        None => {
            let resp = HttpResponse::Unauthorized()
                .json(json!({"error": "Missing or malformed Authorization header"}));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    let session = match resolve_session(&store, &config.session_secret, &token).await {
        Ok(session) => session,
        Err(e) => {
            let resp = HttpResponse::Unauthorized().json(json!({"error": e.to_string()}));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    req.extensions_mut().insert(session);

    next.call(req).await
}
