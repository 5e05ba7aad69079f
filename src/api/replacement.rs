use crate::auth::auth::AuthSession;
use crate::errors::AppError;
use crate::model::replacement::{ReplacementFilter, ReplacementRequest, ReviewNotes};
use crate::workflow::replacement::{approve, list_visible, reject, request_replacement};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ReplacementReqDto {
    #[schema(example = 42)]
    pub shift: u64,
    #[schema(example = "I can cover, already on site")]
    pub notes: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/replacement-requests",
    params(ReplacementFilter),
    responses(
        (status = 200, description = "Replacement requests visible to the viewer", body = [ReplacementRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Replacement Requests"
)]
pub async fn list_requests(
    session: AuthSession,
    query: web::Query<ReplacementFilter>,
) -> Result<HttpResponse, AppError> {
    let requests = list_visible(&session.client, &session.viewer, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// Volunteer to cover a missed shift
#[utoipa::path(
    post,
    path = "/api/replacement-requests",
    request_body = ReplacementReqDto,
    responses(
        (status = 201, description = "Request submitted", body = ReplacementRequest),
        (status = 400, description = "Own shift"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Shift not open or already requested")
    ),
    security(("bearer_auth" = [])),
    tag = "Replacement Requests"
)]
pub async fn create_request(
    session: AuthSession,
    payload: web::Json<ReplacementReqDto>,
) -> Result<HttpResponse, AppError> {
    let ReplacementReqDto { shift, notes } = payload.into_inner();
    let notes = notes.filter(|n| !n.trim().is_empty());

    let request = request_replacement(&session.client, &session.viewer, shift, notes, Utc::now()).await?;
    Ok(HttpResponse::Created().json(request))
}

#[utoipa::path(
    post,
    path = "/api/replacement-requests/{id}/approve",
    params(("id" = u64, Path, description = "Replacement request ID")),
    responses(
        (status = 200, description = "Request approved", body = ReplacementRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Managers only"),
        (status = 409, description = "Already processed")
    ),
    security(("bearer_auth" = [])),
    tag = "Replacement Requests"
)]
pub async fn approve_request(
    session: AuthSession,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let request = approve(&session.client, &session.viewer, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(request))
}

#[utoipa::path(
    post,
    path = "/api/replacement-requests/{id}/reject",
    params(("id" = u64, Path, description = "Replacement request ID")),
    request_body = ReviewNotes,
    responses(
        (status = 200, description = "Request rejected", body = ReplacementRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Managers only"),
        (status = 409, description = "Already processed")
    ),
    security(("bearer_auth" = [])),
    tag = "Replacement Requests"
)]
pub async fn reject_request(
    session: AuthSession,
    path: web::Path<u64>,
    payload: Option<web::Json<ReviewNotes>>,
) -> Result<HttpResponse, AppError> {
    let notes = payload.map(web::Json::into_inner).unwrap_or_default();
    let request = reject(&session.client, &session.viewer, path.into_inner(), &notes).await?;
    Ok(HttpResponse::Ok().json(request))
}
