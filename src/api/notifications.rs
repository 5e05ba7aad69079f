use crate::auth::auth::AuthSession;
use crate::errors::AppError;
use crate::workflow::notifications::Notification;
use crate::workflow::poller::poll_notifications;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
pub struct NotificationQuery {
    /// Check the remote API before draining the inbox
    #[serde(default)]
    pub refresh: bool,
}

/// Drain the session's unread notifications. Each one is delivered once.
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications not delivered before", body = [Notification]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn list_notifications(
    session: AuthSession,
    query: web::Query<NotificationQuery>,
) -> Result<HttpResponse, AppError> {
    if query.refresh {
        poll_notifications(&session).await?;
    }
    let unread = session.inbox().take_unread();
    Ok(HttpResponse::Ok().json(unread))
}
