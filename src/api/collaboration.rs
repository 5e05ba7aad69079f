//! Chat, tasks and the shared calendar. Access control is left to the remote
//! API; these handlers only validate input.

use crate::auth::auth::AuthSession;
use crate::errors::AppError;
use crate::model::calendar_event::{CalendarEvent, CreateCalendarEvent};
use crate::model::chat::{Chat, ChatMessage, CreateChat, SendMessage};
use crate::model::task::{CreateTask, Task, UpdateTaskStatus};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct MessageDto {
    #[schema(example = "Running ten minutes late")]
    pub content: String,
}

#[utoipa::path(
    get,
    path = "/api/chats",
    responses((status = 200, description = "Chats the viewer takes part in", body = [Chat])),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn list_chats(session: AuthSession) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(session.client.list_chats().await?))
}

#[utoipa::path(
    post,
    path = "/api/chats",
    request_body = CreateChat,
    responses(
        (status = 201, description = "Chat created", body = Chat),
        (status = 400, description = "No participants")
    ),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn create_chat(
    session: AuthSession,
    payload: web::Json<CreateChat>,
) -> Result<HttpResponse, AppError> {
    if payload.participants.is_empty() {
        return Err(AppError::BadRequest("A chat needs at least one participant".into()));
    }
    Ok(HttpResponse::Created().json(session.client.create_chat(&payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/chats/{id}/messages",
    params(("id" = u64, Path, description = "Chat ID")),
    responses((status = 200, description = "Messages, oldest first", body = [ChatMessage])),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn list_messages(session: AuthSession, path: web::Path<u64>) -> Result<HttpResponse, AppError> {
    let mut messages = session.client.list_chat_messages(path.into_inner()).await?;
    messages.sort_by_key(|m| m.created_at);
    Ok(HttpResponse::Ok().json(messages))
}

#[utoipa::path(
    post,
    path = "/api/chats/{id}/messages",
    params(("id" = u64, Path, description = "Chat ID")),
    request_body = MessageDto,
    responses(
        (status = 201, description = "Message sent", body = ChatMessage),
        (status = 400, description = "Empty message")
    ),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn send_message(
    session: AuthSession,
    path: web::Path<u64>,
    payload: web::Json<MessageDto>,
) -> Result<HttpResponse, AppError> {
    let content = payload.into_inner().content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".into()));
    }
    let message = session
        .client
        .send_chat_message(&SendMessage {
            chat: path.into_inner(),
            content,
        })
        .await?;
    Ok(HttpResponse::Created().json(message))
}

#[utoipa::path(
    get,
    path = "/api/tasks",
    responses((status = 200, description = "Tasks", body = [Task])),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn list_tasks(session: AuthSession) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(session.client.list_tasks().await?))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Missing title")
    ),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn create_task(
    session: AuthSession,
    payload: web::Json<CreateTask>,
) -> Result<HttpResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("`title` is required".into()));
    }
    Ok(HttpResponse::Created().json(session.client.create_task(&payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/status",
    params(("id" = u64, Path, description = "Task ID")),
    request_body = UpdateTaskStatus,
    responses((status = 200, description = "Task updated", body = Task)),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn update_task_status(
    session: AuthSession,
    path: web::Path<u64>,
    payload: web::Json<UpdateTaskStatus>,
) -> Result<HttpResponse, AppError> {
    let task = session
        .client
        .update_task_status(path.into_inner(), &payload)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

#[utoipa::path(
    get,
    path = "/api/calendar/events",
    responses((status = 200, description = "Calendar events", body = [CalendarEvent])),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn list_events(session: AuthSession) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(session.client.list_calendar_events().await?))
}

#[utoipa::path(
    post,
    path = "/api/calendar/events",
    request_body = CreateCalendarEvent,
    responses(
        (status = 201, description = "Event created", body = CalendarEvent),
        (status = 400, description = "Invalid time range")
    ),
    security(("bearer_auth" = [])),
    tag = "Collaboration"
)]
pub async fn create_event(
    session: AuthSession,
    payload: web::Json<CreateCalendarEvent>,
) -> Result<HttpResponse, AppError> {
    if payload.end < payload.start {
        return Err(AppError::BadRequest("Event must end after it starts".into()));
    }
    Ok(HttpResponse::Created().json(session.client.create_calendar_event(&payload).await?))
}
