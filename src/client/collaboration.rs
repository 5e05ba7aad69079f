//! Chat, task and calendar resources.

use super::{ApiClient, ApiError};
use crate::model::{
    calendar_event::{CalendarEvent, CreateCalendarEvent},
    chat::{Chat, ChatMessage, CreateChat, SendMessage},
    task::{CreateTask, Task, UpdateTaskStatus},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct ChatScope {
    chat: u64,
}

impl ApiClient {
    pub async fn list_chats(&self) -> Result<Vec<Chat>, ApiError> {
        self.list_all("/tasks/chats/").await
    }

    pub async fn create_chat(&self, body: &CreateChat) -> Result<Chat, ApiError> {
        self.post("/tasks/chats/", body).await
    }

    pub async fn list_chat_messages(&self, chat: u64) -> Result<Vec<ChatMessage>, ApiError> {
        self.list("/tasks/chat-messages/", &ChatScope { chat }).await
    }

    pub async fn send_chat_message(&self, body: &SendMessage) -> Result<ChatMessage, ApiError> {
        self.post("/tasks/chat-messages/", body).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.list_all("/tasks/tasks/").await
    }

    pub async fn create_task(&self, body: &CreateTask) -> Result<Task, ApiError> {
        self.post("/tasks/tasks/", body).await
    }

    pub async fn update_task_status(&self, id: u64, body: &UpdateTaskStatus) -> Result<Task, ApiError> {
        self.patch(&format!("/tasks/tasks/{id}/"), body).await
    }

    pub async fn list_calendar_events(&self) -> Result<Vec<CalendarEvent>, ApiError> {
        self.list_all("/calendar/events/").await
    }

    pub async fn create_calendar_event(&self, body: &CreateCalendarEvent) -> Result<CalendarEvent, ApiError> {
        self.post("/calendar/events/", body).await
    }
}
