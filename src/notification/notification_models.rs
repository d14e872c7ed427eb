use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Notification type tags written by this service.
pub mod kind {
    pub const TASK_ASSIGNED: &str = "task_assigned";
    pub const TASK_DUE: &str = "task_due";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input of `NotificationService::create_notification`.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateNotification {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    #[validate(length(min = 1, message = "type is required"))]
    pub kind: String,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
}
