use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::notification_models::{CreateNotification, Notification};
use crate::store::StoreResult;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, message, type, project_id, task_id, is_read, created_at";

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Single insert; the store assigns id and timestamp and `is_read` starts false.
    async fn insert(&self, notification: &CreateNotification) -> StoreResult<Notification>;

    /// Notifications addressed to `user_id`, newest first.
    async fn find_all_by_user(&self, user_id: &str) -> StoreResult<Vec<Notification>>;

    async fn mark_as_read(&self, id: &str, user_id: &str) -> StoreResult<Option<Notification>>;
}

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn insert(&self, notification: &CreateNotification) -> StoreResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (id, user_id, message, type, project_id, task_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&notification.user_id)
        .bind(&notification.message)
        .bind(&notification.kind)
        .bind(&notification.project_id)
        .bind(&notification.task_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn find_all_by_user(&self, user_id: &str) -> StoreResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn mark_as_read(&self, id: &str, user_id: &str) -> StoreResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2
             RETURNING {NOTIFICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }
}
