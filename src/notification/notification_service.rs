use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use super::{
    notification_models::{CreateNotification, Notification},
    notification_repository::NotificationRepository,
};
use crate::store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Invalid notification: {0}")]
    InvalidInput(String),

    #[error("Failed to persist notification: {0}")]
    Persistence(#[source] StoreError),
}

/// Records notifications as a side effect of domain events.
///
/// Delivery is somebody else's job: this only writes the record.
#[derive(Clone)]
pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store one notification. Invalid input never reaches the
    /// store, and a failed insert is reported as-is without retrying.
    pub async fn create_notification(
        &self,
        input: CreateNotification,
    ) -> Result<Notification, NotificationError> {
        input
            .validate()
            .map_err(|e| NotificationError::InvalidInput(e.to_string()))?;

        let notification = self
            .repo
            .insert(&input)
            .await
            .map_err(NotificationError::Persistence)?;

        tracing::debug!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            kind = %notification.kind,
            "Notification recorded"
        );

        Ok(notification)
    }

    pub async fn list_for_user(&self, user_id: &str) -> StoreResult<Vec<Notification>> {
        self.repo.find_all_by_user(user_id).await
    }

    pub async fn mark_read(&self, id: &str, user_id: &str) -> StoreResult<Option<Notification>> {
        self.repo.mark_as_read(id, user_id).await
    }
}
