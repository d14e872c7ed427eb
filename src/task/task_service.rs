use std::sync::Arc;

use crate::{
    auth::Actor,
    authorization::AuthorizationService,
    notification::{
        notification_models::{kind, CreateNotification},
        notification_service::NotificationService,
    },
    store::StoreResult,
    task::{
        task_dto::CreateTaskRequest,
        task_models::{NewTask, Task},
        task_repository::TaskRepository,
    },
};

/// Service layer for task-related business logic.
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
    authorization: AuthorizationService,
    notifications: NotificationService,
}

impl TaskService {
    pub fn new(
        repo: Arc<dyn TaskRepository>,
        authorization: AuthorizationService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            authorization,
            notifications,
        }
    }

    pub async fn list_tasks(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        self.repo.find_by_project(project_id).await
    }

    /// Create a task owned by `actor` and tell the assignee, if it's someone else.
    pub async fn create_task(
        &self,
        actor: &Actor,
        project_id: &str,
        payload: CreateTaskRequest,
    ) -> StoreResult<Task> {
        let task = self
            .repo
            .create(NewTask {
                title: payload.title,
                description: payload.description,
                status: payload.status.unwrap_or_default(),
                priority: payload.priority,
                due_date: payload.due_date,
                estimated_hours: payload.estimated_hours,
                project_id: project_id.to_string(),
                assignee_id: payload.assignee_id,
                created_by_id: actor.id.clone(),
            })
            .await?;

        if let Some(assignee_id) = task.assignee_id.as_deref().filter(|id| *id != actor.id) {
            let result = self
                .notifications
                .create_notification(CreateNotification {
                    user_id: assignee_id.to_string(),
                    message: format!("{} assigned you to \"{}\"", actor.name, task.title),
                    kind: kind::TASK_ASSIGNED.to_string(),
                    project_id: Some(task.project_id.clone()),
                    task_id: Some(task.id.clone()),
                })
                .await;

            if let Err(e) = result {
                tracing::warn!(task_id = %task.id, "Assignment notification not recorded: {}", e);
            }
        }

        Ok(task)
    }

    /// Delete the task if the actor is allowed to. `Ok(false)` means denied.
    pub async fn delete_task(&self, actor_id: &str, task_id: &str) -> StoreResult<bool> {
        if !self.authorization.can_delete_task(actor_id, task_id).await? {
            return Ok(false);
        }

        let rows_affected = self.repo.delete(task_id).await?;
        Ok(rows_affected > 0)
    }
}
