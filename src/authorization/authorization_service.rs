use std::sync::Arc;

use crate::{store::StoreResult, task::task_repository::TaskRepository};

/// Decides whether an actor may perform privileged task actions.
///
/// A denial is `Ok(false)`. `Err` always means the store could not be read.
#[derive(Clone)]
pub struct AuthorizationService {
    tasks: Arc<dyn TaskRepository>,
}

impl AuthorizationService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Only the task's creator may delete it. Unknown tasks and empty actor
    /// ids are denied.
    pub async fn can_delete_task(&self, actor_id: &str, task_id: &str) -> StoreResult<bool> {
        if actor_id.is_empty() {
            return Ok(false);
        }

        let allowed = match self.tasks.find_by_id(task_id).await? {
            Some(task) => task.created_by_id == actor_id,
            None => false,
        };

        tracing::debug!(actor_id, task_id, allowed, "Checked delete permission");
        Ok(allowed)
    }
}
