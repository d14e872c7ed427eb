//! In-memory store implementing every repository trait, for tests.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::{
    notification::{
        notification_models::{CreateNotification, Notification},
        notification_repository::NotificationRepository,
    },
    task::{
        task_models::{NewTask, Task, TaskStatus},
        task_repository::TaskRepository,
    },
    user::{
        user_models::{User, UserSummary},
        user_repository::UserRepository,
    },
};

struct StoredTask {
    task: Task,
    reminder_sent: bool,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    projects: Vec<String>,
    tasks: Vec<StoredTask>,
    notifications: Vec<Notification>,
}

/// An open, unassigned task with no due date.
pub fn sample_task(id: &str, project_id: &str, created_by_id: &str) -> Task {
    let now = Utc::now();
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: None,
        status: TaskStatus::Todo,
        priority: None,
        due_date: None,
        estimated_hours: None,
        project_id: project_id.to_string(),
        assignee_id: None,
        created_by_id: created_by_id.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Shared handle; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every repository call fails with `StoreError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }

    pub async fn add_user(&self, id: &str, name: &str, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            image: None,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().await.users.push(user.clone());
        user
    }

    pub async fn add_project(&self, id: &str) {
        self.state.lock().await.projects.push(id.to_string());
    }

    pub async fn add_task(&self, id: &str, project_id: &str, created_by_id: &str) -> Task {
        let task = sample_task(id, project_id, created_by_id);
        self.put_task(task.clone()).await;
        task
    }

    pub async fn put_task(&self, task: Task) {
        self.state.lock().await.tasks.push(StoredTask {
            task,
            reminder_sent: false,
        });
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<UserSummary>> {
        self.check()?;
        let state = self.state.lock().await;
        let mut users: Vec<UserSummary> = state.users.iter().cloned().map(Into::into).collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Task>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .iter()
            .find(|s| s.task.id == id)
            .map(|s| s.task.clone()))
    }

    async fn find_by_project(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .iter()
            .rev()
            .filter(|s| s.task.project_id == project_id)
            .map(|s| s.task.clone())
            .collect())
    }

    async fn create(&self, new: NewTask) -> StoreResult<Task> {
        self.check()?;
        {
            let state = self.state.lock().await;
            if !state.projects.contains(&new.project_id) {
                return Err(StoreError::MissingReference("projectId"));
            }
            if let Some(assignee_id) = &new.assignee_id {
                if !state.users.iter().any(|u| &u.id == assignee_id) {
                    return Err(StoreError::MissingReference("assigneeId"));
                }
            }
        }
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            due_date: new.due_date,
            estimated_hours: new.estimated_hours,
            project_id: new.project_id,
            assignee_id: new.assignee_id,
            created_by_id: new.created_by_id,
            created_at: now,
            updated_at: now,
        };
        self.put_task(task.clone()).await;
        Ok(task)
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        self.check()?;
        let mut state = self.state.lock().await;
        let before = state.tasks.len();
        state.tasks.retain(|s| s.task.id != id);
        Ok((before - state.tasks.len()) as u64)
    }

    async fn find_due_for_reminder(&self, until: DateTime<Utc>) -> StoreResult<Vec<Task>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .iter()
            .filter(|s| !s.reminder_sent && s.task.status != TaskStatus::Done)
            .filter(|s| s.task.due_date.is_some_and(|due| due <= until))
            .map(|s| s.task.clone())
            .collect())
    }

    async fn claim_reminder(&self, id: &str) -> StoreResult<bool> {
        self.check()?;
        let mut state = self.state.lock().await;
        Ok(match state.tasks.iter_mut().find(|s| s.task.id == id) {
            Some(stored) if !stored.reminder_sent => {
                stored.reminder_sent = true;
                true
            }
            _ => false,
        })
    }

    async fn release_reminder(&self, id: &str) -> StoreResult<()> {
        self.check()?;
        let mut state = self.state.lock().await;
        if let Some(stored) = state.tasks.iter_mut().find(|s| s.task.id == id) {
            stored.reminder_sent = false;
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn insert(&self, new: &CreateNotification) -> StoreResult<Notification> {
        self.check()?;
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id.clone(),
            message: new.message.clone(),
            kind: new.kind.clone(),
            project_id: new.project_id.clone(),
            task_id: new.task_id.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .await
            .notifications
            .push(notification.clone());
        Ok(notification)
    }

    async fn find_all_by_user(&self, user_id: &str) -> StoreResult<Vec<Notification>> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_as_read(&self, id: &str, user_id: &str) -> StoreResult<Option<Notification>> {
        self.check()?;
        let mut state = self.state.lock().await;
        Ok(state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .map(|n| {
                n.is_read = true;
                n.clone()
            }))
    }
}

/// Notification repository that refuses every write; reads come back empty.
pub struct FailingNotifications;

#[async_trait]
impl NotificationRepository for FailingNotifications {
    async fn insert(&self, _notification: &CreateNotification) -> StoreResult<Notification> {
        Err(StoreError::Unavailable("notifications offline".to_string()))
    }

    async fn find_all_by_user(&self, _user_id: &str) -> StoreResult<Vec<Notification>> {
        Ok(Vec::new())
    }

    async fn mark_as_read(&self, _id: &str, _user_id: &str) -> StoreResult<Option<Notification>> {
        Ok(None)
    }
}
