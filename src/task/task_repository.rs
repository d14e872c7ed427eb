use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::task_models::{NewTask, Task, TaskRow, TASK_COLUMNS};
use crate::store::{StoreError, StoreResult};

/// Foreign keys on `tasks` and the request field each one guards.
const TASK_REFERENCES: &[(&str, &'static str)] = &[
    ("tasks_project_id_fkey", "projectId"),
    ("tasks_assignee_id_fkey", "assigneeId"),
    ("tasks_created_by_id_fkey", "createdById"),
];

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Task>>;

    /// Tasks of a project, newest first.
    async fn find_by_project(&self, project_id: &str) -> StoreResult<Vec<Task>>;

    /// Fails with `StoreError::MissingReference` when the project or the
    /// assignee does not exist.
    async fn create(&self, task: NewTask) -> StoreResult<Task>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: &str) -> StoreResult<u64>;

    /// Open tasks due at or before `until` that have not been reminded yet.
    async fn find_due_for_reminder(&self, until: DateTime<Utc>) -> StoreResult<Vec<Task>>;

    /// Atomically flag the task as reminded. `Ok(false)` when another sweep
    /// already holds it.
    async fn claim_reminder(&self, id: &str) -> StoreResult<bool>;

    /// Undo a claim whose notification could not be recorded.
    async fn release_reminder(&self, id: &str) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_tasks(rows: Vec<TaskRow>) -> StoreResult<Vec<Task>> {
    rows.into_iter().map(Task::try_from).collect()
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    async fn find_by_project(&self, project_id: &str) -> StoreResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        into_tasks(rows)
    }

    async fn create(&self, task: NewTask) -> StoreResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "INSERT INTO tasks (id, title, description, status, priority, due_date,
                                estimated_hours, project_id, assignee_id, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.priority.map(|p| p.as_str()))
        .bind(task.due_date)
        .bind(task.estimated_hours)
        .bind(&task.project_id)
        .bind(&task.assignee_id)
        .bind(&task.created_by_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(e, TASK_REFERENCES))?;

        Task::try_from(row)
    }

    async fn delete(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_due_for_reminder(&self, until: DateTime<Utc>) -> StoreResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE due_date IS NOT NULL
               AND due_date <= $1
               AND status <> 'DONE'
               AND reminder_sent = FALSE
             ORDER BY due_date ASC"
        ))
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        into_tasks(rows)
    }

    async fn claim_reminder(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE tasks SET reminder_sent = TRUE WHERE id = $1 AND reminder_sent = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn release_reminder(&self, id: &str) -> StoreResult<()> {
        sqlx::query("UPDATE tasks SET reminder_sent = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
