use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            other => Err(ParseEnumError {
                kind: "task status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Urgent => "URGENT",
            TaskPriority::High => "HIGH",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::Low => "LOW",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "URGENT" => Ok(TaskPriority::Urgent),
            "HIGH" => Ok(TaskPriority::High),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "LOW" => Ok(TaskPriority::Low),
            other => Err(ParseEnumError {
                kind: "task priority",
                value: other.to_string(),
            }),
        }
    }
}

/// A task inside a project.
///
/// `created_by_id` is fixed at creation and is the identity checked when
/// someone asks to delete the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub project_id: String,
    pub assignee_id: Option<String>,
    pub created_by_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Who should hear about this task: the assignee, else the creator.
    pub fn responsible_user_id(&self) -> &str {
        self.assignee_id.as_deref().unwrap_or(&self.created_by_id)
    }
}

/// Columns selected for every `TaskRow` query.
pub const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, \
     estimated_hours, project_id, assignee_id, created_by_id, created_at, updated_at";

/// Raw `tasks` row; enums are stored as text.
#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub project_id: String,
    pub assignee_id: Option<String>,
    pub created_by_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e: ParseEnumError| StoreError::Corrupt(format!("task {}: {}", row.id, e)))?;
        let priority = row
            .priority
            .as_deref()
            .map(TaskPriority::from_str)
            .transpose()
            .map_err(|e| StoreError::Corrupt(format!("task {}: {}", row.id, e)))?;

        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            priority,
            due_date: row.due_date,
            estimated_hours: row.estimated_hours,
            project_id: row.project_id,
            assignee_id: row.assignee_id,
            created_by_id: row.created_by_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert payload for a task; ids and timestamps are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub project_id: String,
    pub assignee_id: Option<String>,
    pub created_by_id: String,
}
