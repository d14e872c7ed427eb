use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, Result},
    middleware::CurrentActor,
    state::AppState,
    store::StoreError,
};
use super::{
    task_dto::{CreateTaskRequest, TaskPermissionsResponse},
    task_models::Task,
};

/// List the tasks of a project, newest first
#[utoipa::path(
    get,
    path = "/api/projects/{id}/tasks",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Tasks of the project", body = Vec<Task>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch tasks")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<Task>>> {
    let tasks = state
        .task_service
        .list_tasks(&project_id)
        .await
        .map_err(|e| AppError::internal("Failed to fetch tasks", e))?;

    Ok(Json(tasks))
}

/// Create a task in a project; the caller becomes its owner
#[utoipa::path(
    post,
    path = "/api/projects/{id}/tasks",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid input or unknown assignee"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Failed to create task")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(project_id): Path<String>,
    payload: std::result::Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;

    let task = state
        .task_service
        .create_task(&actor, &project_id, payload)
        .await
        .map_err(|e| match e {
            StoreError::MissingReference("projectId") => {
                AppError::NotFound("Project not found".to_string())
            }
            StoreError::MissingReference(field) => AppError::Validation(format!("Unknown {field}")),
            other => AppError::internal("Failed to create task", other),
        })?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Delete a task; only its creator may do so
#[utoipa::path(
    delete,
    path = "/api/projects/{id}/tasks/{task_id}",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the task's creator, or no such task"),
        (status = 500, description = "Failed to delete task")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((_project_id, task_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    let deleted = state
        .task_service
        .delete_task(&actor.id, &task_id)
        .await
        .map_err(|e| AppError::internal("Failed to delete task", e))?;

    if !deleted {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Report what the caller may do with a task
#[utoipa::path(
    get,
    path = "/api/projects/{id}/tasks/{task_id}/permissions",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("task_id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Permission flags", body = TaskPermissionsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to check permissions")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_task_permissions(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((_project_id, task_id)): Path<(String, String)>,
) -> Result<Json<TaskPermissionsResponse>> {
    let can_delete = state
        .authorization_service
        .can_delete_task(&actor.id, &task_id)
        .await
        .map_err(|e| AppError::internal("Failed to check permissions", e))?;

    Ok(Json(TaskPermissionsResponse { can_delete }))
}
