use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, Result},
    middleware::CurrentActor,
    state::AppState,
};
use super::notification_models::Notification;

/// Get all notifications for the authenticated user
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "List of notifications", body = Vec<Notification>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch notifications")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<Notification>>> {
    let notifications = state
        .notification_service
        .list_for_user(&actor.id)
        .await
        .map_err(|e| AppError::internal("Failed to fetch notifications", e))?;

    Ok(Json(notifications))
}

/// Mark notification as read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = String, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found"),
        (status = 500, description = "Failed to update notification")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<Notification>> {
    let notification = state
        .notification_service
        .mark_read(&id, &actor.id)
        .await
        .map_err(|e| AppError::internal("Failed to update notification", e))?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(notification))
}
