use axum::{extract::State, Json};

use crate::{
    error::{AppError, Result},
    state::AppState,
    user::user_models::UserSummary,
};

/// List every user (id, name, email) for assignee pickers
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<UserSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Failed to fetch users")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(|e| AppError::internal("Failed to fetch users", e))?;

    Ok(Json(users))
}
