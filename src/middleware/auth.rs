use crate::{auth::Actor, error::AppError, state::AppState};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

/// Resolve the session through the injected provider and stash the actor
/// in the request extensions. No session means 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = state
        .session_provider
        .get_session(req.headers())
        .await
        .map_err(|e| AppError::internal("Failed to resolve session", e))?
        .ok_or_else(AppError::unauthorized)?;

    if session.expires_at <= Utc::now() {
        return Err(AppError::unauthorized());
    }

    req.extensions_mut().insert(session.actor);

    Ok(next.run(req).await)
}

// Extractor for the actor placed by `auth_middleware`
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .map(CurrentActor)
            .ok_or_else(AppError::unauthorized)
    }
}
