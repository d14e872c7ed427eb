use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::jwt::verify_jwt;
use crate::{
    store::StoreResult,
    user::{user_models::User, user_repository::UserRepository},
};

/// The authenticated identity behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub actor: Actor,
    pub expires_at: DateTime<Utc>,
}

/// Resolves request credentials to a session.
///
/// `Ok(None)` means "not authenticated"; `Err` means the lookup itself failed.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self, headers: &HeaderMap) -> StoreResult<Option<Session>>;
}

/// Bearer-token sessions: a signed JWT naming the user, who must still exist.
#[derive(Clone)]
pub struct JwtSessionProvider {
    secret: String,
    users: Arc<dyn UserRepository>,
}

impl JwtSessionProvider {
    pub fn new(secret: String, users: Arc<dyn UserRepository>) -> Self {
        Self { secret, users }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn get_session(&self, headers: &HeaderMap) -> StoreResult<Option<Session>> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };

        let claims = match verify_jwt(token, &self.secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                return Ok(None);
            }
        };

        let Some(expires_at) = DateTime::<Utc>::from_timestamp(claims.exp, 0) else {
            return Ok(None);
        };

        let session = self
            .users
            .find_by_id(&claims.sub)
            .await?
            .map(|user| Session {
                actor: user.into(),
                expires_at,
            });

        Ok(session)
    }
}
