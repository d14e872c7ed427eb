use async_trait::async_trait;
use sqlx::PgPool;

use super::user_models::{User, UserSummary};
use crate::store::StoreResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Every user, ordered by name.
    async fn list_all(&self) -> StoreResult<Vec<UserSummary>>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, image, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_all(&self) -> StoreResult<Vec<UserSummary>> {
        let users =
            sqlx::query_as::<_, UserSummary>("SELECT id, name, email FROM users ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }
}
