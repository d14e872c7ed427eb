use std::sync::Arc;

use crate::{
    store::StoreResult,
    user::{user_models::UserSummary, user_repository::UserRepository},
};

#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn list_users(&self) -> StoreResult<Vec<UserSummary>> {
        self.user_repository.list_all().await
    }
}
