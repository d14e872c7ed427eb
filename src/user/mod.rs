pub mod user_models;
pub mod user_repository;
pub mod user_handlers;
pub mod user_service;

pub use user_models::UserSummary;
pub use user_repository::{PgUserRepository, UserRepository};
pub use user_handlers::list_users;
pub use user_service::UserService;
