use anyhow::Context;
use std::sync::Arc;

use crate::{
    auth::SessionProvider,
    authorization::AuthorizationService,
    notification::{NotificationRepository, NotificationService},
    task::{TaskRepository, TaskService},
    user::{UserRepository, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub session_provider: Arc<dyn SessionProvider>,
    pub authorization_service: AuthorizationService,
    pub notification_service: NotificationService,
    pub task_service: TaskService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(
        session_provider: Arc<dyn SessionProvider>,
        task_repository: Arc<dyn TaskRepository>,
        user_repository: Arc<dyn UserRepository>,
        notification_repository: Arc<dyn NotificationRepository>,
    ) -> Self {
        let authorization_service = AuthorizationService::new(task_repository.clone());
        let notification_service = NotificationService::new(notification_repository);
        let task_service = TaskService::new(
            task_repository,
            authorization_service.clone(),
            notification_service.clone(),
        );
        let user_service = UserService::new(user_repository);

        Self {
            session_provider,
            authorization_service,
            notification_service,
            task_service,
            user_service,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_secret: String,
    pub host: String,
    pub port: u16,
    pub reminder_schedule: String,
    pub reminder_window_minutes: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: or_default("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            session_secret: required("SESSION_SECRET")?,
            host: or_default("HOST", "127.0.0.1"),
            port: or_default("PORT", "3000")
                .parse()
                .context("PORT must be a port number")?,
            reminder_schedule: or_default("REMINDER_SCHEDULE", "0 * * * * *"),
            reminder_window_minutes: or_default("REMINDER_WINDOW_MINUTES", "60")
                .parse()
                .context("REMINDER_WINDOW_MINUTES must be a number")?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/collab"),
            ("SESSION_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.reminder_schedule, "0 * * * * *");
        assert_eq!(config.reminder_window_minutes, 60);
    }

    #[test]
    fn test_missing_or_malformed_values_are_errors() {
        let missing = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")]))
            .err()
            .expect("SESSION_SECRET is required");
        assert!(missing.to_string().contains("SESSION_SECRET"));

        let bad_port = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("SESSION_SECRET", "s"),
            ("PORT", "eighty"),
        ]));
        assert!(bad_port.is_err());
    }
}
