use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    const INIT: &str = include_str!("../migrations/20250101000000_init.sql");

    fn table(name: &str) -> &'static str {
        let start = INIT
            .find(&format!("CREATE TABLE IF NOT EXISTS {name} ("))
            .unwrap();
        let end = start + INIT[start..].find(");").unwrap();
        &INIT[start..end]
    }

    #[test]
    fn test_notifications_outlive_their_context() {
        let notifications = table("notifications");
        for column in ["project_id", "task_id"] {
            let line = notifications
                .lines()
                .find(|l| l.trim_start().starts_with(column))
                .unwrap();
            assert!(line.contains("ON DELETE SET NULL"), "{line}");
        }
        assert!(!notifications.contains("projects(id) ON DELETE CASCADE"));
        assert!(!notifications.contains("tasks(id) ON DELETE CASCADE"));
    }
}
