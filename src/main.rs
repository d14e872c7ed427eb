mod auth;
mod authorization;
mod db;
mod error;
mod middleware;
mod notification;
mod routes;
mod state;
mod store;
mod task;
mod user;

use anyhow::Context;
use auth::JwtSessionProvider;
use db::{create_pool, run_migrations};
use notification::{start_reminder_job, PgNotificationRepository, ReminderJob};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use task::PgTaskRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user::PgUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,team_collab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await.context("failed to run migrations")?;

    // Repositories
    let task_repository = Arc::new(PgTaskRepository::new(db.clone()));
    let user_repository = Arc::new(PgUserRepository::new(db.clone()));
    let notification_repository = Arc::new(PgNotificationRepository::new(db.clone()));

    let session_provider = Arc::new(JwtSessionProvider::new(
        config.session_secret.clone(),
        user_repository.clone(),
    ));

    let state = AppState::new(
        session_provider,
        task_repository.clone(),
        user_repository,
        notification_repository,
    );

    // Due-date reminders
    let reminder_job = ReminderJob::new(
        task_repository,
        state.notification_service.clone(),
        chrono::Duration::minutes(config.reminder_window_minutes),
    );
    start_reminder_job(reminder_job, &config.reminder_schedule)
        .await
        .context("failed to start reminder job")?;

    let app = create_router(state);

    let addr = config.addr();
    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
