mod db;
mod error;
mod middleware;
mod notification;
mod pages;
mod routes;
mod schedule;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use db::{create_pool, run_migrations};
use notification::{
    start_reminder_service, NotificationSender, NotificationService, NotifyXSender,
};
use routes::create_router;
use schedule::{ScheduleRepository, ScheduleService};
use state::{AppState, Config};
use store::{KvStore, MemoryKvStore, PgKvStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,schedule_manager=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let store: Arc<dyn KvStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = create_pool(database_url)
                .await
                .context("failed to connect to DATABASE_URL")?;

            tracing::info!("Running migrations...");
            run_migrations(&db).await?;

            Arc::new(PgKvStore::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, schedules are kept in memory only");
            Arc::new(MemoryKvStore::new())
        }
    };

    // Create repository and services
    let schedule_repository = ScheduleRepository::new(store, config.schedule_key.as_str());
    let schedule_service = ScheduleService::new(schedule_repository);
    let sender: Arc<dyn NotificationSender> =
        Arc::new(NotifyXSender::new(config.notify_base_url.clone()));
    let notification_service =
        NotificationService::new(schedule_service.repository().clone(), sender);

    // Start reminder service
    let _reminders = match &config.reminder_api_key {
        Some(api_key) => {
            let window = config.reminder_window()?;
            let scheduler =
                start_reminder_service(notification_service.clone(), api_key.clone(), window)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to start reminder service: {e}"))?;
            Some(scheduler)
        }
        None => None,
    };

    let state = AppState {
        schedule_service,
        notification_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
