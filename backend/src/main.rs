mod domain;
mod application;
mod infrastructure;
mod config;

use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use application::discussion::ResponseNotificationHandler;
use application::ports::MessageSender;
use crate::config::{Settings, DEV_JWT_SECRET};
use infrastructure::driven::{
    persistence, spawn_notification_worker, EventPublisher, HttpEnrollmentService, HttpSubscriptionService,
    LogMessageSender, SmtpMessageSender,
};
use infrastructure::driving::create_router;
use infrastructure::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Entitlements server starting...");
    if settings.auth.jwt_secret == DEV_JWT_SECRET {
        tracing::warn!("Using the development JWT secret, set ENTITLEMENTS__AUTH__JWT_SECRET in production");
    }

    let pool = persistence::connect(&settings.database.url, settings.database.max_connections).await?;
    let entitlement_repo = Arc::new(persistence::SqliteEntitlementRepository::new(pool.clone()));
    let user_repo = Arc::new(persistence::SqliteUserRepository::new(pool.clone()));
    let catalog = Arc::new(persistence::SqliteCourseCatalog::new(pool));

    let enrollment_service = Arc::new(HttpEnrollmentService::new(
        &settings.enrollment.base_url,
        settings.enrollment.api_token.clone(),
        Duration::from_secs(settings.enrollment.timeout_secs),
    )?);
    let subscriptions = Arc::new(HttpSubscriptionService::new(
        &settings.comments.base_url,
        settings.comments.api_key.clone(),
        Duration::from_secs(settings.comments.timeout_secs),
    )?);

    let notifications = &settings.notifications;
    let sender: Arc<dyn MessageSender> = match &notifications.smtp_host {
        Some(host) => Arc::new(SmtpMessageSender::new(host, notifications.smtp_port, &notifications.from_address)?),
        None => {
            tracing::warn!("No SMTP host configured, notification emails will only be logged");
            Arc::new(LogMessageSender)
        }
    };
    let handler = Arc::new(ResponseNotificationHandler::new(
        subscriptions,
        user_repo.clone(),
        catalog,
        sender,
        notifications.handler_settings(),
    ));
    let (events, rx) = EventPublisher::channel(notifications.queue_capacity);
    let worker = spawn_notification_worker(rx, handler);

    let state = AppState {
        entitlement_repo,
        user_repo,
        enrollment_service,
        events,
        jwt_secret: settings.auth.jwt_secret.clone(),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", settings.server.bind_addr))?;
    tracing::info!("Listening on {}", settings.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The router held the last publisher; the worker drains what is queued.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Notification worker panicked");
    }
    tracing::info!("Entitlements server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
