//! # hearthd — hearth daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Seed demo data on first launch
//! - Construct repository implementations (adapters)
//! - Construct the broadcast subsystem (registries, queue) and spawn the
//!   one dedicated dispatcher task
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until ctrl-c
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use hearth_adapter_http_axum::router;
use hearth_adapter_http_axum::state::AppState;
use hearth_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteChangeLogRepository, SqliteDeviceRepository, seed,
};
use hearth_app::broadcast::{Dispatcher, EventQueue, SubscriberRegistry};
use hearth_app::services::change_log_service::ChangeLogService;
use hearth_app::services::device_service::DeviceService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database — a missing schema is fatal by design.
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    if config.seed.enabled {
        seed::seed_devices(&pool).await?;
    }

    // Repositories, shared between the services and the dispatcher.
    let device_repo = Arc::new(SqliteDeviceRepository::new(pool.clone()));
    let change_log_repo = Arc::new(SqliteChangeLogRepository::new(pool));

    // Broadcast subsystem: one queue, one registry per feed, one dispatcher
    // task per running server instance.
    let (events, receiver) = EventQueue::bounded(config.broadcast.queue_capacity);
    let device_feed = Arc::new(SubscriberRegistry::new(config.broadcast.subscriber_buffer));
    let change_log_feed = Arc::new(SubscriberRegistry::new(config.broadcast.subscriber_buffer));
    tokio::spawn(
        Dispatcher::new(
            receiver,
            Arc::clone(&device_repo),
            Arc::clone(&change_log_repo),
            Arc::clone(&device_feed),
            Arc::clone(&change_log_feed),
        )
        .run(),
    );

    // Services
    let device_service = DeviceService::new(
        Arc::clone(&device_repo),
        Arc::clone(&change_log_repo),
        events,
    );
    let change_log_service = ChangeLogService::new(change_log_repo);

    // HTTP
    let state = AppState::new(
        device_service,
        change_log_service,
        device_feed,
        change_log_feed,
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "hearthd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
    }
}
