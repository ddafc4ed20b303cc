//! event-desk server entry point.
//!
//! Starts the Axum HTTP server with REST, WebSocket and static storage
//! endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use event_desk::api;
use event_desk::app_state::AppState;
use event_desk::config::DeskConfig;
use event_desk::domain::EventBus;
use event_desk::persistence::{MemoryStore, PostgresStore, RequestStore};
use event_desk::service::RequestService;
use event_desk::storage::ImageStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = DeskConfig::from_env()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("loading configuration")?;
    tracing::info!(addr = %config.listen_addr, "starting event-desk");
    if config.admin_user_ids.is_empty() {
        tracing::warn!("ADMIN_USER_IDS is empty; nobody can review requests");
    }

    // Persistence
    let store = if config.persistence_enabled {
        let pg = PostgresStore::connect(&config)
            .await
            .context("connecting to PostgreSQL")?;
        tracing::info!("using PostgreSQL request store");
        RequestStore::Postgres(pg)
    } else {
        tracing::warn!("persistence disabled, requests are kept in memory");
        RequestStore::Memory(MemoryStore::new())
    };

    // Object storage
    tokio::fs::create_dir_all(&config.storage_root)
        .await
        .with_context(|| format!("creating {}", config.storage_root.display()))?;
    let images = ImageStore::new(
        config.storage_root.clone(),
        config.storage_bucket.clone(),
        &config.public_base_url,
    );

    // Service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let request_service = Arc::new(RequestService::new(
        store,
        images,
        event_bus,
        config.max_image_bytes,
    ));

    spawn_draft_sweeper(
        Arc::clone(&request_service),
        config.draft_ttl_secs,
        config.draft_sweep_interval_secs,
    );

    let app_state = AppState::new(request_service, config.admin_user_ids.clone());

    let app = api::build_app(app_state, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Periodically drops drafts that were never confirmed.
fn spawn_draft_sweeper(service: Arc<RequestService>, ttl_secs: u64, interval_secs: u64) {
    let ttl = i64::try_from(ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            interval.tick().await;
            service.purge_stale_drafts(ttl).await;
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
