//! proverbs-agent server entry point.
//!
//! Wires configuration, storage, and session state, then serves the
//! tool, state, and WebSocket endpoints until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use proverbs_agent::api;
use proverbs_agent::app_state::AppState;
use proverbs_agent::config::AgentConfig;
use proverbs_agent::domain::{EventBus, SessionState};
use proverbs_agent::persistence::{ConnectionManager, ProverbRepository};
use proverbs_agent::service::{Lifecycle, ProverbService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = AgentConfig::from_env().context("invalid LISTEN_ADDR")?;
    tracing::info!(addr = %config.listen_addr, "starting proverbs-agent");

    // Build storage and domain layers
    let connections = Arc::new(ConnectionManager::new(&config));
    let repository = Arc::new(ProverbRepository::new(Arc::clone(&connections)));
    let session = Arc::new(SessionState::new());
    let event_bus = EventBus::new(config.event_bus_capacity);

    // Build service layer
    let service = Arc::new(ProverbService::new(session, repository, event_bus));
    let lifecycle = Lifecycle::new(Arc::clone(&connections), Arc::clone(&service));

    let report = lifecycle.on_start().await;
    tracing::info!(persistence = ?report.persistence, hydrated = report.hydrated, "startup complete");

    let app = api::build_app(AppState::new(service, connections));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    lifecycle.on_stop().await;
    served.context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
