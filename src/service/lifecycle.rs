//! Startup and shutdown of the storage mirror.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use super::ProverbService;
use crate::persistence::ConnectionManager;

/// Whether the storage mirror is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceStatus {
    /// Pool and schema are ready.
    Connected,
    /// In-memory only. Mutations still attempt writes and log each failure.
    Degraded,
}

/// What [`Lifecycle::on_start`] achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    /// Storage mode for this process.
    pub persistence: PersistenceStatus,
    /// Number of proverbs loaded into the session.
    pub hydrated: usize,
}

/// Lifecycle controller.
///
/// Storage problems at startup never abort the process; they switch it
/// into degraded mode.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    connections: Arc<ConnectionManager>,
    service: Arc<ProverbService>,
}

impl Lifecycle {
    /// Creates a controller over the shared pool manager and service.
    #[must_use]
    pub fn new(connections: Arc<ConnectionManager>, service: Arc<ProverbService>) -> Self {
        Self {
            connections,
            service,
        }
    }

    /// Initializes pool and schema, then hydrates the session from storage.
    pub async fn on_start(&self) -> StartupReport {
        if let Err(err) = self.connections.initialize().await {
            tracing::warn!(
                error = %err,
                "database not configured or unavailable; continuing with in-memory state only"
            );
            return StartupReport {
                persistence: PersistenceStatus::Degraded,
                hydrated: 0,
            };
        }

        let hydrated = self.service.hydrate().await;
        if hydrated > 0 {
            tracing::info!(count = hydrated, "loaded proverbs from database");
        }
        StartupReport {
            persistence: PersistenceStatus::Connected,
            hydrated,
        }
    }

    /// Closes the pool. Never fails.
    pub async fn on_stop(&self) {
        self.connections.shutdown().await;
        tracing::info!("lifecycle stopped");
    }
}
