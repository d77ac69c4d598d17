//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::ConnectionManager;
use crate::service::ProverbService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session operations.
    pub service: Arc<ProverbService>,
    /// Pool manager, consulted for health reporting.
    pub connections: Arc<ConnectionManager>,
    /// Snapshot feed for WebSocket clients.
    pub event_bus: EventBus,
}

impl AppState {
    /// Bundles the shared components. The event bus is taken from the service.
    #[must_use]
    pub fn new(service: Arc<ProverbService>, connections: Arc<ConnectionManager>) -> Self {
        let event_bus = service.event_bus().clone();
        Self {
            service,
            connections,
            event_bus,
        }
    }
}
