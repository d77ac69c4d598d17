//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before the upgrade so no snapshot published in between is missed.
    let event_rx = state.event_bus.subscribe();
    let service = std::sync::Arc::clone(&state.service);

    ws.on_upgrade(move |socket| run_connection(socket, event_rx, service))
}
