//! Direct state read/write for clients that render the list.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::UpdateStateRequest;
use crate::app_state::AppState;
use crate::domain::{ProverbsState, StateSnapshotEvent};

/// `GET /state` — Current session state.
#[utoipa::path(
    get,
    path = "/api/v1/state",
    tag = "State",
    summary = "Get session state",
    responses(
        (status = 200, description = "Current proverbs", body = ProverbsState),
    )
)]
pub async fn get_state(State(state): State<AppState>) -> Json<ProverbsState> {
    Json(ProverbsState::new(state.service.get().await))
}

/// `PUT /state` — Replace the list from the client side.
///
/// Goes through the same `set` operation as the `set_proverbs` tool.
#[utoipa::path(
    put,
    path = "/api/v1/state",
    tag = "State",
    summary = "Replace session state",
    request_body = UpdateStateRequest,
    responses(
        (status = 200, description = "Snapshot after replacement", body = StateSnapshotEvent),
    )
)]
pub async fn put_state(
    State(state): State<AppState>,
    Json(req): Json<UpdateStateRequest>,
) -> Json<StateSnapshotEvent> {
    Json(state.service.set(req.proverbs).await)
}

/// State routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/state", get(get_state).put(put_state))
}
