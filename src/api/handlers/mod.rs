//! REST endpoint handlers organized by resource.

pub mod state;
pub mod system;
pub mod tools;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(tools::routes()).merge(state::routes())
}
