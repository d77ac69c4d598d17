//! Tool catalog and invocation handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::ToolCatalogResponse;
use crate::app_state::AppState;
use crate::error::{AgentError, ErrorResponse};
use crate::tools::{self, SYSTEM_PROMPT, ToolCall, ToolOutput};

/// `GET /tools` — List registered tools.
#[utoipa::path(
    get,
    path = "/api/v1/tools",
    tag = "Tools",
    summary = "List tools",
    description = "Returns the system prompt and every tool with its JSON-schema parameters.",
    responses(
        (status = 200, description = "Tool catalog", body = ToolCatalogResponse),
    )
)]
pub async fn list_tools() -> impl IntoResponse {
    Json(ToolCatalogResponse {
        system_prompt: SYSTEM_PROMPT,
        tools: tools::catalog(),
    })
}

/// `POST /tools/{name}` — Invoke a tool.
///
/// The body is the tool's arguments object; an empty body means `{}`.
///
/// # Errors
///
/// Returns [`AgentError::UnknownTool`] or [`AgentError::InvalidArguments`].
#[utoipa::path(
    post,
    path = "/api/v1/tools/{name}",
    tag = "Tools",
    summary = "Invoke a tool",
    description = "Runs a tool against the session. Mutating tools return a STATE_SNAPSHOT event and broadcast it to WebSocket clients.",
    params(
        ("name" = String, Path, description = "Tool name"),
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Tool output", body = ToolOutput),
        (status = 400, description = "Arguments do not match the tool", body = ErrorResponse),
        (status = 404, description = "Unknown tool", body = ErrorResponse),
    )
)]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolOutput>, AgentError> {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| AgentError::InvalidArguments(e.to_string()))?
    };
    let call = ToolCall::parse(&name, arguments)?;
    Ok(Json(tools::dispatch(&state.service, call).await))
}

/// Tool routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool))
}
