//! Tool-call boundary between the conversational runtime and the session.
//!
//! The runtime decides when to call a tool; this module decodes the call,
//! runs it against [`ProverbService`], and encodes the result.

pub mod catalog;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::StateSnapshotEvent;
use crate::error::AgentError;
use crate::service::ProverbService;

pub use catalog::{SYSTEM_PROMPT, ToolSpec, catalog};

/// A decoded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    /// Read the current list.
    GetProverbs {},
    /// Append to the list.
    AddProverbs {
        /// Proverbs to append.
        proverbs: Vec<String>,
    },
    /// Replace the list.
    SetProverbs {
        /// New list.
        proverbs: Vec<String>,
    },
    /// Canned weather lookup.
    GetWeather {
        /// Fully spelled-out location.
        location: String,
    },
}

impl ToolCall {
    /// Decodes a call from a tool name and its JSON arguments.
    ///
    /// A `null` arguments value is treated as `{}`.
    ///
    /// # Errors
    ///
    /// - [`AgentError::UnknownTool`] if `name` is not registered.
    /// - [`AgentError::InvalidArguments`] if the arguments do not match.
    pub fn parse(name: &str, arguments: serde_json::Value) -> Result<Self, AgentError> {
        if !catalog::is_registered(name) {
            return Err(AgentError::UnknownTool(name.to_string()));
        }
        let arguments = if arguments.is_null() {
            json!({})
        } else {
            arguments
        };
        serde_json::from_value(json!({ "name": name, "arguments": arguments }))
            .map_err(|e| AgentError::InvalidArguments(e.to_string()))
    }

    /// Registered name of this call's tool.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetProverbs {} => "get_proverbs",
            Self::AddProverbs { .. } => "add_proverbs",
            Self::SetProverbs { .. } => "set_proverbs",
            Self::GetWeather { .. } => "get_weather",
        }
    }
}

/// What a tool hands back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ToolOutput {
    /// The current list (`get_proverbs`).
    Proverbs(Vec<String>),
    /// Snapshot after a mutation (`add_proverbs`, `set_proverbs`).
    Snapshot(StateSnapshotEvent),
    /// Free text (`get_weather`).
    Text(String),
}

/// Runs `call` against the session.
pub async fn dispatch(service: &ProverbService, call: ToolCall) -> ToolOutput {
    tracing::debug!(tool = call.name(), "dispatching tool call");
    match call {
        ToolCall::GetProverbs {} => ToolOutput::Proverbs(service.get().await),
        ToolCall::AddProverbs { proverbs } => ToolOutput::Snapshot(service.add(proverbs).await),
        ToolCall::SetProverbs { proverbs } => ToolOutput::Snapshot(service.set(proverbs).await),
        ToolCall::GetWeather { location } => ToolOutput::Text(weather(&location)),
    }
}

/// Canned weather sentence.
#[must_use]
pub fn weather(location: &str) -> String {
    format!("The weather in {location} is sunny.")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AgentConfig;
    use crate::domain::{EventBus, SessionState};
    use crate::persistence::{ConnectionManager, ProverbRepository};

    fn degraded_service() -> ProverbService {
        let connections = Arc::new(ConnectionManager::new(&AgentConfig::default()));
        ProverbService::new(
            Arc::new(SessionState::new()),
            Arc::new(ProverbRepository::new(connections)),
            EventBus::new(16),
        )
    }

    #[test]
    fn parse_accepts_null_arguments_for_get() {
        let Ok(call) = ToolCall::parse("get_proverbs", serde_json::Value::Null) else {
            panic!("get_proverbs takes no arguments");
        };
        assert_eq!(call, ToolCall::GetProverbs {});
    }

    #[test]
    fn parse_rejects_unknown_tool() {
        let result = ToolCall::parse("delete_proverbs", json!({}));
        assert!(matches!(result, Err(AgentError::UnknownTool(_))));
    }

    #[test]
    fn parse_rejects_missing_proverbs() {
        let result = ToolCall::parse("add_proverbs", json!({ "items": ["x"] }));
        assert!(matches!(result, Err(AgentError::InvalidArguments(_))));
    }

    #[test]
    fn parse_round_trips_name() {
        let Ok(call) = ToolCall::parse("set_proverbs", json!({ "proverbs": ["a"] })) else {
            panic!("valid set_proverbs call");
        };
        assert_eq!(call.name(), "set_proverbs");
    }

    #[tokio::test]
    async fn add_then_get_through_dispatch() {
        let service = degraded_service();

        let added = dispatch(
            &service,
            ToolCall::AddProverbs {
                proverbs: vec!["A stitch in time saves nine".to_string()],
            },
        )
        .await;
        let ToolOutput::Snapshot(event) = added else {
            panic!("add_proverbs returns a snapshot");
        };
        assert_eq!(event.proverbs(), ["A stitch in time saves nine".to_string()]);

        let listed = dispatch(&service, ToolCall::GetProverbs {}).await;
        assert_eq!(
            listed,
            ToolOutput::Proverbs(vec!["A stitch in time saves nine".to_string()])
        );
    }

    #[tokio::test]
    async fn weather_is_canned() {
        let service = degraded_service();
        let output = dispatch(
            &service,
            ToolCall::GetWeather {
                location: "San Francisco".to_string(),
            },
        )
        .await;
        assert_eq!(
            output,
            ToolOutput::Text("The weather in San Francisco is sunny.".to_string())
        );
    }

    #[test]
    fn snapshot_output_serializes_as_event() {
        let output = ToolOutput::Snapshot(StateSnapshotEvent::new(Default::default()));
        let value = serde_json::to_value(&output).unwrap_or_default();
        assert_eq!(value["type"], "STATE_SNAPSHOT");
    }
}
