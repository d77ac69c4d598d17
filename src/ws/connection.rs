//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding snapshot events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use crate::domain::{ProverbsState, StateSnapshotEvent};
use crate::service::ProverbService;
use crate::tools::{self, ToolCall};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Sends the current state as a snapshot event right away.
/// - Reads commands from the client and dispatches them.
/// - Forwards every event from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<StateSnapshotEvent>,
    service: Arc<ProverbService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let initial = StateSnapshotEvent::new(ProverbsState::new(service.get().await));
    if ws_tx.send(Message::text(event_json(&initial))).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &service).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(snapshot) => {
                        if ws_tx.send(Message::text(event_json(&snapshot))).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Wraps a snapshot in an `event` envelope.
fn event_json(event: &StateSnapshotEvent) -> String {
    let msg = WsMessage::server(
        WsMessageType::Event,
        serde_json::to_value(event).unwrap_or_default(),
    );
    serde_json::to_string(&msg).unwrap_or_default()
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(text: &str, service: &ProverbService) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    if msg.msg_type != WsMessageType::Command {
        return serde_json::to_string(&WsMessage::error(msg.id, 400, "expected a command")).ok();
    }

    let reply = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(WsCommand::GetState) => {
            let state = ProverbsState::new(service.get().await);
            WsMessage::reply(
                msg.id,
                WsMessageType::Response,
                serde_json::to_value(state).unwrap_or_default(),
            )
        }
        Ok(WsCommand::Tool { name, arguments }) => match ToolCall::parse(&name, arguments) {
            Ok(call) => {
                let output = tools::dispatch(service, call).await;
                WsMessage::reply(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::to_value(output).unwrap_or_default(),
                )
            }
            Err(err) => WsMessage::error(msg.id, err.error_code(), &err.to_string()),
        },
        Err(_) => WsMessage::error(msg.id, 404, "unknown command"),
    };
    serde_json::to_string(&reply).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
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

    fn parse(reply: Option<String>) -> serde_json::Value {
        let Some(reply) = reply else {
            panic!("expected a reply");
        };
        let Ok(value) = serde_json::from_str(&reply) else {
            panic!("reply is JSON");
        };
        value
    }

    fn command(payload: serde_json::Value) -> String {
        serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": payload,
        })
        .to_string()
    }

    #[tokio::test]
    async fn malformed_json_is_error() {
        let service = degraded_service();
        let reply = parse(handle_text_message("{not json", &service).await);
        assert_eq!(reply["type"], "error");
        assert_eq!(reply["payload"]["code"], 400);
    }

    #[tokio::test]
    async fn tool_command_mutates_state() {
        let service = degraded_service();
        let text = command(serde_json::json!({
            "command": "tool",
            "name": "add_proverbs",
            "arguments": { "proverbs": ["Haste makes waste"] },
        }));

        let reply = parse(handle_text_message(&text, &service).await);

        assert_eq!(reply["id"], "req-1");
        assert_eq!(reply["type"], "response");
        assert_eq!(reply["payload"]["snapshot"]["proverbs"][0], "Haste makes waste");
        assert_eq!(service.get().await, vec!["Haste makes waste".to_string()]);
    }

    #[tokio::test]
    async fn unknown_tool_reports_error_code() {
        let service = degraded_service();
        let text = command(serde_json::json!({ "command": "tool", "name": "fly" }));
        let reply = parse(handle_text_message(&text, &service).await);
        assert_eq!(reply["type"], "error");
        assert_eq!(reply["payload"]["code"], 1001);
    }

    #[tokio::test]
    async fn get_state_returns_proverbs() {
        let service = degraded_service();
        service.set(vec!["one".to_string()]).await;
        let text = command(serde_json::json!({ "command": "get_state" }));
        let reply = parse(handle_text_message(&text, &service).await);
        assert_eq!(reply["payload"]["proverbs"][0], "one");
    }
}
