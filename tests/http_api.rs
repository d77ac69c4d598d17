//! End-to-end tests over HTTP and WebSocket with no reachable database.

#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::{Value, json};
use tokio_test::assert_ok;

use proverbs_agent::api;
use proverbs_agent::app_state::AppState;
use proverbs_agent::config::AgentConfig;
use proverbs_agent::domain::{EventBus, SessionState};
use proverbs_agent::persistence::{ConnectionManager, ProverbRepository};
use proverbs_agent::service::{Lifecycle, PersistenceStatus, ProverbService};

async fn spawn_app() -> SocketAddr {
    let (addr, connections, service) = serve(&AgentConfig::default()).await;
    let report = Lifecycle::new(connections, service).on_start().await;
    assert_eq!(report.persistence, PersistenceStatus::Degraded);
    addr
}

async fn serve(config: &AgentConfig) -> (SocketAddr, Arc<ConnectionManager>, Arc<ProverbService>) {
    let connections = Arc::new(ConnectionManager::new(config));
    let repository = Arc::new(ProverbRepository::new(Arc::clone(&connections)));
    let service = Arc::new(ProverbService::new(
        Arc::new(SessionState::new()),
        repository,
        EventBus::new(64),
    ));

    let app = api::build_app(AppState::new(Arc::clone(&service), Arc::clone(&connections)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, connections, service)
}

/// Returns the address of a listener that accepts connections and never
/// answers, so a PostgreSQL handshake against it stalls until timeout.
async fn silent_database() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

async fn invoke(addr: SocketAddr, tool: &str, arguments: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/v1/tools/{tool}"))
        .json(&arguments)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_degraded_persistence() {
    let addr = spawn_app().await;
    let body: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["persistence"], "degraded");
}

#[tokio::test]
async fn tool_catalog_lists_all_tools() {
    let addr = spawn_app().await;
    let body: Value = reqwest::get(format!("http://{addr}/api/v1/tools"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(
        names,
        ["get_proverbs", "add_proverbs", "set_proverbs", "get_weather"]
    );
    assert!(body["system_prompt"].as_str().unwrap().contains("get_proverbs"));
}

#[tokio::test]
async fn add_without_database_still_returns_snapshot() {
    let addr = spawn_app().await;

    let (status, body) = invoke(addr, "add_proverbs", json!({ "proverbs": ["X"] })).await;

    assert_eq!(status, 200);
    assert_eq!(body["type"], "STATE_SNAPSHOT");
    assert_eq!(body["snapshot"]["proverbs"], json!(["X"]));

    let (_, listed) = invoke(addr, "get_proverbs", json!({})).await;
    assert_eq!(listed, json!(["X"]));
}

#[tokio::test]
async fn set_replaces_previous_adds() {
    let addr = spawn_app().await;

    invoke(addr, "add_proverbs", json!({ "proverbs": ["A", "B"] })).await;
    let (_, body) = invoke(addr, "set_proverbs", json!({ "proverbs": ["C"] })).await;
    assert_eq!(body["snapshot"]["proverbs"], json!(["C"]));

    let state: Value = reqwest::get(format!("http://{addr}/api/v1/state"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(state, json!({ "proverbs": ["C"] }));
}

#[tokio::test]
async fn put_state_goes_through_set() {
    let addr = spawn_app().await;

    let response = assert_ok!(
        reqwest::Client::new()
            .put(format!("http://{addr}/api/v1/state"))
            .json(&json!({ "proverbs": ["client", "side"] }))
            .send()
            .await
    );
    assert_eq!(response.status().as_u16(), 200);

    let (_, listed) = invoke(addr, "get_proverbs", Value::Null).await;
    assert_eq!(listed, json!(["client", "side"]));
}

#[tokio::test]
async fn tool_errors_map_to_http_status() {
    let addr = spawn_app().await;

    let (status, body) = invoke(addr, "summon_dragon", json!({})).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], 1001);

    let (status, body) = invoke(addr, "set_proverbs", json!({ "proverbs": "not a list" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], 1002);
}

#[tokio::test]
async fn weather_tool_is_canned() {
    let addr = spawn_app().await;
    let (status, body) = invoke(addr, "get_weather", json!({ "location": "Lisbon" })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!("The weather in Lisbon is sunny."));
}

#[tokio::test]
async fn websocket_streams_snapshots() {
    let addr = spawn_app().await;
    let (mut socket, _) = assert_ok!(
        tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await
    );

    let next_payload = |msg: tokio_tungstenite::tungstenite::Message| -> Value {
        let envelope: Value = serde_json::from_str(msg.to_text().unwrap()).unwrap();
        assert_eq!(envelope["type"], "event");
        envelope["payload"].clone()
    };

    let initial = socket.next().await.unwrap().unwrap();
    assert_eq!(next_payload(initial)["snapshot"]["proverbs"], json!([]));

    invoke(
        addr,
        "add_proverbs",
        json!({ "proverbs": ["Honesty is the best policy"] }),
    )
    .await;

    let pushed = socket.next().await.unwrap().unwrap();
    let payload = next_payload(pushed);
    assert_eq!(payload["type"], "STATE_SNAPSHOT");
    assert_eq!(
        payload["snapshot"]["proverbs"],
        json!(["Honesty is the best policy"])
    );
}

#[tokio::test]
async fn health_answers_while_database_connect_stalls() {
    let db = silent_database().await;
    let config = AgentConfig {
        database_url: Some(format!("postgres://nobody:nothing@{db}/none")),
        database_connect_timeout_secs: 3,
        ..AgentConfig::default()
    };
    let (addr, _connections, _service) = serve(&config).await;

    // The add persists through the stalled pool build.
    let pending = tokio::spawn(async move {
        invoke(addr, "add_proverbs", json!({ "proverbs": ["Still waters run deep"] })).await
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let started = std::time::Instant::now();
    let body: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(body["persistence"], "degraded");
    assert!(elapsed < std::time::Duration::from_secs(1), "took {elapsed:?}");

    let (status, added) = pending.await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(added["snapshot"]["proverbs"][0], "Still waters run deep");
}
