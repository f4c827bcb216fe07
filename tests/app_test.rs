use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use roster_core::{AppConfig, LoggingConfig, RollupConfig};
use roster_domain::{decode_payload, encode_payload};
use serde_json::{json, Value};
use student_roster::app::Application;
use student_roster::shutdown::ShutdownManager;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct Node {
    pending: Arc<Mutex<Vec<Value>>>,
    notices: Arc<Mutex<Vec<String>>>,
}

async fn finish(State(node): State<Node>) -> Response {
    match node.pending.lock().await.pop() {
        Some(request) => (StatusCode::OK, Json(request)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn notice(State(node): State<Node>, Json(body): Json<Value>) -> StatusCode {
    let payload = body["payload"].as_str().unwrap_or_default();
    node.notices.lock().await.push(decode_payload(payload).unwrap());
    StatusCode::CREATED
}

async fn report() -> StatusCode {
    StatusCode::ACCEPTED
}

#[tokio::test]
async fn test_application_runs_until_shutdown() {
    let create = json!({
        "request_type": "advance_state",
        "data": {
            "metadata": { "msg_sender": "0x1" },
            "payload": encode_payload(
                r#"{"method":"create","name":"Alice","age":20,"wallet_address":"0xAAA"}"#
            )
        }
    });
    let node = Node {
        pending: Arc::new(Mutex::new(vec![create])),
        ..Node::default()
    };
    let router = Router::new()
        .route("/finish", post(finish))
        .route("/notice", post(notice))
        .route("/report", post(report))
        .with_state(node.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let app = Application::new(AppConfig {
        rollup: RollupConfig {
            server_url: format!("http://{addr}"),
            request_timeout_seconds: Some(5),
            idle_backoff_ms: 10,
        },
        logging: LoggingConfig::default(),
    });
    let shutdown = ShutdownManager::new();
    let shutdown_rx = shutdown.subscribe().await;
    let handle = tokio::spawn(async move { app.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown.shutdown().await;

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());

    let notices = node.notices.lock().await;
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("New student created: "));
}

#[tokio::test]
async fn test_application_fails_when_server_unreachable() {
    let app = Application::new(AppConfig {
        rollup: RollupConfig {
            server_url: "http://127.0.0.1:1".to_string(),
            ..RollupConfig::default()
        },
        logging: LoggingConfig::default(),
    });
    let shutdown = ShutdownManager::new();

    let result = app.run(shutdown.subscribe().await).await;
    assert!(result.is_err());
}
