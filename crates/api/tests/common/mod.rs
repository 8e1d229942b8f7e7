//! Shared fixtures for HTTP-level integration tests.
//!
//! Tests send requests straight into the router via `tower::ServiceExt`,
//! so no TCP listener is involved. The router is built through the same
//! [`build_app_router`] the binary uses, with the background watch
//! channels replaced by fixed test snapshots.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio::sync::watch;
use tower::ServiceExt;

use feedwatch_api::background::pipeline_health::PipelineSnapshot;
use feedwatch_api::background::queue_feed::QueueSnapshot;
use feedwatch_api::config::ServerConfig;
use feedwatch_api::router::build_app_router;
use feedwatch_api::state::AppState;
use feedwatch_core::types::DbId;
use feedwatch_monitor::MonitorClient;

/// Build a test `ServerConfig` with safe defaults.
///
/// The pipeline URL points at a port nothing listens on, so endpoints
/// that talk to the pipeline exercise their failure paths.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        pipeline_url: "http://127.0.0.1:9".to_string(),
    }
}

/// Build the application router over `pool` with default (empty) snapshots.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_snapshots(pool, QueueSnapshot::default(), PipelineSnapshot::default())
}

/// Build the application router with fixed queue and pipeline snapshots in
/// place of the background tasks.
pub fn build_test_app_with_snapshots(
    pool: PgPool,
    queue: QueueSnapshot,
    pipeline: PipelineSnapshot,
) -> Router {
    let (app, queue_tx) = build_test_app_inner(pool, queue, pipeline);
    // Leak the sender so the receiver stays live for the router's lifetime.
    std::mem::forget(queue_tx);
    app
}

/// Like [`build_test_app`], but hands back the queue snapshot sender so a
/// test can publish new snapshots while a stream is open.
pub fn build_test_app_with_queue_sender(pool: PgPool) -> (Router, watch::Sender<QueueSnapshot>) {
    build_test_app_inner(pool, QueueSnapshot::default(), PipelineSnapshot::default())
}

fn build_test_app_inner(
    pool: PgPool,
    queue: QueueSnapshot,
    pipeline: PipelineSnapshot,
) -> (Router, watch::Sender<QueueSnapshot>) {
    let config = test_config();
    let monitor = Arc::new(MonitorClient::new(config.pipeline_url.clone()));

    let (queue_tx, queue_feed) = watch::channel(queue);
    let (pipeline_tx, pipeline_health) = watch::channel(pipeline);
    // Leak the pipeline sender so its receiver stays live.
    std::mem::forget(pipeline_tx);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        monitor,
        queue_feed,
        pipeline_health,
    };

    (build_app_router(state, &config), queue_tx)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("send request")
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("send request")
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("build request"),
    )
    .await
    .expect("send request")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
    )
    .await
    .expect("send request")
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request"),
    )
    .await
    .expect("send request")
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Assert the response is an error with the given status and `code` field.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}

/// Read the next server-sent event from a streaming body.
///
/// Accumulates frames in `buf` until a blank-line delimiter appears, then
/// returns the event block (without the delimiter). Panics if the stream
/// ends or stalls for five seconds.
pub async fn next_sse_event(body: &mut Body, buf: &mut String) -> String {
    loop {
        if let Some(end) = buf.find("\n\n") {
            let event = buf[..end].to_string();
            buf.drain(..end + 2);
            return event;
        }
        let frame = tokio::time::timeout(std::time::Duration::from_secs(5), body.frame())
            .await
            .expect("timed out waiting for an event")
            .expect("stream ended before an event")
            .expect("read frame");
        if let Ok(data) = frame.into_data() {
            buf.push_str(std::str::from_utf8(&data).expect("event frame is UTF-8"));
        }
    }
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a source through the API and return its ID.
pub async fn create_source(app: Router, name: &str) -> DbId {
    let response = post_json(
        app,
        "/api/v1/sources",
        serde_json::json!({
            "name": name,
            "source_type": "rss",
            "url": format!("https://example.com/{name}.xml"),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("created source id")
}

/// Insert an item the way the pipeline would. Item creation has no API
/// endpoint, so this goes straight to the table.
pub async fn insert_item(pool: &PgPool, source_id: DbId, title: &str, status: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO content_items (source_id, url, title, status) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(source_id)
    .bind(format!("https://example.com/items/{title}"))
    .bind(title)
    .bind(status)
    .fetch_one(pool)
    .await
    .expect("insert item")
}
