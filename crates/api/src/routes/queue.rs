//! Route definitions for the live queue snapshot.

use axum::routing::get;
use axum::Router;

use crate::handlers::queue;
use crate::state::AppState;

/// Routes mounted at `/queue`.
///
/// ```text
/// GET /        -> get_queue
/// GET /stream  -> stream_queue (SSE)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(queue::get_queue))
        .route("/stream", get(queue::stream_queue))
}
