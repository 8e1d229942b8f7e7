//! Route definitions for pipeline state and the worker heartbeat.

use axum::routing::get;
use axum::Router;

use crate::handlers::pipeline;
use crate::state::AppState;

/// Routes mounted at `/pipeline`.
///
/// ```text
/// GET /health    -> get_pipeline_health
/// GET /activity  -> get_pipeline_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(pipeline::get_pipeline_health))
        .route("/activity", get(pipeline::get_pipeline_activity))
}

/// Routes mounted at `/worker`.
///
/// ```text
/// GET / -> get_worker
/// ```
pub fn worker_router() -> Router<AppState> {
    Router::new().route("/", get(pipeline::get_worker))
}
