pub mod dashboard;
pub mod health;
pub mod items;
pub mod pipeline;
pub mod queue;
pub mod review;
pub mod sources;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sources                          list, create
/// /sources/{id}                     get, update, delete
/// /sources/{id}/flags/{flag}        set one automation flag (PUT)
/// /sources/flags/{flag}/toggle-all  bulk flag toggle (POST)
/// /sources/{id}/health              classified source health
/// /sources/{id}/check               force a check now (POST)
///
/// /items                            list with filters
/// /items/{id}                       get, delete
/// /items/{id}/status                set status (PUT)
/// /items/{id}/requeue               retry a failed/skipped item (POST)
/// /items/{id}/skip                  skip a pending item (POST)
///
/// /review                           review queue listing
/// /review/{id}/approve              approve (POST)
/// /review/{id}/reject               reject (POST)
/// /review/bulk-approve              approve many (POST)
///
/// /queue                            latest queue snapshot
/// /queue/stream                     queue snapshots over SSE
///
/// /dashboard                        overview aggregate
///
/// /pipeline/health                  last pipeline health probe
/// /pipeline/activity                recent pipeline activity
/// /worker                           worker heartbeat liveness
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sources", sources::router())
        .nest("/items", items::router())
        .nest("/review", review::router())
        .nest("/queue", queue::router())
        .nest("/dashboard", dashboard::router())
        .nest("/pipeline", pipeline::router())
        .nest("/worker", pipeline::worker_router())
}
