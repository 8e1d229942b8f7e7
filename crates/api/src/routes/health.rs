use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use feedwatch_monitor::HealthState;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` unless the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Last observed pipeline state. Informational only; a down pipeline
    /// does not degrade this service.
    pub pipeline: HealthState,
}

/// GET /health -- service liveness plus a glance at its dependencies.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = feedwatch_db::health_check(&state.pool).await.is_ok();
    let pipeline = state.pipeline_health.borrow().state;

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        pipeline,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
