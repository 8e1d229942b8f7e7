//! Handlers exposing the external pipeline's state: health, activity log,
//! and the worker heartbeat.
//!
//! The activity endpoint degrades softly. The pipeline being down is a
//! normal condition the dashboard must render, not a gateway error.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use feedwatch_core::health::{classify_heartbeat, WorkerState};
use feedwatch_core::relative_time::format_relative;
use feedwatch_db::models::worker_status::WorkerStatus;
use feedwatch_db::repositories::WorkerStatusRepo;
use feedwatch_monitor::ActivityEntry;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of activity entries to fetch.
const DEFAULT_ACTIVITY_LIMIT: u32 = 20;

/// Upper bound on requested activity entries.
const MAX_ACTIVITY_LIMIT: u32 = 200;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Query parameters for GET /pipeline/activity.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u32>,
}

/// Response for GET /pipeline/activity.
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    /// `false` when the pipeline could not be reached; `activity` is then
    /// empty rather than an error.
    pub available: bool,
    pub activity: Vec<ActivityEntry>,
}

/// Response for GET /worker.
#[derive(Debug, Serialize)]
pub struct WorkerResponse {
    pub state: WorkerState,
    /// Relative rendering of the last heartbeat, or `None` if no worker
    /// has ever reported.
    pub last_seen: Option<String>,
    pub heartbeat: Option<WorkerStatus>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pipeline/health
///
/// The latest snapshot from the health poll task. Never blocks on a probe.
pub async fn get_pipeline_health(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.pipeline_health.borrow().clone();
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/pipeline/activity
///
/// Recent pipeline activity entries, proxied live from the pipeline.
pub async fn get_pipeline_activity(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT);

    let resp = match state.monitor.activity(limit).await {
        Ok(activity) => ActivityResponse {
            available: true,
            activity,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Pipeline activity unavailable");
            ActivityResponse {
                available: false,
                activity: Vec::new(),
            }
        }
    };
    Ok(Json(DataResponse { data: resp }))
}

/// GET /api/v1/worker
///
/// Liveness of the pipeline worker, derived from its most recent heartbeat
/// row.
pub async fn get_worker(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let heartbeat = WorkerStatusRepo::latest(&state.pool).await?;

    let now = Utc::now();
    let worker_state = classify_heartbeat(heartbeat.as_ref().map(|h| h.last_heartbeat), now);
    let last_seen = heartbeat
        .as_ref()
        .map(|h| format_relative(h.last_heartbeat, now));

    Ok(Json(DataResponse {
        data: WorkerResponse {
            state: worker_state,
            last_seen,
            heartbeat,
        },
    }))
}
