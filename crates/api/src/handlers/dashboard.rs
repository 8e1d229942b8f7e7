//! Handler for the dashboard overview.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

use feedwatch_db::models::item::ItemWithSource;
use feedwatch_db::models::source::SourceStats;
use feedwatch_db::repositories::{ItemRepo, SourceRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many recent items the overview shows.
const RECENT_ITEMS: i64 = 10;

/// Response for GET /dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub sources: SourceStats,
    /// Item counts keyed by raw status string.
    pub status_counts: BTreeMap<String, i64>,
    pub total_items: i64,
    pub stuck_pending: i64,
    pub recent_items: Vec<ItemWithSource>,
}

/// GET /api/v1/dashboard
///
/// One-shot aggregate for the overview page: source stats, item counts by
/// status, the stuck-pending signal, and the latest items.
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sources = SourceRepo::stats(&state.pool).await?;
    let status_counts = ItemRepo::status_counts(&state.pool).await?;
    let stuck_pending = ItemRepo::stuck_pending_count(&state.pool).await?;
    let recent_items = ItemRepo::recent(&state.pool, RECENT_ITEMS).await?;

    let total_items = status_counts.values().sum();
    let resp = DashboardResponse {
        sources,
        status_counts,
        total_items,
        stuck_pending,
        recent_items,
    };
    Ok(Json(DataResponse { data: resp }))
}
