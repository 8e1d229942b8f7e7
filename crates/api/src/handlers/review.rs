//! Handlers for the manual review queue.
//!
//! The queue holds unapproved items from sources that feed the aggregate
//! but are not trusted to auto-approve. Approving keeps the item's pipeline
//! status; rejecting marks the item skipped so the pipeline drops it.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use feedwatch_core::item_status::ItemStatus;
use feedwatch_core::types::DbId;
use feedwatch_core::CoreError;
use feedwatch_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Query parameters for GET /review.
#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub content_type: Option<String>,
}

/// Request body for POST /review/bulk-approve.
#[derive(Debug, Deserialize)]
pub struct BulkApproveRequest {
    pub ids: Vec<DbId>,
}

/// Response for POST /review/bulk-approve.
#[derive(Debug, Serialize)]
pub struct BulkApproveResponse {
    pub approved: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/review
///
/// List the review queue, newest first, optionally narrowed to one content
/// type.
pub async fn list_review_queue(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::review_queue(&state.pool, query.content_type.as_deref()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/review/{id}/approve
pub async fn approve_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::approve(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    tracing::info!(item_id = id, "Item approved");
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/review/{id}/reject
///
/// Rejecting marks the item skipped. It stays in the store for audit but
/// leaves the review queue and the pipeline.
pub async fn reject_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::update_status(&state.pool, id, ItemStatus::Skipped.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    tracing::info!(item_id = id, "Item rejected");
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/review/bulk-approve
///
/// Approve a batch of items in one statement. IDs that no longer exist are
/// silently skipped; the response carries the actual count.
pub async fn bulk_approve(
    State(state): State<AppState>,
    Json(input): Json<BulkApproveRequest>,
) -> AppResult<impl IntoResponse> {
    if input.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }

    let approved = ItemRepo::bulk_approve(&state.pool, &input.ids).await?;

    tracing::info!(requested = input.ids.len(), approved, "Bulk approve");
    Ok(Json(DataResponse {
        data: BulkApproveResponse { approved },
    }))
}
