//! Handlers for content item triage.
//!
//! Status transitions are gated here, not in the repository: requeue is only
//! valid from `failed` or `skipped`, skip only from `pending`. Manual status
//! updates accept any recognized status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use feedwatch_core::item_status::{self, ItemStatus};
use feedwatch_core::types::DbId;
use feedwatch_core::CoreError;
use feedwatch_db::models::item::ItemsFilter;
use feedwatch_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for PUT /items/{id}/status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Listing and retrieval
// ---------------------------------------------------------------------------

/// GET /api/v1/items
///
/// List items with optional status / source / content-type filters and
/// pagination. `total` counts all rows matching the filter, not just the
/// returned page.
pub async fn list_items(
    State(state): State<AppState>,
    Query(filter): Query<ItemsFilter>,
) -> AppResult<impl IntoResponse> {
    let page = ItemRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// PUT /api/v1/items/{id}/status
///
/// Set an item's status directly. Rejects strings that are not a known
/// pipeline status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = ItemStatus::parse(&input.status).ok_or_else(|| {
        AppError::BadRequest(format!("unknown status: {}", input.status))
    })?;

    let item = ItemRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    tracing::info!(item_id = id, status = %status, "Item status updated");
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/items/{id}/requeue
///
/// Send a failed or skipped item back through the pipeline. Clears the error
/// message and retry counter.
pub async fn requeue_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    if !item_status::can_requeue(&item.status) {
        return Err(CoreError::Validation(format!(
            "cannot requeue item in status '{}'",
            item.status
        ))
        .into());
    }

    let item = ItemRepo::requeue(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    tracing::info!(item_id = id, "Item requeued");
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/items/{id}/skip
///
/// Mark a pending item as skipped so the pipeline ignores it.
pub async fn skip_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    if !item_status::can_skip(&item.status) {
        return Err(CoreError::Validation(format!(
            "cannot skip item in status '{}'",
            item.status
        ))
        .into());
    }

    let item = ItemRepo::update_status(&state.pool, id, ItemStatus::Skipped.as_str())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "content item",
            id,
        })?;

    tracing::info!(item_id = id, "Item skipped");
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// DELETE /api/v1/items/{id}
///
/// Permanently remove an item. There is no soft-delete; the row is gone.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ItemRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "content item",
            id,
        }
        .into());
    }

    tracing::info!(item_id = id, "Item deleted");
    Ok(StatusCode::NO_CONTENT)
}
