//! Route definitions for the manual review queue.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/review`.
///
/// ```text
/// GET  /              -> list_review_queue
/// POST /{id}/approve  -> approve_item
/// POST /{id}/reject   -> reject_item
/// POST /bulk-approve  -> bulk_approve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list_review_queue))
        .route("/{id}/approve", post(review::approve_item))
        .route("/{id}/reject", post(review::reject_item))
        .route("/bulk-approve", post(review::bulk_approve))
}
