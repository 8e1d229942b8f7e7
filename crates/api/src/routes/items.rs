//! Route definitions for content item triage.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /              -> list_items
/// GET    /{id}          -> get_item
/// DELETE /{id}          -> delete_item
/// PUT    /{id}/status   -> update_status
/// POST   /{id}/requeue  -> requeue_item
/// POST   /{id}/skip     -> skip_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items))
        .route("/{id}", get(items::get_item).delete(items::delete_item))
        .route("/{id}/status", put(items::update_status))
        .route("/{id}/requeue", post(items::requeue_item))
        .route("/{id}/skip", post(items::skip_item))
}
