//! Route definitions for source management.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::sources;
use crate::state::AppState;

/// Routes mounted at `/sources`.
///
/// ```text
/// GET    /                        -> list_sources
/// POST   /                        -> create_source
/// GET    /{id}                    -> get_source
/// PUT    /{id}                    -> update_source
/// DELETE /{id}                    -> delete_source
/// PUT    /{id}/flags/{flag}       -> set_flag
/// POST   /flags/{flag}/toggle-all -> toggle_all
/// GET    /{id}/health             -> get_source_health
/// POST   /{id}/check              -> force_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sources::list_sources).post(sources::create_source))
        .route(
            "/{id}",
            get(sources::get_source)
                .put(sources::update_source)
                .delete(sources::delete_source),
        )
        .route("/{id}/flags/{flag}", put(sources::set_flag))
        .route("/flags/{flag}/toggle-all", post(sources::toggle_all))
        .route("/{id}/health", get(sources::get_source_health))
        .route("/{id}/check", post(sources::force_check))
}
