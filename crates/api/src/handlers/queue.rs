//! Handlers for the live queue snapshot.
//!
//! Both endpoints read from the watch channel maintained by the queue feed
//! task, so they respond without touching the database. The SSE stream
//! emits one event per snapshot change plus the current snapshot on
//! connect.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/queue
///
/// The most recent queue snapshot.
pub async fn get_queue(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.queue_feed.borrow().clone();
    Ok(Json(DataResponse { data: snapshot }))
}

/// GET /api/v1/queue/stream
///
/// Server-sent events stream of queue snapshots. The watch channel keeps
/// only the latest value, so a slow client skips intermediate snapshots
/// instead of lagging behind.
pub async fn stream_queue(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.queue_feed.clone()).filter_map(|snapshot| async move {
        match Event::default().event("queue").json_data(&snapshot) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize queue snapshot");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
