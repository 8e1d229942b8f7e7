//! Maintains a live snapshot of the processing queue.
//!
//! The snapshot is rebuilt whenever the database signals a change on the
//! `content_items` channel, and on a fixed interval as a fallback for missed
//! notifications (the listener connection can drop silently). Handlers read
//! the latest snapshot from the watch channel; they never query the counts
//! themselves.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use feedwatch_core::types::Timestamp;
use feedwatch_db::listener::{ChangeListener, CONTENT_ITEMS_CHANNEL};
use feedwatch_db::repositories::ItemRepo;
use feedwatch_db::DbPool;

/// Fallback refresh period when no change notifications arrive.
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// How long to wait before retrying a failed listener connection.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Point-in-time view of the processing queue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueueSnapshot {
    /// Item counts keyed by raw status string, including statuses the
    /// server does not recognize.
    pub counts: BTreeMap<String, i64>,
    /// Sum of all counts.
    pub total: i64,
    /// Items that have sat in `pending` beyond the stuck threshold.
    pub stuck_pending: i64,
    /// When this snapshot was computed. `None` only for the initial
    /// placeholder before the first refresh completes.
    pub refreshed_at: Option<Timestamp>,
}

/// Spawn the queue feed task.
///
/// Returns a receiver for the snapshot stream and the task handle. The
/// first real snapshot is published as soon as the initial query completes.
pub fn spawn(
    pool: DbPool,
    cancel: CancellationToken,
) -> (watch::Receiver<QueueSnapshot>, tokio::task::JoinHandle<()>) {
    let (tx, rx) = watch::channel(QueueSnapshot::default());
    let handle = tokio::spawn(run(pool, tx, cancel));
    (rx, handle)
}

async fn run(pool: DbPool, tx: watch::Sender<QueueSnapshot>, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = REFRESH_INTERVAL.as_secs(),
        "Queue feed started"
    );

    let mut listener = connect_listener(&pool).await;
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Queue feed stopping");
                break;
            }
            _ = interval.tick() => {
                refresh(&pool, &tx).await;
                if listener.is_none() {
                    listener = connect_listener(&pool).await;
                }
            }
            event = recv_change(&mut listener) => {
                match event {
                    Some(event) => {
                        tracing::debug!(operation = %event.operation, "Content change notification");
                        refresh(&pool, &tx).await;
                    }
                    None => {
                        // Connection lost; the interval keeps the snapshot
                        // fresh until reconnect succeeds. The delay must stay
                        // cancellable or shutdown stalls for its full length.
                        tracing::warn!("Change listener disconnected, falling back to polling");
                        tokio::select! {
                            _ = cancel.cancelled() => {
                                tracing::info!("Queue feed stopping");
                                break;
                            }
                            _ = tokio::time::sleep(RECONNECT_DELAY) => {
                                listener = connect_listener(&pool).await;
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn connect_listener(pool: &DbPool) -> Option<ChangeListener> {
    match ChangeListener::connect(pool, &[CONTENT_ITEMS_CHANNEL]).await {
        Ok(listener) => Some(listener),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect change listener");
            None
        }
    }
}

/// Wait for the next change event, or pend forever if there is no listener
/// (the interval arm still fires).
async fn recv_change(
    listener: &mut Option<ChangeListener>,
) -> Option<feedwatch_db::listener::ChangeEvent> {
    match listener {
        Some(l) => match l.recv().await {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, "Change listener receive failed");
                *listener = None;
                None
            }
        },
        None => std::future::pending().await,
    }
}

async fn refresh(pool: &DbPool, tx: &watch::Sender<QueueSnapshot>) {
    let counts = match ItemRepo::status_counts(pool).await {
        Ok(counts) => counts,
        Err(e) => {
            tracing::error!(error = %e, "Queue feed: status count query failed");
            return;
        }
    };
    let stuck_pending = match ItemRepo::stuck_pending_count(pool).await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!(error = %e, "Queue feed: stuck count query failed");
            return;
        }
    };

    let total = counts.values().sum();
    tx.send_replace(QueueSnapshot {
        counts,
        total,
        stuck_pending,
        refreshed_at: Some(chrono::Utc::now()),
    });
}
