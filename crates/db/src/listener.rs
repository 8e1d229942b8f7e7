//! Row-level change subscription over Postgres LISTEN/NOTIFY.
//!
//! A trigger installed by the migrations emits `<table>_changed` with the
//! operation name (`INSERT`/`UPDATE`/`DELETE`) as payload whenever a row
//! in `sources` or `content_items` changes. Consumers use the event only
//! as an invalidation signal and refetch, so a dropped notification is
//! repaired by the next one (or by the caller's interval poll).

use sqlx::postgres::PgListener;
use sqlx::PgPool;

/// Channel notified on any `content_items` change.
pub const CONTENT_ITEMS_CHANNEL: &str = "content_items_changed";

/// Channel notified on any `sources` change.
pub const SOURCES_CHANNEL: &str = "sources_changed";

/// A change notification from the store.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// The channel the notification arrived on (one of the constants above).
    pub channel: String,
    /// The row operation: `INSERT`, `UPDATE`, or `DELETE`.
    pub operation: String,
}

/// A live LISTEN subscription on one or more change channels.
///
/// Dropping the listener tears the subscription down; there is no
/// separate unsubscribe step.
pub struct ChangeListener {
    inner: PgListener,
}

impl ChangeListener {
    /// Subscribe to the given channels using a connection from the pool.
    pub async fn connect(pool: &PgPool, channels: &[&str]) -> Result<Self, sqlx::Error> {
        let mut inner = PgListener::connect_with(pool).await?;
        inner.listen_all(channels.iter().copied()).await?;
        Ok(Self { inner })
    }

    /// Wait for the next change notification.
    ///
    /// Reconnects transparently after connection loss (notifications sent
    /// while disconnected are lost, which is acceptable for an
    /// invalidation signal).
    pub async fn recv(&mut self) -> Result<ChangeEvent, sqlx::Error> {
        let notification = self.inner.recv().await?;
        Ok(ChangeEvent {
            channel: notification.channel().to_string(),
            operation: notification.payload().to_string(),
        })
    }
}
