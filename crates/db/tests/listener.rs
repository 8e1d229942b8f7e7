//! Integration tests for the LISTEN/NOTIFY change subscription.

mod common;

use std::time::Duration;

use common::{create_source, insert_item};
use feedwatch_db::listener::{ChangeListener, CONTENT_ITEMS_CHANNEL, SOURCES_CHANNEL};
use sqlx::PgPool;

/// Bound on how long a notification may take to arrive.
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

#[sqlx::test]
async fn test_source_insert_notifies_sources_channel(pool: PgPool) {
    let mut listener = ChangeListener::connect(&pool, &[SOURCES_CHANNEL])
        .await
        .unwrap();

    create_source(&pool, "feed-a").await;

    let event = tokio::time::timeout(RECV_TIMEOUT, listener.recv())
        .await
        .expect("notification timed out")
        .unwrap();
    assert_eq!(event.channel, SOURCES_CHANNEL);
    assert_eq!(event.operation, "INSERT");
}

#[sqlx::test]
async fn test_item_update_notifies_content_items_channel(pool: PgPool) {
    let source_id = create_source(&pool, "feed-a").await;
    let item_id = insert_item(&pool, source_id, "one", "pending", 0).await;

    let mut listener = ChangeListener::connect(&pool, &[CONTENT_ITEMS_CHANNEL])
        .await
        .unwrap();

    sqlx::query("UPDATE content_items SET status = 'failed' WHERE id = $1")
        .bind(item_id)
        .execute(&pool)
        .await
        .unwrap();

    let event = tokio::time::timeout(RECV_TIMEOUT, listener.recv())
        .await
        .expect("notification timed out")
        .unwrap();
    assert_eq!(event.channel, CONTENT_ITEMS_CHANNEL);
    assert_eq!(event.operation, "UPDATE");
}

#[sqlx::test]
async fn test_listener_only_hears_subscribed_channels(pool: PgPool) {
    let mut listener = ChangeListener::connect(&pool, &[CONTENT_ITEMS_CHANNEL])
        .await
        .unwrap();

    // A sources change must not reach a content_items subscription; the
    // following item insert must.
    let source_id = create_source(&pool, "feed-a").await;
    insert_item(&pool, source_id, "one", "pending", 0).await;

    let event = tokio::time::timeout(RECV_TIMEOUT, listener.recv())
        .await
        .expect("notification timed out")
        .unwrap();
    assert_eq!(event.channel, CONTENT_ITEMS_CHANNEL);
    assert_eq!(event.operation, "INSERT");
}
