//! Behavioral tests for the queue feed background task against a live
//! database: snapshot publication on data changes, and prompt shutdown.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use feedwatch_api::background::queue_feed;

const WAIT: Duration = Duration::from_secs(5);

async fn insert_pending_item(pool: &PgPool) {
    let source_id: i64 = sqlx::query_scalar(
        "INSERT INTO sources (name, source_type, url)
         VALUES ('feed-a', 'rss', 'https://example.com/feed.xml')
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO content_items (source_id, url, title, status)
         VALUES ($1, 'https://example.com/items/one', 'one', 'pending')",
    )
    .bind(source_id)
    .execute(pool)
    .await
    .unwrap();
}

/// Severs every other connection to the test database, including the one
/// held by the change listener. `PgPool::close` would wait on the listener,
/// so the backends are killed server-side instead.
async fn kill_other_connections(pool: &PgPool) {
    sqlx::query(
        "SELECT pg_terminate_backend(pid) FROM pg_stat_activity
         WHERE datname = current_database() AND pid <> pg_backend_pid()",
    )
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_snapshot_follows_item_inserts(pool: PgPool) {
    let cancel = CancellationToken::new();
    let (mut rx, handle) = queue_feed::spawn(pool.clone(), cancel.clone());

    // The first tick publishes an empty snapshot once the task is running.
    tokio::time::timeout(WAIT, rx.changed()).await.unwrap().unwrap();
    assert_eq!(rx.borrow().total, 0);

    insert_pending_item(&pool).await;

    // The notification-driven refresh picks up the new item.
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
        tokio::time::timeout_at(deadline, rx.changed())
            .await
            .expect("snapshot never reflected the inserted item")
            .unwrap();
        let snapshot = rx.borrow().clone();
        if snapshot.total == 1 {
            assert_eq!(snapshot.counts.get("pending"), Some(&1));
            assert_eq!(snapshot.stuck_pending, 0);
            assert!(snapshot.refreshed_at.is_some());
            break;
        }
    }

    cancel.cancel();
    handle.await.unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_shutdown_is_prompt_after_listener_drop(pool: PgPool) {
    let cancel = CancellationToken::new();
    let (mut rx, handle) = queue_feed::spawn(pool.clone(), cancel.clone());
    tokio::time::timeout(WAIT, rx.changed()).await.unwrap().unwrap();

    // Drop the listener connection so the task enters its reconnect delay,
    // then cancel. The task must observe cancellation inside the delay
    // instead of sleeping it out.
    kill_other_connections(&pool).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("task did not stop promptly after cancellation")
        .unwrap();
}
