//! Shared fixtures for repository tests.
//!
//! Items are inserted with raw SQL because item creation belongs to the
//! external pipeline, not the repository layer under test.

use chrono::{Duration, Utc};
use feedwatch_core::types::DbId;
use feedwatch_db::models::source::CreateSource;
use feedwatch_db::repositories::SourceRepo;
use sqlx::PgPool;

pub fn new_source(name: &str) -> CreateSource {
    CreateSource {
        name: name.to_string(),
        source_type: "rss".to_string(),
        url: format!("https://example.com/{name}.xml"),
        check_interval_minutes: None,
        enabled: None,
        aggregate: None,
        auto_archive: None,
        auto_approve: None,
        auto_transcribe: None,
        auto_summarize: None,
        config: None,
    }
}

pub async fn create_source(pool: &PgPool, name: &str) -> DbId {
    SourceRepo::create(pool, &new_source(name))
        .await
        .expect("create source")
        .id
}

/// Insert an item the way the pipeline would, discovered `age_hours` ago.
pub async fn insert_item(
    pool: &PgPool,
    source_id: DbId,
    title: &str,
    status: &str,
    age_hours: i64,
) -> DbId {
    let discovered_at = Utc::now() - Duration::hours(age_hours);
    sqlx::query_scalar(
        "INSERT INTO content_items (source_id, url, title, status, discovered_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(source_id)
    .bind(format!("https://example.com/items/{title}"))
    .bind(title)
    .bind(status)
    .bind(discovered_at)
    .fetch_one(pool)
    .await
    .expect("insert item")
}
