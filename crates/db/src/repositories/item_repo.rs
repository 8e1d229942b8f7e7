//! Repository for the `content_items` table.

use sqlx::PgPool;
use std::collections::BTreeMap;

use feedwatch_core::item_status::ItemStatus;
use feedwatch_core::types::DbId;

use crate::models::item::{ContentItem, ItemWithSource, ItemsFilter, ItemsPage};

/// Column list for `content_items` queries.
const COLUMNS: &str = "\
    id, source_id, external_id, url, enclosure_url, title, content_type, \
    status, archive_path, transcript_path, summary, error_message, \
    retry_count, published_at, discovered_at, processed_at, approved, \
    metadata_json";

/// Column list for joined queries, prefixed with the item alias and
/// carrying the owning source's name.
const JOINED_COLUMNS: &str = "\
    i.id, i.source_id, i.external_id, i.url, i.enclosure_url, i.title, \
    i.content_type, i.status, i.archive_path, i.transcript_path, i.summary, \
    i.error_message, i.retry_count, i.published_at, i.discovered_at, \
    i.processed_at, i.approved, i.metadata_json, s.name AS source_name";

/// Items pending longer than this are considered stuck.
const STUCK_THRESHOLD_HOURS: i32 = 24;

/// Review queue page size.
const REVIEW_QUEUE_LIMIT: i64 = 100;

/// Provides queries and mutations for content items.
pub struct ItemRepo;

impl ItemRepo {
    // ── Queries ──────────────────────────────────────────────────────────

    /// List items under an optional filter, most recently discovered
    /// first, enriched with the owning source's name. Returns the page and
    /// the total row count under the same filter.
    ///
    /// Filter fields use `Option` presence checks; `source_id = 0` is a
    /// real constraint, not "unset".
    pub async fn list(pool: &PgPool, filter: &ItemsFilter) -> Result<ItemsPage, sqlx::Error> {
        let mut clauses: Vec<String> = Vec::new();
        let mut next_param = 1;
        for (present, column) in [
            (filter.status.is_some(), "i.status"),
            (filter.source_id.is_some(), "i.source_id"),
            (filter.content_type.is_some(), "i.content_type"),
        ] {
            if present {
                clauses.push(format!("{column} = ${next_param}"));
                next_param += 1;
            }
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let page_query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM content_items i JOIN sources s ON s.id = i.source_id \
             {where_sql} \
             ORDER BY i.discovered_at DESC \
             LIMIT ${next_param} OFFSET ${}",
            next_param + 1
        );
        let mut page = sqlx::query_as::<_, ItemWithSource>(&page_query);
        if let Some(status) = &filter.status {
            page = page.bind(status);
        }
        if let Some(source_id) = filter.source_id {
            page = page.bind(source_id);
        }
        if let Some(content_type) = &filter.content_type {
            page = page.bind(content_type);
        }
        let items = page
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM content_items i {where_sql}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(status) = &filter.status {
            count = count.bind(status);
        }
        if let Some(source_id) = filter.source_id {
            count = count.bind(source_id);
        }
        if let Some(content_type) = &filter.content_type {
            count = count.bind(content_type);
        }
        let total = count.fetch_one(pool).await?;

        Ok(ItemsPage { items, total })
    }

    /// Find an item by ID, with the owning source's name.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ItemWithSource>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM content_items i JOIN sources s ON s.id = i.source_id \
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, ItemWithSource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently discovered items (dashboard recent-activity list).
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<ItemWithSource>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM content_items i JOIN sources s ON s.id = i.source_id \
             ORDER BY i.discovered_at DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, ItemWithSource>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Count items per distinct status value over the entire table.
    ///
    /// Values outside the canonical status set are still counted; the
    /// display layer renders them in the unrecognized tier.
    pub async fn status_counts(pool: &PgPool) -> Result<BTreeMap<String, i64>, sqlx::Error> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM content_items GROUP BY status")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Count items stuck in `pending` for longer than the staleness
    /// threshold, a cheap signal that the pipeline has stalled.
    pub async fn stuck_pending_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM content_items \
             WHERE status = $1 AND discovered_at < NOW() - make_interval(hours => $2)",
        )
        .bind(ItemStatus::Pending.as_str())
        .bind(STUCK_THRESHOLD_HOURS)
        .fetch_one(pool)
        .await
    }

    /// The manual review queue: unapproved items from sources that are in
    /// the aggregate feed but not trusted to auto-approve, newest first.
    pub async fn review_queue(
        pool: &PgPool,
        content_type: Option<&str>,
    ) -> Result<Vec<ItemWithSource>, sqlx::Error> {
        let type_filter = if content_type.is_some() {
            "AND i.content_type = $2"
        } else {
            ""
        };
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM content_items i JOIN sources s ON s.id = i.source_id \
             WHERE s.aggregate = true AND s.auto_approve = false \
                   AND i.approved = false {type_filter} \
             ORDER BY i.discovered_at DESC \
             LIMIT $1"
        );
        let mut q = sqlx::query_as::<_, ItemWithSource>(&query).bind(REVIEW_QUEUE_LIMIT);
        if let Some(content_type) = content_type {
            q = q.bind(content_type);
        }
        q.fetch_all(pool).await
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Set an item's status.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Send an item back to the front of the pipeline: status `pending`,
    /// error cleared, retry counter zeroed.
    pub async fn requeue(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items \
             SET status = $2, error_message = NULL, retry_count = 0 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(ItemStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Mark an item as approved for the aggregate feed.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET approved = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approve a set of items in a single statement.
    pub async fn bulk_approve(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE content_items SET approved = true WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Permanently delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
