//! Content item entity models, filters, and DTOs.

use feedwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A content item row from the `content_items` table.
///
/// `status` stays a plain string so rows written by a newer pipeline
/// version still load; the canonical values live in
/// `feedwatch_core::item_status::ItemStatus`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub source_id: DbId,
    pub external_id: Option<String>,
    pub url: String,
    pub enclosure_url: Option<String>,
    pub title: Option<String>,
    pub content_type: Option<String>,
    pub status: String,
    pub archive_path: Option<String>,
    pub transcript_path: Option<String>,
    pub summary: Option<String>,
    pub error_message: Option<String>,
    pub retry_count: i32,
    pub published_at: Option<Timestamp>,
    pub discovered_at: Timestamp,
    pub processed_at: Option<Timestamp>,
    pub approved: bool,
    pub metadata_json: Option<serde_json::Value>,
}

/// A content item joined with its owning source's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemWithSource {
    pub id: DbId,
    pub source_id: DbId,
    pub external_id: Option<String>,
    pub url: String,
    pub enclosure_url: Option<String>,
    pub title: Option<String>,
    pub content_type: Option<String>,
    pub status: String,
    pub archive_path: Option<String>,
    pub transcript_path: Option<String>,
    pub summary: Option<String>,
    pub error_message: Option<String>,
    pub retry_count: i32,
    pub published_at: Option<Timestamp>,
    pub discovered_at: Timestamp,
    pub processed_at: Option<Timestamp>,
    pub approved: bool,
    pub metadata_json: Option<serde_json::Value>,
    pub source_name: String,
}

/// Filter for item listings. All fields optional; absent means "no
/// constraint". `source_id` uses presence rather than truthiness, so id 0
/// filters like any other id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemsFilter {
    pub status: Option<String>,
    pub source_id: Option<DbId>,
    pub content_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Default page size for item listings.
pub const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on a single page.
pub const MAX_LIMIT: i64 = 500;

impl ItemsFilter {
    /// Effective limit: default 50, clamped to `1..=MAX_LIMIT`.
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset: default 0, never negative.
    pub fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// One page of items plus the total row count under the same filter,
/// needed by pagination controls to find the last page.
#[derive(Debug, Serialize)]
pub struct ItemsPage {
    pub items: Vec<ItemWithSource>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = ItemsFilter::default();
        assert_eq!(filter.effective_limit(), DEFAULT_LIMIT);
        assert_eq!(filter.effective_offset(), 0);
    }

    #[test]
    fn test_filter_clamps_out_of_range_values() {
        let filter = ItemsFilter {
            limit: Some(10_000),
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(), MAX_LIMIT);
        assert_eq!(filter.effective_offset(), 0);
    }

    #[test]
    fn test_source_id_zero_is_a_real_filter() {
        let filter = ItemsFilter {
            source_id: Some(0),
            ..Default::default()
        };
        assert_eq!(filter.source_id, Some(0));
    }
}
