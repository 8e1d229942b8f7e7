//! Source entity models and DTOs.

use feedwatch_core::health::{classify_source, SourceHealth, SourceSignals};
use feedwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A source row from the `sources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Source {
    pub id: DbId,
    pub name: String,
    pub source_type: String,
    pub url: String,
    pub check_interval_minutes: i32,
    pub enabled: bool,
    pub aggregate: bool,
    pub auto_archive: bool,
    pub auto_approve: bool,
    pub auto_transcribe: bool,
    pub auto_summarize: bool,
    /// Opaque provider-specific metadata (channel thumbnail, subscriber
    /// count, etc.). Never interpreted here.
    pub config: serde_json::Value,
    pub last_checked_at: Option<Timestamp>,
    pub last_success_at: Option<Timestamp>,
    pub last_error: Option<String>,
    pub last_error_at: Option<Timestamp>,
    pub consecutive_failures: i32,
    pub circuit_breaker_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Source {
    /// Classify this source's health as of `now`.
    pub fn health(&self, now: Timestamp) -> SourceHealth {
        classify_source(
            &SourceSignals {
                circuit_breaker_until: self.circuit_breaker_until,
                consecutive_failures: self.consecutive_failures,
                last_error: self.last_error.as_deref(),
                last_error_at: self.last_error_at,
                last_success_at: self.last_success_at,
            },
            now,
        )
    }
}

/// DTO for creating a source. Health-tracking fields are pipeline-owned
/// and cannot be set here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSource {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub source_type: String,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
    #[validate(range(min = 1, message = "check_interval_minutes must be positive"))]
    pub check_interval_minutes: Option<i32>,
    pub enabled: Option<bool>,
    pub aggregate: Option<bool>,
    pub auto_archive: Option<bool>,
    pub auto_approve: Option<bool>,
    pub auto_transcribe: Option<bool>,
    pub auto_summarize: Option<bool>,
    pub config: Option<serde_json::Value>,
}

/// DTO for updating a source. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSource {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub source_type: Option<String>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    #[validate(range(min = 1, message = "check_interval_minutes must be positive"))]
    pub check_interval_minutes: Option<i32>,
    pub enabled: Option<bool>,
    pub aggregate: Option<bool>,
    pub auto_archive: Option<bool>,
    pub auto_approve: Option<bool>,
    pub auto_transcribe: Option<bool>,
    pub auto_summarize: Option<bool>,
    pub config: Option<serde_json::Value>,
}

/// Aggregate source statistics for the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SourceStats {
    pub total_sources: i64,
    pub enabled_sources: i64,
    pub aggregate_sources: i64,
}
