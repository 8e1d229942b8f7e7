//! Worker heartbeat model.
//!
//! Rows are written periodically by the external pipeline process and
//! read-only here; only the most recent row matters.

use feedwatch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A heartbeat row from the `worker_status` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkerStatus {
    pub id: DbId,
    pub worker_id: String,
    pub last_heartbeat: Timestamp,
    /// Self-reported state: `running`, `idle`, or `stopping`.
    pub status: String,
    pub hostname: Option<String>,
    pub version: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
