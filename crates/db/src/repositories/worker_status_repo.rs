//! Read-only repository for the `worker_status` heartbeat table.

use sqlx::PgPool;

use crate::models::worker_status::WorkerStatus;

/// Column list for `worker_status` queries.
const COLUMNS: &str = "\
    id, worker_id, last_heartbeat, status, hostname, version, metadata, \
    created_at, updated_at";

/// Reads the pipeline worker's heartbeat rows.
pub struct WorkerStatusRepo;

impl WorkerStatusRepo {
    /// The most recent heartbeat, if any worker has ever reported.
    pub async fn latest(pool: &PgPool) -> Result<Option<WorkerStatus>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM worker_status \
             ORDER BY last_heartbeat DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, WorkerStatus>(&query)
            .fetch_optional(pool)
            .await
    }
}
