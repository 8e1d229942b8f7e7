//! Repository for the `sources` table.

use sqlx::PgPool;

use feedwatch_core::source::SourceFlag;
use feedwatch_core::types::DbId;

use crate::models::source::{CreateSource, Source, SourceStats, UpdateSource};

/// Column list for `sources` queries.
const COLUMNS: &str = "\
    id, name, source_type, url, check_interval_minutes, enabled, aggregate, \
    auto_archive, auto_approve, auto_transcribe, auto_summarize, config, \
    last_checked_at, last_success_at, last_error, last_error_at, \
    consecutive_failures, circuit_breaker_until, created_at, updated_at";

/// Provides CRUD operations and flag toggles for sources.
pub struct SourceRepo;

impl SourceRepo {
    // ── Queries ──────────────────────────────────────────────────────────

    /// List all sources ordered by name. The source count is assumed small
    /// enough that no pagination is needed.
    pub async fn list(pool: &PgPool) -> Result<Vec<Source>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sources ORDER BY name ASC");
        sqlx::query_as::<_, Source>(&query).fetch_all(pool).await
    }

    /// Find a source by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Source>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sources WHERE id = $1");
        sqlx::query_as::<_, Source>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Aggregate source counts for the dashboard.
    pub async fn stats(pool: &PgPool) -> Result<SourceStats, sqlx::Error> {
        sqlx::query_as::<_, SourceStats>(
            "SELECT \
                COUNT(*) AS total_sources, \
                COUNT(*) FILTER (WHERE enabled) AS enabled_sources, \
                COUNT(*) FILTER (WHERE aggregate) AS aggregate_sources \
             FROM sources",
        )
        .fetch_one(pool)
        .await
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Insert a new source. Flags default to off and the interval to 60
    /// minutes when not provided.
    pub async fn create(pool: &PgPool, input: &CreateSource) -> Result<Source, sqlx::Error> {
        let query = format!(
            "INSERT INTO sources \
                (name, source_type, url, check_interval_minutes, enabled, aggregate, \
                 auto_archive, auto_approve, auto_transcribe, auto_summarize, config) \
             VALUES ($1, $2, $3, COALESCE($4, 60), COALESCE($5, true), \
                     COALESCE($6, false), COALESCE($7, false), COALESCE($8, false), \
                     COALESCE($9, false), COALESCE($10, false), \
                     COALESCE($11, '{{}}'::jsonb)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Source>(&query)
            .bind(&input.name)
            .bind(&input.source_type)
            .bind(&input.url)
            .bind(input.check_interval_minutes)
            .bind(input.enabled)
            .bind(input.aggregate)
            .bind(input.auto_archive)
            .bind(input.auto_approve)
            .bind(input.auto_transcribe)
            .bind(input.auto_summarize)
            .bind(&input.config)
            .fetch_one(pool)
            .await
    }

    /// Update a source. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always bumped.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSource,
    ) -> Result<Option<Source>, sqlx::Error> {
        let query = format!(
            "UPDATE sources SET \
                name = COALESCE($2, name), \
                source_type = COALESCE($3, source_type), \
                url = COALESCE($4, url), \
                check_interval_minutes = COALESCE($5, check_interval_minutes), \
                enabled = COALESCE($6, enabled), \
                aggregate = COALESCE($7, aggregate), \
                auto_archive = COALESCE($8, auto_archive), \
                auto_approve = COALESCE($9, auto_approve), \
                auto_transcribe = COALESCE($10, auto_transcribe), \
                auto_summarize = COALESCE($11, auto_summarize), \
                config = COALESCE($12, config), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Source>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.source_type)
            .bind(&input.url)
            .bind(input.check_interval_minutes)
            .bind(input.enabled)
            .bind(input.aggregate)
            .bind(input.auto_archive)
            .bind(input.auto_approve)
            .bind(input.auto_transcribe)
            .bind(input.auto_summarize)
            .bind(&input.config)
            .fetch_optional(pool)
            .await
    }

    /// Set one toggleable boolean flag on a single source.
    ///
    /// The column name comes from [`SourceFlag::as_column`], never from
    /// caller input.
    pub async fn set_flag(
        pool: &PgPool,
        id: DbId,
        flag: SourceFlag,
        value: bool,
    ) -> Result<Option<Source>, sqlx::Error> {
        let query = format!(
            "UPDATE sources SET {column} = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            column = flag.as_column()
        );
        sqlx::query_as::<_, Source>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(pool)
            .await
    }

    /// Set one toggleable boolean flag on every source. Returns the number
    /// of rows touched.
    pub async fn set_flag_all(
        pool: &PgPool,
        flag: SourceFlag,
        value: bool,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE sources SET {column} = $1, updated_at = NOW()",
            column = flag.as_column()
        );
        let result = sqlx::query(&query).bind(value).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Permanently delete a source. Items cascade at the schema level.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
