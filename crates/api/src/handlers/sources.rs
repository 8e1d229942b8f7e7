//! Handlers for source management: CRUD, flag toggles, and health.
//!
//! Flag names arrive as path segments and are parsed into [`SourceFlag`]
//! before anything touches the database, so unknown flags are a 400, never
//! a dynamic column name.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use feedwatch_core::health::SourceHealth;
use feedwatch_core::relative_time::format_relative;
use feedwatch_core::source::{bulk_toggle_target, SourceFlag, SourceType};
use feedwatch_core::types::DbId;
use feedwatch_core::CoreError;
use feedwatch_db::models::source::{CreateSource, Source, UpdateSource};
use feedwatch_db::repositories::SourceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for PUT /sources/{id}/flags/{flag}.
#[derive(Debug, Deserialize)]
pub struct SetFlagRequest {
    pub value: bool,
}

/// Response for POST /sources/flags/{flag}/toggle-all.
#[derive(Debug, Serialize)]
pub struct ToggleAllResponse {
    pub flag: SourceFlag,
    pub value: bool,
    pub affected: u64,
}

/// Response for GET /sources/{id}/health.
#[derive(Debug, Serialize)]
pub struct SourceHealthResponse {
    #[serde(flatten)]
    pub health: SourceHealth,
    /// Relative rendering of `last_checked_at`, or `None` if the source has
    /// never been checked.
    pub last_checked: Option<String>,
}

fn parse_flag(raw: &str) -> Result<SourceFlag, AppError> {
    raw.parse::<SourceFlag>().map_err(AppError::BadRequest)
}

fn flag_value(source: &Source, flag: SourceFlag) -> bool {
    match flag {
        SourceFlag::Enabled => source.enabled,
        SourceFlag::Aggregate => source.aggregate,
        SourceFlag::AutoArchive => source.auto_archive,
        SourceFlag::AutoApprove => source.auto_approve,
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/sources
pub async fn list_sources(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sources = SourceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sources }))
}

/// GET /api/v1/sources/{id}
pub async fn get_source(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = SourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "source",
            id,
        })?;
    Ok(Json(DataResponse { data: source }))
}

/// POST /api/v1/sources
pub async fn create_source(
    State(state): State<AppState>,
    Json(input): Json<CreateSource>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    if SourceType::parse(&input.source_type).is_none() {
        return Err(AppError::BadRequest(format!(
            "unknown source type: {}",
            input.source_type
        )));
    }

    let source = SourceRepo::create(&state.pool, &input).await?;

    tracing::info!(
        source_id = source.id,
        source_name = %source.name,
        source_type = %source.source_type,
        "Source created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: source })))
}

/// PUT /api/v1/sources/{id}
pub async fn update_source(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSource>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    if let Some(source_type) = &input.source_type {
        if SourceType::parse(source_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "unknown source type: {source_type}"
            )));
        }
    }

    let source = SourceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "source",
            id,
        })?;

    tracing::info!(source_id = id, "Source updated");
    Ok(Json(DataResponse { data: source }))
}

/// DELETE /api/v1/sources/{id}
///
/// Removes the source and, via the schema cascade, all of its items.
pub async fn delete_source(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SourceRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "source",
            id,
        }
        .into());
    }

    tracing::info!(source_id = id, "Source deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// PUT /api/v1/sources/{id}/flags/{flag}
///
/// Set one automation flag on one source.
pub async fn set_flag(
    State(state): State<AppState>,
    Path((id, flag)): Path<(DbId, String)>,
    Json(input): Json<SetFlagRequest>,
) -> AppResult<impl IntoResponse> {
    let flag = parse_flag(&flag)?;
    let source = SourceRepo::set_flag(&state.pool, id, flag, input.value)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "source",
            id,
        })?;

    tracing::info!(source_id = id, flag = ?flag, value = input.value, "Source flag set");
    Ok(Json(DataResponse { data: source }))
}

/// POST /api/v1/sources/flags/{flag}/toggle-all
///
/// Flip a flag across every source: on unless all sources already have it
/// on, in which case off.
pub async fn toggle_all(
    State(state): State<AppState>,
    Path(flag): Path<String>,
) -> AppResult<impl IntoResponse> {
    let flag = parse_flag(&flag)?;

    let sources = SourceRepo::list(&state.pool).await?;
    let value = bulk_toggle_target(sources.iter().map(|s| flag_value(s, flag)));
    let affected = SourceRepo::set_flag_all(&state.pool, flag, value).await?;

    tracing::info!(flag = ?flag, value, affected, "Source flag toggled in bulk");
    Ok(Json(DataResponse {
        data: ToggleAllResponse {
            flag,
            value,
            affected,
        },
    }))
}

// ---------------------------------------------------------------------------
// Health and manual checks
// ---------------------------------------------------------------------------

/// GET /api/v1/sources/{id}/health
pub async fn get_source_health(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = SourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "source",
            id,
        })?;

    let now = Utc::now();
    let resp = SourceHealthResponse {
        health: source.health(now),
        last_checked: source.last_checked_at.map(|t| format_relative(t, now)),
    };
    Ok(Json(DataResponse { data: resp }))
}

/// POST /api/v1/sources/{id}/check
///
/// Ask the pipeline to check this source immediately, outside its schedule.
/// The pipeline is the authority here; a refused or failed trigger surfaces
/// as a 502.
pub async fn force_check(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // Confirm the source exists so a typo'd ID is a 404, not a pipeline error.
    SourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "source",
            id,
        })?;

    state.monitor.force_check(id).await?;

    Ok(StatusCode::ACCEPTED)
}
