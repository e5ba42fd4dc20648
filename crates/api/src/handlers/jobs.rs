//! Handlers for the `/jobs` script attachment endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use auriga_core::types::{DbId, Timestamp};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for script attachment.
#[derive(Debug, Deserialize)]
pub struct JobScriptQuery {
    /// Pin the template to an exact repository revision instead of the
    /// canonical current one.
    pub revision: Option<String>,
}

/// Metadata of the script entity attached to a job. The script text
/// itself is retrievable via `GET /scripts/{id}`.
#[derive(Debug, Serialize)]
pub struct JobScriptResponse {
    pub script_id: DbId,
    pub script_hash: String,
    pub revision: Option<String>,
    pub created_at: Timestamp,
}

/// POST /jobs/{job_id}/script
///
/// Resolve, customize, and persist the script for a job, then attach
/// it. Returns 201 with the stored entity's metadata; the entity may
/// predate this call when an identical script already exists.
pub async fn create_job_script(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
    Query(params): Query<JobScriptQuery>,
) -> AppResult<impl IntoResponse> {
    let script = state
        .orchestrator
        .script_for_job(job_id, params.revision.as_deref())
        .await?;

    tracing::info!(
        job_id,
        script_id = script.id,
        script_hash = %script.script_hash,
        "Job script created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: JobScriptResponse {
                script_id: script.id,
                script_hash: script.script_hash,
                revision: script.revision,
                created_at: script.created_at,
            },
        }),
    ))
}
