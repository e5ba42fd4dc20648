//! Handlers for script resolution endpoints.
//!
//! Scripts leave the service token-filtered: any line carrying an API
//! credential is dropped from the response body. The stored entity and
//! the local cache keep the unfiltered text.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use auriga_core::error::CoreError;
use auriga_core::types::DbId;
use auriga_db::models::job::Job;
use auriga_db::repositories::{JobRepo, ScriptRepo};
use auriga_scripts::filter::filter_script_for_tokens;
use auriga_scripts::pipeline::apply_transforms;
use auriga_scripts::ScriptValue;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for script resolution.
#[derive(Debug, Deserialize)]
pub struct ScriptQuery {
    /// When present, the script is customized for this job.
    pub job_id: Option<DbId>,
}

/// A resolved (and possibly customized) script.
#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    /// Token-filtered script text.
    pub value: String,
    /// Whether the text derives from the canonical current template.
    pub is_latest: bool,
    /// Template revision, when known.
    pub revision: Option<String>,
}

/// GET /instrument/{instrument}/script
///
/// Resolve the instrument's current script, remote first with local
/// cache fallback. With `?job_id=` the job's transform chain is
/// applied before responding.
pub async fn get_instrument_script(
    State(state): State<AppState>,
    Path(instrument): Path<String>,
    Query(params): Query<ScriptQuery>,
) -> AppResult<Json<ScriptResponse>> {
    let script = state.resolver.resolve_latest(&instrument).await?;
    finish_script(state, script, instrument, params.job_id).await
}

/// GET /instrument/{instrument}/script/revision/{revision}
///
/// Resolve the instrument's script at an exact historical revision.
/// Unknown revisions are 404; there is no cache fallback.
pub async fn get_instrument_script_by_revision(
    State(state): State<AppState>,
    Path((instrument, revision)): Path<(String, String)>,
    Query(params): Query<ScriptQuery>,
) -> AppResult<Json<ScriptResponse>> {
    let script = state.resolver.resolve_pinned(&instrument, &revision).await?;
    finish_script(state, script, instrument, params.job_id).await
}

/// Shared tail of both resolution endpoints: optional customization,
/// cache write-back off the request path, token filtering.
async fn finish_script(
    state: AppState,
    mut script: ScriptValue,
    instrument: String,
    job_id: Option<DbId>,
) -> AppResult<Json<ScriptResponse>> {
    if let Some(job_id) = job_id {
        let job = find_job(&state, job_id).await?;
        apply_transforms(&mut script, &job, state.scripts.token.as_deref())?;
    }

    let resolver = state.resolver.clone();
    let response = ScriptResponse {
        value: filter_script_for_tokens(&script.text),
        is_latest: script.is_canonical(),
        revision: script.revision().map(str::to_string),
    };
    tokio::spawn(async move {
        if let Err(err) = resolver.write_back(&script, &instrument).await {
            tracing::warn!(instrument = %instrument, error = %err, "Cache write-back failed");
        }
    });

    Ok(Json(response))
}

async fn find_job(state: &AppState, job_id: DbId) -> AppResult<Job> {
    JobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: job_id,
        }))
}

/// A stored script entity, token-filtered for transport.
#[derive(Debug, Serialize)]
pub struct StoredScriptResponse {
    pub id: DbId,
    pub value: String,
    pub script_hash: String,
    pub revision: Option<String>,
    pub created_at: auriga_core::types::Timestamp,
}

/// GET /scripts/{id}
///
/// Fetch a stored script entity by ID.
pub async fn get_script(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StoredScriptResponse>>> {
    let script = ScriptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Script",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: StoredScriptResponse {
            id: script.id,
            value: filter_script_for_tokens(&script.script),
            script_hash: script.script_hash,
            revision: script.revision,
            created_at: script.created_at,
        },
    }))
}
