//! Route definitions for job script attachment.

use axum::routing::post;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// ```text
/// POST /jobs/{job_id}/script  -> create_job_script
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/jobs/{job_id}/script", post(jobs::create_job_script))
}
