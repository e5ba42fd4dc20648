pub mod health;
pub mod instrument;
pub mod jobs;
pub mod scripts;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (health excluded; see
/// [`health::router`]).
///
/// ```text
/// /instrument/{instrument}/script                      resolve current script
/// /instrument/{instrument}/script/revision/{revision}  resolve pinned script
/// /jobs/{job_id}/script                                create and attach (POST)
/// /scripts/{id}                                        stored script entity
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(instrument::router())
        .merge(jobs::router())
        .merge(scripts::router())
}
