//! Route definitions for script resolution endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// ```text
/// GET /instrument/{instrument}/script                      -> get_instrument_script
/// GET /instrument/{instrument}/script/revision/{revision}  -> get_instrument_script_by_revision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/instrument/{instrument}/script",
            get(scripts::get_instrument_script),
        )
        .route(
            "/instrument/{instrument}/script/revision/{revision}",
            get(scripts::get_instrument_script_by_revision),
        )
}
