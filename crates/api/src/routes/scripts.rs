//! Route definitions for stored script entities.

use axum::routing::get;
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// ```text
/// GET /scripts/{id}  -> get_script
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/scripts/{id}", get(scripts::get_script))
}
