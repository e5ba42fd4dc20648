use std::sync::Arc;

use auriga_scripts::resolver::ScriptResolver;

use crate::config::{ScriptConfig, ServerConfig};
use crate::scripting::orchestrator::ScriptOrchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: auriga_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Script acquisition configuration (repository URLs, cache, token).
    pub scripts: Arc<ScriptConfig>,
    /// Remote-plus-cache script resolver.
    pub resolver: Arc<ScriptResolver>,
    /// Job script orchestrator (resolve, transform, persist, attach).
    pub orchestrator: Arc<ScriptOrchestrator>,
}
