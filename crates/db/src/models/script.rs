//! Content-addressed script entity model.

use auriga_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A persisted, fully transformed reduction script.
///
/// At most one row exists per distinct `script_hash` (unique
/// constraint `uq_scripts_script_hash`); rows are never mutated or
/// deleted by this service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Script {
    pub id: DbId,
    /// Full script text as handed to the runner.
    pub script: String,
    /// Source repository revision the template came from, when known.
    pub revision: Option<String>,
    /// SHA-256 hex digest of `script`; the dedup key.
    pub script_hash: String,
    pub created_at: Timestamp,
}
