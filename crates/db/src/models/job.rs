//! Narrow job model.
//!
//! Jobs are owned by the wider platform; this service only reads the
//! fields the transform pipeline needs and writes back the script
//! reference.

use auriga_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A reduction job as seen by the script pipeline.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    /// Instrument the job runs on; selects the transform.
    pub instrument: String,
    /// Job-specific substitution parameters (JSON object).
    pub inputs: serde_json::Value,
    /// Reference to the stored script, attached after resolution.
    pub script_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl Job {
    /// Look up a job input by key.
    pub fn input(&self, key: &str) -> Option<&serde_json::Value> {
        self.inputs.get(key)
    }
}
