//! Transform for the TEST instrument used by end-to-end checks.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites the single `x =` assignment in the TEST template to a
/// fixed value, so downstream checks can tell a transformed script
/// from the raw template.
pub struct TestTransform;

impl Transform for TestTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning TEST transform");
        let rules = [MarkerRule::prefix("x =", |_| Ok("x = 22".to_string()))];
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}
