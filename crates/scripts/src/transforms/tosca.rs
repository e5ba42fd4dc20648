//! TOSCA script transform.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, quoted, quoted_run_list, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites the TOSCA template's run list and cycle from job inputs.
pub struct ToscaTransform;

impl Transform for ToscaTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning TOSCA transform");
        let rules = [
            MarkerRule::assign("input_runs", || {
                Ok(quoted_run_list(require(job, "input_runs")?))
            }),
            MarkerRule::assign("cycle", || Ok(quoted(require(job, "cycle_string")?))),
        ];
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}
