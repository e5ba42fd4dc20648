//! IRIS script transform.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, bare_text, bracketed_runs, quoted, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites IRIS reduction parameters from job inputs.
pub struct IrisTransform;

impl Transform for IrisTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning IRIS transform");
        let rules = [
            MarkerRule::assign("input_runs", || {
                Ok(bracketed_runs(require(job, "input_runs")?))
            }),
            MarkerRule::assign("calibration_run_numbers", || {
                let runs = require(job, "calibration_run_numbers")?;
                Ok(format!("[{}]", bare_text(runs)))
            }),
            MarkerRule::assign("cycle", || Ok(quoted(require(job, "cycle_string")?))),
            MarkerRule::assign("analyser", || Ok(quoted(require(job, "analyser")?))),
            MarkerRule::assign("reflection", || Ok(quoted(require(job, "reflection")?))),
        ];
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}
