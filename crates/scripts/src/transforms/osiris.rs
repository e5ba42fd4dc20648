//! OSIRIS script transform.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, bare_text, bracketed_runs, quoted, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites OSIRIS reduction parameters from job inputs.
///
/// OSIRIS runs both spectroscopy and diffraction reductions; the two
/// mode flags arrive as the strings `"true"` / `"false"` and render as
/// Python booleans.
pub struct OsirisTransform;

impl Transform for OsirisTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning OSIRIS transform");
        let rules = [
            MarkerRule::assign("input_runs", || {
                Ok(bracketed_runs(require(job, "input_runs")?))
            }),
            MarkerRule::assign("calibration_run_number", || {
                Ok(quoted(require(job, "calibration_run_number")?))
            }),
            MarkerRule::assign("cycle", || Ok(quoted(require(job, "cycle_string")?))),
            MarkerRule::assign("analyser", || Ok(quoted(require(job, "analyser")?))),
            MarkerRule::assign("reflection", || Ok(quoted(require(job, "reflection")?))),
            MarkerRule::assign("spectroscopy_reduction", || {
                Ok(flag(require(job, "spectroscopy_reduction")?))
            }),
            MarkerRule::assign("diffraction_reduction", || {
                Ok(flag(require(job, "diffraction_reduction")?))
            }),
        ];
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}

/// The mode flags are transported as strings; anything other than
/// `"true"` is off.
fn flag(value: &serde_json::Value) -> String {
    if bare_text(value) == "true" {
        "True".to_string()
    } else {
        "False".to_string()
    }
}
