//! VESUVIO script transform.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, quoted, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites VESUVIO reduction parameters from job inputs; every value
/// renders as a quoted string.
pub struct VesuvioTransform;

impl Transform for VesuvioTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning VESUVIO transform");
        let rules = [
            MarkerRule::assign("ip", || Ok(quoted(require(job, "ip_file")?))),
            MarkerRule::assign("runno", || Ok(quoted(require(job, "runno")?))),
            MarkerRule::assign("empty_runs", || Ok(quoted(require(job, "empty_runs")?))),
        ];
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}
