//! Full customization pipeline for a resolved script.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::common::{ConfigTransform, OutputTransform};
use crate::transforms::{transform_for_instrument, Transform};
use crate::value::ScriptValue;

/// Apply the full transform chain to a resolved script, in order:
/// the job instrument's transform, the configuration preamble, the
/// output stanza. Each stage runs exactly once; a failing stage leaves
/// no partial chain behind because the caller discards the script.
pub fn apply_transforms(
    script: &mut ScriptValue,
    job: &Job,
    token: Option<&str>,
) -> Result<(), ScriptError> {
    let transform = transform_for_instrument(&job.instrument)?;
    transform.apply(script, job)?;
    ConfigTransform::new(token.map(str::to_string)).apply(script, job)?;
    OutputTransform.apply(script, job)?;
    Ok(())
}
