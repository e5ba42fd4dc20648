//! Per-instrument script transforms.
//!
//! A [`Transform`] rewrites a script template in place using a job's
//! input parameters. Each supported instrument registers exactly one
//! transform; [`transform_for_instrument`] dispatches over the closed
//! set and fails for anything else.

pub mod common;
pub mod enginx;
pub mod iris;
pub mod mari;
pub mod osiris;
pub mod render;
pub mod sans;
pub mod test_instrument;
pub mod tosca;
pub mod vesuvio;

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::value::ScriptValue;

/// A stateless rewrite rule that customizes a template script with
/// job-specific parameters.
///
/// Implementations must preserve the script's line count and line
/// order: downstream transforms are line-indexed and would be
/// corrupted otherwise.
pub trait Transform: Send + Sync {
    /// Apply the transform, mutating `script.text` in place.
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError>;
}

/// Get the transform registered for an instrument.
///
/// Lookup is case-insensitive over a fixed set. An unregistered
/// instrument is a configuration error, not a transient fault, and
/// must not be retried.
pub fn transform_for_instrument(instrument: &str) -> Result<Box<dyn Transform>, ScriptError> {
    tracing::info!(instrument, "Getting transform for instrument");
    match instrument.to_lowercase().as_str() {
        "mari" => Ok(Box::new(mari::MariTransform)),
        "tosca" => Ok(Box::new(tosca::ToscaTransform)),
        "osiris" => Ok(Box::new(osiris::OsirisTransform)),
        "iris" => Ok(Box::new(iris::IrisTransform)),
        "vesuvio" => Ok(Box::new(vesuvio::VesuvioTransform)),
        "enginx" => Ok(Box::new(enginx::EnginxTransform)),
        "loq" | "sans2d" => Ok(Box::new(sans::SansTransform)),
        "test" => Ok(Box::new(test_instrument::TestTransform)),
        _ => Err(ScriptError::MissingTransform {
            instrument: instrument.to_string(),
        }),
    }
}
