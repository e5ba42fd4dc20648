//! Small-angle scattering script transform, shared by LOQ and SANS2D.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, bare_text, python_literal, quoted, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites SANS reduction parameters from job inputs.
///
/// Both SANS instruments use the same template layout; the only
/// per-instrument part is the mask-file path, which embeds the
/// lowercase instrument name.
pub struct SansTransform;

/// Assignment markers rendered as Python literals. The first three map
/// to differently named job inputs.
const ASSIGN_MARKERS: &[(&str, &str)] = &[
    ("sample_scatter", "scatter_number"),
    ("sample_transmission", "scatter_transmission_number"),
    ("sample_direct", "scatter_direct_number"),
    ("can_scatter", "can_scatter"),
    ("can_transmission", "can_transmission"),
    ("can_direct", "can_direct"),
    ("sample_thickness", "sample_thickness"),
    ("sample_height", "sample_height"),
    ("sample_width", "sample_width"),
    ("slice_wavs", "slice_wavs"),
    ("phi_limits_list", "phi_limits"),
];

impl Transform for SansTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, instrument = %job.instrument, "Beginning SANS transform");
        let mask_marker = format!("/extras/{}/MaskFile.toml", job.instrument.to_lowercase());
        let mut rules = vec![
            MarkerRule::contains(mask_marker.clone(), move |line: &str| {
                let user_file = require(job, "user_file")?;
                Ok(line.replace(&mask_marker, &bare_text(user_file)))
            }),
            MarkerRule::assign("sample_geometry", || {
                Ok(quoted(require(job, "sample_geometry")?))
            }),
        ];
        for &(marker, input) in ASSIGN_MARKERS {
            rules.push(MarkerRule::assign(marker, move || {
                Ok(python_literal(require(job, input)?))
            }));
        }
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}
