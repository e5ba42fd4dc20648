//! MARI script transform.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, bare_text, python_literal, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites MARI reduction parameters from job inputs, including the
/// legacy mask-file URL placeholder.
pub struct MariTransform;

/// Assignment markers whose job input shares the marker name.
const ASSIGN_MARKERS: &[&str] = &[
    "runno",
    "sum_runs",
    "ei",
    "wbvan",
    "monovan",
    "sam_mass",
    "sam_rmm",
    "remove_bkg",
];

impl Transform for MariTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning MARI transform");
        let mut rules = vec![MarkerRule::contains("url_to_mask_file.xml", |line| {
            let link = require(job, "mask_file_link")?;
            Ok(line.replace("url_to_mask_file.xml", &bare_text(link)))
        })];
        for &marker in ASSIGN_MARKERS {
            rules.push(MarkerRule::assign(marker, move || {
                Ok(python_literal(require(job, marker)?))
            }));
        }
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::test_support::job;

    const TEMPLATE: &str = "\
mask_file = 'url_to_mask_file.xml'
runno = 25240
sum_runs = False
ei = 'auto'
wbvan = 28580
monovan = None
sam_mass = 0.0
sam_rmm = 0.0
remove_bkg = True
";

    fn full_inputs() -> serde_json::Value {
        json!({
            "mask_file_link": "https://example.com/mask.xml",
            "runno": 30000,
            "sum_runs": true,
            "ei": [50, 100],
            "wbvan": 28581,
            "monovan": 30000,
            "sam_mass": 12.5,
            "sam_rmm": 50.2,
            "remove_bkg": false,
        })
    }

    #[test]
    fn rewrites_all_markers() {
        let mut script = ScriptValue::cached(TEMPLATE.to_string(), None);
        let job = job("mari", full_inputs());
        MariTransform.apply(&mut script, &job).unwrap();

        assert!(script
            .text
            .contains("mask_file = 'https://example.com/mask.xml'"));
        assert!(script.text.contains("runno = 30000"));
        assert!(script.text.contains("sum_runs = True"));
        assert!(script.text.contains("ei = [50, 100]"));
        assert!(script.text.contains("wbvan = 28581"));
        assert!(script.text.contains("monovan = 30000"));
        assert!(script.text.contains("sam_mass = 12.5"));
        assert!(script.text.contains("sam_rmm = 50.2"));
        assert!(script.text.contains("remove_bkg = False"));
        assert_eq!(
            script.text.split('\n').count(),
            TEMPLATE.split('\n').count()
        );
    }

    #[test]
    fn missing_parameter_for_present_marker_fails() {
        let mut script = ScriptValue::cached("runno = 25240\n".to_string(), None);
        let job = job("mari", json!({}));
        assert_matches!(
            MariTransform.apply(&mut script, &job),
            Err(ScriptError::MissingParameter { name }) if name == "runno"
        );
    }

    #[test]
    fn inputs_for_absent_markers_are_not_required() {
        // Template with only one marker: the other inputs need not be
        // supplied.
        let mut script = ScriptValue::cached("runno = 25240\n".to_string(), None);
        let job = job("mari", json!({"runno": 99}));
        MariTransform.apply(&mut script, &job).unwrap();
        assert_eq!(script.text, "runno = 99\n");
    }
}
