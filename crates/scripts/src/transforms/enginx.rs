//! ENGINX script transform.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::render::{apply_rules, bare_text, require, MarkerRule};
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Rewrites ENGINX calibration/focus paths and the detector group.
///
/// The ENGINX template assigns these mid-line, so the markers match
/// anywhere in the line and only the right-hand side of the first `=`
/// is replaced.
pub struct EnginxTransform;

impl Transform for EnginxTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Beginning ENGINX transform");
        let rules = [
            MarkerRule::contains("ceria_path =", |line| {
                Ok(replace_rhs(line, &single_quoted(require(job, "ceria_path")?)))
            }),
            MarkerRule::contains("vanadium_path =", |line| {
                Ok(replace_rhs(
                    line,
                    &single_quoted(require(job, "vanadium_path")?),
                ))
            }),
            MarkerRule::contains("focus_path =", |line| {
                Ok(replace_rhs(line, &single_quoted(require(job, "focus_path")?)))
            }),
            MarkerRule::contains("group =", |line| {
                let group = require(job, "group")?;
                Ok(replace_rhs(
                    line,
                    &format!("GROUP[\"{}\"]", bare_text(group)),
                ))
            }),
        ];
        apply_rules(script, &rules)?;
        tracing::info!(job_id = job.id, "Transform complete");
        Ok(())
    }
}

fn single_quoted(value: &serde_json::Value) -> String {
    format!("'{}'", bare_text(value))
}

/// Replace everything after the first `=` with the rendered value,
/// keeping the left-hand side (indentation included) intact.
fn replace_rhs(line: &str, value: &str) -> String {
    match line.split_once('=') {
        Some((lhs, _)) => format!("{lhs}= {value}"),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::test_support::job;

    const TEMPLATE: &str = "\
ceria_path = 'ENGINX00241391'
vanadium_path = 'ENGINX00236516'
focus_path = 'ENGINX00241392'
group = GROUP[\"BOTH\"]
";

    #[test]
    fn rewrites_paths_and_group() {
        let mut script = ScriptValue::cached(TEMPLATE.to_string(), None);
        let job = job(
            "enginx",
            json!({
                "ceria_path": "ENGINX00300001",
                "vanadium_path": "ENGINX00300002",
                "focus_path": "ENGINX00300003",
                "group": "NORTH",
            }),
        );
        EnginxTransform.apply(&mut script, &job).unwrap();

        assert!(script.text.contains("ceria_path = 'ENGINX00300001'"));
        assert!(script.text.contains("vanadium_path = 'ENGINX00300002'"));
        assert!(script.text.contains("focus_path = 'ENGINX00300003'"));
        assert!(script.text.contains("group = GROUP[\"NORTH\"]"));
        assert_eq!(
            script.text.split('\n').count(),
            TEMPLATE.split('\n').count()
        );
    }

    #[test]
    fn indented_assignment_keeps_its_indentation() {
        let mut script = ScriptValue::cached("    ceria_path = 'x'\n".to_string(), None);
        let job = job("enginx", json!({"ceria_path": "y"}));
        EnginxTransform.apply(&mut script, &job).unwrap();
        assert_eq!(script.text, "    ceria_path = 'y'\n");
    }

    #[test]
    fn missing_group_fails() {
        let mut script = ScriptValue::cached("group = GROUP[\"BOTH\"]\n".to_string(), None);
        let job = job("enginx", json!({}));
        assert_matches!(
            EnginxTransform.apply(&mut script, &job),
            Err(ScriptError::MissingParameter { name }) if name == "group"
        );
    }
}
