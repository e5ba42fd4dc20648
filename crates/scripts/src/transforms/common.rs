//! Transforms applied to every script regardless of instrument.

use auriga_db::models::job::Job;

use crate::error::ScriptError;
use crate::transforms::Transform;
use crate::value::ScriptValue;

/// Injects the runtime configuration preamble.
///
/// Python requires `from __future__` imports to precede all other
/// statements, so the leading run of future imports is kept on top and
/// the preamble lands immediately after it.
pub struct ConfigTransform {
    token: Option<String>,
}

impl ConfigTransform {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Reads the API token from `GITHUB_API_TOKEN`; absent means the
    /// scripts run unauthenticated.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GITHUB_API_TOKEN").ok())
    }
}

impl Transform for ConfigTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Injecting configuration preamble");
        let (futures, rest): (Vec<&str>, Vec<&str>) = script
            .text
            .split('\n')
            .partition(|line| line.trim_start().starts_with("from __future__"));

        let mut lines: Vec<String> = futures.iter().map(|s| s.to_string()).collect();
        lines.push("from mantid.kernel import ConfigService".to_string());
        lines.push(format!(
            "ConfigService.Instance()[\"network.github.api_token\"] = \"{}\"",
            self.token.as_deref().unwrap_or("")
        ));
        lines.extend(rest.iter().map(|s| s.to_string()));
        script.text = lines.join("\n");
        Ok(())
    }
}

/// Stanza appended by [`OutputTransform`]; the generated script ends by
/// reporting its outcome and output files as a JSON line.
const OUTPUT_STANZA: &str = "\nimport json\n\nprint(json.dumps({'status': 'Successful', 'status_message': '', 'output_files': output, 'stacktrace': ''}))\n";

/// Appends the JSON outcome report to the end of the script.
pub struct OutputTransform;

impl Transform for OutputTransform {
    fn apply(&self, script: &mut ScriptValue, job: &Job) -> Result<(), ScriptError> {
        tracing::info!(job_id = job.id, "Appending output stanza");
        script.text.push_str(OUTPUT_STANZA);
        Ok(())
    }
}
