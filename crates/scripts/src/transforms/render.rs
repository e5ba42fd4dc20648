//! Marker substitution engine and value rendering.
//!
//! Every instrument transform is a table of (marker, renderer) pairs
//! scanned left-to-right over the template's lines. Generated scripts
//! are Python, so values render as Python literals: strings quoted,
//! booleans `True`/`False`, numbers bare, sequences bracketed.

use auriga_db::models::job::Job;
use serde_json::Value;

use crate::error::ScriptError;
use crate::value::ScriptValue;

/// How a rule recognizes its template line.
enum Matcher {
    /// Line begins with the marker token.
    Prefix(String),
    /// Line contains the marker anywhere (legacy templates).
    Contains(String),
}

/// A single substitution rule: a line matcher plus a replacement
/// builder receiving the matched line.
pub struct MarkerRule<'a> {
    matcher: Matcher,
    render: Box<dyn Fn(&str) -> Result<String, ScriptError> + 'a>,
}

impl<'a> MarkerRule<'a> {
    /// Rule matching lines that start with `marker`.
    pub fn prefix(
        marker: impl Into<String>,
        render: impl Fn(&str) -> Result<String, ScriptError> + 'a,
    ) -> Self {
        Self {
            matcher: Matcher::Prefix(marker.into()),
            render: Box::new(render),
        }
    }

    /// Rule matching lines that contain `marker` anywhere.
    pub fn contains(
        marker: impl Into<String>,
        render: impl Fn(&str) -> Result<String, ScriptError> + 'a,
    ) -> Self {
        Self {
            matcher: Matcher::Contains(marker.into()),
            render: Box::new(render),
        }
    }

    /// The common case: a `name = <value>` assignment line whose
    /// right-hand side is replaced wholesale.
    pub fn assign(
        name: &'static str,
        value: impl Fn() -> Result<String, ScriptError> + 'a,
    ) -> Self {
        Self::prefix(name, move |_| Ok(format!("{name} = {}", value()?)))
    }

    fn matches(&self, line: &str) -> bool {
        match &self.matcher {
            Matcher::Prefix(marker) => line.starts_with(marker),
            Matcher::Contains(marker) => line.contains(marker.as_str()),
        }
    }
}

/// Run a rule table over the script in a single left-to-right scan.
///
/// Each rule rewrites at most one line (first match wins); markers
/// absent from the template are silently skipped, tolerating template
/// drift. Line count and order are preserved by construction. A rule
/// whose renderer fails (missing job parameter) aborts the whole
/// transform.
pub fn apply_rules(script: &mut ScriptValue, rules: &[MarkerRule<'_>]) -> Result<(), ScriptError> {
    let mut lines: Vec<String> = script.text.split('\n').map(str::to_string).collect();
    let mut applied = vec![false; rules.len()];
    for line in lines.iter_mut() {
        for (index, rule) in rules.iter().enumerate() {
            if applied[index] || !rule.matches(line) {
                continue;
            }
            *line = (rule.render)(line)?;
            applied[index] = true;
            break;
        }
    }
    script.text = lines.join("\n");
    Ok(())
}

/// Look up a job input that the template's marker requires.
///
/// A marker present in the script with no corresponding job input is a
/// malformed job request, not a silently skipped substitution.
pub fn require<'a>(job: &'a Job, key: &str) -> Result<&'a Value, ScriptError> {
    job.input(key).ok_or_else(|| ScriptError::MissingParameter {
        name: key.to_string(),
    })
}

/// Render a job input as a Python literal: quoted strings, `True` /
/// `False`, bare numbers, bracketed lists.
pub fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        // Objects never appear in substitution inputs; fall back to
        // their JSON form.
        Value::Object(_) => value.to_string(),
    }
}

/// Render a job input as bare text: strings unquoted, everything else
/// as its Python literal. Used when the value is spliced into a larger
/// expression.
pub fn bare_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => python_literal(other),
    }
}

/// Render a job input as a double-quoted Python string.
pub fn quoted(value: &Value) -> String {
    format!("\"{}\"", bare_text(value))
}

/// Render a run list with every element as a quoted string, the form
/// the TOSCA template expects: `["30000", "30001"]`.
pub fn quoted_run_list(value: &Value) -> String {
    let elements: Vec<String> = match value {
        Value::Array(items) => items.iter().map(quoted).collect(),
        single => vec![quoted(single)],
    };
    format!("[{}]", elements.join(", "))
}

/// Render a run list as a bracketed literal, wrapping a scalar in a
/// singleton list.
pub fn bracketed_runs(value: &Value) -> String {
    match value {
        Value::Array(_) => python_literal(value),
        single => format!("[{}]", bare_text(single)),
    }
}
