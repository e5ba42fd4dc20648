//! Token redaction for scripts served over the API.

/// Markers that identify a line as carrying credentials. GitHub
/// personal access tokens start with `ghp_`, and the configuration
/// preamble assigns the token through this config key.
const TOKEN_MARKERS: &[&str] = &["ghp_", "network.github.api_token"];

/// Drop every line that carries an API token before the script leaves
/// the service. Whole lines go, not just the secret, so no partial
/// assignment survives.
pub fn filter_script_for_tokens(script: &str) -> String {
    script
        .split('\n')
        .filter(|line| !TOKEN_MARKERS.iter().any(|marker| line.contains(marker)))
        .collect::<Vec<&str>>()
        .join("\n")
}
