//! Remote script repository client.
//!
//! Fetches reduction script templates over HTTPS from the
//! version-controlled script repository, either at the current main
//! revision or pinned to a specific one, and resolves the latest
//! revision identifier for change-tracking.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ScriptError;

/// Raw-content base URL of the production script repository.
pub const DEFAULT_RAW_BASE_URL: &str =
    "https://raw.githubusercontent.com/auriga-sci/reduction-scripts";

/// Repository API base URL used to resolve the latest revision.
pub const DEFAULT_API_BASE_URL: &str =
    "https://api.github.com/repos/auriga-sci/reduction-scripts";

/// Upper bound on every remote call; past this the fetch is treated as
/// a remote failure and resolution falls through to the cache.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Shape of the repository API's commit response; only the revision
/// identifier is read.
#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
}

/// HTTP client for the remote script repository.
pub struct ScriptFetcher {
    client: reqwest::Client,
    raw_base_url: String,
    api_base_url: String,
}

impl Default for ScriptFetcher {
    fn default() -> Self {
        Self::new(
            DEFAULT_RAW_BASE_URL.to_string(),
            DEFAULT_API_BASE_URL.to_string(),
        )
    }
}

/// Sent with every request; the repository API rejects requests
/// without a `User-Agent` header.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

impl ScriptFetcher {
    /// Create a fetcher against the given repository base URLs.
    pub fn new(raw_base_url: String, api_base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("HTTP client construction failed");
        Self {
            client,
            raw_base_url,
            api_base_url,
        }
    }

    /// Fetch the canonical current-revision script for an instrument.
    ///
    /// Any non-200 status is a generic fetch failure; the caller
    /// decides whether to fall back to the local cache.
    pub async fn fetch_latest(&self, instrument: &str) -> Result<String, ScriptError> {
        tracing::info!(instrument, "Attempting to get latest script from remote");
        let url = format!(
            "{}/main/{}/reduce.py",
            self.raw_base_url,
            instrument.to_uppercase()
        );
        let response = self
            .client
            .get(&url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::warn!(
                instrument,
                status = response.status().as_u16(),
                "Could not get script from remote"
            );
            return Err(ScriptError::RemoteStatus {
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    /// Fetch an instrument's script at an exact historical revision.
    ///
    /// A 404 is its own condition (the revision does not exist),
    /// distinct from a generic fetch failure.
    pub async fn fetch_revision(
        &self,
        instrument: &str,
        revision: &str,
    ) -> Result<String, ScriptError> {
        tracing::info!(instrument, revision, "Fetching pinned script revision");
        let url = format!(
            "{}/{}/{}/reduce.py",
            self.raw_base_url,
            revision,
            instrument.to_uppercase()
        );
        let response = self
            .client
            .get(&url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;
        match response.status().as_u16() {
            200 => Ok(response.text().await?),
            404 => Err(ScriptError::RevisionNotFound {
                instrument: instrument.to_string(),
                revision: revision.to_string(),
            }),
            status => Err(ScriptError::RemoteStatus { status }),
        }
    }

    /// Resolve the latest revision identifier of the script repository.
    ///
    /// Best-effort: any failure is logged and yields `None`, since a
    /// script without a confirmed revision is still usable.
    pub async fn latest_revision(&self) -> Option<String> {
        tracing::info!("Getting latest revision of the script repository");
        let url = format!("{}/commits/HEAD", self.api_base_url);
        let result = async {
            let response = self
                .client
                .get(&url)
                .timeout(FETCH_TIMEOUT)
                .send()
                .await?;
            response.json::<CommitResponse>().await
        }
        .await;
        match result {
            Ok(commit) => Some(commit.sha),
            Err(err) => {
                tracing::warn!(error = %err, "Could not get latest script repository revision");
                None
            }
        }
    }
}
