use auriga_core::error::CoreError;

/// Errors from script acquisition and transformation.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Remote and local cache are both exhausted; the instrument
    /// likely has no configured script at all.
    #[error("Unable to load any script for instrument {instrument}")]
    Unavailable { instrument: String },

    /// A pinned fetch named a revision that does not exist.
    #[error("No script for instrument {instrument} at revision {revision}")]
    RevisionNotFound { instrument: String, revision: String },

    /// The instrument has no registered transform. A configuration
    /// error, not a transient fault; never retried.
    #[error("No transform configured for instrument {instrument}")]
    MissingTransform { instrument: String },

    /// A marker present in the template has no corresponding job
    /// input; the job request was malformed.
    #[error("Job inputs are missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// The remote repository answered with a non-success status.
    #[error("Remote script repository returned status {status}")]
    RemoteStatus { status: u16 },

    /// The remote request itself failed (network, DNS, TLS, timeout).
    #[error("Remote script request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Local script cache I/O failure.
    #[error("Script cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Write-back was asked to cache an empty script; treated as a
    /// failure of the whole acquisition so a good prior cache entry is
    /// never clobbered by a placeholder.
    #[error("Failed to acquire script for instrument {instrument} from remote and locally")]
    EmptyScript { instrument: String },

    /// Domain validation failure (unsafe instrument name).
    #[error(transparent)]
    Core(#[from] CoreError),
}
