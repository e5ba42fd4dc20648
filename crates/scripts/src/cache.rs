//! Local script cache.
//!
//! One `<instrument>.py` file per instrument under a fixed directory,
//! read as the fallback source when the remote repository is
//! unreachable and refreshed after every confirmed canonical fetch. A
//! `<instrument>.rev` sidecar records the revision the cached copy
//! came from, when one was confirmed.

use std::path::PathBuf;

use auriga_core::instrument::validate_instrument_name;

use crate::error::ScriptError;

/// Filesystem cache of instrument script templates.
pub struct LocalScriptCache {
    dir: PathBuf,
}

impl LocalScriptCache {
    /// Create a cache rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Read the cached script and recorded revision for an instrument.
    ///
    /// Returns `Ok(None)` on a cache miss. The instrument name is
    /// validated before any path is built.
    pub async fn read(
        &self,
        instrument: &str,
    ) -> Result<Option<(String, Option<String>)>, ScriptError> {
        validate_instrument_name(instrument)?;
        let path = self.dir.join(format!("{instrument}.py"));
        tracing::info!(instrument, "Attempting to get script locally");
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let revision = self.read_revision(instrument).await;
        Ok(Some((text, revision)))
    }

    /// Overwrite the cached script for an instrument, recording the
    /// revision when known and clearing any stale sidecar otherwise.
    pub async fn write(
        &self,
        instrument: &str,
        text: &str,
        revision: Option<&str>,
    ) -> Result<(), ScriptError> {
        validate_instrument_name(instrument)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{instrument}.py"));
        tokio::fs::write(&path, text).await?;

        let rev_path = self.revision_path(instrument);
        match revision {
            Some(revision) => tokio::fs::write(&rev_path, revision).await?,
            None => {
                // A stale sidecar must not claim a revision for text it
                // does not describe.
                if let Err(err) = tokio::fs::remove_file(&rev_path).await {
                    if err.kind() != std::io::ErrorKind::NotFound {
                        return Err(err.into());
                    }
                }
            }
        }
        tracing::info!(instrument, "Updated local script cache");
        Ok(())
    }

    async fn read_revision(&self, instrument: &str) -> Option<String> {
        let text = tokio::fs::read_to_string(self.revision_path(instrument))
            .await
            .ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn revision_path(&self, instrument: &str) -> PathBuf {
        self.dir.join(format!("{instrument}.rev"))
    }
}
