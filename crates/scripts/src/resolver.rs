//! Script resolution: remote first, local cache fallback.

use auriga_core::instrument::validate_instrument_name;

use crate::cache::LocalScriptCache;
use crate::error::ScriptError;
use crate::fetcher::ScriptFetcher;
use crate::value::ScriptValue;

/// Orchestrates the remote fetcher and local cache to produce a
/// [`ScriptValue`] for an instrument.
pub struct ScriptResolver {
    fetcher: ScriptFetcher,
    cache: LocalScriptCache,
}

impl ScriptResolver {
    pub fn new(fetcher: ScriptFetcher, cache: LocalScriptCache) -> Self {
        Self { fetcher, cache }
    }

    /// Resolve the instrument's canonical current script.
    ///
    /// Remote first; on any remote failure fall back to the local
    /// cache. Both exhausted means the instrument likely has no
    /// configured script at all, not a transient outage.
    pub async fn resolve_latest(&self, instrument: &str) -> Result<ScriptValue, ScriptError> {
        validate_instrument_name(instrument)?;
        match self.fetcher.fetch_latest(instrument).await {
            Ok(text) => {
                let revision = self.fetcher.latest_revision().await;
                tracing::info!(instrument, revision = ?revision, "Obtained canonical script");
                Ok(ScriptValue::canonical(text, revision))
            }
            Err(err) => {
                tracing::warn!(
                    instrument,
                    error = %err,
                    "Remote fetch failed, falling back to local cache"
                );
                match self.cache.read(instrument).await? {
                    Some((text, revision)) => Ok(ScriptValue::cached(text, revision)),
                    None => Err(ScriptError::Unavailable {
                        instrument: instrument.to_string(),
                    }),
                }
            }
        }
    }

    /// Resolve an exact historical revision from the remote repository.
    ///
    /// No cache fallback: the cache only ever holds the current
    /// canonical copy, which is not the revision being requested.
    pub async fn resolve_pinned(
        &self,
        instrument: &str,
        revision: &str,
    ) -> Result<ScriptValue, ScriptError> {
        validate_instrument_name(instrument)?;
        let text = self.fetcher.fetch_revision(instrument, revision).await?;
        Ok(ScriptValue::pinned(text, revision.to_string()))
    }

    /// Refresh the local cache from a resolved script.
    ///
    /// Only canonical scripts are written back, so a fallback read can
    /// never overwrite the cache with its own contents. An empty
    /// script is an acquisition failure: caching it would clobber a
    /// good prior entry with a placeholder. The pristine template is
    /// written, not the transformed text.
    pub async fn write_back(
        &self,
        script: &ScriptValue,
        instrument: &str,
    ) -> Result<(), ScriptError> {
        if script.original_text().is_empty() {
            tracing::warn!(instrument, "Unable to acquire any script for instrument");
            return Err(ScriptError::EmptyScript {
                instrument: instrument.to_string(),
            });
        }
        if !script.is_canonical() {
            tracing::debug!(instrument, "Skipping write-back of non-canonical script");
            return Ok(());
        }
        self.cache
            .write(instrument, script.original_text(), script.revision())
            .await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use auriga_core::error::CoreError;

    use super::*;

    /// A fetcher pointed at a closed local port: every remote call
    /// fails fast with a connection error, exercising the fallback
    /// path without touching the network.
    fn unreachable_fetcher() -> ScriptFetcher {
        ScriptFetcher::new(
            "http://127.0.0.1:9".to_string(),
            "http://127.0.0.1:9".to_string(),
        )
    }

    fn resolver(dir: &tempfile::TempDir) -> ScriptResolver {
        ScriptResolver::new(
            unreachable_fetcher(),
            LocalScriptCache::new(dir.path().to_path_buf()),
        )
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);
        LocalScriptCache::new(dir.path().to_path_buf())
            .write("tosca", "input_runs = []\n", Some("abc123"))
            .await
            .unwrap();

        let script = resolver.resolve_latest("tosca").await.unwrap();
        assert_eq!(script.text, "input_runs = []\n");
        assert_eq!(script.revision(), Some("abc123"));
        assert!(!script.is_canonical());
    }

    #[tokio::test]
    async fn both_sources_exhausted_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolver(&dir).resolve_latest("tosca").await;
        assert_matches!(result, Err(ScriptError::Unavailable { instrument }) if instrument == "tosca");
    }

    #[tokio::test]
    async fn pinned_resolution_never_reads_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);
        LocalScriptCache::new(dir.path().to_path_buf())
            .write("tosca", "cached\n", None)
            .await
            .unwrap();

        // Remote is unreachable and the cache must not be consulted.
        let result = resolver.resolve_pinned("tosca", "abc123").await;
        assert_matches!(result, Err(ScriptError::Request(_)));
    }

    #[tokio::test]
    async fn unsafe_instrument_rejected_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);
        assert_matches!(
            resolver.resolve_latest("../tosca").await,
            Err(ScriptError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            resolver.resolve_pinned("a\\b", "abc").await,
            Err(ScriptError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn write_back_persists_canonical_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);
        let script = ScriptValue::canonical("x = 1\n".to_string(), Some("abc".into()));
        resolver.write_back(&script, "mari").await.unwrap();

        let cached = LocalScriptCache::new(dir.path().to_path_buf())
            .read("mari")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.0, "x = 1\n");
        assert_eq!(cached.1.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn write_back_writes_pristine_text_not_transformed() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);
        let mut script = ScriptValue::canonical("x = 1\n".to_string(), None);
        script.text = "x = 2\n".to_string();
        resolver.write_back(&script, "mari").await.unwrap();

        let (text, _) = LocalScriptCache::new(dir.path().to_path_buf())
            .read("mari")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(text, "x = 1\n");
    }

    #[tokio::test]
    async fn write_back_skips_non_canonical_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);
        let script = ScriptValue::cached("x = 1\n".to_string(), None);
        resolver.write_back(&script, "mari").await.unwrap();
        assert!(LocalScriptCache::new(dir.path().to_path_buf())
            .read("mari")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn write_back_rejects_empty_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver(&dir);

        // Seed a good cache entry, then try to write back an empty
        // canonical script over it.
        LocalScriptCache::new(dir.path().to_path_buf())
            .write("mari", "good\n", None)
            .await
            .unwrap();
        let script = ScriptValue::canonical(String::new(), None);
        assert_matches!(
            resolver.write_back(&script, "mari").await,
            Err(ScriptError::EmptyScript { .. })
        );

        let (text, _) = LocalScriptCache::new(dir.path().to_path_buf())
            .read("mari")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(text, "good\n");
    }
}
