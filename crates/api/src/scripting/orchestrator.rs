//! Central script orchestrator service.
//!
//! Coordinates script resolution, per-job transformation,
//! content-addressed persistence, and job attachment. Held in
//! [`AppState`](crate::state::AppState) as an `Arc<ScriptOrchestrator>`.

use std::sync::Arc;

use auriga_core::error::CoreError;
use auriga_core::types::DbId;
use auriga_db::models::script::Script;
use auriga_db::store::{JobStore, ScriptStore};
use auriga_scripts::pipeline::apply_transforms;
use auriga_scripts::resolver::ScriptResolver;

use crate::error::{AppError, AppResult};

/// Orchestrates the full script lifecycle for a job:
///
/// 1. Load the job.
/// 2. Resolve the instrument's template (latest or a pinned revision).
/// 3. Apply the instrument transform plus the common transform chain.
/// 4. Persist the final text, reusing any entity with the same hash.
/// 5. Attach the script entity to the job.
/// 6. Refresh the local cache from the pristine template, off the
///    request path.
pub struct ScriptOrchestrator {
    resolver: Arc<ScriptResolver>,
    scripts: Arc<dyn ScriptStore>,
    jobs: Arc<dyn JobStore>,
    token: Option<String>,
}

impl ScriptOrchestrator {
    pub fn new(
        resolver: Arc<ScriptResolver>,
        scripts: Arc<dyn ScriptStore>,
        jobs: Arc<dyn JobStore>,
        token: Option<String>,
    ) -> Self {
        Self {
            resolver,
            scripts,
            jobs,
            token,
        }
    }

    /// Produce, persist, and attach the customized script for a job.
    ///
    /// `revision` pins the template to an exact historical revision;
    /// `None` resolves the canonical current one. Returns the stored
    /// script entity, which may predate this call: identical final
    /// text always maps to the same entity.
    pub async fn script_for_job(
        &self,
        job_id: DbId,
        revision: Option<&str>,
    ) -> AppResult<Script> {
        let job = self
            .jobs
            .find_job(job_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Job",
                id: job_id,
            }))?;

        let mut script = match revision {
            Some(rev) => self.resolver.resolve_pinned(&job.instrument, rev).await?,
            None => self.resolver.resolve_latest(&job.instrument).await?,
        };
        apply_transforms(&mut script, &job, self.token.as_deref())?;

        let entity = self
            .scripts
            .store_or_reuse(&script.text, script.revision())
            .await?;
        if !self.jobs.attach_script(job.id, entity.id).await? {
            // The job row vanished between the lookup and the update.
            tracing::warn!(job_id, script_id = entity.id, "Job disappeared before attach");
        }
        tracing::info!(
            job_id,
            script_id = entity.id,
            script_hash = %entity.script_hash,
            "Script attached to job"
        );

        // Cache refresh happens off the request path; failures only
        // degrade future fallbacks and are logged by write_back.
        let resolver = Arc::clone(&self.resolver);
        let instrument = job.instrument.clone();
        tokio::spawn(async move {
            if let Err(err) = resolver.write_back(&script, &instrument).await {
                tracing::warn!(instrument = %instrument, error = %err, "Cache write-back failed");
            }
        });

        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use auriga_db::models::job::Job;
    use auriga_db::store::StoreError;
    use auriga_scripts::cache::LocalScriptCache;
    use auriga_scripts::fetcher::ScriptFetcher;
    use auriga_scripts::ScriptError;
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct MemScriptStore {
        rows: Mutex<Vec<Script>>,
    }

    #[async_trait]
    impl ScriptStore for MemScriptStore {
        async fn find_by_hash(&self, hash: &str) -> Result<Option<Script>, StoreError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|s| s.script_hash == hash).cloned())
        }

        async fn create(
            &self,
            text: &str,
            revision: Option<&str>,
            hash: &str,
        ) -> Result<Script, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|s| s.script_hash == hash) {
                return Err(StoreError::Duplicate);
            }
            let script = Script {
                id: rows.len() as DbId + 1,
                script: text.to_string(),
                revision: revision.map(str::to_string),
                script_hash: hash.to_string(),
                created_at: chrono::Utc::now(),
            };
            rows.push(script.clone());
            Ok(script)
        }
    }

    #[derive(Default)]
    struct MemJobStore {
        jobs: Mutex<Vec<Job>>,
    }

    impl MemJobStore {
        fn with_job(instrument: &str, inputs: serde_json::Value) -> Self {
            let store = Self::default();
            store.jobs.lock().unwrap().push(Job {
                id: 1,
                instrument: instrument.to_string(),
                inputs,
                script_id: None,
                created_at: chrono::Utc::now(),
            });
            store
        }

        fn attached_script(&self, job_id: DbId) -> Option<DbId> {
            let jobs = self.jobs.lock().unwrap();
            jobs.iter().find(|j| j.id == job_id)?.script_id
        }
    }

    #[async_trait]
    impl JobStore for MemJobStore {
        async fn find_job(&self, id: DbId) -> Result<Option<Job>, StoreError> {
            let jobs = self.jobs.lock().unwrap();
            Ok(jobs.iter().find(|j| j.id == id).cloned())
        }

        async fn attach_script(&self, job_id: DbId, script_id: DbId) -> Result<bool, StoreError> {
            let mut jobs = self.jobs.lock().unwrap();
            match jobs.iter_mut().find(|j| j.id == job_id) {
                Some(job) => {
                    job.script_id = Some(script_id);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    /// A resolver whose remote is a closed local port; only the seeded
    /// cache can satisfy resolution.
    async fn offline_resolver(dir: &tempfile::TempDir, instrument: &str, text: &str) -> Arc<ScriptResolver> {
        LocalScriptCache::new(dir.path().to_path_buf())
            .write(instrument, text, Some("abc123"))
            .await
            .unwrap();
        Arc::new(ScriptResolver::new(
            ScriptFetcher::new(
                "http://127.0.0.1:9".to_string(),
                "http://127.0.0.1:9".to_string(),
            ),
            LocalScriptCache::new(dir.path().to_path_buf()),
        ))
    }

    #[tokio::test]
    async fn attaches_a_transformed_script_to_the_job() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = offline_resolver(&dir, "test", "x = 4\noutput = [str(x)]\n").await;
        let scripts = Arc::new(MemScriptStore::default());
        let jobs = Arc::new(MemJobStore::with_job("test", json!({})));

        let orchestrator = ScriptOrchestrator::new(
            resolver,
            Arc::clone(&scripts) as Arc<dyn ScriptStore>,
            Arc::clone(&jobs) as Arc<dyn JobStore>,
            None,
        );
        let entity = orchestrator.script_for_job(1, None).await.unwrap();

        assert!(entity.script.contains("x = 22"));
        assert!(entity.script.contains("json.dumps"));
        assert_eq!(entity.revision.as_deref(), Some("abc123"));
        assert_eq!(jobs.attached_script(1), Some(entity.id));
    }

    #[tokio::test]
    async fn identical_jobs_share_one_script_entity() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = offline_resolver(&dir, "test", "x = 4\n").await;
        let scripts = Arc::new(MemScriptStore::default());
        let jobs = Arc::new(MemJobStore::with_job("test", json!({})));
        jobs.jobs.lock().unwrap().push(Job {
            id: 2,
            instrument: "test".to_string(),
            inputs: json!({}),
            script_id: None,
            created_at: chrono::Utc::now(),
        });

        let orchestrator = ScriptOrchestrator::new(
            resolver,
            Arc::clone(&scripts) as Arc<dyn ScriptStore>,
            Arc::clone(&jobs) as Arc<dyn JobStore>,
            None,
        );
        let first = orchestrator.script_for_job(1, None).await.unwrap();
        let second = orchestrator.script_for_job(2, None).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(scripts.rows.lock().unwrap().len(), 1);
        assert_eq!(jobs.attached_script(2), Some(first.id));
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = offline_resolver(&dir, "test", "x = 4\n").await;
        let orchestrator = ScriptOrchestrator::new(
            resolver,
            Arc::new(MemScriptStore::default()),
            Arc::new(MemJobStore::default()),
            None,
        );
        assert_matches!(
            orchestrator.script_for_job(42, None).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Job", id: 42 }))
        );
    }

    #[tokio::test]
    async fn unregistered_instrument_stores_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = offline_resolver(&dir, "novel", "x = 4\n").await;
        let scripts = Arc::new(MemScriptStore::default());
        let orchestrator = ScriptOrchestrator::new(
            resolver,
            Arc::clone(&scripts) as Arc<dyn ScriptStore>,
            Arc::new(MemJobStore::with_job("novel", json!({}))),
            None,
        );
        assert_matches!(
            orchestrator.script_for_job(1, None).await,
            Err(AppError::Script(ScriptError::MissingTransform { .. }))
        );
        assert!(scripts.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn pinned_revision_with_unreachable_remote_fails_upstream() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = offline_resolver(&dir, "test", "x = 4\n").await;
        let orchestrator = ScriptOrchestrator::new(
            resolver,
            Arc::new(MemScriptStore::default()),
            Arc::new(MemJobStore::with_job("test", json!({}))),
            None,
        );
        // Pinned resolution never falls back to the cache.
        assert_matches!(
            orchestrator.script_for_job(1, Some("abc123")).await,
            Err(AppError::Script(ScriptError::Request(_)))
        );
    }

    #[tokio::test]
    async fn token_flows_into_the_stored_script() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = offline_resolver(&dir, "test", "x = 4\n").await;
        let scripts = Arc::new(MemScriptStore::default());
        let orchestrator = ScriptOrchestrator::new(
            resolver,
            Arc::clone(&scripts) as Arc<dyn ScriptStore>,
            Arc::new(MemJobStore::with_job("test", json!({}))),
            Some("tok-123".to_string()),
        );
        let entity = orchestrator.script_for_job(1, None).await.unwrap();
        assert!(entity
            .script
            .contains("ConfigService.Instance()[\"network.github.api_token\"] = \"tok-123\""));
    }
}
