//! Store traits at the collaborator boundary.
//!
//! The job-creation orchestrator is written against [`ScriptStore`]
//! and [`JobStore`] rather than `PgPool` directly, so the
//! find-or-create contract can be exercised without a database. The
//! Postgres implementations delegate to the repositories.

use async_trait::async_trait;
use auriga_core::hashing::sha256_hex;
use auriga_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::Job;
use crate::models::script::Script;
use crate::repositories::{JobRepo, ScriptRepo};

/// Errors from the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert collided with an existing row for the same content
    /// hash. Callers must re-read, never fail.
    #[error("Script already exists for this content hash")]
    Duplicate,

    /// Any other backing-store failure.
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // PostgreSQL unique constraint violation: error code 23505.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return StoreError::Duplicate;
            }
        }
        StoreError::Backend(err.to_string())
    }
}

/// Content-addressed script persistence.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Look up a script by its content hash.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<Script>, StoreError>;

    /// Persist a new script row. Fails with [`StoreError::Duplicate`]
    /// when the hash already exists.
    async fn create(
        &self,
        text: &str,
        revision: Option<&str>,
        hash: &str,
    ) -> Result<Script, StoreError>;

    /// Find-or-create keyed on the content hash.
    ///
    /// An existing entity is returned unchanged even when `revision`
    /// differs from the stored one: content identity, not provenance,
    /// determines dedup. A duplicate-insert race resolves to the
    /// winner's row.
    async fn store_or_reuse(
        &self,
        text: &str,
        revision: Option<&str>,
    ) -> Result<Script, StoreError> {
        let hash = sha256_hex(text.as_bytes());
        if let Some(existing) = self.find_by_hash(&hash).await? {
            tracing::debug!(script_id = existing.id, "Reusing existing script entity");
            return Ok(existing);
        }
        match self.create(text, revision, &hash).await {
            Ok(script) => Ok(script),
            Err(StoreError::Duplicate) => {
                // A concurrent caller won the insert; their row is ours.
                self.find_by_hash(&hash).await?.ok_or_else(|| {
                    StoreError::Backend(
                        "Script vanished after duplicate-hash insert".to_string(),
                    )
                })
            }
            Err(err) => Err(err),
        }
    }
}

/// Narrow job persistence operations.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Find a job by ID.
    async fn find_job(&self, id: DbId) -> Result<Option<Job>, StoreError>;

    /// Attach a script reference to a job. Returns `false` when the
    /// job does not exist.
    async fn attach_script(&self, job_id: DbId, script_id: DbId) -> Result<bool, StoreError>;
}

/// Postgres-backed [`ScriptStore`].
#[derive(Clone)]
pub struct PgScriptStore {
    pool: PgPool,
}

impl PgScriptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScriptStore for PgScriptStore {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<Script>, StoreError> {
        Ok(ScriptRepo::find_by_hash(&self.pool, hash).await?)
    }

    async fn create(
        &self,
        text: &str,
        revision: Option<&str>,
        hash: &str,
    ) -> Result<Script, StoreError> {
        Ok(ScriptRepo::insert(&self.pool, text, revision, hash).await?)
    }
}

/// Postgres-backed [`JobStore`].
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find_job(&self, id: DbId) -> Result<Option<Job>, StoreError> {
        Ok(JobRepo::find_by_id(&self.pool, id).await?)
    }

    async fn attach_script(&self, job_id: DbId, script_id: DbId) -> Result<bool, StoreError> {
        Ok(JobRepo::attach_script(&self.pool, job_id, script_id).await?)
    }
}
