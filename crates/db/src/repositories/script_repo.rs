//! Repository for the `scripts` table.

use auriga_core::types::DbId;
use sqlx::PgPool;

use crate::models::script::Script;

/// Column list for `scripts` SELECT queries.
const COLUMNS: &str = "id, script, revision, script_hash, created_at";

/// Provides read and insert operations for persisted scripts.
///
/// Scripts are immutable once created; there is deliberately no
/// update or delete here.
pub struct ScriptRepo;

impl ScriptRepo {
    /// Find a script by its content hash.
    pub async fn find_by_hash(pool: &PgPool, hash: &str) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE script_hash = $1");
        sqlx::query_as::<_, Script>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new script row.
    ///
    /// Fails with a unique-constraint violation (23505) when another
    /// caller already persisted the same hash; callers are expected to
    /// re-read in that case (see [`crate::store`]).
    pub async fn insert(
        pool: &PgPool,
        text: &str,
        revision: Option<&str>,
        hash: &str,
    ) -> Result<Script, sqlx::Error> {
        let query = format!(
            "INSERT INTO scripts (script, revision, script_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Script>(&query)
            .bind(text)
            .bind(revision)
            .bind(hash)
            .fetch_one(pool)
            .await
    }

    /// Find a script by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Script>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scripts WHERE id = $1");
        sqlx::query_as::<_, Script>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
