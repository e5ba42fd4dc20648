//! Repository for the `jobs` table.
//!
//! The job schema is owned by the wider platform; only the narrow
//! operations the script pipeline needs live here.

use auriga_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::Job;

const COLUMNS: &str = "id, instrument, inputs, script_id, created_at";

/// Narrow job-store operations.
pub struct JobRepo;

impl JobRepo {
    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Attach a stored script reference to a job.
    ///
    /// Returns `false` when the job does not exist.
    pub async fn attach_script(
        pool: &PgPool,
        job_id: DbId,
        script_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = sqlx::query("UPDATE jobs SET script_id = $2 WHERE id = $1")
            .bind(job_id)
            .bind(script_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }
}
