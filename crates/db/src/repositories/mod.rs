//! Repositories: thin SQL access over `PgPool`.

pub mod job_repo;
pub mod script_repo;

pub use job_repo::JobRepo;
pub use script_repo::ScriptRepo;
