//! Reduction-script acquisition and customization.
//!
//! For a given instrument this crate retrieves the canonical script
//! template from the remote script repository (falling back to a local
//! cache), applies the instrument's parameter substitutions for a job,
//! and injects the runtime directives every generated script carries.
//! Persistence of the final text is handled by `auriga-db`'s
//! content-addressed store.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod pipeline;
pub mod resolver;
pub mod transforms;
pub mod value;

pub use error::ScriptError;
pub use value::ScriptValue;

#[cfg(test)]
pub(crate) mod test_support {
    use auriga_db::models::job::Job;

    /// Build an in-memory job for transform tests.
    pub fn job(instrument: &str, inputs: serde_json::Value) -> Job {
        Job {
            id: 1,
            instrument: instrument.to_string(),
            inputs,
            script_id: None,
            created_at: chrono::Utc::now(),
        }
    }
}
