//! Entity models.

pub mod job;
pub mod script;
