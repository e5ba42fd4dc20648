//! HTTP handler implementations, grouped by resource.

pub mod jobs;
pub mod scripts;
