//! Job script orchestration.

pub mod orchestrator;
