//! Shared domain primitives for the auriga workspace.
//!
//! Holds the pieces every other crate needs: ID and timestamp aliases,
//! the domain error enum, the content-hash helper, and the
//! instrument-name validation that guards all filesystem and remote
//! access.

pub mod error;
pub mod hashing;
pub mod instrument;
pub mod types;
