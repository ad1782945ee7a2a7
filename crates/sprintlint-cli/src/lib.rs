//! Sprintlint checks and reporting.
//!
//! The binary lives in `main.rs`; the check registry and report formatting
//! are exposed as a library so integration tests can run a full check pass
//! against an in-memory transport.

pub mod checks;
pub mod report;
