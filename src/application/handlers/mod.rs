//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod disagreement;

pub use disagreement::{RunDisagreementCommand, RunDisagreementHandler};
