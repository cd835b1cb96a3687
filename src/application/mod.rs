//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates with ports.

pub mod handlers;

pub use handlers::{RunDisagreementCommand, RunDisagreementHandler};
