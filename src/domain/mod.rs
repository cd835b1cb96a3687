//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `disagreement` - Pure services that decode, challenge, and de-risk a decision

pub mod disagreement;
pub mod foundation;
