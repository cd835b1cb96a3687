//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI chat completions and a mock provider
//! - `http` - Axum routes serving the HTML demo and JSON API

pub mod ai;
pub mod http;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use http::{build_router, DisagreementAppState};
