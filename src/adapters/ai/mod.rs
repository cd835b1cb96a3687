//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat completions (GPT-4o, GPT-4, GPT-3.5)
//! - `MockAIProvider` - Configurable test double

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError};
pub use openai_provider::{
    OpenAIConfig, OpenAIProvider, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
