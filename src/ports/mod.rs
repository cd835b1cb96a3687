//! Ports - Interfaces between the application core and the outside world.
//!
//! - `ai_provider` - hosted language model used for live counterarguments

mod ai_provider;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
