//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("AI max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("AI worst case of {ai_secs}s must stay below the {server_secs}s request timeout")]
    AiBudgetExceedsRequestTimeout { ai_secs: u64, server_secs: u64 },
}
