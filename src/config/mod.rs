//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONTRARIAN` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use contrarian::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod error;
mod server;

pub use ai::{AiConfig, OPENAI_API_KEY_ENV};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Every field has a default, so an empty environment yields a working
/// mock-mode server on port 8080.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CONTRARIAN` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `OPENAI_API_KEY` when no prefixed key is set
    ///
    /// # Environment Variable Format
    ///
    /// - `CONTRARIAN__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CONTRARIAN__AI__MODEL=gpt-4o` -> `ai.model = gpt-4o`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONTRARIAN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai = config
            .ai
            .with_fallback_key(std::env::var(OPENAI_API_KEY_ENV).ok());

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;

        let ai = self.ai.worst_case_duration();
        let server = self.server.request_timeout();
        if ai >= server {
            return Err(ValidationError::AiBudgetExceedsRequestTimeout {
                ai_secs: ai.as_secs(),
                server_secs: server.as_secs(),
            });
        }
        Ok(())
    }

    /// Budget for the live model call. Validation keeps it below the HTTP
    /// request timeout, so a slow provider falls back to templates instead
    /// of the request timing out.
    pub fn live_timeout(&self) -> Duration {
        self.ai.worst_case_duration()
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
