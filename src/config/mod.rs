//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PARLEY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use parley::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! config.logging.init();
//! ```

mod ai;
mod engine;
mod error;
mod logging;

pub use ai::{AiConfig, DEFAULT_SYSTEM_PROMPT};
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use secrecy::Secret;
use serde::Deserialize;

use crate::domain::engine::Preference;

/// Conventional variable for the primary backend's key
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Conventional variable for the secondary backend's key
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// rule-based-only configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generative backend configuration (OpenAI/Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Response engine configuration (preference, rule-based path)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PARLEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to the bare `OPENAI_API_KEY` / `GEMINI_API_KEY` variables
    ///
    /// # Environment Variable Format
    ///
    /// - `PARLEY__ENGINE__PREFERENCE=gemini` -> `engine.preference = PreferSecondary`
    /// - `PARLEY__AI__TIMEOUT_SECS=20` -> `ai.timeout_secs = 20`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PARLEY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if config.ai.openai_api_key.is_none() {
            config.ai.openai_api_key = bare_key(OPENAI_KEY_VAR);
        }
        if config.ai.gemini_api_key.is_none() {
            config.ai.gemini_api_key = bare_key(GEMINI_KEY_VAR);
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// The configured preference, or one derived from the credentials present.
    pub fn effective_preference(&self) -> Preference {
        self.engine.preference.unwrap_or_else(|| {
            Preference::from_credentials(self.ai.has_openai(), self.ai.has_gemini())
        })
    }
}

fn bare_key(var: &str) -> Option<Secret<String>> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(Secret::new)
}
