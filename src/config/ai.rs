//! Generative backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Default system prompt sent ahead of every generative conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Respond conversationally to the user's messages.";

/// Generative backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key (primary generative backend)
    pub openai_api_key: Option<Secret<String>>,

    /// Gemini API key (secondary generative backend)
    pub gemini_api_key: Option<Secret<String>>,

    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries inside a single adapter call
    #[serde(default)]
    pub max_retries: u32,

    /// Maximum tokens to generate per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// System prompt for generative backends
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI credentials are present
    pub fn has_openai(&self) -> bool {
        has_key(&self.openai_api_key)
    }

    /// Check if Gemini credentials are present
    pub fn has_gemini(&self) -> bool {
        has_key(&self.gemini_api_key)
    }

    /// Validate generative backend configuration.
    ///
    /// Missing credentials are not an error: the affected backend is simply
    /// unavailable and the rule-based path still answers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.openai_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName("openai_model"));
        }
        if self.gemini_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName("gemini_model"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            gemini_api_key: None,
            openai_model: default_openai_model(),
            gemini_model: default_gemini_model(),
            openai_base_url: default_openai_base_url(),
            gemini_base_url: default_gemini_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn has_key(key: &Option<Secret<String>>) -> bool {
    key.as_ref()
        .is_some_and(|k| !k.expose_secret().trim().is_empty())
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    500
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_has_provider_checks() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("sk-xxx".to_string())),
            gemini_api_key: Some(Secret::new("   ".to_string())),
            ..Default::default()
        };
        assert!(config.has_openai());
        assert!(!config.has_gemini());
    }

    #[test]
    fn test_validation_without_keys_is_ok() {
        let config = AiConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));

        let config = AiConfig {
            timeout_secs: 301,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let config = AiConfig {
            gemini_model: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyModelName("gemini_model"))
        );
    }
}
