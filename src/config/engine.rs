//! Response engine configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::engine::Preference;

/// Response engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Backend preference; derived from available credentials when unset
    pub preference: Option<Preference>,

    /// Optional file of extra stopwords, one per line
    pub stopwords_path: Option<PathBuf>,

    /// Seed for the rule-based response picker
    pub rng_seed: Option<u64>,

    /// Exchanges sent to generative backends
    #[serde(default = "default_backend_history_window")]
    pub backend_history_window: usize,

    /// Exchanges inspected for follow-up cues
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend_history_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow(
                "backend_history_window",
            ));
        }
        if self.context_window == 0 {
            return Err(ValidationError::InvalidHistoryWindow("context_window"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preference: None,
            stopwords_path: None,
            rng_seed: None,
            backend_history_window: default_backend_history_window(),
            context_window: default_context_window(),
        }
    }
}

fn default_backend_history_window() -> usize {
    10
}

fn default_context_window() -> usize {
    3
}
