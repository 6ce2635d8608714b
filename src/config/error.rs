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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid backend timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Model name must not be empty: {0}")]
    EmptyModelName(&'static str),

    #[error("History window must be at least 1: {0}")]
    InvalidHistoryWindow(&'static str),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
