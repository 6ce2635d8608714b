//! Engine error taxonomy.
//!
//! - `BackendError` - per-call failure of one backend; the orchestrator moves
//!   on to the next candidate and never shows it to the end user
//! - `InitializationWarning` - something failed to come up at startup; it
//!   narrows the available backends or degrades normalization but is not fatal

use thiserror::Error;

use super::backend::BackendKind;

/// A single backend call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend was never initialized (no credentials or client failure).
    #[error("{backend} backend is not configured")]
    NotConfigured { backend: BackendKind },

    /// The call did not finish within the per-call timeout.
    #[error("{backend} backend timed out after {timeout_secs}s")]
    Timeout {
        backend: BackendKind,
        timeout_secs: u64,
    },

    /// Transport, authentication, or malformed-response failure.
    #[error("{backend} backend failed: {cause}")]
    Provider { backend: BackendKind, cause: String },

    /// The backend answered with no text.
    #[error("{backend} backend returned an empty reply")]
    EmptyReply { backend: BackendKind },
}

impl BackendError {
    /// Creates a provider failure with a human-readable cause.
    pub fn provider(backend: BackendKind, cause: impl Into<String>) -> Self {
        Self::Provider {
            backend,
            cause: cause.into(),
        }
    }

    /// Returns the backend that failed.
    pub fn backend(&self) -> BackendKind {
        match self {
            Self::NotConfigured { backend }
            | Self::Timeout { backend, .. }
            | Self::Provider { backend, .. }
            | Self::EmptyReply { backend } => *backend,
        }
    }
}

/// A startup-time degradation, recorded once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitializationWarning {
    /// A generative backend could not be initialized.
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable { backend: BackendKind, reason: String },

    /// Linguistic resources failed to load; normalization is lowercase-only.
    #[error("linguistic resources unavailable, normalizing by lowercasing only: {reason}")]
    LinguisticResources { reason: String },

    /// The pattern table failed to compile; the rule-based path is disabled.
    #[error("rule table failed to compile: {reason}")]
    RuleTable { reason: String },
}

impl InitializationWarning {
    /// Creates a backend-unavailable warning.
    pub fn backend_unavailable(backend: BackendKind, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend,
            reason: reason.into(),
        }
    }
}
