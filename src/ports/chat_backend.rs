//! Chat Backend Port - The capability every response source offers.
//!
//! The orchestrator only sees this interface: whether a backend came up at
//! startup, and a call that either yields text or a `BackendError` meaning
//! "try the next candidate".

use async_trait::async_trait;

use crate::domain::conversation::Exchange;
use crate::domain::engine::{BackendError, BackendKind};

/// A response source in the fallback chain.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Which slot of the chain this backend fills.
    fn kind(&self) -> BackendKind;

    /// True iff initialization succeeded; never re-checked after startup.
    fn is_available(&self) -> bool;

    /// Produce a reply to `user_input` given the caller's history.
    ///
    /// Implementations must not panic or leak failures of any other type;
    /// every failure is a `BackendError`.
    async fn respond(&self, user_input: &str, history: &[Exchange])
        -> Result<String, BackendError>;
}
