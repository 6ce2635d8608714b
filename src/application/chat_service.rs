//! Caller-facing chat service.
//!
//! Holds the current orchestrator behind an async lock. Responding clones
//! the `Arc` and releases the lock before awaiting any backend, so a
//! preference change never affects a request already in flight and never
//! waits on one.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::orchestrator::ResponseOrchestrator;
use crate::config::AppConfig;
use crate::domain::conversation::Exchange;
use crate::domain::engine::{BackendKind, BackendSet, Preference, Reply};

/// Snapshot of the active preference and backend availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    /// Active preference.
    pub preference: Preference,
    /// Backends that initialized successfully.
    pub available: BackendSet,
    /// True if the primary backend is usable.
    pub primary_available: bool,
    /// True if the secondary backend is usable.
    pub secondary_available: bool,
    /// True if the rule-based path is usable.
    pub rule_based_available: bool,
}

impl ModelStatus {
    fn of(orchestrator: &ResponseOrchestrator) -> Self {
        let available = orchestrator.available_backends().clone();
        Self {
            preference: orchestrator.preference(),
            primary_available: available.contains(BackendKind::Primary),
            secondary_available: available.contains(BackendKind::Secondary),
            rule_based_available: available.contains(BackendKind::RuleBased),
            available,
        }
    }
}

/// Shared entry point for answering user input.
#[derive(Debug)]
pub struct ChatService {
    current: RwLock<Arc<ResponseOrchestrator>>,
}

impl ChatService {
    /// Wraps an orchestrator.
    pub fn new(orchestrator: ResponseOrchestrator) -> Self {
        Self {
            current: RwLock::new(Arc::new(orchestrator)),
        }
    }

    /// Builds the orchestrator from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ResponseOrchestrator::from_config(config))
    }

    /// Returns the orchestrator current at the time of the call.
    pub async fn orchestrator(&self) -> Arc<ResponseOrchestrator> {
        Arc::clone(&*self.current.read().await)
    }

    /// Answers one input with the orchestrator current at call time.
    pub async fn respond(&self, user_input: &str, history: &[Exchange]) -> String {
        self.orchestrator().await.respond(user_input, history).await
    }

    /// Like `respond`, also reporting which path answered.
    pub async fn respond_detailed(&self, user_input: &str, history: &[Exchange]) -> Reply {
        self.orchestrator()
            .await
            .respond_detailed(user_input, history)
            .await
    }

    /// Replaces the orchestrator with one using `preference`.
    ///
    /// Backends and availability are kept; requests already running finish
    /// on the previous orchestrator.
    pub async fn set_preference(&self, preference: Preference) -> ModelStatus {
        let mut current = self.current.write().await;
        let next = Arc::new(current.with_preference(preference));
        tracing::info!(preference = %preference, "Preference changed");
        *current = next;
        ModelStatus::of(&current)
    }

    /// Reports the active preference and availability.
    pub async fn model_status(&self) -> ModelStatus {
        ModelStatus::of(&*self.orchestrator().await)
    }
}
