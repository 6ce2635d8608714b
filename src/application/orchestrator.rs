//! Response orchestrator.
//!
//! Turns a preference into an ordered chain of candidates and walks it:
//! skip what is unavailable, try each available generative backend once,
//! and end at the rule-based path. Every input gets exactly one non-empty
//! reply; backend failures are logged and never surfaced.
//!
//! The orchestrator is immutable after construction. Changing preference
//! produces a new orchestrator sharing the same backends.

use std::fmt;
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::adapters::ai::{build_generative_backends, GenerativeBackend, OpenAIProvider};
use crate::config::AppConfig;
use crate::domain::conversation::Exchange;
use crate::domain::engine::{
    BackendKind, BackendSet, InitializationWarning, Preference, Reply, ReplySource,
};
use crate::domain::rules::{ContextTracker, Normalizer, ResponsePicker, RuleBasedResponder};
use crate::ports::ChatBackend;

/// Chooses and invokes backends for each input.
#[derive(Clone)]
pub struct ResponseOrchestrator {
    preference: Preference,
    primary: Arc<dyn ChatBackend>,
    secondary: Arc<dyn ChatBackend>,
    rule_based: Option<Arc<RuleBasedResponder>>,
    available: BackendSet,
    warnings: Arc<[InitializationWarning]>,
}

impl fmt::Debug for ResponseOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseOrchestrator")
            .field("preference", &self.preference)
            .field("available", &self.available)
            .field("warnings", &self.warnings.len())
            .finish()
    }
}

impl ResponseOrchestrator {
    /// Starts building an orchestrator from explicit parts.
    pub fn builder() -> ResponseOrchestratorBuilder {
        ResponseOrchestratorBuilder::default()
    }

    /// Builds both generative backends and the rule-based path from config.
    ///
    /// Never fails: anything that does not come up narrows the available
    /// backends and is recorded in `warnings()`.
    pub fn from_config(config: &AppConfig) -> Self {
        let generative = build_generative_backends(&config.ai, config.engine.backend_history_window);

        let mut builder = Self::builder()
            .preference(config.effective_preference())
            .primary(generative.primary)
            .secondary(generative.secondary)
            .warnings(generative.warnings);

        let (normalizer, normalizer_warning) =
            Normalizer::load(config.engine.stopwords_path.as_deref());
        if let Some(warning) = normalizer_warning {
            builder = builder.warning(warning);
        }

        match RuleBasedResponder::new(
            normalizer,
            ContextTracker::new(config.engine.context_window),
            ResponsePicker::from_seed(config.engine.rng_seed),
        ) {
            Ok(responder) => builder.rule_based(responder).build(),
            Err(warning) => builder.warning(warning).without_rule_based().build(),
        }
    }

    /// Returns the active preference.
    pub fn preference(&self) -> Preference {
        self.preference
    }

    /// Returns the backends that initialized successfully.
    pub fn available_backends(&self) -> &BackendSet {
        &self.available
    }

    /// Returns warnings recorded during construction.
    pub fn warnings(&self) -> &[InitializationWarning] {
        &self.warnings
    }

    /// Returns the candidate chain for the active preference.
    ///
    /// Candidates missing from `available_backends()` are skipped when
    /// responding.
    pub fn candidates(&self) -> &'static [BackendKind] {
        self.preference.candidates()
    }

    /// Returns an orchestrator with a different preference over the same
    /// backends and availability.
    pub fn with_preference(&self, preference: Preference) -> Self {
        Self {
            preference,
            ..self.clone()
        }
    }

    /// Produces the reply text for one input.
    pub async fn respond(&self, user_input: &str, history: &[Exchange]) -> String {
        self.respond_detailed(user_input, history).await.text
    }

    /// Produces one reply plus the path that produced it.
    pub async fn respond_detailed(&self, user_input: &str, history: &[Exchange]) -> Reply {
        let span = tracing::info_span!(
            "respond",
            request_id = %Uuid::new_v4(),
            preference = %self.preference,
        );
        self.walk_chain(user_input, history).instrument(span).await
    }

    async fn walk_chain(&self, user_input: &str, history: &[Exchange]) -> Reply {
        if user_input.trim().is_empty() {
            return Reply::empty_input();
        }

        for &kind in self.candidates() {
            if !self.available.contains(kind) {
                tracing::debug!(backend = %kind, "Skipping unavailable backend");
                continue;
            }

            match kind {
                BackendKind::RuleBased => {
                    if let Some(responder) = &self.rule_based {
                        tracing::debug!("Using rule-based path");
                        return responder.reply(user_input, history);
                    }
                }
                BackendKind::Primary | BackendKind::Secondary => {
                    let backend = self.generative(kind);
                    match backend.respond(user_input, history).await {
                        Ok(text) => {
                            tracing::debug!(backend = %kind, "Generative backend answered");
                            return Reply::new(text, ReplySource::Generative(kind));
                        }
                        Err(e) => {
                            tracing::warn!(backend = %kind, error = %e, "Backend failed, trying next");
                        }
                    }
                }
            }
        }

        tracing::error!(available = %self.available.describe(), "No backend could answer");
        Reply::no_backends()
    }

    fn generative(&self, kind: BackendKind) -> &Arc<dyn ChatBackend> {
        match kind {
            BackendKind::Secondary => &self.secondary,
            _ => &self.primary,
        }
    }
}

/// Builder for `ResponseOrchestrator`.
///
/// Unset generative backends are unavailable. The rule-based path is built
/// with default settings unless supplied or explicitly disabled. Without an
/// explicit preference, one is derived from which generative backends are
/// available.
#[derive(Default)]
pub struct ResponseOrchestratorBuilder {
    preference: Option<Preference>,
    primary: Option<Arc<dyn ChatBackend>>,
    secondary: Option<Arc<dyn ChatBackend>>,
    rule_based: Option<RuleBasedResponder>,
    without_rule_based: bool,
    warnings: Vec<InitializationWarning>,
}

impl ResponseOrchestratorBuilder {
    /// Sets the preference.
    pub fn preference(mut self, preference: Preference) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Sets the primary generative backend.
    ///
    /// The backend must report `BackendKind::Primary`.
    pub fn primary(mut self, backend: impl ChatBackend + 'static) -> Self {
        debug_assert_eq!(backend.kind(), BackendKind::Primary);
        self.primary = Some(Arc::new(backend));
        self
    }

    /// Sets the secondary generative backend.
    ///
    /// The backend must report `BackendKind::Secondary`.
    pub fn secondary(mut self, backend: impl ChatBackend + 'static) -> Self {
        debug_assert_eq!(backend.kind(), BackendKind::Secondary);
        self.secondary = Some(Arc::new(backend));
        self
    }

    /// Sets the rule-based responder.
    pub fn rule_based(mut self, responder: RuleBasedResponder) -> Self {
        self.rule_based = Some(responder);
        self.without_rule_based = false;
        self
    }

    /// Builds without a rule-based path.
    pub fn without_rule_based(mut self) -> Self {
        self.rule_based = None;
        self.without_rule_based = true;
        self
    }

    /// Records an initialization warning.
    pub fn warning(mut self, warning: InitializationWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Records several initialization warnings.
    pub fn warnings(mut self, warnings: impl IntoIterator<Item = InitializationWarning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Computes availability and freezes the orchestrator.
    pub fn build(self) -> ResponseOrchestrator {
        let mut warnings = self.warnings;

        let primary: Arc<dyn ChatBackend> = match self.primary {
            Some(backend) => backend,
            None => Arc::new(GenerativeBackend::<OpenAIProvider>::unavailable(BackendKind::Primary)),
        };
        let secondary: Arc<dyn ChatBackend> = match self.secondary {
            Some(backend) => backend,
            None => Arc::new(GenerativeBackend::<OpenAIProvider>::unavailable(
                BackendKind::Secondary,
            )),
        };

        let mut available = BackendSet::new();
        if primary.is_available() {
            available.insert(BackendKind::Primary);
        }
        if secondary.is_available() {
            available.insert(BackendKind::Secondary);
        }

        let responder = match (self.rule_based, self.without_rule_based) {
            (Some(responder), _) => Some(responder),
            (None, true) => None,
            (None, false) => match RuleBasedResponder::new(
                Normalizer::default(),
                ContextTracker::default(),
                ResponsePicker::default(),
            ) {
                Ok(responder) => Some(responder),
                Err(warning) => {
                    warnings.push(warning);
                    None
                }
            },
        };
        if responder.is_some() {
            available.insert(BackendKind::RuleBased);
        }
        let rule_based = responder.map(|r| Arc::new(r.with_backends(&available)));

        let preference = self.preference.unwrap_or_else(|| {
            Preference::from_credentials(
                available.contains(BackendKind::Primary),
                available.contains(BackendKind::Secondary),
            )
        });

        for warning in &warnings {
            tracing::warn!(warning = %warning, "Initialization warning");
        }
        tracing::info!(
            preference = %preference,
            available = %available.describe(),
            "Response orchestrator ready"
        );

        ResponseOrchestrator {
            preference,
            primary,
            secondary,
            rule_based,
            available,
            warnings: warnings.into(),
        }
    }
}
