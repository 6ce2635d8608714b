//! Rule-based responder: context tracker, then pattern table, then defaults.

use super::context::ContextTracker;
use super::normalizer::Normalizer;
use super::patterns::{PatternMatcher, MODELS_PLACEHOLDER};
use super::picker::ResponsePicker;
use crate::domain::conversation::Exchange;
use crate::domain::engine::{BackendKind, BackendSet, InitializationWarning, Reply, ReplySource};

/// Replies used when no rule matches.
pub const DEFAULT_RESPONSES: &[&str] = &[
    "I'm not sure I understand. Could you rephrase that?",
    "That's an interesting point. Can you tell me more?",
    "I don't have specific information about that, but I'm happy to chat about something else.",
    "I'm still learning and may not have the answer to that. What else would you like to talk about?",
    "That's beyond my current capabilities, but I'm here if you have other questions.",
];

/// The terminal fallback of every chain.
#[derive(Debug)]
pub struct RuleBasedResponder {
    normalizer: Normalizer,
    matcher: PatternMatcher,
    context: ContextTracker,
    picker: ResponsePicker,
    models: String,
}

impl RuleBasedResponder {
    /// Builds the responder over the built-in pattern table.
    ///
    /// # Errors
    ///
    /// Returns `InitializationWarning::RuleTable` if the table does not
    /// compile; the caller then runs without a rule-based path.
    pub fn new(
        normalizer: Normalizer,
        context: ContextTracker,
        picker: ResponsePicker,
    ) -> Result<Self, InitializationWarning> {
        let matcher = PatternMatcher::builtin().map_err(|e| InitializationWarning::RuleTable {
            reason: e.to_string(),
        })?;
        Ok(Self::with_matcher(normalizer, matcher, context, picker))
    }

    /// Builds the responder over an already compiled table.
    pub fn with_matcher(
        normalizer: Normalizer,
        matcher: PatternMatcher,
        context: ContextTracker,
        picker: ResponsePicker,
    ) -> Self {
        Self {
            normalizer,
            matcher,
            context,
            picker,
            models: BackendKind::RuleBased.display_name().to_string(),
        }
    }

    /// Records which backends are available, for the model-info rule.
    pub fn with_backends(mut self, available: &BackendSet) -> Self {
        if !available.is_empty() {
            self.models = available.describe();
        }
        self
    }

    /// Returns the normalizer in use.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Answers from context, the pattern table, or the default pool.
    pub fn reply(&self, user_input: &str, history: &[Exchange]) -> Reply {
        if let Some(continuation) = self.context.check(user_input, history) {
            tracing::debug!("Context follow-up matched");
            return Reply::new(continuation, ReplySource::ContextFollowUp);
        }

        let normalized = self.normalizer.normalize(user_input);
        if let Some(template) = self.matcher.respond(&normalized, &self.picker) {
            return Reply::new(
                template.replace(MODELS_PLACEHOLDER, &self.models),
                ReplySource::Pattern,
            );
        }

        let fallback = self
            .picker
            .pick(DEFAULT_RESPONSES)
            .copied()
            .unwrap_or(DEFAULT_RESPONSES[0]);
        Reply::new(fallback, ReplySource::Default)
    }
}
