//! Engine replies.

use serde::{Deserialize, Serialize};

use super::backend::BackendKind;

/// Returned for empty or whitespace-only input.
pub const EMPTY_INPUT_PROMPT: &str = "Please type a message to start the conversation.";

/// Returned when no candidate in the chain could be reached.
pub const NO_BACKENDS_MESSAGE: &str =
    "I'm sorry, no AI models are available at the moment. Please try again later.";

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "backend")]
pub enum ReplySource {
    /// Input was empty; no backend was consulted.
    EmptyInput,
    /// A generative backend answered.
    Generative(BackendKind),
    /// The context tracker recognised a follow-up.
    ContextFollowUp,
    /// A pattern-table rule matched.
    Pattern,
    /// Nothing matched; a default reply was drawn.
    Default,
    /// No candidate in the chain was reachable.
    NoBackends,
}

impl ReplySource {
    /// Returns true if the rule-based path produced the reply.
    pub fn is_rule_based(&self) -> bool {
        matches!(self, Self::ContextFollowUp | Self::Pattern | Self::Default)
    }
}

/// A response plus the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Response text; never empty.
    pub text: String,
    /// Where the text came from.
    pub source: ReplySource,
}

impl Reply {
    /// Creates a reply.
    pub fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// The fixed prompt for empty input.
    pub fn empty_input() -> Self {
        Self::new(EMPTY_INPUT_PROMPT, ReplySource::EmptyInput)
    }

    /// The fixed apology when nothing is reachable.
    pub fn no_backends() -> Self {
        Self::new(NO_BACKENDS_MESSAGE, ReplySource::NoBackends)
    }
}
