//! Rule-based path.
//!
//! The deterministic fallback at the end of every chain: text normalization,
//! an ordered regex pattern table, and a lightweight follow-up tracker.

mod context;
mod normalizer;
mod patterns;
mod picker;
mod responder;

pub use context::{ContextTracker, FOLLOW_UP_CUES, JOKE_FOLLOW_UP, WEATHER_FOLLOW_UP};
pub use normalizer::{lemmatize, LinguisticResources, Normalizer};
pub use patterns::{
    PatternMatcher, PatternRule, RuleDefinition, RuleTableError, DEFAULT_RULES,
    MODELS_PLACEHOLDER,
};
pub use picker::ResponsePicker;
pub use responder::{RuleBasedResponder, DEFAULT_RESPONSES};
