//! Pattern table and matcher.
//!
//! Rules are searched in declaration order against normalized text; the
//! first rule whose pattern occurs anywhere in the text wins.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::picker::ResponsePicker;

/// Placeholder replaced with the available backend names.
pub const MODELS_PLACEHOLDER: &str = "{models}";

/// A rule definition: pattern source and response templates.
pub type RuleDefinition = (&'static str, &'static [&'static str]);

/// The built-in conversational rules.
pub const DEFAULT_RULES: &[RuleDefinition] = &[
    (
        r"hello|hi|hey|howdy",
        &[
            "Hello! How can I help you today?",
            "Hi there! What can I do for you?",
            "Hey! Nice to meet you. What's on your mind?",
        ],
    ),
    (
        r"how are you|how's it going",
        &[
            "I'm just a program, but I'm functioning well! How can I assist you?",
            "I'm doing great, thanks for asking! How can I help?",
        ],
    ),
    (
        r"bye|goodbye|see you|farewell",
        &[
            "Goodbye! Feel free to come back if you have more questions.",
            "Farewell! Have a great day!",
            "See you later! Take care!",
        ],
    ),
    (
        r"thank|thanks",
        &[
            "You're welcome!",
            "Happy to help!",
            "Anytime! That's what I'm here for.",
        ],
    ),
    (
        r"name|your name|who are you",
        &[
            "I'm a simple AI chatbot created to help answer your questions.",
            "I'm an AI assistant here to chat with you.",
        ],
    ),
    (
        r"(what|how) (can|do) you do",
        &[
            "I can answer questions, have a conversation, or just chat about various topics.",
            "I'm designed to engage in conversation and provide information on a variety of subjects.",
        ],
    ),
    (
        r"weather|temperature|forecast",
        &[
            "I don't have access to real-time weather data, but I'd be happy to chat about other topics!",
            "I can't check the current weather, but I can help with other questions you might have.",
        ],
    ),
    (
        r"joke|tell.*joke|funny",
        &[
            "Why don't scientists trust atoms? Because they make up everything!",
            "What did one wall say to the other wall? I'll meet you at the corner!",
            "Why did the scarecrow win an award? Because he was outstanding in his field!",
        ],
    ),
    (
        r"time|current time|what time",
        &[
            "I don't have access to the current time, but your device should have that information!",
            "I can't tell you the exact time right now, but I'm always ready to chat.",
        ],
    ),
    (
        r"help|assist|support",
        &[
            "I'm here to help! Feel free to ask me any questions or just chat.",
            "I'm at your service! What do you need assistance with?",
            "How can I assist you today? Just let me know what you're looking for.",
        ],
    ),
    (
        r"model|which model|what model|how do you work",
        &[
            "I'm currently using the following models: {models}. I'll try to give you the best responses possible!",
            "My brain is powered by: {models}. I'm here to assist you with various tasks and questions.",
        ],
    ),
];

/// Pattern table errors.
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern '{0}' has no responses")]
    NoResponses(String),
}

/// One compiled rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    responses: Vec<String>,
}

impl PatternRule {
    /// Compiles a case-insensitive rule.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern` if the regex does not compile
    /// - `NoResponses` if the response list is empty
    pub fn new(pattern: &str, responses: &[&str]) -> Result<Self, RuleTableError> {
        if responses.is_empty() {
            return Err(RuleTableError::NoResponses(pattern.to_string()));
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleTableError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: regex,
            responses: responses.iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Returns true if the pattern occurs anywhere in the text.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Returns the pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the response templates (never empty).
    pub fn responses(&self) -> &[String] {
        &self.responses
    }
}

/// Ordered rule table; first match wins.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    rules: Vec<PatternRule>,
}

impl PatternMatcher {
    /// Compiles the built-in table.
    pub fn builtin() -> Result<Self, RuleTableError> {
        Self::compile(DEFAULT_RULES)
    }

    /// Compiles a table, preserving declaration order.
    pub fn compile(definitions: &[RuleDefinition]) -> Result<Self, RuleTableError> {
        let rules = definitions
            .iter()
            .map(|(pattern, responses)| PatternRule::new(pattern, responses))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Returns the first rule matching the text.
    pub fn first_match(&self, text: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|rule| rule.is_match(text))
    }

    /// Picks a response template from the first matching rule.
    pub fn respond<'a>(&'a self, text: &str, picker: &ResponsePicker) -> Option<&'a str> {
        self.first_match(text)
            .and_then(|rule| picker.pick(rule.responses()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PatternMatcher {
        PatternMatcher::builtin().unwrap()
    }

    fn responses_for(index: usize) -> Vec<String> {
        DEFAULT_RULES[index].1.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn builtin_table_compiles_in_order() {
        let m = matcher();
        assert_eq!(m.rules().len(), DEFAULT_RULES.len());
        assert_eq!(m.rules()[2].pattern(), "bye|goodbye|see you|farewell");
    }

    #[test]
    fn greeting_response_is_from_greeting_set() {
        let picker = ResponsePicker::seeded(1);
        let m = matcher();
        let reply = m.respond("hello there", &picker).unwrap();
        assert!(responses_for(0).contains(&reply.to_string()));
    }

    #[test]
    fn matches_anywhere_in_text() {
        let m = matcher();
        let rule = m.first_match("could you check forecast tomorrow").unwrap();
        assert_eq!(rule.pattern(), "weather|temperature|forecast");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(matcher().first_match("HOWDY partner").is_some());
    }

    #[test]
    fn first_match_wins() {
        // "hi" and "joke" both occur; the greeting rule is declared first.
        let m = matcher();
        let rule = m.first_match("hi tell joke").unwrap();
        assert_eq!(rule.pattern(), DEFAULT_RULES[0].0);
    }

    #[test]
    fn substring_occurrence_is_enough() {
        let m = matcher();
        assert_eq!(m.first_match("think").unwrap().pattern(), DEFAULT_RULES[0].0);
        assert_eq!(
            m.first_match("sometimes").unwrap().pattern(),
            "time|current time|what time"
        );
    }

    #[test]
    fn no_match_returns_none() {
        let picker = ResponsePicker::seeded(1);
        assert!(matcher().respond("quantum chromodynamics", &picker).is_none());
    }

    #[test]
    fn empty_response_list_rejected() {
        let result = PatternRule::new("x", &[]);
        assert!(matches!(result, Err(RuleTableError::NoResponses(_))));
    }

    #[test]
    fn invalid_pattern_rejected() {
        const BROKEN: &[RuleDefinition] = &[("(unclosed", &["x"])];
        let result = PatternMatcher::compile(BROKEN);
        assert!(matches!(result, Err(RuleTableError::InvalidPattern { .. })));
    }

    #[test]
    fn model_rule_uses_placeholder() {
        let m = matcher();
        let rule = m.first_match("model").unwrap();
        assert!(rule
            .responses()
            .iter()
            .all(|r| r.contains(MODELS_PLACEHOLDER)));
    }
}
