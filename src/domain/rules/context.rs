//! Follow-up detection over recent exchanges.
//!
//! Runs before pattern matching and overrides it: a cue word in the new
//! input plus a known topic in the previous user message yields a canned
//! topic continuation.

use crate::domain::conversation::{recent, Exchange};

/// Cue phrases marking a follow-up (case-insensitive substring test).
pub const FOLLOW_UP_CUES: &[&str] = &["why", "how", "what about", "tell me more"];

/// Continuation for a weather follow-up.
pub const WEATHER_FOLLOW_UP: &str = "I can't provide real-time weather information, but you might want to check a weather app for accurate forecasts.";

/// Continuation for a joke follow-up.
pub const JOKE_FOLLOW_UP: &str =
    "Here's another one: Why did the bicycle fall over? Because it was two-tired!";

/// Topic keywords and their continuations, checked in order.
const TOPIC_CONTINUATIONS: &[(&str, &str)] =
    &[("weather", WEATHER_FOLLOW_UP), ("joke", JOKE_FOLLOW_UP)];

/// Inspects the last few exchanges for follow-up cues.
#[derive(Debug, Clone, Copy)]
pub struct ContextTracker {
    window: usize,
}

impl Default for ContextTracker {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ContextTracker {
    /// Creates a tracker looking at the last `window` exchanges.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Returns a topic continuation if the input follows up on the last
    /// exchange's topic.
    pub fn check(&self, user_input: &str, history: &[Exchange]) -> Option<&'static str> {
        let last = recent(history, self.window).last()?;

        let input = user_input.to_lowercase();
        if !FOLLOW_UP_CUES.iter().any(|cue| input.contains(cue)) {
            return None;
        }

        let previous = last.user().to_lowercase();
        TOPIC_CONTINUATIONS
            .iter()
            .find(|(topic, _)| previous.contains(topic))
            .map(|(_, continuation)| *continuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(users: &[&str]) -> Vec<Exchange> {
        users.iter().map(|u| Exchange::new(*u, "reply")).collect()
    }

    #[test]
    fn joke_follow_up() {
        let tracker = ContextTracker::default();
        let h = history(&["tell me a joke"]);
        assert_eq!(tracker.check("why is that funny", &h), Some(JOKE_FOLLOW_UP));
    }

    #[test]
    fn weather_follow_up_is_case_insensitive() {
        let tracker = ContextTracker::default();
        let h = history(&["What's the WEATHER like?"]);
        assert_eq!(
            tracker.check("Tell me more", &h),
            Some(WEATHER_FOLLOW_UP)
        );
    }

    #[test]
    fn no_cue_no_override() {
        let tracker = ContextTracker::default();
        let h = history(&["tell me a joke"]);
        assert_eq!(tracker.check("that was great", &h), None);
    }

    #[test]
    fn only_most_recent_exchange_counts() {
        let tracker = ContextTracker::default();
        let h = history(&["tell me a joke", "what is rust"]);
        assert_eq!(tracker.check("why", &h), None);
    }

    #[test]
    fn empty_history_no_override() {
        let tracker = ContextTracker::default();
        assert_eq!(tracker.check("why", &[]), None);
    }

    #[test]
    fn unknown_topic_no_override() {
        let tracker = ContextTracker::default();
        let h = history(&["talk about football"]);
        assert_eq!(tracker.check("what about tennis", &h), None);
    }

    #[test]
    fn weather_checked_before_joke() {
        let tracker = ContextTracker::default();
        let h = history(&["a joke about the weather"]);
        assert_eq!(tracker.check("how so", &h), Some(WEATHER_FOLLOW_UP));
    }

    #[test]
    fn zero_window_never_overrides() {
        let tracker = ContextTracker::new(0);
        let h = history(&["tell me a joke"]);
        assert_eq!(tracker.check("why", &h), None);
    }
}
