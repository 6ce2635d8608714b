//! Exchange entity and conversation history.
//!
//! An exchange is one user message paired with the reply it received.

use serde::{Deserialize, Serialize};

/// One (user message, bot reply) pair.
///
/// # Invariants
///
/// - Immutable once recorded; fields are only readable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    user: String,
    bot: String,
}

impl Exchange {
    /// Records a new exchange.
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }

    /// Returns the user's message.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the bot's reply.
    pub fn bot(&self) -> &str {
        &self.bot
    }
}

/// Returns the last `n` exchanges (or all of them if fewer), oldest first.
pub fn recent(history: &[Exchange], n: usize) -> &[Exchange] {
    &history[history.len().saturating_sub(n)..]
}

/// Ordered exchange history, most recent last.
///
/// Owned by the caller. When built with a capacity, the oldest exchanges
/// are evicted once the bound is exceeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    exchanges: Vec<Exchange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<usize>,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `capacity` exchanges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            exchanges: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Appends an exchange, evicting the oldest ones beyond capacity.
    pub fn push(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
        if let Some(capacity) = self.capacity {
            let excess = self.exchanges.len().saturating_sub(capacity);
            if excess > 0 {
                self.exchanges.drain(..excess);
            }
        }
    }

    /// Appends a (user, bot) pair.
    pub fn record(&mut self, user: impl Into<String>, bot: impl Into<String>) {
        self.push(Exchange::new(user, bot));
    }

    /// Removes all exchanges.
    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    /// Returns the last `n` exchanges, oldest first.
    pub fn recent(&self, n: usize) -> &[Exchange] {
        recent(&self.exchanges, n)
    }

    /// Returns the most recent exchange.
    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }

    /// Returns all exchanges, oldest first.
    pub fn as_slice(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Returns the number of exchanges.
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Returns true if no exchange has been recorded.
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(n: usize) -> History {
        let mut history = History::new();
        for i in 0..n {
            history.record(format!("user {}", i), format!("bot {}", i));
        }
        history
    }

    #[test]
    fn exchange_accessors() {
        let exchange = Exchange::new("hi", "hello");
        assert_eq!(exchange.user(), "hi");
        assert_eq!(exchange.bot(), "hello");
    }

    #[test]
    fn recent_returns_suffix_in_order() {
        let history = history_of(5);
        let last_three = history.recent(3);
        assert_eq!(last_three.len(), 3);
        assert_eq!(last_three[0].user(), "user 2");
        assert_eq!(last_three[2].user(), "user 4");
    }

    #[test]
    fn recent_with_short_history_returns_everything() {
        let history = history_of(2);
        assert_eq!(history.recent(10).len(), 2);
        assert!(History::new().recent(3).is_empty());
    }

    #[test]
    fn recent_zero_is_empty() {
        let history = history_of(4);
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = History::with_capacity(3);
        for i in 0..5 {
            history.record(format!("user {}", i), "bot");
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.as_slice()[0].user(), "user 2");
        assert_eq!(history.last().unwrap().user(), "user 4");
    }

    #[test]
    fn clear_empties_history() {
        let mut history = history_of(3);
        history.clear();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn exchange_serializes_as_user_bot_pair() {
        let json = serde_json::to_string(&Exchange::new("hi", "hello")).unwrap();
        assert_eq!(json, r#"{"user":"hi","bot":"hello"}"#);
    }
}
