//! Domain layer containing the response engine's pure logic and types.
//!
//! # Module Organization
//!
//! - `conversation` - Exchanges and the caller-owned history
//! - `engine` - Backend kinds, preference policy, replies, and error taxonomy
//! - `rules` - The rule-based path (normalizer, pattern table, context tracker)

pub mod conversation;
pub mod engine;
pub mod rules;
