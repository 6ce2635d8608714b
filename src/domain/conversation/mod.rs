//! Conversation domain module.
//!
//! Exchanges are immutable user/bot pairs. The history that holds them is
//! owned by the caller; the engine only ever reads a suffix of it.

mod exchange;

pub use exchange::{recent, Exchange, History};
