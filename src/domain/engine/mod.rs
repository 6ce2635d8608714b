//! Response engine domain types.
//!
//! - `BackendKind` / `BackendSet` - the closed set of response sources
//! - `Preference` - the ordering policy that turns into a fallback chain
//! - `Reply` / `ReplySource` - a response plus the path that produced it
//! - `BackendError` / `InitializationWarning` - the failure taxonomy

mod backend;
mod errors;
mod preference;
mod reply;

pub use backend::{BackendKind, BackendSet};
pub use errors::{BackendError, InitializationWarning};
pub use preference::{ParsePreferenceError, Preference};
pub use reply::{Reply, ReplySource, EMPTY_INPUT_PROMPT, NO_BACKENDS_MESSAGE};
