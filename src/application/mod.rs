//! Application layer - Response orchestration and the caller-facing service.
//!
//! - `ResponseOrchestrator` walks the preference-ordered fallback chain
//! - `ChatService` holds the current orchestrator and swaps it on
//!   preference changes without disturbing requests in flight

mod chat_service;
mod orchestrator;

pub use chat_service::{ChatService, ModelStatus};
pub use orchestrator::{ResponseOrchestrator, ResponseOrchestratorBuilder};
