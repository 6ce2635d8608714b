//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engine and the outside world. Adapters implement these ports.
//!
//! - `ChatBackend` - Uniform capability of every response source
//! - `AIProvider` - Remote generative model call used by the backend adapters

mod ai_provider;
mod chat_backend;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use chat_backend::ChatBackend;
