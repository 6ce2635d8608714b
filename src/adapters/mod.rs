//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to external systems:
//! - `ai` - Generative model providers (OpenAI, Gemini, mock) and the
//!   backends that expose them to the orchestrator

pub mod ai;

pub use ai::{build_generative_backends, GenerativeBackend, MockAIProvider};
