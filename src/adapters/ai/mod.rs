//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port, and the generative backends that
//! wrap them for the fallback chain.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat completions (primary backend)
//! - `GeminiProvider` - Google Gemini generateContent (secondary backend)
//! - `MockAIProvider` - Configurable mock for testing
//! - `GenerativeBackend` - ChatBackend over any AIProvider, with per-call timeout

mod gemini_provider;
mod generative_backend;
mod mock_provider;
mod openai_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use generative_backend::{
    build_generative_backends, BackendSettings, GenerativeBackend, GenerativeBackends,
};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
