//! Generative Backend - Adapts an AIProvider to the ChatBackend port.
//!
//! One instance per generative backend. The provider is fixed at
//! construction: a backend built without one (missing key, client failure)
//! reports itself unavailable and answers every call with `NotConfigured`.
//!
//! Each call sends the system prompt, the last `history_window` exchanges as
//! alternating user/assistant turns, and the new input. The whole call is
//! bounded by `tokio::time::timeout`; every failure surfaces as a
//! `BackendError` so the orchestrator can move on.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

use crate::config::{AiConfig, DEFAULT_SYSTEM_PROMPT};
use crate::domain::conversation::{recent, Exchange};
use crate::domain::engine::{BackendError, BackendKind, InitializationWarning};
use crate::ports::{AIError, AIProvider, ChatBackend, CompletionRequest, MessageRole};

use super::gemini_provider::{GeminiConfig, GeminiProvider};
use super::openai_provider::{OpenAIConfig, OpenAIProvider};

/// Request shaping shared by both generative backends.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// System prompt sent ahead of the conversation.
    pub system_prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Number of past exchanges included in each request.
    pub history_window: usize,
    /// Upper bound on a single call.
    pub timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 500,
            history_window: 10,
            timeout: Duration::from_secs(30),
        }
    }
}

impl BackendSettings {
    /// Takes prompt, token limit and timeout from the AI configuration.
    pub fn from_config(config: &AiConfig, history_window: usize) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            history_window,
            timeout: config.timeout(),
        }
    }

    /// Sets the history window.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Sets the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A generative backend backed by an optional provider.
pub struct GenerativeBackend<P> {
    kind: BackendKind,
    provider: Option<P>,
    settings: BackendSettings,
}

impl<P: AIProvider> GenerativeBackend<P> {
    /// Creates an available backend.
    pub fn new(kind: BackendKind, provider: P, settings: BackendSettings) -> Self {
        Self {
            kind,
            provider: Some(provider),
            settings,
        }
    }

    /// Creates a backend that failed to initialize.
    pub fn unavailable(kind: BackendKind) -> Self {
        Self {
            kind,
            provider: None,
            settings: BackendSettings::default(),
        }
    }

    /// Returns the request settings.
    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn build_request(&self, user_input: &str, history: &[Exchange]) -> CompletionRequest {
        let mut request = CompletionRequest::new(Uuid::new_v4().to_string())
            .with_system_prompt(self.settings.system_prompt.as_str())
            .with_max_tokens(self.settings.max_tokens);

        for exchange in recent(history, self.settings.history_window) {
            request = request
                .with_message(MessageRole::User, exchange.user())
                .with_message(MessageRole::Assistant, exchange.bot());
        }

        request.with_message(MessageRole::User, user_input)
    }

    fn map_error(&self, err: AIError) -> BackendError {
        match err {
            AIError::Timeout { timeout_secs } => BackendError::Timeout {
                backend: self.kind,
                timeout_secs: u64::from(timeout_secs),
            },
            other => BackendError::provider(self.kind, other.to_string()),
        }
    }
}

#[async_trait]
impl<P: AIProvider> ChatBackend for GenerativeBackend<P> {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    async fn respond(
        &self,
        user_input: &str,
        history: &[Exchange],
    ) -> Result<String, BackendError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(BackendError::NotConfigured { backend: self.kind })?;

        let request = self.build_request(user_input, history);
        tracing::debug!(
            backend = %self.kind,
            request_id = %request.request_id,
            messages = request.messages.len(),
            "Calling generative backend"
        );

        let response = timeout(self.settings.timeout, provider.complete(request))
            .await
            .map_err(|_| BackendError::Timeout {
                backend: self.kind,
                timeout_secs: self.settings.timeout.as_secs(),
            })?
            .map_err(|e| self.map_error(e))?;

        let text = response.content.trim();
        if text.is_empty() {
            return Err(BackendError::EmptyReply { backend: self.kind });
        }
        Ok(text.to_string())
    }
}

/// Both generative backends plus any initialization warnings.
pub struct GenerativeBackends {
    /// Primary backend (OpenAI).
    pub primary: GenerativeBackend<OpenAIProvider>,
    /// Secondary backend (Gemini).
    pub secondary: GenerativeBackend<GeminiProvider>,
    /// One warning per backend that failed to come up.
    pub warnings: Vec<InitializationWarning>,
}

/// Constructs both generative backends from configuration.
///
/// A missing key or a client construction failure leaves that backend
/// unavailable and records a warning; this never fails as a whole.
pub fn build_generative_backends(config: &AiConfig, history_window: usize) -> GenerativeBackends {
    let settings = BackendSettings::from_config(config, history_window);
    let mut warnings = Vec::new();

    let primary = match config.openai_api_key.as_ref().filter(|_| config.has_openai()) {
        None => {
            warnings.push(InitializationWarning::backend_unavailable(
                BackendKind::Primary,
                "no API key configured",
            ));
            GenerativeBackend::unavailable(BackendKind::Primary)
        }
        Some(key) => {
            let provider_config = OpenAIConfig::from_secret(key.clone())
                .with_model(config.openai_model.as_str())
                .with_base_url(config.openai_base_url.as_str())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            match OpenAIProvider::try_new(provider_config) {
                Ok(provider) => {
                    GenerativeBackend::new(BackendKind::Primary, provider, settings.clone())
                }
                Err(e) => {
                    warnings.push(InitializationWarning::backend_unavailable(
                        BackendKind::Primary,
                        e.to_string(),
                    ));
                    GenerativeBackend::unavailable(BackendKind::Primary)
                }
            }
        }
    };

    let secondary = match config.gemini_api_key.as_ref().filter(|_| config.has_gemini()) {
        None => {
            warnings.push(InitializationWarning::backend_unavailable(
                BackendKind::Secondary,
                "no API key configured",
            ));
            GenerativeBackend::unavailable(BackendKind::Secondary)
        }
        Some(key) => {
            let provider_config = GeminiConfig::from_secret(key.clone())
                .with_model(config.gemini_model.as_str())
                .with_base_url(config.gemini_base_url.as_str())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            match GeminiProvider::try_new(provider_config) {
                Ok(provider) => GenerativeBackend::new(BackendKind::Secondary, provider, settings),
                Err(e) => {
                    warnings.push(InitializationWarning::backend_unavailable(
                        BackendKind::Secondary,
                        e.to_string(),
                    ));
                    GenerativeBackend::unavailable(BackendKind::Secondary)
                }
            }
        }
    };

    GenerativeBackends {
        primary,
        secondary,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use secrecy::Secret;

    fn backend(provider: MockAIProvider) -> GenerativeBackend<MockAIProvider> {
        GenerativeBackend::new(BackendKind::Primary, provider, BackendSettings::default())
    }

    fn history(n: usize) -> Vec<Exchange> {
        (0..n)
            .map(|i| Exchange::new(format!("q{}", i), format!("a{}", i)))
            .collect()
    }

    #[tokio::test]
    async fn returns_trimmed_reply() {
        let mock = MockAIProvider::new().with_response("  Hello there!\n");
        let text = backend(mock).respond("hi", &[]).await.unwrap();
        assert_eq!(text, "Hello there!");
    }

    #[tokio::test]
    async fn sends_history_in_order_then_input() {
        let mock = MockAIProvider::new().with_response("ok");
        let handle = mock.clone();

        backend(mock).respond("now", &history(2)).await.unwrap();

        let calls = handle.get_calls();
        assert_eq!(calls.len(), 1);
        let contents: Vec<(&MessageRole, &str)> = calls[0]
            .messages
            .iter()
            .map(|m| (&m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            contents,
            vec![
                (&MessageRole::User, "q0"),
                (&MessageRole::Assistant, "a0"),
                (&MessageRole::User, "q1"),
                (&MessageRole::Assistant, "a1"),
                (&MessageRole::User, "now"),
            ]
        );
        assert_eq!(calls[0].system_prompt.as_deref(), Some(DEFAULT_SYSTEM_PROMPT));
        assert_eq!(calls[0].max_tokens, Some(500));
    }

    #[tokio::test]
    async fn history_is_windowed() {
        let mock = MockAIProvider::new().with_response("ok");
        let handle = mock.clone();
        let backend = GenerativeBackend::new(
            BackendKind::Secondary,
            mock,
            BackendSettings::default().with_history_window(3),
        );

        backend.respond("latest", &history(12)).await.unwrap();

        let messages = &handle.get_calls()[0].messages;
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0].content, "q9");
        assert_eq!(messages[6].content, "latest");
    }

    #[tokio::test]
    async fn unavailable_backend_is_not_configured() {
        let backend = GenerativeBackend::<MockAIProvider>::unavailable(BackendKind::Secondary);
        assert!(!backend.is_available());
        let err = backend.respond("hi", &[]).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::NotConfigured {
                backend: BackendKind::Secondary
            }
        );
    }

    #[tokio::test]
    async fn empty_reply_is_rejected() {
        let mock = MockAIProvider::new().with_response("   ");
        let err = backend(mock).respond("hi", &[]).await.unwrap_err();
        assert!(matches!(err, BackendError::EmptyReply { .. }));
    }

    #[tokio::test]
    async fn provider_error_maps_to_backend_error() {
        let mock = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let err = backend(mock).respond("hi", &[]).await.unwrap_err();
        assert_eq!(
            err,
            BackendError::provider(BackendKind::Primary, "authentication failed")
        );
    }

    #[tokio::test]
    async fn provider_timeout_maps_to_timeout() {
        let mock = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 30 });
        let err = backend(mock).respond("hi", &[]).await.unwrap_err();
        assert!(matches!(err, BackendError::Timeout { timeout_secs: 30, .. }));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let mock = MockAIProvider::new()
            .with_response("too late")
            .with_delay(Duration::from_millis(500));
        let backend = GenerativeBackend::new(
            BackendKind::Primary,
            mock,
            BackendSettings::default().with_timeout(Duration::from_millis(20)),
        );

        let err = backend.respond("hi", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::Timeout {
                backend: BackendKind::Primary,
                ..
            }
        ));
    }

    #[test]
    fn no_keys_means_both_unavailable() {
        let built = build_generative_backends(&AiConfig::default(), 10);
        assert!(!built.primary.is_available());
        assert!(!built.secondary.is_available());
        assert_eq!(built.warnings.len(), 2);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("   ".to_string())),
            ..AiConfig::default()
        };
        let built = build_generative_backends(&config, 10);
        assert!(!built.secondary.is_available());
    }

    #[test]
    fn keys_make_backends_available() {
        let config = AiConfig {
            openai_api_key: Some(Secret::new("sk-test".to_string())),
            gemini_api_key: Some(Secret::new("g-test".to_string())),
            max_tokens: 200,
            ..AiConfig::default()
        };
        let built = build_generative_backends(&config, 4);
        assert!(built.primary.is_available());
        assert!(built.secondary.is_available());
        assert!(built.warnings.is_empty());
        assert_eq!(built.primary.kind(), BackendKind::Primary);
        assert_eq!(built.secondary.kind(), BackendKind::Secondary);
        assert_eq!(built.primary.settings().history_window, 4);
        assert_eq!(built.secondary.settings().max_tokens, 200);
    }
}
