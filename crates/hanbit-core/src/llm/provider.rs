//! LLM provider trait, call outcome, and the provider router.
//!
//! The router is the containment boundary of the pipeline: adapters may fail
//! in any way (transport, auth, rate limit, malformed response), but
//! [`ProviderRouter::invoke`] always returns a [`CallOutcome`] value. The
//! failure reason is kept for diagnostics only — callers branch solely on
//! presence or absence of generated text.

use crate::error::{EnhanceError, LlmError};
use crate::request::{GenerationRequest, ProviderKind};
use async_trait::async_trait;
use std::time::Duration;

/// The uniform request shape sent to every provider adapter.
#[derive(Debug, Clone)]
pub struct TextRequest {
    /// Free-text instruction for the model
    pub prompt: String,
    /// Model identifier, captured at router construction
    pub model: String,
    /// Sampling temperature, captured at router construction
    pub temperature: f32,
}

/// Result of one provider call.
///
/// `Failed` carries the contained error's message; nothing downstream
/// inspects it beyond logging.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    Generated(String),
    Failed(String),
}

impl CallOutcome {
    /// Generated text, if the call succeeded.
    pub fn text(self) -> Option<String> {
        match self {
            CallOutcome::Generated(text) => Some(text),
            CallOutcome::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CallOutcome::Failed(_))
    }
}

/// Trait that all LLM provider adapters implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the router holds a `Box<dyn LlmProvider>`).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "gemini", "anthropic").
    fn name(&self) -> &str;

    /// Send one instruction and return the generated text verbatim.
    async fn generate(&self, request: &TextRequest) -> Result<String, LlmError>;

    /// Per-request timeout for this provider. Expiry surfaces as a
    /// transport `LlmError`, never as a hang.
    fn timeout(&self) -> Duration {
        Duration::from_secs(60)
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Routes every call to the single provider selected at construction time.
pub struct ProviderRouter {
    adapter: Box<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl ProviderRouter {
    /// Build a router for the selected provider.
    ///
    /// Fails with [`EnhanceError::MissingCredential`] when the selected
    /// provider's API key is absent or blank. Keys for other providers are
    /// neither required nor validated. This is the only fatal check on the
    /// call path; everything after construction degrades gracefully.
    pub fn new(request: &GenerationRequest) -> Result<Self, EnhanceError> {
        let provider = request.provider;
        let api_key = request
            .credentials
            .get(provider)
            .ok_or(EnhanceError::MissingCredential { provider })?;

        let adapter: Box<dyn LlmProvider> = match provider {
            ProviderKind::Gemini => Box::new(super::gemini::GeminiProvider::new(api_key)),
            ProviderKind::OpenAi => Box::new(super::openai::OpenAiProvider::new(api_key)),
            ProviderKind::Anthropic => Box::new(super::anthropic::AnthropicProvider::new(api_key)),
        };

        Ok(Self {
            adapter,
            model: request.model.clone(),
            temperature: request.temperature,
        })
    }

    /// Wrap an already-built adapter (tests and embedders with their own
    /// provider implementations).
    pub fn with_adapter(adapter: Box<dyn LlmProvider>, model: &str, temperature: f32) -> Self {
        Self {
            adapter,
            model: model.to_string(),
            temperature,
        }
    }

    /// Send one instruction to the provider.
    ///
    /// Never returns an error: any adapter failure is logged and folded
    /// into [`CallOutcome::Failed`] so the caller can fall back.
    pub async fn invoke(&self, prompt: &str) -> CallOutcome {
        let request = TextRequest {
            prompt: prompt.to_string(),
            model: self.model.clone(),
            temperature: self.temperature,
        };

        match self.adapter.generate(&request).await {
            Ok(text) => CallOutcome::Generated(text),
            Err(e) => {
                tracing::warn!(
                    provider = self.adapter.name(),
                    model = %self.model,
                    "LLM call failed: {e}"
                );
                CallOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ProviderCredentials;

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: &TextRequest) -> Result<String, LlmError> {
            Ok(format!("echo: {}", request.prompt))
        }
    }

    struct BrokenProvider;

    #[async_trait]
    impl LlmProvider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        async fn generate(&self, _request: &TextRequest) -> Result<String, LlmError> {
            Err(LlmError::Http {
                provider: "broken".to_string(),
                status: 429,
                message: "rate limited".to_string(),
            })
        }
    }

    fn request_for(provider: ProviderKind, credentials: ProviderCredentials) -> GenerationRequest {
        GenerationRequest {
            subject: "달빛 아래의 고양이".to_string(),
            provider,
            credentials,
            ..Default::default()
        }
    }

    #[test]
    fn test_router_requires_selected_credential_only() {
        // OpenAI selected, only Gemini and Anthropic keys present
        let creds = ProviderCredentials {
            gemini: Some("g-key".to_string()),
            anthropic: Some("a-key".to_string()),
            openai: Some(String::new()),
        };
        // Router holds a boxed adapter, so destructure instead of unwrap_err
        let Err(err) = ProviderRouter::new(&request_for(ProviderKind::OpenAi, creds)) else {
            panic!("construction must fail without the selected provider's key");
        };
        assert!(matches!(
            err,
            EnhanceError::MissingCredential {
                provider: ProviderKind::OpenAi
            }
        ));
    }

    #[test]
    fn test_router_construction_with_credential() {
        let creds = ProviderCredentials {
            anthropic: Some("a-key".to_string()),
            ..Default::default()
        };
        let router = ProviderRouter::new(&request_for(ProviderKind::Anthropic, creds)).unwrap();
        assert_eq!(router.adapter.name(), "anthropic");
    }

    #[tokio::test]
    async fn test_invoke_success_passes_text_through() {
        let router = ProviderRouter::with_adapter(Box::new(EchoProvider), "test-model", 0.7);
        let outcome = router.invoke("hello").await;
        assert_eq!(outcome.text(), Some("echo: hello".to_string()));
    }

    #[tokio::test]
    async fn test_invoke_contains_adapter_failure() {
        let router = ProviderRouter::with_adapter(Box::new(BrokenProvider), "test-model", 0.7);
        let outcome = router.invoke("hello").await;
        assert!(outcome.is_failure());
        assert_eq!(outcome.text(), None);
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }
}
