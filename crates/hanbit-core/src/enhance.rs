//! The variation orchestrator: top-level control loop for one run.
//!
//! For each requested variation, compose an instruction, invoke the router,
//! and degrade to the deterministic fallback when the outcome is absent.
//! After the loop, join positives, deduplicate intelligent negatives, and
//! assemble the final negative prompt in fixed precedence order.
//!
//! Only two conditions abort a run: an invalid request and a missing
//! credential for the selected provider. Every per-call failure recovers.

use crate::compose;
use crate::error::EnhanceError;
use crate::fallback::compose_fallback;
use crate::llm::ProviderRouter;
use crate::request::GenerationRequest;
use crate::translate::{GoogleTranslator, Translator};
use serde::Serialize;
use std::collections::BTreeSet;

/// Always appended to the final negative prompt, between the user's own
/// negatives and the deduplicated intelligent ones.
pub const DEFAULT_NEGATIVES: &str = "low quality, watermark, blurry, distortion, cartoon";

/// The three strings returned to the host per run.
#[derive(Debug, Clone, Serialize)]
pub struct EnhanceOutput {
    /// All positive-prompt variants, blank-line separated, generation order
    pub prompts_batch: String,
    /// User negatives, default clause, then deduplicated intelligent negatives
    pub negative_prompt: String,
    /// JSON record of every input axis
    pub metadata: String,
}

/// Per-run orchestrator. Built fresh for every invocation; holds no state
/// across runs.
pub struct Enhancer {
    router: ProviderRouter,
    translator: Box<dyn Translator>,
}

impl Enhancer {
    /// Build the orchestrator for a request.
    ///
    /// Fails fast on an invalid request or a missing credential for the
    /// selected provider — no partial batch is ever produced for these.
    pub fn new(request: &GenerationRequest) -> Result<Self, EnhanceError> {
        request.validate()?;
        let router = ProviderRouter::new(request)?;
        Ok(Self {
            router,
            translator: Box::new(GoogleTranslator::new()),
        })
    }

    /// Build from pre-constructed parts (tests, custom providers).
    pub fn with_parts(router: ProviderRouter, translator: Box<dyn Translator>) -> Self {
        Self { router, translator }
    }

    /// Run the variation loop and assemble the batch outputs.
    pub async fn run(&self, request: &GenerationRequest) -> Result<EnhanceOutput, EnhanceError> {
        request.validate()?;

        let mut positives: Vec<String> = Vec::with_capacity(request.variations as usize);
        let mut negatives: Vec<String> = Vec::new();

        for variation in 0..request.variations {
            let instruction = compose::compose(request, variation);
            tracing::debug!(variation, "Invoking provider for positive prompt");

            let positive = match self.router.invoke(&instruction).await.text() {
                Some(text) => text,
                None => {
                    tracing::info!(variation, "Provider call failed, composing fallback prompt");
                    compose_fallback(request, self.translator.as_ref()).await
                }
            };

            if request.intelligent_negative {
                let negative_instruction = compose::compose_negative(&positive);
                // Absent outcome contributes an empty entry; aggregation
                // filters it out.
                let negative = self
                    .router
                    .invoke(&negative_instruction)
                    .await
                    .text()
                    .unwrap_or_default();
                negatives.push(negative);
            }

            positives.push(positive);
        }

        let prompts_batch = positives.join("\n\n");
        let intelligent = dedupe_keywords(&negatives);
        let negative_prompt = [
            request.negative_prompt.trim(),
            DEFAULT_NEGATIVES,
            intelligent.as_str(),
        ]
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let metadata = request.metadata().to_json()?;

        Ok(EnhanceOutput {
            prompts_batch,
            negative_prompt,
            metadata,
        })
    }
}

/// Merge comma-separated keyword lists: set union, lexicographic order.
///
/// `["a, b", "b, c", "a, b"]` becomes `"a, b, c"` regardless of the order
/// the entries were generated in.
fn dedupe_keywords(entries: &[String]) -> String {
    let keywords: BTreeSet<&str> = entries
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .collect();
    keywords.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::llm::{LlmProvider, TextRequest};
    use crate::request::{ProviderCredentials, ProviderKind, TargetLanguage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// A configurable mock provider.
    ///
    /// Each `generate` call invokes the response factory with the current
    /// call index, so callers can script a different result per call.
    struct MockProvider {
        response_fn: Box<dyn Fn(u32) -> Result<String, LlmError> + Send + Sync>,
        call_count: Arc<AtomicU32>,
    }

    impl MockProvider {
        fn scripted<F>(response_fn: F) -> Self
        where
            F: Fn(u32) -> Result<String, LlmError> + Send + Sync + 'static,
        {
            Self {
                response_fn: Box::new(response_fn),
                call_count: Arc::new(AtomicU32::new(0)),
            }
        }

        fn success(text: &str) -> Self {
            let text = text.to_string();
            Self::scripted(move |_| Ok(text.clone()))
        }

        fn failing() -> Self {
            Self::scripted(|_| {
                Err(LlmError::Http {
                    provider: "mock".to_string(),
                    status: 503,
                    message: "service unavailable".to_string(),
                })
            })
        }

        fn call_count_handle(&self) -> Arc<AtomicU32> {
            self.call_count.clone()
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(&self, _request: &TextRequest) -> Result<String, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            (self.response_fn)(idx)
        }
    }

    /// Translator that behaves like an unreachable service: echoes input.
    struct OfflineTranslator;

    #[async_trait]
    impl Translator for OfflineTranslator {
        async fn translate(&self, text: &str, _target: TargetLanguage) -> String {
            text.to_string()
        }
    }

    fn enhancer(provider: MockProvider) -> Enhancer {
        Enhancer::with_parts(
            ProviderRouter::with_adapter(Box::new(provider), "mock-model", 0.7),
            Box::new(OfflineTranslator),
        )
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            subject: "달빛 아래의 고양이".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_batch_has_n_nonempty_segments() {
        let provider = MockProvider::scripted(|idx| Ok(format!("variant {idx}")));
        let mut req = request();
        req.variations = 3;
        let output = enhancer(provider).run(&req).await.unwrap();

        let segments: Vec<&str> = output.prompts_batch.split("\n\n").collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));
        assert_eq!(segments, vec!["variant 0", "variant 1", "variant 2"]);
    }

    #[tokio::test]
    async fn test_all_failures_degrade_to_identical_fallback() {
        let mut req = request();
        req.variations = 2;
        let output = enhancer(MockProvider::failing()).run(&req).await.unwrap();

        let segments: Vec<&str> = output.prompts_batch.split("\n\n").collect();
        assert_eq!(segments.len(), 2);
        // Fallback is deterministic: identical request, identical string
        assert_eq!(segments[0], segments[1]);
        // Every degraded variant is exactly the composed fallback
        let expected = compose_fallback(&req, &OfflineTranslator).await;
        assert_eq!(segments[0], expected);
        // Echoed (untranslated) subject text is present and usable
        assert!(segments[0].contains("달빛 아래의 고양이"));
    }

    #[tokio::test]
    async fn test_partial_failure_mixes_live_and_fallback() {
        // Second positive call fails, everything else succeeds
        let provider = MockProvider::scripted(|idx| {
            if idx == 1 {
                Err(LlmError::Transport {
                    provider: "mock".to_string(),
                    message: "connection reset".to_string(),
                })
            } else {
                Ok(format!("live {idx}"))
            }
        });
        let mut req = request();
        req.variations = 2;
        let output = enhancer(provider).run(&req).await.unwrap();

        let segments: Vec<&str> = output.prompts_batch.split("\n\n").collect();
        assert_eq!(segments[0], "live 0");
        assert!(segments[1].contains("달빛 아래의 고양이"));
    }

    #[tokio::test]
    async fn test_intelligent_negative_dedup_and_sort() {
        // Even call indices are positives, odd ones are negative derivations
        let provider = MockProvider::scripted(|idx| {
            Ok(match idx {
                1 => "a, b".to_string(),
                3 => "b, c".to_string(),
                5 => "a, b".to_string(),
                _ => "positive".to_string(),
            })
        });
        let mut req = request();
        req.variations = 3;
        req.intelligent_negative = true;
        req.negative_prompt = String::new();
        let output = enhancer(provider).run(&req).await.unwrap();

        assert_eq!(
            output.negative_prompt,
            format!("{DEFAULT_NEGATIVES}, a, b, c")
        );
    }

    #[tokio::test]
    async fn test_negative_precedence_order() {
        let mut req = request();
        req.negative_prompt = "x".to_string();
        let output = enhancer(MockProvider::success("positive"))
            .run(&req)
            .await
            .unwrap();

        assert_eq!(
            output.negative_prompt,
            "x, low quality, watermark, blurry, distortion, cartoon"
        );
    }

    #[tokio::test]
    async fn test_empty_user_negative_no_dangling_separator() {
        let mut req = request();
        req.negative_prompt = String::new();
        let output = enhancer(MockProvider::success("positive"))
            .run(&req)
            .await
            .unwrap();

        assert_eq!(output.negative_prompt, DEFAULT_NEGATIVES);
    }

    #[tokio::test]
    async fn test_failed_negative_call_contributes_nothing() {
        // Positive calls succeed, negative calls fail
        let provider = MockProvider::scripted(|idx| {
            if idx % 2 == 0 {
                Ok("positive".to_string())
            } else {
                Err(LlmError::Http {
                    provider: "mock".to_string(),
                    status: 429,
                    message: "rate limited".to_string(),
                })
            }
        });
        let mut req = request();
        req.variations = 2;
        req.intelligent_negative = true;
        req.negative_prompt = String::new();
        let output = enhancer(provider).run(&req).await.unwrap();

        assert_eq!(output.negative_prompt, DEFAULT_NEGATIVES);
    }

    #[tokio::test]
    async fn test_negative_call_follows_each_positive() {
        let provider = MockProvider::scripted(|idx| Ok(format!("text {idx}")));
        let count = provider.call_count_handle();
        let mut req = request();
        req.variations = 2;
        req.intelligent_negative = true;
        enhancer(provider).run(&req).await.unwrap();

        // Two positives plus two negative derivations, strictly sequential
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_no_negative_calls_when_disabled() {
        let provider = MockProvider::success("positive");
        let count = provider.call_count_handle();
        let mut req = request();
        req.variations = 2;
        enhancer(provider).run(&req).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_metadata_independent_of_failure_path() {
        let req = request();
        let live = enhancer(MockProvider::success("positive"))
            .run(&req)
            .await
            .unwrap();
        let degraded = enhancer(MockProvider::failing()).run(&req).await.unwrap();

        assert_eq!(live.metadata, degraded.metadata);
        assert_eq!(live.metadata, req.metadata().to_json().unwrap());
    }

    #[tokio::test]
    async fn test_invalid_request_is_fatal() {
        let mut req = request();
        req.variations = 0;
        let err = enhancer(MockProvider::success("positive"))
            .run(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::InvalidRequest(_)));
    }

    #[test]
    fn test_missing_credential_is_fatal_at_construction() {
        // No anthropic key even though the other two are set
        let req = GenerationRequest {
            subject: "달빛 아래의 고양이".to_string(),
            provider: ProviderKind::Anthropic,
            credentials: ProviderCredentials {
                gemini: Some("g-key".to_string()),
                openai: Some("o-key".to_string()),
                anthropic: None,
            },
            ..Default::default()
        };
        let Err(err) = Enhancer::new(&req) else {
            panic!("construction must fail without the selected provider's key");
        };
        assert!(matches!(
            err,
            EnhanceError::MissingCredential {
                provider: ProviderKind::Anthropic
            }
        ));
    }

    #[test]
    fn test_dedupe_keywords_property() {
        let entries = vec!["a, b".to_string(), "b, c".to_string(), "a, b".to_string()];
        assert_eq!(dedupe_keywords(&entries), "a, b, c");
        // Order independence
        let shuffled = vec!["b, c".to_string(), "a, b".to_string(), "a, b".to_string()];
        assert_eq!(dedupe_keywords(&shuffled), "a, b, c");
        // Empty entries vanish
        assert_eq!(dedupe_keywords(&[String::new()]), "");
        assert_eq!(dedupe_keywords(&[]), "");
    }
}
