//! Failure-tolerant Korean-to-target-language translation.
//!
//! Only the fallback path uses translation. The contract is deliberately
//! soft: a translator never fails its caller — on any error it logs a
//! warning and echoes the input unchanged.

use crate::error::LlmError;
use crate::request::TargetLanguage;
use async_trait::async_trait;
use std::time::Duration;

/// Source language of every subject description.
const SOURCE_LANG: &str = "ko";

/// A source-to-target text translator.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`.
    ///
    /// Must return the original text unchanged when the underlying service
    /// is unreachable; translation failure is never fatal.
    async fn translate(&self, text: &str, target: TargetLanguage) -> String;
}

/// Translator backed by the public Google Translate gtx endpoint.
///
/// No API key required; quality is best-effort, which is acceptable for a
/// fallback prompt.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
        }
    }

    async fn try_translate(&self, text: &str, target: TargetLanguage) -> Result<String, LlmError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", SOURCE_LANG),
                ("tl", target.iso_code()),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                provider: "translate".to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                provider: "translate".to_string(),
                status: status.as_u16(),
                message: body,
            });
        }

        // Response is a nested array: [[["translated","original",...],...],...]
        let value: serde_json::Value =
            resp.json().await.map_err(|e| LlmError::MalformedResponse {
                provider: "translate".to_string(),
                message: e.to_string(),
            })?;

        let translated: String = value
            .get(0)
            .and_then(|segments| segments.as_array())
            .map(|segments| {
                segments
                    .iter()
                    .filter_map(|s| s.get(0).and_then(|t| t.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(LlmError::Empty {
                provider: "translate".to_string(),
            });
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: TargetLanguage) -> String {
        match self.try_translate(text, target).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation failed, using original text: {e}");
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_service_echoes_input() {
        let translator = GoogleTranslator {
            client: reqwest::Client::new(),
            // Reserved TLD, guaranteed unresolvable
            endpoint: "http://translate.invalid/translate_a/single".to_string(),
        };
        let text = "달빛 아래의 고양이";
        let out = translator.translate(text, TargetLanguage::English).await;
        assert_eq!(out, text);
    }

    #[tokio::test]
    async fn test_echo_is_deterministic() {
        let translator = GoogleTranslator {
            client: reqwest::Client::new(),
            endpoint: "http://translate.invalid/translate_a/single".to_string(),
        };
        let text = "한복을 입은 여성";
        let first = translator.translate(text, TargetLanguage::Chinese).await;
        let second = translator.translate(text, TargetLanguage::Chinese).await;
        assert_eq!(first, second);
        assert_eq!(first, text);
    }
}
