//! Anthropic provider using the Messages API.
//!
//! Sends the instruction as a single user-role message with temperature and
//! a fixed 2048-token output ceiling.

use super::provider::{LlmProvider, TextRequest};
use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Output-token ceiling for every call.
const MAX_TOKENS: u32 = 2048;

/// Anthropic provider using the Messages API.
pub struct AnthropicProvider {
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, request: &TextRequest) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: request.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: request.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
        };

        let resp = self
            .client
            .post(ENDPOINT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                provider: "anthropic".to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                provider: "anthropic".to_string(),
                status: status.as_u16(),
                message: text,
            });
        }

        let messages_resp: MessagesResponse =
            resp.json().await.map_err(|e| LlmError::MalformedResponse {
                provider: "anthropic".to_string(),
                message: e.to_string(),
            })?;

        let text = messages_resp
            .content
            .into_iter()
            .filter_map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(LlmError::Empty {
                provider: "anthropic".to_string(),
            });
        }

        Ok(text)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_token_ceiling() {
        let body = MessagesRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: MAX_TOKENS,
            temperature: 0.5,
            messages: vec![Message {
                role: "user".to_string(),
                content: "describe a cat".to_string(),
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 2048);
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
