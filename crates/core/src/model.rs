//! Language-model capability.
//!
//! Stages talk to the model through the [`LanguageModel`] trait so the
//! pipeline can run against the Anthropic Messages API in production and a
//! scripted model in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;

use crate::{DoclensError, ModelError, Result};

/// Default Messages API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// A text-generation capability: prompt in, generated text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> std::result::Result<String, ModelError>;
}

#[async_trait]
impl<M: LanguageModel + ?Sized> LanguageModel for Box<M> {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> std::result::Result<String, ModelError> {
        (**self).complete(prompt, max_tokens).await
    }
}

/// Connection settings for the Messages API.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    /// Per-call timeout in seconds.
    pub timeout: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: "2023-06-01".to_string(),
            timeout: 60,
        }
    }
}

impl ModelConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Default::default() }
    }
}

/// Messages API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    config: ModelConfig,
    client: Client,
}

impl AnthropicClient {
    /// Builds a client with the configured per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DoclensError::ConfigError`] when the API key is empty, or
    /// [`DoclensError::HttpError`] if the HTTP client cannot be built.
    pub fn new(config: ModelConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DoclensError::ConfigError(ModelError::MissingApiKey.to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(DoclensError::HttpError)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn request_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout { timeout: self.config.timeout }
        } else {
            ModelError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> std::result::Result<String, ModelError> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ModelError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status: status.as_u16(), body });
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                ModelError::InvalidResponse(e.to_string())
            } else {
                self.request_error(e)
            }
        })?;

        if let Some(tokens) = payload["usage"]["output_tokens"].as_u64() {
            tracing::debug!(output_tokens = tokens, "model call completed");
        }

        first_text_block(&payload)
    }
}

/// Pulls the first text block out of a Messages API response.
fn first_text_block(payload: &serde_json::Value) -> std::result::Result<String, ModelError> {
    payload["content"]
        .as_array()
        .and_then(|blocks| blocks.iter().find_map(|block| block["text"].as_str()))
        .map(str::to_string)
        .ok_or_else(|| ModelError::InvalidResponse("no text content in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve_once, serve_silence};

    fn client_for(base: &str, timeout: u64) -> AnthropicClient {
        AnthropicClient::new(ModelConfig {
            api_key: "sk-test".to_string(),
            endpoint: format!("{}/v1/messages", base),
            timeout,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_model_config_default() {
        let config = ModelConfig::default();
        assert_eq!(config.timeout, 60);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_client_requires_key() {
        let result = AnthropicClient::new(ModelConfig::with_api_key("   "));
        assert!(matches!(result, Err(DoclensError::ConfigError(_))));
        assert!(AnthropicClient::new(ModelConfig::with_api_key("sk-test")).is_ok());
    }

    #[test]
    fn test_first_text_block() {
        let payload = json!({
            "content": [{"type": "text", "text": "Consider adding a summary."}],
            "usage": {"output_tokens": 7}
        });
        assert_eq!(first_text_block(&payload).unwrap(), "Consider adding a summary.");
    }

    #[test]
    fn test_first_text_block_missing() {
        let payload = json!({"content": []});
        assert!(matches!(first_text_block(&payload), Err(ModelError::InvalidResponse(_))));

        let error_payload = json!({"type": "error"});
        assert!(first_text_block(&error_payload).is_err());
    }

    #[test]
    fn test_unreachable_endpoint_is_request_failure() {
        let config = ModelConfig {
            api_key: "sk-test".to_string(),
            endpoint: "http://127.0.0.1:9/v1/messages".to_string(),
            timeout: 5,
            ..Default::default()
        };
        let client = AnthropicClient::new(config).unwrap();

        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(client.complete("hello", 16))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(ModelError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_complete_returns_first_text_block() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"content":[{"type":"text","text":"Consider adding a glossary."}],"usage":{"output_tokens":6}}"#,
        )
        .await;

        let text = client_for(&base, 5).complete("hello", 16).await.unwrap();
        assert_eq!(text, "Consider adding a glossary.");
    }

    #[tokio::test]
    async fn test_complete_rate_limited() {
        let base = serve_once("429 Too Many Requests", "application/json", r#"{"type":"error"}"#).await;
        let result = client_for(&base, 5).complete("hello", 16).await;

        assert_eq!(result, Err(ModelError::RateLimited));
    }

    #[tokio::test]
    async fn test_complete_api_error_keeps_status_and_body() {
        let base = serve_once("500 Internal Server Error", "text/plain", "overloaded").await;
        let result = client_for(&base, 5).complete("hello", 16).await;

        assert_eq!(result, Err(ModelError::Api { status: 500, body: "overloaded".to_string() }));
    }

    #[tokio::test]
    async fn test_complete_non_json_body_is_invalid_response() {
        let base = serve_once("200 OK", "application/json", "not json at all").await;
        let result = client_for(&base, 5).complete("hello", 16).await;

        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_complete_without_text_block_is_invalid_response() {
        let base = serve_once("200 OK", "application/json", r#"{"content":[{"type":"tool_use"}]}"#).await;
        let result = client_for(&base, 5).complete("hello", 16).await;

        assert_eq!(result, Err(ModelError::InvalidResponse("no text content in response".to_string())));
    }

    #[tokio::test]
    async fn test_complete_times_out() {
        let base = serve_silence().await;
        let result = client_for(&base, 1).complete("hello", 16).await;

        assert_eq!(result, Err(ModelError::Timeout { timeout: 1 }));
    }
}
