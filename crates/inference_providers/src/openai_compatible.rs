//! OpenAI-compatible provider implementation
//!
//! Handles any provider that speaks OpenAI's `/chat/completions` format,
//! including OpenRouter (the default), OpenAI itself, Together AI and Groq.

use crate::{ChatCompletionParams, ChatCompletionResponse, CompletionError, InferenceProvider};
use async_trait::async_trait;
use config::OpenRouterConfig;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use tracing::debug;

/// Longest slice of an upstream error body carried in [`CompletionError::HttpError`]
const MAX_ERROR_BODY_CHARS: usize = 512;

/// OpenAI-compatible provider
///
/// Sends authenticated requests with optional OpenRouter attribution headers
/// (`HTTP-Referer`, `X-Title`).
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenRouterConfig) -> Result<Self, CompletionError> {
        // Only the connect phase is bounded; the full request uses the transport default.
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .map_err(|e| CompletionError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Full URL of the chat completion endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_headers(&self) -> Result<HeaderMap, CompletionError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Authorization header
        let auth_value = format!("Bearer {}", self.config.api_key);
        let header_value = HeaderValue::from_str(&auth_value)
            .map_err(|e| CompletionError::InvalidConfig(format!("Invalid API key format: {e}")))?;
        headers.insert(AUTHORIZATION, header_value);

        // Attribution headers (if provided)
        if let Some(referer) = &self.config.referer {
            let value = HeaderValue::from_str(referer)
                .map_err(|e| CompletionError::InvalidConfig(format!("Invalid referer: {e}")))?;
            headers.insert("HTTP-Referer", value);
        }
        if let Some(title) = &self.config.title {
            let value = HeaderValue::from_str(title)
                .map_err(|e| CompletionError::InvalidConfig(format!("Invalid title: {e}")))?;
            headers.insert("X-Title", value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl InferenceProvider for OpenAiCompatibleProvider {
    async fn chat_completion(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let url = self.chat_completions_url();
        let headers = self.build_headers()?;

        debug!(
            model = %params.model,
            max_tokens = ?params.max_tokens,
            temperature = ?params.temperature,
            messages = params.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&params)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response body: {e}"));
            return Err(CompletionError::HttpError {
                status_code,
                message: error_text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        // Any JSON document is accepted; only a body that is not JSON at all is an error
        let body: serde_json::Value = serde_json::from_slice(&raw_bytes).map_err(|e| {
            CompletionError::InvalidResponse(format!("Failed to parse response: {e}"))
        })?;

        Ok(ChatCompletionResponse::from_json(&body))
    }
}
