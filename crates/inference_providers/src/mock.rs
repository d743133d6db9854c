//! Mock implementation of InferenceProvider for testing
//!
//! This module provides a mock provider that returns canned responses
//! without any network access, and records every request it receives.

use crate::{
    ChatCompletionParams, ChatCompletionResponse, ChatCompletionResponseChoice,
    ChatResponseMessage, CompletionError, InferenceProvider, TokenUsage,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Request matcher for conditional responses
#[derive(Clone)]
pub enum RequestMatcher {
    /// Match any request
    Any,
    /// Match requests whose user prompt contains the given text
    PromptContains(String),
}

impl RequestMatcher {
    /// Check if this matcher matches the given parameters
    pub fn matches(&self, params: &ChatCompletionParams) -> bool {
        match self {
            Self::Any => true,
            Self::PromptContains(needle) => params
                .messages
                .iter()
                .any(|msg| msg.content.contains(needle.as_str())),
        }
    }
}

/// Template for generating responses
#[derive(Clone)]
pub enum ResponseTemplate {
    /// Successful completion with the given content
    Content(String),
    /// Successful completion with no `message.content`
    Empty,
    /// Upstream answered with a non-2xx status
    HttpError { status_code: u16, message: String },
    /// Upstream could not be reached
    Transport(String),
}

impl ResponseTemplate {
    pub fn new(content: impl Into<String>) -> Self {
        Self::Content(content.into())
    }

    pub fn http_error(status_code: u16, message: impl Into<String>) -> Self {
        Self::HttpError {
            status_code,
            message: message.into(),
        }
    }

    fn generate(&self, params: &ChatCompletionParams) -> Result<ChatCompletionResponse, CompletionError> {
        let content = match self {
            Self::Content(content) => Some(content.clone()),
            Self::Empty => None,
            Self::HttpError {
                status_code,
                message,
            } => {
                return Err(CompletionError::HttpError {
                    status_code: *status_code,
                    message: message.clone(),
                })
            }
            Self::Transport(message) => return Err(CompletionError::Transport(message.clone())),
        };

        // Rough estimate: 1 word ≈ 1 token
        let input_tokens = params
            .messages
            .iter()
            .map(|m| m.content.split_whitespace().count() as u32)
            .sum();
        let output_tokens = content
            .as_deref()
            .map(|c| c.split_whitespace().count() as u32)
            .unwrap_or(0);

        Ok(ChatCompletionResponse {
            id: Some("gen-mock".to_string()),
            model: Some(params.model.clone()),
            choices: Some(vec![ChatCompletionResponseChoice {
                index: Some(0),
                message: Some(ChatResponseMessage {
                    role: Some("assistant".to_string()),
                    content,
                }),
                finish_reason: Some("stop".to_string()),
            }]),
            usage: Some(TokenUsage::new(input_tokens, output_tokens)),
        })
    }
}

/// Configuration for a single expectation
struct MockExpectation {
    matcher: RequestMatcher,
    response: ResponseTemplate,
}

/// Configuration for the mock provider
struct MockConfig {
    expectations: Vec<MockExpectation>,
    default_response: ResponseTemplate,
}

/// Builder for configuring a single expectation
pub struct MockExpectationBuilder {
    config: Arc<Mutex<MockConfig>>,
    matcher: RequestMatcher,
}

impl MockExpectationBuilder {
    /// Set the response for this expectation
    pub async fn respond_with(self, response: ResponseTemplate) {
        let mut config = self.config.lock().await;
        config.expectations.push(MockExpectation {
            matcher: self.matcher,
            response,
        });
    }
}

/// Mock provider that implements InferenceProvider for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Configuration for conditional responses (thread-safe)
    config: Arc<Mutex<MockConfig>>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<ChatCompletionParams>>>,
}

impl MockProvider {
    /// Create a new mock provider that answers every request with a short summary
    pub fn new() -> Self {
        Self::with_default_response(ResponseTemplate::new("- 1.\n- 2.\n- 3."))
    }

    pub fn with_default_response(response: ResponseTemplate) -> Self {
        Self {
            config: Arc::new(Mutex::new(MockConfig {
                expectations: Vec::new(),
                default_response: response,
            })),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a conditional response for a specific matcher
    pub fn when(&self, matcher: RequestMatcher) -> MockExpectationBuilder {
        MockExpectationBuilder {
            config: self.config.clone(),
            matcher,
        }
    }

    /// Set the default response for requests that don't match any expectation
    pub async fn set_default_response(&self, response: ResponseTemplate) {
        let mut config = self.config.lock().await;
        config.default_response = response;
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<ChatCompletionParams> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceProvider for MockProvider {
    async fn chat_completion(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        self.requests.lock().await.push(params.clone());

        // Find matching expectation in config
        let template = {
            let config = self.config.lock().await;
            config
                .expectations
                .iter()
                .find(|exp| exp.matcher.matches(&params))
                .map(|exp| exp.response.clone())
                .unwrap_or_else(|| config.default_response.clone())
        };

        template.generate(&params)
    }
}
