pub mod ports;

use crate::classifier::{classify_with_reason, Classification};
use crate::prompt::build_prompt;
use async_trait::async_trait;
use config::OpenRouterConfig;
use inference_providers::{ChatCompletionParams, ChatMessage, InferenceProvider};
use ports::{
    CompletionClient, CompletionClientError, CompletionRequest, CompletionResult, ProcessError,
    ProcessRequest, ProcessResponse, ProcessService, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    SYSTEM_PROMPT,
};
use std::sync::Arc;

/// [`CompletionClient`] backed by an [`InferenceProvider`].
///
/// Fills in the model from configuration and the token/temperature defaults,
/// then makes exactly one provider call.
pub struct ProviderCompletionClient {
    provider: Arc<dyn InferenceProvider>,
    default_model: String,
}

impl ProviderCompletionClient {
    pub fn new(provider: Arc<dyn InferenceProvider>, config: &OpenRouterConfig) -> Self {
        Self {
            provider,
            default_model: config.model.clone(),
        }
    }
}

#[async_trait]
impl CompletionClient for ProviderCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, CompletionClientError> {
        let params = ChatCompletionParams {
            model: request.model.unwrap_or_else(|| self.default_model.clone()),
            messages: request.messages,
            max_tokens: Some(request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)),
            temperature: Some(request.temperature.unwrap_or(DEFAULT_TEMPERATURE)),
        };

        let response = self.provider.chat_completion(params).await?;

        // A response without content is passed on as an empty result
        let text = response.first_content().unwrap_or_default().to_string();
        if text.is_empty() {
            tracing::warn!(model = ?response.model, "Provider returned no completion content");
        }

        Ok(CompletionResult {
            text,
            model: response.model,
            usage: response.usage,
        })
    }
}

pub type Classifier = fn(&str) -> Classification;

pub struct ProcessServiceImpl {
    completion_client: Arc<dyn CompletionClient>,
    classifier: Classifier,
}

impl ProcessServiceImpl {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self {
            completion_client,
            classifier: classify_with_reason,
        }
    }

    /// Replace the classifier used for `auto` requests
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }
}

#[async_trait]
impl ProcessService for ProcessServiceImpl {
    async fn process(&self, request: ProcessRequest) -> Result<ProcessResponse, ProcessError> {
        let kind = match request.mode.explicit_kind() {
            Some(kind) => kind,
            None => {
                let classification = (self.classifier)(&request.input);
                tracing::debug!(
                    kind = ?classification.kind,
                    heuristic = ?classification.matched,
                    "Classified input"
                );
                classification.kind
            }
        };

        let prompt = build_prompt(kind, &request.input, request.detail);

        let completion_request = CompletionRequest {
            max_tokens: Some(request.detail.max_tokens()),
            ..CompletionRequest::new(vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ])
        };

        tracing::debug!(
            kind = ?kind,
            detail = ?request.detail,
            language = ?request.language,
            input_chars = request.input.chars().count(),
            "Requesting completion"
        );

        let completion = self.completion_client.complete(completion_request).await?;

        tracing::debug!(
            model = ?completion.model,
            usage = ?completion.usage,
            "Completion received"
        );

        Ok(ProcessResponse {
            mode: kind,
            detail: request.detail,
            result: completion.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inference_providers::{
        mock::{RequestMatcher, ResponseTemplate},
        CompletionError, MessageRole, MockProvider, TokenUsage,
    };
    use mockall::predicate::function;
    use ports::{DetailLevel, InputMode, MockCompletionClient, ResolvedKind};

    fn ok_result(text: &str) -> CompletionResult {
        CompletionResult {
            text: text.to_string(),
            model: Some("openrouter/auto".to_string()),
            usage: Some(TokenUsage::new(10, 5)),
        }
    }

    fn panicking_classifier(_: &str) -> Classification {
        panic!("classifier must not run for an explicit mode");
    }

    #[tokio::test]
    async fn test_max_tokens_follow_detail_for_both_kinds() {
        for (detail, expected) in [
            (DetailLevel::Short, 400),
            (DetailLevel::Medium, 800),
            (DetailLevel::Detailed, 1200),
        ] {
            for mode in [InputMode::Text, InputMode::Code] {
                let mut client = MockCompletionClient::new();
                client
                    .expect_complete()
                    .with(function(move |req: &CompletionRequest| {
                        req.max_tokens == Some(expected)
                    }))
                    .times(1)
                    .returning(|_| Ok(ok_result("done")));

                let service = ProcessServiceImpl::new(Arc::new(client));
                let response = service
                    .process(
                        ProcessRequest::new("some input")
                            .with_mode(mode)
                            .with_detail(detail),
                    )
                    .await
                    .unwrap();

                assert_eq!(response.detail, detail);
            }
        }
    }

    #[tokio::test]
    async fn test_sends_system_and_user_messages() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|req| {
                req.messages.len() == 2
                    && req.messages[0].role == MessageRole::System
                    && req.messages[0].content == SYSTEM_PROMPT
                    && req.messages[1].role == MessageRole::User
                    && req.messages[1].content.starts_with("You are an expert technical writer.")
                    && req.model.is_none()
                    && req.temperature.is_none()
            })
            .times(1)
            .returning(|_| Ok(ok_result("- summary")));

        let service = ProcessServiceImpl::new(Arc::new(client));
        let response = service
            .process(ProcessRequest::new("Plain prose about growth."))
            .await
            .unwrap();

        assert_eq!(
            response,
            ProcessResponse {
                mode: ResolvedKind::Text,
                detail: DetailLevel::Medium,
                result: "- summary".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_explicit_text_mode_skips_classifier() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|req| req.messages[1].content.contains("Text:"))
            .times(1)
            .returning(|_| Ok(ok_result("ok")));

        let service =
            ProcessServiceImpl::new(Arc::new(client)).with_classifier(panicking_classifier);
        let response = service
            .process(
                ProcessRequest::new("function add(a, b) { return a + b; }")
                    .with_mode(InputMode::Text),
            )
            .await
            .unwrap();

        assert_eq!(response.mode, ResolvedKind::Text);
    }

    #[tokio::test]
    async fn test_auto_mode_detects_code() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|req| req.messages[1].content.contains("Code:\n```\nconst x = 1;\n```"))
            .times(1)
            .returning(|_| Ok(ok_result("## Overview")));

        let service = ProcessServiceImpl::new(Arc::new(client));
        let response = service
            .process(ProcessRequest::new("const x = 1;"))
            .await
            .unwrap();

        assert_eq!(response.mode, ResolvedKind::Code);
        assert_eq!(response.result, "## Overview");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_single_attempt() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().times(1).returning(|_| {
            Err(CompletionClientError::Upstream(CompletionError::HttpError {
                status_code: 503,
                message: "overloaded".to_string(),
            }))
        });

        let service = ProcessServiceImpl::new(Arc::new(client));
        let err = service
            .process(ProcessRequest::new("hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProcessError::Completion(_)));
    }

    #[tokio::test]
    async fn test_provider_client_applies_defaults() {
        let provider = Arc::new(MockProvider::new());
        let mut config = OpenRouterConfig::new("sk-test", "http://localhost");
        config.model = "openai/gpt-4o-mini".to_string();
        let client = ProviderCompletionClient::new(provider.clone(), &config);

        let result = client
            .complete(CompletionRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .unwrap();

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "openai/gpt-4o-mini");
        assert_eq!(requests[0].max_tokens, Some(800));
        assert_eq!(requests[0].temperature, Some(0.2));
        assert_eq!(result.text, "- 1.\n- 2.\n- 3.");
        assert_eq!(result.model.as_deref(), Some("openai/gpt-4o-mini"));
        assert!(result.usage.is_some());
    }

    #[tokio::test]
    async fn test_provider_client_respects_overrides() {
        let provider = Arc::new(MockProvider::new());
        let config = OpenRouterConfig::new("sk-test", "http://localhost");
        let client = ProviderCompletionClient::new(provider.clone(), &config);

        client
            .complete(CompletionRequest {
                model: Some("anthropic/claude-3-haiku".to_string()),
                max_tokens: Some(1200),
                temperature: Some(0.7),
                ..CompletionRequest::new(vec![ChatMessage::user("hi")])
            })
            .await
            .unwrap();

        let request = &provider.requests().await[0];
        assert_eq!(request.model, "anthropic/claude-3-haiku");
        assert_eq!(request.max_tokens, Some(1200));
        assert_eq!(request.temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_provider_client_empty_content_is_empty_text() {
        let provider = Arc::new(MockProvider::with_default_response(ResponseTemplate::Empty));
        let config = OpenRouterConfig::new("sk-test", "http://localhost");
        let client = ProviderCompletionClient::new(provider, &config);

        let result = client
            .complete(CompletionRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .unwrap();

        assert_eq!(result.text, "");
    }

    #[tokio::test]
    async fn test_provider_client_propagates_failure_once() {
        let provider = Arc::new(MockProvider::new());
        provider
            .when(RequestMatcher::Any)
            .respond_with(ResponseTemplate::Transport("connection reset".to_string()))
            .await;
        let config = OpenRouterConfig::new("sk-test", "http://localhost");
        let client = ProviderCompletionClient::new(provider.clone(), &config);

        let err = client
            .complete(CompletionRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CompletionClientError::Upstream(CompletionError::Transport(_))
        ));
        assert_eq!(provider.request_count().await, 1);
    }
}
