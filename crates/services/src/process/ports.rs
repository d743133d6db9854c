use async_trait::async_trait;
use inference_providers::{ChatMessage, CompletionError, TokenUsage};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

pub const SYSTEM_PROMPT: &str = "You are helpful, concise, and accurate.";
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

// Domain types defined directly here (following dependency inversion)

/// How the caller wants the input treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Let the classifier decide
    #[default]
    Auto,
    Text,
    Code,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl DetailLevel {
    /// Completion token budget for this level of detail
    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Short => 400,
            Self::Medium => 800,
            Self::Detailed => 1200,
        }
    }
}

/// Language of the client UI. Accepted and validated, not used in prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fa,
}

/// Kind of input after resolving `auto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedKind {
    Text,
    Code,
}

impl InputMode {
    /// Kind named explicitly by the caller, `None` for `auto`
    pub fn explicit_kind(self) -> Option<ResolvedKind> {
        match self {
            Self::Auto => None,
            Self::Text => Some(ResolvedKind::Text),
            Self::Code => Some(ResolvedKind::Code),
        }
    }
}

/// A validated process request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub input: String,
    pub mode: InputMode,
    pub detail: DetailLevel,
    pub language: Language,
}

impl ProcessRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            mode: InputMode::default(),
            detail: DetailLevel::default(),
            language: Language::default(),
        }
    }

    pub fn with_mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_detail(mut self, detail: DetailLevel) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    /// Kind the input was treated as
    pub mode: ResolvedKind,
    pub detail: DetailLevel,
    /// Markdown produced by the model
    pub result: String,
}

/// Input to the completion client. `None` fields take the client defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// Generated text, empty when the provider returned no content
    pub text: String,
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum CompletionClientError {
    #[error("Upstream completion failed: {0}")]
    Upstream(#[from] CompletionError),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionClientError),
}

// Port/Trait definitions (no implementations!)

/// Narrow capability over the remote completion endpoint
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, CompletionClientError>;
}

#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait ProcessService: Send + Sync {
    /// Classify (when asked to), build the prompt and run one completion
    async fn process(&self, request: ProcessRequest) -> Result<ProcessResponse, ProcessError>;
}
