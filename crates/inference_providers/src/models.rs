use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message author in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single message in a chat completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Parameters for a chat completion request (OpenAI wire format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionParams {
    /// Model ID to use for the completion
    pub model: String,

    /// List of messages comprising the conversation so far
    pub messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature between 0 and 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Token usage reported by the provider.
///
/// Providers are inconsistent about which counters they return, so every
/// field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            total_tokens: Some(prompt_tokens + completion_tokens),
        }
    }

    /// Read whichever counters are non-negative integers; `None` unless `value` is an object
    pub fn from_json(value: &Value) -> Option<Self> {
        let usage = value.as_object()?;
        let counter = |name: &str| {
            usage
                .get(name)
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
        };
        Some(Self {
            prompt_tokens: counter("prompt_tokens"),
            completion_tokens: counter("completion_tokens"),
            total_tokens: counter("total_tokens"),
        })
    }
}

/// Message returned inside a completion choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponseChoice {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Chat completion response envelope.
///
/// Parsed leniently: a 2xx body that lacks any of these fields still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Model that actually served the request (may differ from the requested one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Option<Vec<ChatCompletionResponseChoice>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl ChatCompletionResponse {
    /// Decode an upstream body without rejecting it for its shape.
    ///
    /// Only `choices[0].message.content` matters to callers; it is kept when it
    /// is a string. `id`, `model` and `usage` are copied when they have the
    /// expected type and dropped otherwise.
    pub fn from_json(body: &Value) -> Self {
        let string_at = |pointer: &str| {
            body.pointer(pointer)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let choices = body.pointer("/choices/0").map(|_| {
            vec![ChatCompletionResponseChoice {
                index: body
                    .pointer("/choices/0/index")
                    .and_then(Value::as_u64)
                    .and_then(|n| u32::try_from(n).ok()),
                message: Some(ChatResponseMessage {
                    role: string_at("/choices/0/message/role"),
                    content: string_at("/choices/0/message/content"),
                }),
                finish_reason: string_at("/choices/0/finish_reason"),
            }]
        });

        Self {
            id: string_at("/id"),
            model: string_at("/model"),
            choices,
            usage: body.get("usage").and_then(TokenUsage::from_json),
        }
    }

    /// Content of the first choice, if the provider returned any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .as_deref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

/// Errors raised while talking to an inference provider
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Failed to reach provider: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {status_code}: {message}")]
    HttpError { status_code: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}
