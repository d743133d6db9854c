//! Inference providers crate for talking to chat-completion backends
//!
//! This crate owns the OpenAI-compatible wire format and the single network
//! boundary of the service. Callers depend on the [`InferenceProvider`] trait,
//! so the real HTTP provider can be swapped for [`MockProvider`] in tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use inference_providers::{ChatCompletionParams, ChatMessage, InferenceProvider};
//!
//! async fn example<P: InferenceProvider>(provider: P) {
//!     let params = ChatCompletionParams {
//!         model: "openrouter/auto".to_string(),
//!         messages: vec![ChatMessage::user("Hello")],
//!         max_tokens: Some(100),
//!         temperature: Some(0.2),
//!     };
//!
//!     let response = provider.chat_completion(params).await?;
//!     println!("{}", response.first_content().unwrap_or_default());
//! }
//! ```

pub mod mock;
pub mod models;
pub mod openai_compatible;

use async_trait::async_trait;

// Re-export commonly used types for convenience
pub use mock::MockProvider;
pub use models::{
    ChatCompletionParams, ChatCompletionResponse, ChatCompletionResponseChoice, ChatMessage,
    ChatResponseMessage, CompletionError, MessageRole, TokenUsage,
};
pub use openai_compatible::OpenAiCompatibleProvider;

#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Performs a single non-streaming chat completion request
    ///
    /// Implementations make exactly one attempt; retries, if ever wanted,
    /// belong to the caller.
    async fn chat_completion(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, CompletionError>;
}
