//! Core of the LexiMind API: input classification, prompt construction and
//! the orchestration of a single completion call.

pub mod classifier;
pub mod process;
pub mod prompt;

pub use classifier::{classify, classify_with_reason, Classification};
pub use process::ports::{
    CompletionClient, DetailLevel, InputMode, Language, ProcessError, ProcessRequest,
    ProcessResponse, ProcessService, ResolvedKind,
};
pub use process::{ProcessServiceImpl, ProviderCompletionClient};

#[cfg(any(test, feature = "test-mocks"))]
pub use process::ports::{MockCompletionClient, MockProcessService};
