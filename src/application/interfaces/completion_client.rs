use async_trait::async_trait;

use crate::domain::{AnalysisRequest, InvokeError};

/// Sends a single completion request to an LLM provider and returns the
/// raw response text.
///
/// One call means one attempt: implementors never retry, never classify,
/// and never rewrite the model output. Retry scheduling lives in
/// [`crate::application::RetryPolicy`] so every transport (HTTP, canned,
/// test stubs) is retried by the same rules.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &AnalysisRequest) -> Result<String, InvokeError>;
}
