use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of the downstream text-generation service. These never
/// reach end-user text; the assistant substitutes a canned fallback.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("request timed out")]
    Timeout,
    #[error("upstream returned status {status}")]
    Upstream { status: u16, detail: String },
    #[error("response envelope was malformed: {0}")]
    MalformedResponse(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("no api key configured")]
    MissingCredentials,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
