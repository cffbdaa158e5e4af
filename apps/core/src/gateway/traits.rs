use crate::error::AppError;
use async_trait::async_trait;

/// One completion request as the analyzer sees it, before any
/// provider-specific parameter negotiation.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System-role instruction (the behavioral contract).
    pub system_prompt: String,
    /// User-role message (the raw journal content).
    pub user_prompt: String,
    /// Preferred sampling temperature. The gateway may substitute the
    /// provider's guaranteed-supported value when this one is rejected.
    pub temperature: Option<f64>,
    /// Output-length cap. Which request field carries it (if any) is
    /// decided by the negotiation matrix.
    pub max_tokens: Option<u32>,
}

/// Defines the public interface of a completion provider.
///
/// This trait abstracts the remote service so the analyzer can be exercised
/// against mock backends (fixed replies, forced failures) in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync + 'static {
    /// Whether a credential is present. Checkable before any network
    /// attempt; `false` is a supported steady state, not an error.
    fn is_configured(&self) -> bool;

    /// Deliver one completion, returning the raw parsed response body.
    async fn complete(&self, request: CompletionRequest) -> Result<serde_json::Value, AppError>;
}
