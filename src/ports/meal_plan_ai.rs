//! AI completion port for the meal planner.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the AI provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AiError {
    /// No API key configured, or the provider latched itself off after
    /// an authentication failure.
    #[error("AI provider is disabled")]
    Disabled,

    #[error("AI request timed out")]
    Timeout,

    #[error("AI authentication failed")]
    AuthenticationFailed,

    #[error("AI rate limit exceeded")]
    RateLimited,

    #[error("AI request failed: {0}")]
    RequestFailed(String),

    #[error("AI returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Port for chat-completion requests.
///
/// Every error is recoverable for the caller: the meal planner falls
/// back to the deterministic rotation on any failure.
#[async_trait]
pub trait MealPlanAi: Send + Sync {
    /// Whether calling `complete` has any chance of succeeding.
    fn is_available(&self) -> bool;

    /// Run one completion and return the raw text of the first choice.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}
