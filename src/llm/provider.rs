use async_trait::async_trait;

use crate::core::errors::ApiError;

/// Generation boundary: prompt text in, response text out.
///
/// One synchronous call per turn; transport errors propagate to the
/// caller and there is no internal retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> Result<bool, ApiError>;

    /// Generate a response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}
