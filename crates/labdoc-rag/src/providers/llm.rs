//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for non-streaming text completion.
///
/// Implementations:
/// - `OllamaGenerator`: local Ollama server (`/api/generate`)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a fully assembled prompt and return the trimmed completion.
    ///
    /// Fails with `Unavailable` on timeout or connection failure, and with
    /// `Generation` when the backend is reachable but replies with an error
    /// status or an unparsable body.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier used for generation
    fn model(&self) -> &str;
}
