//! Ollama generation provider
//!
//! Non-streaming completion via `POST /api/generate` with
//! `{"model", "prompt", "stream": false}`. The reply's `response` field
//! holds the full completion; a reply that omits it is coerced to the
//! empty string rather than treated as an error (matching the service's
//! historical behavior), while an unparsable body is a `Generation` error.

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;

/// LLM provider backed by a local Ollama server
pub struct OllamaGenerator {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl GenerateResponse {
    /// Completion text as returned to callers: the `response` field,
    /// trimmed. A reply that omitted the field is already the empty string
    /// here.
    fn into_text(self) -> String {
        self.response.trim().to_string()
    }
}

impl OllamaGenerator {
    /// Create a new generator with the configured long-running timeout
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LlmProvider for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.config.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::unavailable("ollama", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "ollama returned {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("unparsable ollama response: {}", e)))?;

        Ok(body.into_text())
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
