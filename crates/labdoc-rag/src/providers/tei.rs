//! Remote embedding provider (text-embeddings-inference style)
//!
//! Calls the service's `/embed` endpoint: `{"inputs": [...]}` in, a list of
//! equal-length float vectors out, same order. The service normalizes
//! embeddings, so vectors arrive unit-length.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;

/// Embedding provider backed by a TEI-compatible HTTP service
pub struct TeiEmbedder {
    config: EmbeddingConfig,
    /// Built lazily on first use and reused for the process lifetime.
    /// Concurrent first calls initialize it exactly once.
    client: OnceCell<reqwest::Client>,
}

#[derive(serde::Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
}

impl TeiEmbedder {
    /// Create a new embedder. No connection is made until the first call.
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&reqwest::Client> {
        self.client
            .get_or_try_init(|| async {
                tracing::debug!("Initializing embeddings HTTP client");
                reqwest::Client::builder()
                    .timeout(self.config.timeout())
                    .build()
                    .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))
            })
            .await
    }
}

#[async_trait]
impl EmbeddingProvider for TeiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(Error::InvalidInput("no texts to embed".to_string()));
        }
        if let Some(pos) = texts.iter().position(|t| t.trim().is_empty()) {
            return Err(Error::InvalidInput(format!(
                "text at position {} is blank",
                pos
            )));
        }

        let client = self.client().await?;
        let response = client
            .post(format!("{}/embed", self.config.base_url))
            .json(&EmbedRequest { inputs: texts })
            .send()
            .await
            .map_err(|e| Error::unavailable("embeddings", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unavailable {
                service: "embeddings",
                message: format!("embed request failed ({}): {}", status, body),
            });
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("unexpected embeddings response shape: {}", e)))?;

        if vectors.len() != texts.len() {
            return Err(Error::Internal(format!(
                "embeddings service returned {} vectors for {} inputs",
                vectors.len(),
                texts.len()
            )));
        }
        for vector in &vectors {
            if vector.len() != self.config.dimensions {
                return Err(Error::Internal(format!(
                    "embeddings service returned {}-dim vector, expected {}",
                    vector.len(),
                    self.config.dimensions
                )));
            }
        }

        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "tei"
    }
}
