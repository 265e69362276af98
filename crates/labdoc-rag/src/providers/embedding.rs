//! Embedding provider trait

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Trait for turning text into fixed-length normalized vectors.
///
/// Implementations:
/// - `TeiEmbedder`: remote text-embeddings-inference service
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts in one backend call.
    ///
    /// Returns one vector per input, in input order, each of
    /// [`dimensions`](Self::dimensions) length and unit L2 norm.
    ///
    /// Fails with `InvalidInput` on an empty batch or any blank (all
    /// whitespace) string; blank strings are rejected rather than embedded
    /// as empty text. Fails with `Unavailable` when the backend cannot be
    /// reached, never silently returning zero-vectors.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text. Convenience over [`embed_batch`](Self::embed_batch).
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        if vectors.is_empty() {
            return Err(Error::Internal(
                "embedding provider returned no vector for one input".to_string(),
            ));
        }
        Ok(vectors.remove(0))
    }

    /// Vector dimensionality produced by this provider
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
