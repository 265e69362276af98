//! Query-time retrieval: embed the query, search, normalize hits into sources

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, SearchHit, VectorStoreProvider};
use crate::types::Source;

/// Retrieves the top-k most similar documents for a query.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            config,
        }
    }

    /// Retrieve up to `k` sources for `query`, best match first.
    ///
    /// `k` defaults to the configured top-k. The returned order is the
    /// store's similarity ranking and is load-bearing: the prompt numbers
    /// sources in this order and generated citations refer to those
    /// numbers. An empty or absent collection yields an empty list.
    pub async fn retrieve(&self, query: &str, k: Option<usize>) -> Result<Vec<Source>> {
        let k = k.unwrap_or(self.config.top_k);
        if k == 0 {
            return Err(Error::InvalidInput("top_k must be positive".to_string()));
        }

        let query_vector = self.embedder.embed(query).await?;
        let hits = self.store.search(query_vector, k).await?;

        tracing::debug!("Retrieved {} hits for query ({} requested)", hits.len(), k);
        Ok(hits
            .into_iter()
            .map(|hit| self.hit_to_source(hit))
            .collect())
    }

    /// Normalize one search hit into a [`Source`], truncating the snippet
    /// to the configured character budget (mid-word cuts are fine).
    ///
    /// Each payload field degrades on its own: a missing or non-string
    /// `title` becomes an empty string without touching the snippet, so one
    /// malformed metadata field never erases the document text.
    fn hit_to_source(&self, hit: SearchHit) -> Source {
        let snippet: String = string_field(&hit.payload, "text")
            .chars()
            .take(self.config.max_snippet_chars)
            .collect();

        Source {
            title: string_field(&hit.payload, "title"),
            url: string_field(&hit.payload, "url"),
            source: string_field(&hit.payload, "source"),
            published_date: string_field(&hit.payload, "published_date"),
            distance: hit.score,
            snippet,
        }
    }
}

/// Payload field as a string, empty when absent or not a string
fn string_field(payload: &serde_json::Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}
