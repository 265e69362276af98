//! Document ingestion: embed and upsert one document as a single point

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::Document;

/// Embeds documents and stores them in the vector store.
pub struct Ingestor {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
}

impl Ingestor {
    /// Create a new ingestor
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStoreProvider>) -> Self {
        Self { embedder, store }
    }

    /// Insert one document, returning its freshly assigned identifier.
    ///
    /// The full document (including `text`) is stored as the point payload
    /// so retrieval can rebuild snippets from it. A retried call generates
    /// a new identifier and therefore a duplicate point; callers needing
    /// exactly-once ingestion must dedup on their side.
    pub async fn insert(&self, document: Document) -> Result<Uuid> {
        self.store.ensure_collection().await?;

        let text = document.text.trim().to_string();
        if text.is_empty() {
            return Err(Error::InvalidInput("document text is empty".to_string()));
        }

        let mut vectors = self.embedder.embed_batch(&[text]).await?;
        let vector = vectors.remove(0);

        let id = Uuid::new_v4();
        let payload = serde_json::to_value(&document)
            .map_err(|e| Error::Internal(format!("failed to serialize payload: {}", e)))?;

        self.store.upsert(id, vector, payload).await?;

        tracing::info!(
            "Ingested document {} ({} chars, title: {:?})",
            id,
            document.text.len(),
            document.title
        );
        Ok(id)
    }
}
