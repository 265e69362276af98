//! Vector store provider trait

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;

/// A single nearest-neighbor match: payload plus similarity score.
/// Vectors are never returned from searches.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Stored point payload (the ingested document)
    pub payload: Value,
    /// Similarity score, higher is more similar under cosine
    pub score: f32,
}

/// Trait for vector storage and similarity search over one collection.
///
/// Implementations:
/// - `QdrantStore`: Qdrant over its REST API
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Liveness probe. Never errors; any failure reads as `false`.
    async fn ready(&self) -> bool;

    /// Create the collection if absent; idempotent and safe under
    /// concurrent callers (a racing create that loses is swallowed).
    async fn ensure_collection(&self) -> Result<()>;

    /// Insert or replace one point, blocking until the store acknowledges
    /// the write so an immediately following search will find it.
    async fn upsert(&self, id: Uuid, vector: Vec<f32>, payload: Value) -> Result<()>;

    /// Return up to `limit` nearest points, best match first, payloads
    /// attached. An absent collection yields an empty list, not an error.
    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
