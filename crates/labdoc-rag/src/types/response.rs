//! Response types for the HTTP boundary

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A retrieved source backing an answer.
///
/// Derived per query from a matched point's payload; never persisted.
/// Missing payload fields map to empty strings so the chat front-end can
/// render every source uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Document title, empty if unknown
    pub title: String,
    /// Document URL, empty if unknown
    pub url: String,
    /// Origin label, empty if unknown
    pub source: String,
    /// Publication date, empty if unknown
    pub published_date: String,
    /// Raw similarity score from the store (cosine: higher is closer)
    pub distance: f32,
    /// Document text truncated to the configured snippet length
    pub snippet: String,
}

/// Answer with the sources that grounded it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text
    pub answer: String,
    /// Sources in retrieval order; the prompt numbers them 1-based in this
    /// same order, so prose citations like `[2]` index into this list
    pub sources: Vec<Source>,
}

/// Acknowledgment for a successful ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Always "upserted"
    pub result: String,
    /// Identifier assigned to the stored point
    pub id: Uuid,
}

impl IngestResponse {
    /// Acknowledge an upserted point
    pub fn upserted(id: Uuid) -> Self {
        Self {
            result: "upserted".to_string(),
            id,
        }
    }
}

/// Health report aggregating backend readiness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when every probed backend is reachable, "degraded" otherwise
    pub status: String,
    /// Vector store liveness
    pub qdrant: bool,
}

impl HealthResponse {
    /// Build a report from individual probe results
    pub fn from_probes(qdrant: bool) -> Self {
        Self {
            status: if qdrant { "ok" } else { "degraded" }.to_string(),
            qdrant,
        }
    }
}
