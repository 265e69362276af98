//! Qdrant vector store over its REST API
//!
//! One named collection with cosine distance. Upserts run with `wait=true`
//! so the write is durable before the call returns, and searches request
//! payloads but not vectors.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::config::QdrantConfig;
use crate::error::{Error, Result};
use crate::providers::vector_store::{SearchHit, VectorStoreProvider};

/// Liveness probes should answer fast or not at all
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Vector store provider backed by Qdrant's REST API
pub struct QdrantStore {
    config: QdrantConfig,
    dimensions: usize,
    client: reqwest::Client,
}

#[derive(serde::Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(serde::Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CollectionInfoResponse {
    #[serde(default)]
    result: CollectionInfo,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CollectionInfo {
    #[serde(default)]
    config: CollectionConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CollectionConfig {
    #[serde(default)]
    params: CollectionParams,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CollectionParams {
    #[serde(default)]
    vectors: StoredVectorParams,
}

#[derive(Debug, Default, serde::Deserialize)]
struct StoredVectorParams {
    size: Option<usize>,
}

#[derive(serde::Serialize)]
struct UpsertRequest {
    points: Vec<PointStruct>,
}

#[derive(serde::Serialize)]
struct PointStruct {
    id: Uuid,
    vector: Vec<f32>,
    payload: Value,
}

#[derive(serde::Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
    with_vector: bool,
}

#[derive(serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

#[derive(serde::Deserialize)]
struct ScoredPoint {
    score: f32,
    #[serde(default)]
    payload: Option<Value>,
}

impl QdrantStore {
    /// Create a new store client for one collection of `dimensions`-sized
    /// vectors. No connection is made here.
    pub fn new(config: QdrantConfig, dimensions: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            dimensions,
            client,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.config.url, self.config.collection)
    }

    /// Probe the collection. `Ok(Some(info))` when it exists, `Ok(None)`
    /// when absent.
    async fn collection_info(&self) -> Result<Option<CollectionInfoResponse>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| Error::unavailable("qdrant", e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unavailable {
                service: "qdrant",
                message: format!("collection probe failed ({}): {}", status, body),
            });
        }

        // The info body is only used for the dimensionality check, so parse
        // it leniently
        let info = response.json().await.unwrap_or_default();
        Ok(Some(info))
    }

    fn check_stored_dimensions(&self, info: &CollectionInfoResponse) -> Result<()> {
        if let Some(size) = info.result.config.params.vectors.size {
            if size != self.dimensions {
                return Err(Error::Config(format!(
                    "collection '{}' stores {}-dim vectors but EMBEDDINGS_DIM is {}; \
                     drop the collection or fix the configuration",
                    self.config.collection, size, self.dimensions
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantStore {
    async fn ready(&self) -> bool {
        let probe = self
            .client
            .get(format!("{}/healthz", self.config.url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;
        matches!(probe, Ok(response) if response.status().is_success())
    }

    async fn ensure_collection(&self) -> Result<()> {
        if let Some(info) = self.collection_info().await? {
            return self.check_stored_dimensions(&info);
        }

        tracing::info!(
            "Creating collection '{}' ({} dims, cosine)",
            self.config.collection,
            self.dimensions
        );
        let request = CreateCollectionRequest {
            vectors: VectorParams {
                size: self.dimensions,
                distance: "Cosine",
            },
        };
        let response = self
            .client
            .put(self.collection_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::unavailable("qdrant", e))?;

        if response.status().is_success() {
            return Ok(());
        }

        // A concurrent caller may have created the collection between the
        // probe and our create; re-probe and treat that race as success.
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if let Some(info) = self.collection_info().await? {
            tracing::debug!("Collection create lost a benign race, already exists");
            return self.check_stored_dimensions(&info);
        }

        Err(Error::Unavailable {
            service: "qdrant",
            message: format!("collection create failed ({}): {}", status, body),
        })
    }

    async fn upsert(&self, id: Uuid, vector: Vec<f32>, payload: Value) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(Error::Config(format!(
                "vector has {} dimensions, collection '{}' expects {}",
                vector.len(),
                self.config.collection,
                self.dimensions
            )));
        }

        let request = UpsertRequest {
            points: vec![PointStruct {
                id,
                vector,
                payload,
            }],
        };

        // wait=true blocks until the write is durable, so a search issued
        // right after this call will see the point
        let response = self
            .client
            .put(format!("{}/points?wait=true", self.collection_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::unavailable("qdrant", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unavailable {
                service: "qdrant",
                message: format!("upsert failed ({}): {}", status, body),
            });
        }

        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>> {
        let request = SearchRequest {
            vector,
            limit,
            with_payload: true,
            with_vector: false,
        };

        let response = self
            .client
            .post(format!("{}/points/search", self.collection_url()))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::unavailable("qdrant", e))?;

        // No collection yet means nothing has been ingested
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Unavailable {
                service: "qdrant",
                message: format!("search failed ({}): {}", status, body),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("unparsable search response: {}", e)))?;

        Ok(body
            .result
            .into_iter()
            .map(|point| SearchHit {
                payload: point.payload.unwrap_or(Value::Null),
                score: point.score,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}
