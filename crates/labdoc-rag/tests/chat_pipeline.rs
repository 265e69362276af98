//! End-to-end pipeline tests with in-memory providers
//!
//! Exercises ingestion, retrieval, prompt assembly, and orchestration
//! through the provider traits, with a deterministic bag-of-words embedder
//! and a cosine-scoring in-memory store standing in for the real backends.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use labdoc_rag::config::RetrievalConfig;
use labdoc_rag::providers::{EmbeddingProvider, LlmProvider, SearchHit, VectorStoreProvider};
use labdoc_rag::{ChatEngine, Document, Error, Ingestor, Result, Retriever};

const DIMS: usize = 8;

/// Deterministic embedder: hashed bag of words, L2-normalized.
/// Similar texts share buckets, so cosine ranking behaves sensibly.
struct HashEmbedder;

fn embed_text(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; DIMS];
    for word in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let bucket: usize = word.bytes().map(|b| b as usize).sum::<usize>() % DIMS;
        vector[bucket] += 1.0;
    }
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(Error::InvalidInput("no texts to embed".to_string()));
        }
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::InvalidInput("blank text".to_string()));
        }
        Ok(texts.iter().map(|t| embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn name(&self) -> &str {
        "hash"
    }
}

/// In-memory store with cosine scoring, mirroring the Qdrant contract
#[derive(Default)]
struct MemStore {
    points: Mutex<Vec<(Uuid, Vec<f32>, Value)>>,
}

#[async_trait]
impl VectorStoreProvider for MemStore {
    async fn ready(&self) -> bool {
        true
    }

    async fn ensure_collection(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, id: Uuid, vector: Vec<f32>, payload: Value) -> Result<()> {
        if vector.len() != DIMS {
            return Err(Error::Config(format!(
                "vector has {} dimensions, expected {}",
                vector.len(),
                DIMS
            )));
        }
        let mut points = self.points.lock().unwrap();
        points.retain(|(existing, _, _)| *existing != id);
        points.push((id, vector, payload));
        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>> {
        let points = self.points.lock().unwrap();
        let mut hits: Vec<SearchHit> = points
            .iter()
            .map(|(_, stored, payload)| SearchHit {
                payload: payload.clone(),
                score: stored.iter().zip(&vector).map(|(a, b)| a * b).sum(),
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        Ok(hits)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Store whose every call fails as if the backend were down
struct DownStore;

#[async_trait]
impl VectorStoreProvider for DownStore {
    async fn ready(&self) -> bool {
        false
    }
    async fn ensure_collection(&self) -> Result<()> {
        Err(Error::Unavailable {
            service: "qdrant",
            message: "connection refused".to_string(),
        })
    }
    async fn upsert(&self, _: Uuid, _: Vec<f32>, _: Value) -> Result<()> {
        Err(Error::Unavailable {
            service: "qdrant",
            message: "connection refused".to_string(),
        })
    }
    async fn search(&self, _: Vec<f32>, _: usize) -> Result<Vec<SearchHit>> {
        Err(Error::Unavailable {
            service: "qdrant",
            message: "connection refused".to_string(),
        })
    }
    fn name(&self) -> &str {
        "down"
    }
}

/// LLM that records the prompt it was handed and echoes a canned answer
struct EchoLlm {
    prompts: Mutex<Vec<String>>,
}

impl EchoLlm {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for EchoLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("Paris [1]".to_string())
    }
    fn name(&self) -> &str {
        "echo"
    }
    fn model(&self) -> &str {
        "echo-1"
    }
}

/// LLM that always times out
struct DownLlm;

#[async_trait]
impl LlmProvider for DownLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(Error::Unavailable {
            service: "ollama",
            message: "request timed out".to_string(),
        })
    }
    fn name(&self) -> &str {
        "down"
    }
    fn model(&self) -> &str {
        "down-1"
    }
}

fn pipeline(
    store: Arc<dyn VectorStoreProvider>,
) -> (Ingestor, Retriever) {
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbedder);
    let config = RetrievalConfig {
        top_k: 4,
        max_snippet_chars: 800,
    };
    (
        Ingestor::new(Arc::clone(&embedder), Arc::clone(&store)),
        Retriever::new(embedder, store, config),
    )
}

#[tokio::test]
async fn embedder_output_is_unit_length() {
    let vectors = HashEmbedder
        .embed_batch(&["Paris is the capital of France.".to_string()])
        .await
        .unwrap();
    assert_eq!(vectors[0].len(), DIMS);
    let norm = vectors[0].iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn insert_then_retrieve_ranks_the_document_first() {
    let store = Arc::new(MemStore::default());
    let (ingestor, retriever) = pipeline(store);

    ingestor
        .insert(Document::new("Paris is the capital of France.").with_title("Geo"))
        .await
        .unwrap();
    ingestor
        .insert(Document::new("Rust ownership prevents data races at compile time.").with_title("Lang"))
        .await
        .unwrap();

    let sources = retriever
        .retrieve("Paris is the capital of France.", None)
        .await
        .unwrap();
    assert_eq!(sources[0].title, "Geo");
}

#[tokio::test]
async fn round_trip_query_returns_matching_title_and_snippet_prefix() {
    let store = Arc::new(MemStore::default());
    let (ingestor, retriever) = pipeline(store);

    let text = "Paris is the capital of France.";
    ingestor
        .insert(Document::new(text).with_title("Geo"))
        .await
        .unwrap();
    ingestor
        .insert(Document::new("Bread rises because yeast produces carbon dioxide.").with_title("Baking"))
        .await
        .unwrap();

    let sources = retriever
        .retrieve("What is the capital of France?", None)
        .await
        .unwrap();
    assert_eq!(sources[0].title, "Geo");
    assert!(text.starts_with(&sources[0].snippet));
}

#[tokio::test]
async fn scores_are_non_increasing() {
    let store = Arc::new(MemStore::default());
    let (ingestor, retriever) = pipeline(store);

    for text in [
        "the capital of France is Paris",
        "France borders Spain and Italy",
        "completely unrelated gardening advice",
    ] {
        ingestor.insert(Document::new(text)).await.unwrap();
    }

    let sources = retriever.retrieve("capital of France", None).await.unwrap();
    for pair in sources.windows(2) {
        assert!(pair[0].distance >= pair[1].distance);
    }
}

#[tokio::test]
async fn retrieve_returns_at_most_k_and_all_when_fewer_exist() {
    let store = Arc::new(MemStore::default());
    let (ingestor, retriever) = pipeline(store);

    ingestor.insert(Document::new("only document")).await.unwrap();

    let sources = retriever.retrieve("anything", Some(5)).await.unwrap();
    assert_eq!(sources.len(), 1);
}

#[tokio::test]
async fn blank_document_text_is_rejected() {
    let store = Arc::new(MemStore::default());
    let (ingestor, _) = pipeline(store);

    let err = ingestor.insert(Document::new("   \n\t ")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn chat_answer_carries_the_retrieved_sources() {
    let store = Arc::new(MemStore::default());
    let (ingestor, retriever) = pipeline(Arc::clone(&store) as Arc<dyn VectorStoreProvider>);

    ingestor
        .insert(
            Document::new("Paris is the capital of France.")
                .with_title("Geo")
                .with_url("https://geo.example/paris"),
        )
        .await
        .unwrap();

    let llm = Arc::new(EchoLlm::new());
    let engine = ChatEngine::new(retriever, Arc::clone(&llm) as Arc<dyn LlmProvider>);

    let answer = engine
        .answer("What is the capital of France?", None)
        .await
        .unwrap();

    assert_eq!(answer.text, "Paris [1]");
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].title, "Geo");

    // The prompt the LLM saw numbers the same source list
    let prompts = llm.prompts.lock().unwrap();
    assert!(prompts[0].contains("[1] Geo (https://geo.example/paris)"));
    assert!(prompts[0].contains("User:\nWhat is the capital of France?"));
}

#[tokio::test]
async fn chat_with_empty_collection_prompts_with_placeholder() {
    let store = Arc::new(MemStore::default());
    let (_, retriever) = pipeline(store);

    let llm = Arc::new(EchoLlm::new());
    let engine = ChatEngine::new(retriever, Arc::clone(&llm) as Arc<dyn LlmProvider>);

    let answer = engine.answer("hello", None).await.unwrap();
    assert!(answer.sources.is_empty());

    let prompts = llm.prompts.lock().unwrap();
    assert!(prompts[0].contains("(no sources retrieved)"));
}

#[tokio::test]
async fn store_outage_surfaces_unchanged_from_answer() {
    let (_, retriever) = pipeline(Arc::new(DownStore));
    let engine = ChatEngine::new(retriever, Arc::new(EchoLlm::new()));

    let err = engine.answer("hello", None).await.unwrap_err();
    match err {
        Error::Unavailable { service, .. } => assert_eq!(service, "qdrant"),
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn llm_outage_surfaces_unchanged_from_answer() {
    let store = Arc::new(MemStore::default());
    let (ingestor, retriever) = pipeline(store);
    ingestor.insert(Document::new("some text")).await.unwrap();

    let engine = ChatEngine::new(retriever, Arc::new(DownLlm));
    let err = engine.answer("some text", None).await.unwrap_err();
    match err {
        Error::Unavailable { service, .. } => assert_eq!(service, "ollama"),
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn reingesting_with_same_id_overwrites_not_duplicates() {
    let store = Arc::new(MemStore::default());
    let id = Uuid::new_v4();
    let vector = embed_text("hello world");

    store
        .upsert(id, vector.clone(), serde_json::json!({"text": "v1"}))
        .await
        .unwrap();
    store
        .upsert(id, vector.clone(), serde_json::json!({"text": "v2"}))
        .await
        .unwrap();

    let hits = store.search(vector, 10).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].payload["text"], "v2");
}
