//! Backend providers: embeddings, vector store, and LLM
//!
//! Each external service sits behind a trait so the pipeline can be
//! exercised in tests without the network.

pub mod embedding;
pub mod llm;
pub mod ollama;
pub mod qdrant;
pub mod tei;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::OllamaGenerator;
pub use qdrant::QdrantStore;
pub use tei::TeiEmbedder;
pub use vector_store::{SearchHit, VectorStoreProvider};
