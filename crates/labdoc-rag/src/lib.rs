//! labdoc-rag: retrieval-augmented chat over a Qdrant-backed document set
//!
//! The pipeline embeds text through a remote embedding service, stores and
//! searches vectors in a Qdrant collection, assembles retrieved sources
//! into a deterministic prompt, and asks Ollama for a grounded answer with
//! numbered citations. Ingestion shares the same embedder and store.

pub mod chat;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use chat::{Answer, ChatEngine};
pub use config::RagConfig;
pub use error::{Error, Result};
pub use ingestion::Ingestor;
pub use retrieval::Retriever;
pub use types::{ChatRequest, ChatResponse, Document, Source};
