//! Application state for the RAG server

use std::sync::Arc;

use crate::chat::ChatEngine;
use crate::config::RagConfig;
use crate::error::Result;
use crate::ingestion::Ingestor;
use crate::providers::{
    EmbeddingProvider, LlmProvider, OllamaGenerator, QdrantStore, TeiEmbedder,
    VectorStoreProvider,
};
use crate::retrieval::Retriever;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn VectorStoreProvider>,
    ingestor: Ingestor,
    chat: ChatEngine,
}

impl AppState {
    /// Wire up providers and pipelines from configuration
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing RAG application state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(TeiEmbedder::new(config.embeddings.clone()));
        let store: Arc<dyn VectorStoreProvider> = Arc::new(QdrantStore::new(
            config.qdrant.clone(),
            config.embeddings.dimensions,
        )?);
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaGenerator::new(config.llm.clone())?);

        tracing::info!(
            "Providers ready (embeddings: {}, store: {}, llm: {}/{})",
            embedder.name(),
            store.name(),
            llm.name(),
            llm.model()
        );

        let ingestor = Ingestor::new(Arc::clone(&embedder), Arc::clone(&store));
        let retriever = Retriever::new(
            Arc::clone(&embedder),
            Arc::clone(&store),
            config.retrieval.clone(),
        );
        let chat = ChatEngine::new(retriever, llm);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                store,
                ingestor,
                chat,
            }),
        })
    }

    /// Vector store handle, used by the health endpoints
    pub fn store(&self) -> &Arc<dyn VectorStoreProvider> {
        &self.inner.store
    }

    /// Ingestion pipeline
    pub fn ingestor(&self) -> &Ingestor {
        &self.inner.ingestor
    }

    /// Chat orchestrator
    pub fn chat(&self) -> &ChatEngine {
        &self.inner.chat
    }
}
