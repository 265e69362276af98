//! RAG server binary
//!
//! Run with: cargo run -p labdoc-rag --bin labdoc-rag-server

use labdoc_rag::{server::RagServer, RagConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labdoc_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::from_env();

    tracing::info!("Configuration loaded");
    tracing::info!("  - Qdrant: {} (collection: {})", config.qdrant.url, config.qdrant.collection);
    tracing::info!("  - Embeddings: {} ({} dims)", config.embeddings.base_url, config.embeddings.dimensions);
    tracing::info!("  - Ollama: {} (model: {})", config.llm.base_url, config.llm.model);
    tracing::info!("  - Top-k: {}, snippet chars: {}", config.retrieval.top_k, config.retrieval.max_snippet_chars);

    let server = RagServer::new(config)?;

    tracing::info!("Endpoints: POST /chat, POST /documents, GET /health, GET /ready");
    server.start().await?;

    Ok(())
}
