//! Configuration for the RAG service
//!
//! Everything is read from the environment with documented defaults, so the
//! service starts with no configuration at all inside the compose network.
//! Unset or unparsable values fall back to the default (with a warning for
//! the latter) rather than aborting startup.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main RAG service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Embedding service configuration
    pub embeddings: EmbeddingConfig,
    /// Qdrant configuration
    pub qdrant: QdrantConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("SERVER_HOST", "0.0.0.0".to_string()),
                port: env_or("SERVER_PORT", 8000),
            },
            embeddings: EmbeddingConfig {
                base_url: base_url_or("EMBEDDINGS_BASE_URL", "http://text-embeddings:80"),
                dimensions: env_or("EMBEDDINGS_DIM", 384),
                timeout_secs: env_or("EMBEDDINGS_TIMEOUT_S", 180),
            },
            qdrant: QdrantConfig {
                url: base_url_or("QDRANT_URL", "http://qdrant:6333"),
                collection: env_or("QDRANT_COLLECTION", "LabDoc".to_string()),
                timeout_secs: env_or("QDRANT_TIMEOUT_S", 25),
            },
            llm: LlmConfig {
                base_url: base_url_or("OLLAMA_BASE_URL", "http://ollama:11434"),
                model: env_or("OLLAMA_MODEL", "llama3.1".to_string()),
                timeout_secs: env_or("OLLAMA_TIMEOUT_S", 180),
            },
            retrieval: RetrievalConfig {
                top_k: env_or("RAG_TOP_K", 4),
                max_snippet_chars: env_or("RAG_MAX_SOURCE_CHARS", 800),
            },
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Embedding service (TEI-style) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Base URL of the embedding service, no trailing slash
    pub base_url: String,
    /// Vector dimensionality produced by the model (384 for MiniLM)
    pub dimensions: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://text-embeddings:80".to_string(),
            dimensions: 384,
            timeout_secs: 180,
        }
    }
}

impl EmbeddingConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Qdrant vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// Qdrant base URL, no trailing slash
    pub url: String,
    /// Collection name
    pub collection: String,
    /// Request timeout in seconds for upsert/search calls.
    /// Liveness probes use a shorter fixed timeout.
    pub timeout_secs: u64,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://qdrant:6333".to_string(),
            collection: "LabDoc".to_string(),
            timeout_secs: 25,
        }
    }
}

impl QdrantConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL, no trailing slash
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Request timeout in seconds. Generation is slow on cold start
    /// (model load), so this is much longer than the store timeouts.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://ollama:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout_secs: 180,
        }
    }
}

impl LlmConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default number of sources to retrieve per query
    pub top_k: usize,
    /// Maximum snippet length in characters
    pub max_snippet_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            max_snippet_chars: 800,
        }
    }
}

/// Read an environment variable, parsing it into `T`. Unset returns the
/// default; an unparsable value warns and returns the default.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring unparsable {}={:?}, using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a base URL from the environment, stripping any trailing slash so
/// path concatenation stays predictable.
fn base_url_or(key: &str, default: &str) -> String {
    let url = env_or(key, default.to_string());
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = RagConfig::default();
        assert_eq!(config.qdrant.url, "http://qdrant:6333");
        assert_eq!(config.qdrant.collection, "LabDoc");
        assert_eq!(config.embeddings.dimensions, 384);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.retrieval.max_snippet_chars, 800);
        assert_eq!(config.llm.model, "llama3.1");
    }

    #[test]
    fn generation_timeout_exceeds_store_timeout() {
        let config = RagConfig::default();
        assert!(config.llm.timeout() > config.qdrant.timeout());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        std::env::set_var("LABDOC_TEST_BASE_URL", "http://qdrant:6333/");
        assert_eq!(
            base_url_or("LABDOC_TEST_BASE_URL", "http://other:1"),
            "http://qdrant:6333"
        );
        std::env::remove_var("LABDOC_TEST_BASE_URL");
    }

    #[test]
    fn unparsable_value_falls_back() {
        std::env::set_var("LABDOC_TEST_TOP_K", "not-a-number");
        let value: usize = env_or("LABDOC_TEST_TOP_K", 4);
        assert_eq!(value, 4);
        std::env::remove_var("LABDOC_TEST_TOP_K");
    }
}
