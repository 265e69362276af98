//! Request types for the chat and retrieval endpoints

use serde::{Deserialize, Serialize};

/// Chat request: one user message, answered with citations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,

    /// Override the configured number of sources to retrieve
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            top_k: None,
        }
    }
}
