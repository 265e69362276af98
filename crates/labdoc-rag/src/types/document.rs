//! Document type for ingestion

use serde::{Deserialize, Serialize};

/// A document submitted for ingestion.
///
/// Identity is assigned at ingestion time (a fresh UUID); callers never
/// supply one. The full document, including `text`, is stored as the point
/// payload so snippets can be reconstructed at retrieval time.
///
/// Metadata fields are plain strings at the boundary, so nothing needs
/// coercion before it reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document body. Must be non-empty after trimming.
    pub text: String,

    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Canonical URL of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Origin label (feed name, dataset, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Publication date as an opaque string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl Document {
    /// Create a document from text with no metadata
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
            url: None,
            source: None,
            published_date: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the origin label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
