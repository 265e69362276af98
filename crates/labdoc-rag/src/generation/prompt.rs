//! Prompt templates for RAG generation

use crate::types::Source;

/// Literal stand-in for the sources block when retrieval found nothing
const NO_SOURCES_PLACEHOLDER: &str = "(no sources retrieved)";

/// Deterministic prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the user message and retrieved sources into one prompt.
    ///
    /// Pure function of its inputs. The bracketed `[i]` indices are
    /// 1-based in source order; they are the only linkage between prose
    /// citations in the answer and the source list returned alongside it,
    /// so the format is a compatibility surface.
    pub fn build_prompt(user_message: &str, sources: &[Source]) -> String {
        let context = if sources.is_empty() {
            NO_SOURCES_PLACEHOLDER.to_string()
        } else {
            sources
                .iter()
                .enumerate()
                .map(|(i, s)| format!("[{}] {} ({})\n{}", i + 1, s.title, s.url, s.snippet))
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        format!(
            "You are a helpful assistant. Use the provided sources if relevant.\n\
             If sources are insufficient, say so.\n\n\
             Sources:\n{context}\n\n\
             User:\n{user_message}\n\n\
             Answer:\n"
        )
    }
}
