//! Chat orchestrator: retrieval, prompt assembly, and generation in one pass

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;
use crate::retrieval::Retriever;
use crate::types::Source;

/// An answer together with the sources that grounded it
#[derive(Debug, Clone)]
pub struct Answer {
    /// Generated answer text
    pub text: String,
    /// The exact source list the prompt was built from, in prompt order
    pub sources: Vec<Source>,
}

/// Top-level entry point for answering a user message with citations.
///
/// No stage retries: a failure in retrieval or generation aborts the whole
/// operation and surfaces the originating error kind unchanged.
pub struct ChatEngine {
    retriever: Retriever,
    llm: Arc<dyn LlmProvider>,
}

impl ChatEngine {
    /// Create a new engine
    pub fn new(retriever: Retriever, llm: Arc<dyn LlmProvider>) -> Self {
        Self { retriever, llm }
    }

    /// Answer one user message: retrieve sources, build the prompt,
    /// generate, and return both the text and the sources for citation
    /// display.
    pub async fn answer(&self, message: &str, top_k: Option<usize>) -> Result<Answer> {
        let sources = self.retriever.retrieve(message, top_k).await.map_err(|e| {
            tracing::error!("Retrieval stage failed: {}", e);
            e
        })?;
        tracing::info!("Retrieved {} sources for chat message", sources.len());

        let prompt = PromptBuilder::build_prompt(message, &sources);

        let text = self.llm.generate(&prompt).await.map_err(|e| {
            tracing::error!("Generation stage failed ({}): {}", self.llm.model(), e);
            e
        })?;

        Ok(Answer { text, sources })
    }
}
