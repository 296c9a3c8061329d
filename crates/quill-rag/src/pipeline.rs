//! The retrieval pipeline: embed, search, prompt, generate, package.

use std::sync::Arc;

use tracing::{debug, info};

use quill_core::error::Result;
use quill_core::types::{PipelineResult, RetrievalQuery};
use quill_index::VectorIndex;
use quill_llm::GenerationClient;

use crate::prompt::PromptBuilder;

/// Separator placed between snippets when joining them into the
/// grounding context.
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Orchestrates one query end to end.
///
/// Each step is a hard dependency on the previous one succeeding; a
/// failure in search or generation aborts the invocation with no partial
/// result. The pipeline holds no per-request state; the only retained
/// state is the immutable, shared vector index.
pub struct RetrievalPipeline {
    index: Arc<VectorIndex>,
    prompt_builder: PromptBuilder,
    generator: Arc<dyn GenerationClient>,
}

impl RetrievalPipeline {
    /// Create a pipeline over the given index and generation backend.
    pub fn new(
        index: Arc<VectorIndex>,
        prompt_builder: PromptBuilder,
        generator: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            index,
            prompt_builder,
            generator,
        }
    }

    /// Run the pipeline for a validated query.
    ///
    /// 1. Similarity search over the index (embeds the query internally).
    /// 2. Join the retrieved snippet contents with [`CONTEXT_SEPARATOR`].
    /// 3. Build the grounding prompt.
    /// 4. Call the generation backend.
    /// 5. Package the answer with the snippets used, in ranked order.
    pub async fn run(&self, query: &RetrievalQuery) -> Result<PipelineResult> {
        let hits = self.index.search(query.text(), query.top_k()).await?;
        debug!(hits = hits.len(), top_k = query.top_k(), "Search complete");

        let context_used: Vec<String> = hits
            .iter()
            .map(|hit| hit.document.content.clone())
            .collect();
        let context = context_used.join(CONTEXT_SEPARATOR);

        let prompt = self.prompt_builder.build(&context, query.text());

        let answer = self.generator.generate(&prompt).await?;
        info!(
            snippets = context_used.len(),
            answer_len = answer.len(),
            "Pipeline complete"
        );

        Ok(PipelineResult {
            answer,
            context_used,
        })
    }

    /// Number of entries in the underlying index.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }
}
