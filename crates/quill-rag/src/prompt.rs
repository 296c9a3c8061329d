//! Prompt assembly for the generation backend.

use quill_core::config::PromptConfig;

/// Builds the grounding prompt sent to the generation backend.
///
/// The prompt has a fixed shape: a persona preamble, a labeled Context
/// section holding the retrieved snippets, a labeled Instruction section
/// holding the query, and a Response cue with nothing after it; the
/// backend completes from that point. Context and query are interpolated
/// verbatim, with no escaping: whatever is in the indexed corpus reaches
/// the backend as-is, which is a documented trust boundary of the system.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    persona: String,
}

impl PromptBuilder {
    /// Create a builder with the given persona preamble.
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    /// Compose the prompt. Pure and deterministic: identical inputs
    /// always produce the identical string.
    pub fn build(&self, context: &str, query: &str) -> String {
        format!(
            "{persona}\n\nContext:\n{context}\n\nInstruction:\n{query}\n\nResponse:\n",
            persona = self.persona,
            context = context,
            query = query,
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(PromptConfig::default().persona)
    }
}
