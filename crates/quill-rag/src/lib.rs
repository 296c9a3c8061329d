//! Quill RAG crate - prompt assembly and the retrieval pipeline.
//!
//! Orchestrates one query end to end: similarity search over the loaded
//! index, grounding-context assembly, prompt templating, and the
//! generation backend call.

pub mod pipeline;
pub mod prompt;

pub use pipeline::{RetrievalPipeline, CONTEXT_SEPARATOR};
pub use prompt::PromptBuilder;
