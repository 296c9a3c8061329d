//! Quill LLM crate - HTTP clients for the embedding and generation backends.
//!
//! Both backends speak the Ollama request/response protocol. Each client
//! makes exactly one network call per invocation with no retries and no
//! caching; failures surface immediately as the matching backend error.
//! Deterministic mock implementations are provided for tests and benches.

pub mod embedding;
pub mod generation;

pub use embedding::{EmbeddingClient, MockEmbeddingClient, OllamaEmbeddingClient};
pub use generation::{GenerationClient, MockGenerationClient, OllamaGenerationClient};
