//! Application state shared across route handlers.

use std::sync::Arc;

use quill_core::config::QuillConfig;
use quill_rag::RetrievalPipeline;

/// Shared application state, cloned cheaply into each handler task.
///
/// The configuration and pipeline are immutable after startup; the
/// pipeline's index is published through these `Arc`s before the server
/// starts accepting requests.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<QuillConfig>,
    /// The retrieval pipeline answering queries.
    pub pipeline: Arc<RetrievalPipeline>,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(config: QuillConfig, pipeline: RetrievalPipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}
