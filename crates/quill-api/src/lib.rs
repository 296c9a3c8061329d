//! Quill API crate - axum HTTP boundary for the retrieval pipeline.
//!
//! Exposes the single pipeline seam (`POST /generate-response`) plus a
//! health check. Request validation happens here, before the pipeline
//! runs; pipeline errors are mapped to distinguishable HTTP failures.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
