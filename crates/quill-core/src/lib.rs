pub mod config;
pub mod error;
pub mod types;

pub use config::QuillConfig;
pub use error::{QuillError, Result};
pub use types::{PipelineResult, RetrievalQuery, DEFAULT_TOP_K};
