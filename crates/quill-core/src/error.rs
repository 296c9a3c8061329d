use thiserror::Error;

/// Top-level error type for the Quill system.
///
/// Each variant corresponds to a failure domain. Subsystem crates return
/// `QuillError` directly so the `?` operator works across crate boundaries,
/// and the API layer maps variants to HTTP status codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Embedding backend error: {0}")]
    EmbeddingBackend(String),

    #[error("Generation backend error: {0}")]
    GenerationBackend(String),

    #[error("Index load error: {0}")]
    IndexLoad(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for QuillError {
    fn from(err: toml::de::Error) -> Self {
        QuillError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for QuillError {
    fn from(err: toml::ser::Error) -> Self {
        QuillError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for QuillError {
    fn from(err: serde_json::Error) -> Self {
        QuillError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;
