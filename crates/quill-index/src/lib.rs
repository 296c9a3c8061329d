//! Quill index crate - the persisted vector index and similarity search.
//!
//! Loads a corpus of documents with precomputed embeddings from a JSON
//! file and answers nearest-neighbor queries by brute-force cosine
//! similarity, embedding queries through an injected embedding client.

pub mod index;

pub use index::{Document, IndexEntry, ScoredDocument, VectorIndex};
