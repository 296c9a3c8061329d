//! Persisted vector index with brute-force cosine similarity search.
//!
//! The index is deserialized once at startup from a JSON file and never
//! mutated afterwards, so concurrent readers share it behind an `Arc`
//! with no locking. Search is O(n * D) over the corpus, which is
//! acceptable for the corpus sizes this service targets.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use quill_core::error::{QuillError, Result};
use quill_llm::EmbeddingClient;

/// An immutable stored text snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The snippet text fed to the prompt as grounding context.
    pub content: String,
    /// Optional metadata attached at index-build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// A document paired with its precomputed embedding, as persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(flatten)]
    pub document: Document,
    pub embedding: Vec<f32>,
}

/// A single ranked hit from a similarity search.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    /// Cosine similarity between the query and the document embedding.
    pub score: f64,
}

/// On-disk shape of the index file.
///
/// Plain serde JSON: nothing executes on load, unlike pickle-style
/// formats. An unrecognized shape fails deserialization and surfaces as
/// `QuillError::IndexLoad`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    entries: Vec<IndexEntry>,
}

/// In-memory vector index over a persisted corpus.
///
/// Owns its entries for the process lifetime and embeds queries through
/// the injected [`EmbeddingClient`]. Read-only after construction.
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    embedder: Arc<dyn EmbeddingClient>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl VectorIndex {
    /// Deserialize a persisted index from the given JSON file.
    ///
    /// Fails with `QuillError::IndexLoad` if the file is missing,
    /// unreadable, or does not match the expected schema. This is fatal
    /// at startup: the service must not answer queries without a fully
    /// loaded index.
    pub fn load(path: &Path, embedder: Arc<dyn EmbeddingClient>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuillError::IndexLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        let persisted: PersistedIndex = serde_json::from_str(&content).map_err(|e| {
            QuillError::IndexLoad(format!("incompatible format in {}: {}", path.display(), e))
        })?;

        info!(
            path = %path.display(),
            entries = persisted.entries.len(),
            "Vector index loaded"
        );

        Ok(Self {
            entries: persisted.entries,
            embedder,
        })
    }

    /// Build an index directly from entries. Used by tests and benches;
    /// production indexes come from [`VectorIndex::load`].
    pub fn from_entries(entries: Vec<IndexEntry>, embedder: Arc<dyn EmbeddingClient>) -> Self {
        Self { entries, embedder }
    }

    /// Embed the query and return the `top_k` entries with the highest
    /// cosine similarity, ordered by descending score. Ties keep their
    /// original insertion order (the sort is stable). `top_k` larger than
    /// the corpus returns the whole corpus.
    ///
    /// An empty index returns an empty result without calling the
    /// embedding backend.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed(query).await?;

        let mut scored: Vec<ScoredDocument> = self
            .entries
            .iter()
            .map(|entry| ScoredDocument {
                document: entry.document.clone(),
                score: cosine_similarity(&query_vec, &entry.embedding),
            })
            .collect();

        // Stable sort by descending score; ties keep insertion order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored)
    }

    /// Return the number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if the index contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude or the lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();

    let mag_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}
