//! Embedding client trait and implementations.
//!
//! - `OllamaEmbeddingClient` calls an Ollama-compatible `/api/embeddings`
//!   endpoint over HTTP. This is the production embedding backend.
//! - `MockEmbeddingClient` provides deterministic hash-based unit vectors
//!   for testing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quill_core::error::{QuillError, Result};

/// Client for turning text into a fixed-length embedding vector.
///
/// Implementations make one backend call per invocation. Repeated
/// identical inputs re-embed; callers that want caching add it outside
/// this trait.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embed the given text, failing with `QuillError::EmbeddingBackend`
    /// if the backend is unreachable, returns a non-2xx status, or its
    /// response lacks a well-formed embedding field.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

// ---------------------------------------------------------------------------
// OllamaEmbeddingClient - HTTP backend
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

/// Embedding client backed by an Ollama-compatible HTTP API.
///
/// Sends `POST {endpoint}/api/embeddings` with the configured model and
/// the text as the prompt. The response is validated against a typed
/// schema; a missing or malformed `embedding` field is a backend error,
/// not a panic.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingClient {
    endpoint: String,
    model: String,
    client: Client,
}

impl OllamaEmbeddingClient {
    /// Create a client for the given endpoint and model.
    ///
    /// `timeout` bounds each request; expiry surfaces as
    /// `QuillError::EmbeddingBackend`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(QuillError::Config(
                "embedding backend endpoint cannot be empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuillError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            endpoint,
            model: model.into(),
            client,
        })
    }

    fn url(&self) -> String {
        format!("{}/api/embeddings", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmbeddingClient for OllamaEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };

        debug!(model = %self.model, text_len = text.len(), "Embedding request");

        let response = self
            .client
            .post(self.url())
            .json(&request)
            .send()
            .await
            .map_err(|e| QuillError::EmbeddingBackend(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuillError::EmbeddingBackend(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| QuillError::EmbeddingBackend(format!("malformed response: {}", e)))?;

        if parsed.embedding.is_empty() {
            return Err(QuillError::EmbeddingBackend(
                "response contained an empty embedding".to_string(),
            ));
        }

        debug!(dimensions = parsed.embedding.len(), "Embedding received");
        Ok(parsed.embedding)
    }
}

// ---------------------------------------------------------------------------
// MockEmbeddingClient - deterministic hash-based vectors for testing
// ---------------------------------------------------------------------------

/// Mock embedding client that returns deterministic 384-dimensional unit
/// vectors derived from a hash of the input text. Identical inputs always
/// produce identical outputs, so ranking is reproducible without a real
/// backend.
#[derive(Debug, Clone, Default)]
pub struct MockEmbeddingClient {
    fail: bool,
}

impl MockEmbeddingClient {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A mock whose every call fails with `EmbeddingBackend`, for
    /// exercising failure paths.
    pub fn failing() -> Self {
        Self { fail: true }
    }

    fn hash_to_vector(text: &str) -> Vec<f32> {
        let mut result = Vec::with_capacity(384);
        for i in 0..384 {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            i.hash(&mut hasher);
            let h = hasher.finish();
            let val = ((h as f64) / (u64::MAX as f64)) * 2.0 - 1.0;
            result.push(val as f32);
        }

        // L2-normalize to unit length so cosine scores stay in [-1, 1].
        let norm: f32 = result.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut result {
                *val /= norm;
            }
        }

        result
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(QuillError::EmbeddingBackend(
                "mock embedding failure".to_string(),
            ));
        }
        Ok(Self::hash_to_vector(text))
    }
}
