//! Generation client trait and implementations.
//!
//! `OllamaGenerationClient` calls an Ollama-compatible `/api/generate`
//! endpoint with streaming disabled; the call blocks until the full
//! response is available. `MockGenerationClient` returns a scripted
//! answer (or failure) for tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quill_core::error::{QuillError, Result};

/// Client for producing a text completion from a prompt.
///
/// One backend call per invocation, no retries, no streaming. A failed
/// attempt surfaces immediately to the caller.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text for the given prompt, failing with
    /// `QuillError::GenerationBackend` if the backend is unreachable,
    /// returns a non-2xx status, or its response lacks the generated-text
    /// field.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ---------------------------------------------------------------------------
// OllamaGenerationClient - HTTP backend
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Generation client backed by an Ollama-compatible HTTP API.
///
/// Sends `POST {endpoint}/api/generate` with `stream: false` so the
/// backend returns one complete JSON object instead of incremental
/// chunks. The response is validated against a typed schema.
#[derive(Debug, Clone)]
pub struct OllamaGenerationClient {
    endpoint: String,
    model: String,
    client: Client,
}

impl OllamaGenerationClient {
    /// Create a client for the given endpoint and model.
    ///
    /// `timeout` bounds each request; expiry surfaces as
    /// `QuillError::GenerationBackend`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(QuillError::Config(
                "generation backend endpoint cannot be empty".to_string(),
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
        format!("{}/api/generate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerationClient for OllamaGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Generation request");

        let response = self
            .client
            .post(self.url())
            .json(&request)
            .send()
            .await
            .map_err(|e| QuillError::GenerationBackend(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuillError::GenerationBackend(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| QuillError::GenerationBackend(format!("malformed response: {}", e)))?;

        debug!(answer_len = parsed.response.len(), "Generation received");
        Ok(parsed.response)
    }
}

// ---------------------------------------------------------------------------
// MockGenerationClient - scripted answers for testing
// ---------------------------------------------------------------------------

/// Mock generation client that returns a fixed answer, or a scripted
/// failure for exercising the pipeline's error path.
#[derive(Debug, Clone)]
pub struct MockGenerationClient {
    answer: Option<String>,
}

impl MockGenerationClient {
    /// A mock that always returns the given answer.
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    /// A mock whose every call fails with `GenerationBackend`.
    pub fn failing() -> Self {
        Self { answer: None }
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => Err(QuillError::GenerationBackend(
                "mock generation failure".to_string(),
            )),
        }
    }
}
