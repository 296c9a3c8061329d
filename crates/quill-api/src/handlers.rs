//! Route handler functions.
//!
//! Each handler extracts its request via axum extractors, validates it
//! at the boundary, and delegates to the retrieval pipeline.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quill_core::types::RetrievalQuery;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub query: String,
    /// Number of snippets to retrieve; defaults to the configured value.
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub context_used: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub index_entries: usize,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /generate-response - run the retrieval pipeline for a query.
///
/// Validation happens here, before the pipeline runs: empty query text
/// and top_k of zero are rejected with 400, as is top_k above the
/// configured maximum.
pub async fn generate_response(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let top_k = request.top_k.unwrap_or(state.config.index.default_top_k);

    if top_k > state.config.index.max_top_k {
        return Err(ApiError::BadRequest(format!(
            "top_k {} exceeds maximum of {}",
            top_k, state.config.index.max_top_k
        )));
    }

    let query = RetrievalQuery::new(request.query, top_k)?;
    debug!(top_k, query_len = query.text().len(), "Generate request");
    let result = state.pipeline.run(&query).await?;

    Ok(Json(GenerateResponse {
        response: result.answer,
        context_used: result.context_used,
    }))
}

/// GET /health - liveness and index size.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        index_entries: state.pipeline.index_len(),
    })
}
