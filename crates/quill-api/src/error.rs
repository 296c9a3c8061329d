//! API error types and JSON error response formatting.
//!
//! ApiError provides a consistent JSON error response format across all
//! endpoints, mapping pipeline errors to appropriate HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use quill_core::error::QuillError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "invalid_query", "backend_error").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    BadRequest(String),
    /// 502 Bad Gateway - an upstream model backend failed.
    BadGateway(String),
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_query", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "backend_error", msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<QuillError> for ApiError {
    fn from(err: QuillError) -> Self {
        match &err {
            QuillError::InvalidQuery(msg) => ApiError::BadRequest(msg.clone()),
            QuillError::EmbeddingBackend(msg) => ApiError::BadGateway(msg.clone()),
            QuillError::GenerationBackend(msg) => ApiError::BadGateway(msg.clone()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_maps_to_bad_request() {
        let api_err: ApiError = QuillError::InvalidQuery("empty".to_string()).into();
        assert!(matches!(api_err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_backend_errors_map_to_bad_gateway() {
        let api_err: ApiError = QuillError::EmbeddingBackend("down".to_string()).into();
        assert!(matches!(api_err, ApiError::BadGateway(_)));

        let api_err: ApiError = QuillError::GenerationBackend("down".to_string()).into();
        assert!(matches!(api_err, ApiError::BadGateway(_)));
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let api_err: ApiError = QuillError::IndexLoad("corrupt".to_string()).into();
        assert!(matches!(api_err, ApiError::Internal(_)));
    }
}
