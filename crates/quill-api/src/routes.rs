//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate-response", post(handlers::generate_response))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use quill_core::config::QuillConfig;
    use quill_index::{Document, IndexEntry, VectorIndex};
    use quill_llm::{EmbeddingClient, MockEmbeddingClient, MockGenerationClient};
    use quill_rag::{PromptBuilder, RetrievalPipeline};

    use crate::handlers::{GenerateResponse, HealthResponse};

    async fn test_state(texts: &[&str], generator: MockGenerationClient) -> AppState {
        let embedder = MockEmbeddingClient::new();
        let mut entries = Vec::new();
        for text in texts {
            let embedding = embedder.embed(text).await.unwrap();
            entries.push(IndexEntry {
                document: Document {
                    content: text.to_string(),
                    metadata: None,
                },
                embedding,
            });
        }
        let index = Arc::new(VectorIndex::from_entries(entries, Arc::new(embedder)));
        let pipeline = RetrievalPipeline::new(index, PromptBuilder::default(), Arc::new(generator));
        AppState::new(QuillConfig::default(), pipeline)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_response_success() {
        let state = test_state(
            &["Refund policy: 30 days", "Shipping takes 5 days"],
            MockGenerationClient::with_answer("Refunds take 30 days."),
        )
        .await;
        let router = create_router(state);

        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "Refund policy: 30 days", "top_k": 1}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: GenerateResponse = body_json(response).await;
        assert_eq!(body.response, "Refunds take 30 days.");
        assert_eq!(body.context_used, vec!["Refund policy: 30 days"]);
    }

    #[tokio::test]
    async fn test_generate_response_default_top_k() {
        let texts: Vec<String> = (0..5).map(|i| format!("snippet {}", i)).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let state = test_state(&refs, MockGenerationClient::with_answer("ok")).await;
        let router = create_router(state);

        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "snippet 2"}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: GenerateResponse = body_json(response).await;
        // Default top_k is 3.
        assert_eq!(body.context_used.len(), 3);
    }

    #[tokio::test]
    async fn test_generate_response_rejects_zero_top_k() {
        let state = test_state(&["doc"], MockGenerationClient::with_answer("never")).await;
        let router = create_router(state);

        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "valid", "top_k": 0}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_response_rejects_empty_query() {
        let state = test_state(&["doc"], MockGenerationClient::with_answer("never")).await;
        let router = create_router(state);

        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "", "top_k": 3}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_response_rejects_top_k_above_max() {
        let state = test_state(&["doc"], MockGenerationClient::with_answer("never")).await;
        let router = create_router(state);

        // Default max_top_k is 20.
        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "valid", "top_k": 21}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generation_failure_maps_to_bad_gateway() {
        let state = test_state(&["doc"], MockGenerationClient::failing()).await;
        let router = create_router(state);

        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "valid", "top_k": 1}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_embedding_failure_maps_to_bad_gateway() {
        // Index with entries but a failing embedder.
        let index = Arc::new(VectorIndex::from_entries(
            vec![IndexEntry {
                document: Document {
                    content: "doc".to_string(),
                    metadata: None,
                },
                embedding: vec![1.0; 4],
            }],
            Arc::new(MockEmbeddingClient::failing()),
        ));
        let pipeline = RetrievalPipeline::new(
            index,
            PromptBuilder::default(),
            Arc::new(MockGenerationClient::with_answer("never")),
        );
        let state = AppState::new(QuillConfig::default(), pipeline);
        let router = create_router(state);

        let request = post_json(
            "/generate-response",
            serde_json::json!({"query": "valid", "top_k": 1}),
        );
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(&["one", "two"], MockGenerationClient::with_answer("ok")).await;
        let router = create_router(state);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: HealthResponse = body_json(response).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.index_entries, 2);
    }
}
