//! Quill application binary - composition root.
//!
//! Ties the crates together into a single executable:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Build the Ollama embedding and generation clients
//! 3. Load the persisted vector index (fatal on failure)
//! 4. Assemble the retrieval pipeline
//! 5. Start the axum HTTP server

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use quill_api::{routes, AppState};
use quill_core::config::QuillConfig;
use quill_index::VectorIndex;
use quill_llm::{OllamaEmbeddingClient, OllamaGenerationClient};
use quill_rag::{PromptBuilder, RetrievalPipeline};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();

    // Config first: the log level may come from it.
    let config_file = args.resolve_config_path();
    let config = QuillConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Backend clients share one bounded timeout.
    let timeout = Duration::from_secs(config.backend.timeout_secs);
    let embedder = OllamaEmbeddingClient::new(
        config.backend.endpoint.clone(),
        config.backend.embedding_model.clone(),
        timeout,
    )?;
    let generator = OllamaGenerationClient::new(
        config.backend.endpoint.clone(),
        config.backend.generation_model.clone(),
        timeout,
    )?;
    tracing::info!(
        endpoint = %config.backend.endpoint,
        embedding_model = %config.backend.embedding_model,
        generation_model = %config.backend.generation_model,
        "Backend clients ready"
    );

    // Index load is fatal: never serve against a partially loaded index.
    let index_path = args.resolve_index_path(&config.index.path);
    let index = match VectorIndex::load(&index_path, Arc::new(embedder)) {
        Ok(index) => Arc::new(index),
        Err(e) => {
            tracing::error!(path = %index_path.display(), error = %e, "Failed to load index");
            return Err(e.into());
        }
    };
    tracing::info!(entries = index.len(), "Vector index ready");

    let pipeline = RetrievalPipeline::new(
        index,
        PromptBuilder::new(config.prompt.persona.clone()),
        Arc::new(generator),
    );

    let port = args.resolve_port(config.general.port);
    let state = AppState::new(config, pipeline);
    let router = routes::create_router(state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind address");
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");
    axum::serve(listener, router).await?;

    Ok(())
}
