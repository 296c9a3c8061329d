use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{QuillError, Result};

/// Top-level configuration for the Quill service.
///
/// Loaded from `quill.toml` by default. Each section corresponds to one
/// concern: the server itself, the persisted index, the model backends,
/// and the prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            index: IndexConfig::default(),
            backend: BackendConfig::default(),
            prompt: PromptConfig::default(),
        }
    }
}

impl QuillConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: QuillConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| QuillError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// HTTP server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 8000,
        }
    }
}

/// Persisted index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Path to the persisted index JSON file.
    pub path: String,
    /// Number of snippets retrieved when the request omits top_k.
    pub default_top_k: usize,
    /// Largest top_k a request may ask for.
    pub max_top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: "data/index.json".to_string(),
            default_top_k: 3,
            max_top_k: 20,
        }
    }
}

/// Model backend settings (Ollama-compatible HTTP API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing path.
    pub endpoint: String,
    /// Model used for embedding queries.
    pub embedding_model: String,
    /// Model used for answer generation.
    pub generation_model: String,
    /// Request timeout in seconds, applied to both backend calls.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            embedding_model: "mxbai-embed-large".to_string(),
            generation_model: "llama3.1:8b".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Prompt template settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Persona line placed at the top of every prompt.
    pub persona: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            persona: "You are a helpful assistant. Use the context below to answer \
                      or generate response of common email types."
                .to_string(),
        }
    }
}
