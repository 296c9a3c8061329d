//! CLI argument definitions for the Quill binary.
//!
//! Uses `clap` with derive macros. Priority resolution:
//! CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Quill - a grounded answer service over a persisted vector index.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Path to the persisted index JSON file.
    #[arg(short = 'i', long = "index")]
    pub index: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > QUILL_CONFIG env var > ./quill.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("QUILL_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from("quill.toml")
    }

    /// Resolve the server port.
    ///
    /// Priority: --port flag > QUILL_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("QUILL_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        config_port
    }

    /// Resolve the index path.
    ///
    /// Priority: --index flag > config file value.
    pub fn resolve_index_path(&self, config_path: &str) -> PathBuf {
        self.index
            .clone()
            .unwrap_or_else(|| PathBuf::from(config_path))
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}
