//! Error types for batch generation.

use reference_pool::PoolError;
use reference_store::StoreError;
use thiserror::Error;

/// Errors that can occur while generating a batch.
#[derive(Error, Debug)]
pub enum SynthError {
    /// The reference store could not be opened or closed.
    #[error("Reference store error: {0}")]
    Store(#[from] StoreError),

    /// A pool could not produce an entry.
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a YAML config.
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SynthError {
    /// Whether a filter matched nothing. Such errors cost one record, not
    /// the whole batch.
    pub fn is_empty_pool(&self) -> bool {
        matches!(self, SynthError::Pool(e) if e.is_empty_pool())
    }
}
