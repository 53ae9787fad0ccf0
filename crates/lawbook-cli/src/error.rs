//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database could not be opened or queried
    #[error("Storage error: {0}")]
    Store(#[from] lawbook_store::StoreError),

    /// Ingestion setup or directory walk failed
    #[error("Ingest error: {0}")]
    Extractor(#[from] lawbook_extractor::ExtractorError),

    /// Reconciliation failed
    #[error("Reconcile error: {0}")]
    Janitor(#[from] lawbook_janitor::JanitorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
