//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during segmentation, extraction, or ingestion
///
/// Per-record problems are reported in an `IngestReport`, not here; these
/// variants stop the whole operation.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Store error
    #[error("Store error: {0}")]
    Store(String),

    /// A built-in pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Classifier or router could not be built
    #[error("Gatekeeper error: {0}")]
    Gatekeeper(#[from] lawbook_gatekeeper::GatekeeperError),

    /// Document could not be read
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
