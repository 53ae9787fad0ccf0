//! Error types for reconciliation

use lawbook_extractor::ExtractorError;
use lawbook_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Errors that stop a reconciliation pass as a whole
///
/// Failures on a single record are not errors; they are collected in the
/// pass summary.
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor could not be built
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Router or classifier could not be built
    #[error("Gatekeeper error: {0}")]
    Gatekeeper(#[from] GatekeeperError),
}
