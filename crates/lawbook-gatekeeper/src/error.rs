//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while building the classifier or router
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// A built-in pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
