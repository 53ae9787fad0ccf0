//! Per-record failures collected during a batch run

use serde::Serialize;
use std::fmt;

/// Pipeline stage at which a record failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Reading or decoding the source document
    Read,
    /// Inserting a new record
    Insert,
    /// Applying a partial update
    Update,
    /// Moving a record between collections
    Migrate,
    /// Splitting a merged article
    Split,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Read => "read",
            FailureStage::Insert => "insert",
            FailureStage::Update => "update",
            FailureStage::Migrate => "migrate",
            FailureStage::Split => "split",
        };
        f.write_str(name)
    }
}

/// One record that could not be processed
///
/// Batch runs are fail-forward: the failure is recorded here and the run
/// moves on to the next record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// Identity of the record (title, or title plus article number)
    pub key: String,
    /// Stage that failed
    pub stage: FailureStage,
    /// Error message
    pub reason: String,
}

impl RecordFailure {
    /// Create a failure entry
    pub fn new(key: impl Into<String>, stage: FailureStage, reason: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            stage,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.key, self.reason)
    }
}
