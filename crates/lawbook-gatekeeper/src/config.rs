//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Text windows and thresholds for classification and routing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperConfig {
    /// Characters of `title + " " + content` scanned by the classifier
    pub classify_window_chars: usize,

    /// Characters of content scanned for case-narrative tokens
    pub feature_window_chars: usize,

    /// Characters of content that must be free of article markers for the
    /// content vote to route a document to the case collection
    pub marker_window_chars: usize,

    /// Distinct case-narrative tokens needed for the content vote
    pub min_case_features: usize,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            classify_window_chars: 2_000,
            feature_window_chars: 2_000,
            marker_window_chars: 1_000,
            min_case_features: 4,
        }
    }
}

impl GatekeeperConfig {
    /// Strict preset: needs more evidence before calling a document a case
    pub fn strict() -> Self {
        Self {
            min_case_features: 6,
            ..Self::default()
        }
    }

    /// Permissive preset: a shorter narrative is enough
    pub fn permissive() -> Self {
        Self {
            min_case_features: 3,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.classify_window_chars == 0 {
            return Err("classify_window_chars must be greater than 0".to_string());
        }
        if self.feature_window_chars == 0 || self.marker_window_chars == 0 {
            return Err("routing windows must be greater than 0".to_string());
        }
        if self.min_case_features == 0 {
            return Err("min_case_features must be greater than 0".to_string());
        }
        Ok(())
    }
}
