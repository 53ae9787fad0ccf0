//! Configuration for reconciliation passes
//!
//! Defines which repair steps run, the merge-scan threshold, and the worker
//! interval.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Reconciler
///
/// # Examples
///
/// ```
/// use lawbook_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.merge_scan_min_chars, 1000);
///
/// // Every step, looser merge scan
/// let config = JanitorConfig::thorough();
/// assert_eq!(config.merge_scan_min_chars, 200);
///
/// // Report only
/// let config = JanitorConfig::conservative();
/// assert!(config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    /// Only statute records longer than this many characters are checked
    /// for merged articles
    /// Default: 1000
    pub merge_scan_min_chars: usize,

    /// Count every mutation without writing anything
    /// Default: false
    pub dry_run: bool,

    /// Move misrouted records to the other collection
    pub migrate: bool,

    /// Fill unset fields and recompute unclassified domains
    pub backfill: bool,

    /// Split statute records that swallowed neighbouring articles
    pub split_merged: bool,

    /// Remove a record's own marker from the front of its content
    pub strip_marker_remnants: bool,

    /// Minutes between passes when running as a worker
    /// Default: 60
    pub worker_interval_minutes: u64,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            merge_scan_min_chars: 1000,
            dry_run: false,
            migrate: true,
            backfill: true,
            split_merged: true,
            strip_marker_remnants: true,
            worker_interval_minutes: 60,
        }
    }
}

impl JanitorConfig {
    /// Every step enabled and merge detection on shorter records
    pub fn thorough() -> Self {
        Self {
            merge_scan_min_chars: 200,
            ..Self::default()
        }
    }

    /// Dry run that never moves records between collections
    pub fn conservative() -> Self {
        Self {
            dry_run: true,
            migrate: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_interval_minutes == 0 {
            return Err("worker_interval_minutes must be at least 1".to_string());
        }
        Ok(())
    }

    /// Worker interval as Duration
    pub fn worker_interval(&self) -> Duration {
        Duration::from_secs(self.worker_interval_minutes * 60)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.merge_scan_min_chars, 1000);
        assert_eq!(config.worker_interval_minutes, 60);
        assert!(!config.dry_run);
        assert!(config.migrate && config.backfill && config.split_merged);
        assert!(config.strip_marker_remnants);
    }

    #[test]
    fn test_presets() {
        let thorough = JanitorConfig::thorough();
        assert!(thorough.merge_scan_min_chars < JanitorConfig::default().merge_scan_min_chars);
        assert!(!thorough.dry_run);

        let conservative = JanitorConfig::conservative();
        assert!(conservative.dry_run);
        assert!(!conservative.migrate);
        assert!(conservative.backfill);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = JanitorConfig {
            worker_interval_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(JanitorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_duration_conversion() {
        let config = JanitorConfig::default();
        assert_eq!(config.worker_interval(), Duration::from_secs(3600));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = JanitorConfig::thorough();
        let parsed = JanitorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = JanitorConfig::from_toml("dry_run = true\n").unwrap();
        assert!(parsed.dry_run);
        assert_eq!(parsed.merge_scan_min_chars, 1000);
        assert!(parsed.migrate);
    }
}
