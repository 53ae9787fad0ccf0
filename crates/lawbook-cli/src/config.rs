//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lawbook_extractor::ExtractorConfig;
use lawbook_gatekeeper::GatekeeperConfig;
use lawbook_janitor::JanitorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,

    /// Segmentation limits and category mappings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Classifier and router windows
    #[serde(default)]
    pub gatekeeper: GatekeeperConfig,

    /// Reconciliation steps and schedule
    #[serde(default)]
    pub janitor: JanitorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lawbook").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path.
    ///
    /// A missing default file is created with default values; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!("{} does not exist", path.display())));
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    let config = Self::default();
                    if let Err(e) = config.save_to(&path) {
                        tracing::debug!("Could not write default config to {}: {}", path.display(), e);
                    }
                    Ok(config)
                }
            }
        }
    }

    /// Load configuration from file or return defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every nested section.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.gatekeeper
            .validate()
            .map_err(|e| CliError::Config(format!("[gatekeeper] {}", e)))?;
        self.janitor
            .validate()
            .map_err(|e| CliError::Config(format!("[janitor] {}", e)))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            settings: Settings::default(),
            extractor: ExtractorConfig::default(),
            gatekeeper: GatekeeperConfig::default(),
            janitor: JanitorConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".lawbook").join("lawbook.db"))
        .unwrap_or_else(|| PathBuf::from("lawbook.db"))
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.database_path.ends_with("lawbook.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.database_path = dir.path().join("laws.db");
        config.janitor = JanitorConfig::thorough();
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.database_path, config.database_path);
        assert_eq!(loaded.janitor, config.janitor);
        assert_eq!(loaded.extractor, config.extractor);
        assert_eq!(loaded.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_path = \"/tmp/x.db\"\n\n[janitor]\ndry_run = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/x.db"));
        assert!(config.janitor.dry_run);
        assert_eq!(config.janitor.merge_scan_min_chars, 1000);
        assert_eq!(config.gatekeeper, GatekeeperConfig::default());
    }

    #[test]
    fn test_invalid_section_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[janitor]\nworker_interval_minutes = 0\n").unwrap();

        match Config::load_from(&path) {
            Err(CliError::Config(msg)) => assert!(msg.starts_with("[janitor]")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
