//! Configuration for segmentation and ingestion

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum characters kept per article unit
    pub max_unit_chars: usize,

    /// Units at or below this many characters are discarded
    pub min_unit_chars: usize,

    /// A marker-less document must be longer than this to be stored whole
    pub min_document_chars: usize,

    /// Maximum characters kept for case content
    pub max_case_chars: usize,

    /// Statute category directory → stored domain label
    pub statute_categories: BTreeMap<String, String>,

    /// Case subcategory directory → stored domain label
    pub case_categories: BTreeMap<String, String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_unit_chars == 0 {
            return Err("max_unit_chars must be greater than 0".to_string());
        }
        if self.min_unit_chars >= self.max_unit_chars {
            return Err("min_unit_chars must be less than max_unit_chars".to_string());
        }
        if self.min_document_chars >= self.max_unit_chars {
            return Err("min_document_chars must be less than max_unit_chars".to_string());
        }
        if self.max_case_chars == 0 {
            return Err("max_case_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Domain label for a statute category directory
    pub fn statute_domain(&self, category: &str) -> Option<&str> {
        self.statute_categories.get(category).map(String::as_str)
    }

    /// Domain label for a case subcategory directory
    pub fn case_domain(&self, category: &str) -> Option<&str> {
        self.case_categories.get(category).map(String::as_str)
    }
}

fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_statute_categories() -> BTreeMap<String, String> {
    mapping(&[
        ("刑法", "刑法"),
        ("民法典", "民法"),
        ("民法商法", "民法"),
        ("宪法", "宪法"),
        ("宪法相关法", "宪法相关法"),
        ("行政法", "行政法"),
        ("行政法规", "行政法规"),
        ("经济法", "经济法"),
        ("社会法", "社会法"),
        ("诉讼与非诉讼程序法", "程序法"),
        ("部门规章", "部门规章"),
        ("司法解释", "司法解释"),
        ("案例", "案例"),
        ("其他", "其他"),
    ])
}

fn default_case_categories() -> BTreeMap<String, String> {
    mapping(&[
        ("劳动人事", "劳动法"),
        ("民法典", "民法"),
        ("消费购物", "消费者权益保护法"),
        ("行政协议诉讼", "行政法"),
        ("其他", "其他"),
    ])
}

impl Default for ExtractorConfig {
    /// Default configuration with the standard category mappings
    fn default() -> Self {
        Self {
            max_unit_chars: 5_000,
            min_unit_chars: 10,
            min_document_chars: 50,
            max_case_chars: 5_000,
            statute_categories: default_statute_categories(),
            case_categories: default_case_categories(),
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: drops short fragments more eagerly
    pub fn strict() -> Self {
        Self {
            min_unit_chars: 20,
            min_document_chars: 100,
            ..Self::default()
        }
    }

    /// Lenient preset: keeps short units and longer bodies
    pub fn lenient() -> Self {
        Self {
            max_unit_chars: 10_000,
            min_unit_chars: 5,
            min_document_chars: 20,
            max_case_chars: 20_000,
            ..Self::default()
        }
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
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_unit_bounds() {
        let mut config = ExtractorConfig::default();
        config.min_unit_chars = config.max_unit_chars;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.max_case_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_category_lookup() {
        let config = ExtractorConfig::default();
        assert_eq!(config.statute_domain("民法商法"), Some("民法"));
        assert_eq!(config.statute_domain("诉讼与非诉讼程序法"), Some("程序法"));
        assert_eq!(config.case_domain("消费购物"), Some("消费者权益保护法"));
        assert_eq!(config.case_domain("未知"), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("max_unit_chars = 8000\n").unwrap();
        assert_eq!(parsed.max_unit_chars, 8000);
        assert_eq!(parsed.min_unit_chars, 10);
        assert_eq!(parsed.case_domain("劳动人事"), Some("劳动法"));
    }
}
