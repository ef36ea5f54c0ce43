//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
///
/// Labeled fields are always detected. The two shape-based rules can be
/// switched off individually; the all-caps name rule in particular is known
/// to misfire on other all-caps lines such as place names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Classify all-caps lines as the holder's full name
    #[serde(default = "default_true")]
    pub detect_full_name: bool,

    /// Classify `MASCULINO` / `FEMENINO` lines as the holder's sex
    #[serde(default = "default_true")]
    pub detect_sex: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExtractorConfig {
    /// Every rule enabled
    fn default() -> Self {
        Self {
            detect_full_name: true,
            detect_sex: true,
        }
    }
}

impl ExtractorConfig {
    /// Labels only: no shape-based detection
    pub fn labels_only() -> Self {
        Self {
            detect_full_name: false,
            detect_sex: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = ExtractorConfig::default();
        assert!(config.detect_full_name);
        assert!(config.detect_sex);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = ExtractorConfig::from_toml("detect_full_name = false").unwrap();
        assert!(!config.detect_full_name);
        assert!(config.detect_sex);

        let config = ExtractorConfig::from_toml("").unwrap();
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::labels_only();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ExtractorConfig::from_toml("detect_sex = \"maybe\"").is_err());
    }
}
