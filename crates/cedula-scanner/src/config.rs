//! Configuration for the scan driver
//!
//! Defines the sampling cadence, the recognizer timeout and when to stop.

use crate::ScannerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the scan worker
///
/// # Examples
///
/// ```
/// use cedula_scanner::ScannerConfig;
///
/// // Default configuration (10 samples per second)
/// let config = ScannerConfig::default();
/// assert_eq!(config.sample_interval_ms, 100);
///
/// // Sample as fast as a 30 fps camera delivers
/// let config = ScannerConfig::realtime();
/// assert_eq!(config.sample_interval_ms, 33);
///
/// // Battery friendly
/// let config = ScannerConfig::low_power();
/// assert_eq!(config.sample_interval_ms, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Time between two sampled frames (in milliseconds)
    /// Default: 100
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,

    /// Longest a single recognizer call may take (in milliseconds)
    /// Default: 10 000
    #[serde(default = "default_recognizer_timeout_ms")]
    pub recognizer_timeout_ms: u64,

    /// Stop sampling once every field has been detected
    /// Default: true
    #[serde(default = "default_stop_on_complete")]
    pub stop_on_complete: bool,

    /// Stop after this many sampling ticks, if set
    /// Default: unbounded
    #[serde(default)]
    pub max_frames: Option<u64>,
}

fn default_sample_interval_ms() -> u64 {
    100
}

fn default_recognizer_timeout_ms() -> u64 {
    10_000
}

fn default_stop_on_complete() -> bool {
    true
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: default_sample_interval_ms(),
            recognizer_timeout_ms: default_recognizer_timeout_ms(),
            stop_on_complete: default_stop_on_complete(),
            max_frames: None,
        }
    }
}

impl ScannerConfig {
    /// Sample at camera frame rate, short recognizer timeout
    pub fn realtime() -> Self {
        Self {
            sample_interval_ms: 33,
            recognizer_timeout_ms: 5_000,
            ..Self::default()
        }
    }

    /// Sample twice a second, patient recognizer timeout
    pub fn low_power() -> Self {
        Self {
            sample_interval_ms: 500,
            recognizer_timeout_ms: 30_000,
            ..Self::default()
        }
    }

    /// Get sample interval as Duration
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Get recognizer timeout as Duration
    pub fn recognizer_timeout(&self) -> Duration {
        Duration::from_millis(self.recognizer_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_interval_ms == 0 {
            return Err("sample_interval_ms must be greater than 0".to_string());
        }
        if self.recognizer_timeout_ms == 0 {
            return Err("recognizer_timeout_ms must be greater than 0".to_string());
        }
        if self.max_frames == Some(0) {
            return Err("max_frames must be greater than 0 when set".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScannerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ScannerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate().map_err(ScannerError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ScannerError> {
        toml::to_string_pretty(self)
            .map_err(|e| ScannerError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
