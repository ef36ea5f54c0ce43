//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while configuring the extractor
///
/// Extraction itself never fails; only loading or saving configuration can.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration file could not be parsed
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
