//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::parser::classify_line;
use cedula_domain::traits::FieldExtractor;
use cedula_domain::{FieldMap, Snapshot};
use tracing::{debug, trace};

/// The Extractor turns one snapshot into the fields it mentions
///
/// Stateless across snapshots: what was found earlier is the accumulator's
/// business. When a field matches on several lines, the last line wins.
#[derive(Debug, Clone, Default)]
pub struct CedulaExtractor {
    config: ExtractorConfig,
}

impl CedulaExtractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an Extractor with every rule enabled
    pub fn default_config() -> Self {
        Self::new(ExtractorConfig::default())
    }

    /// Get the active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract fields from raw recognizer text
    pub fn extract_text(&self, text: &str) -> FieldMap {
        self.extract(&Snapshot::from_text(text))
    }
}

impl FieldExtractor for CedulaExtractor {
    fn extract(&self, snapshot: &Snapshot) -> FieldMap {
        let mut fields = FieldMap::new();

        for (idx, line) in snapshot.lines().iter().enumerate() {
            if let Some((field, value)) = classify_line(line, &self.config) {
                debug!("Line {} classified as {}: {:?}", idx, field, value);
                fields.insert(field, value);
            }
        }

        trace!(
            "Extracted {} field(s) from {} line(s)",
            fields.len(),
            snapshot.len()
        );

        fields
    }
}
