//! Classify recognizer lines into card fields

use crate::config::ExtractorConfig;
use cedula_domain::{Field, Sex};

/// Labeled fields in priority order. A line containing several labels is
/// classified under the first one listed here.
pub(crate) const LABELED_FIELDS: [Field; 7] = [
    Field::IdNumber,
    Field::BirthDate,
    Field::BirthPlace,
    Field::FatherName,
    Field::MotherName,
    Field::ElectoralAddress,
    Field::ExpirationDate,
];

/// Classify a single line
///
/// Rules are tried in order and the first hit wins:
/// 1. printed labels (substring match on the untrimmed line)
/// 2. the sex enumeration (exact word, any case)
/// 3. the all-caps name shape
pub fn classify_line(line: &str, config: &ExtractorConfig) -> Option<(Field, String)> {
    for field in LABELED_FIELDS {
        let Some(label) = field.label() else { continue };
        if let Some(value) = labeled_value(line, label) {
            return Some((field, value.to_string()));
        }
    }

    let trimmed = line.trim();

    if config.detect_sex && Sex::parse(trimmed).is_some() {
        return Some((Field::Sex, trimmed.to_string()));
    }

    if config.detect_full_name && is_name_shape(trimmed) {
        return Some((Field::FullName, trimmed.to_string()));
    }

    None
}

/// Value after `<label> ... :`, trimmed
///
/// The label may occur anywhere in the line. Everything after the first
/// colon following it is the value, which may be empty. Without a colon
/// after the label the line is not a labeled line.
fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let start = line.find(label)?;
    let rest = &line[start + label.len()..];
    let colon = rest.find(':')?;
    Some(rest[colon + 1..].trim())
}

/// Only uppercase letters and whitespace, at least one letter
fn is_name_shape(trimmed: &str) -> bool {
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_whitespace() || c.is_uppercase())
}
