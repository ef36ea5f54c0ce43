//! Record module - accumulated field values

use crate::{Field, Score};
use std::collections::BTreeMap;

/// Fields detected in a single snapshot, keyed in canonical order
///
/// A missing key means "not found in this snapshot". Values may be empty;
/// it is up to the consumer to decide what an empty value means.
pub type FieldMap = BTreeMap<Field, String>;

/// Session-scoped mapping of fields to their detected values
///
/// A field that is absent has not been detected yet. `Record` only stores
/// values; the rules deciding when a value may be written live in the
/// accumulator that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<Field, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of a field, if detected
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Check if a field has been detected
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Store a value, returning the previous one
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Option<String> {
        self.values.insert(field, value.into())
    }

    /// Remove every value
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of detected fields
    pub fn detected_count(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been detected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if every field has been detected
    pub fn is_complete(&self) -> bool {
        self.values.len() == Field::COUNT
    }

    /// Fields not detected yet, in canonical order
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// Iterate detected fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Completeness score of this record
    pub fn score(&self) -> Score {
        Score::from_detected(self.detected_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let record = Record::new();
        assert!(record.is_empty());
        assert_eq!(record.missing().len(), Field::COUNT);
        assert_eq!(record.score(), Score::ZERO);
    }

    #[test]
    fn test_set_and_get() {
        let mut record = Record::new();
        assert_eq!(record.set(Field::IdNumber, "1-0234-0567"), None);
        assert_eq!(record.get(Field::IdNumber), Some("1-0234-0567"));
        assert_eq!(
            record.set(Field::IdNumber, "1-0234-0568"),
            Some("1-0234-0567".to_string())
        );
        assert_eq!(record.detected_count(), 1);
        assert!(!record.missing().contains(&Field::IdNumber));
    }

    #[test]
    fn test_iter_is_canonical_order() {
        let mut record = Record::new();
        record.set(Field::ExpirationDate, "2030");
        record.set(Field::IdNumber, "1");
        record.set(Field::Sex, "FEMENINO");

        let fields: Vec<Field> = record.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::IdNumber, Field::Sex, Field::ExpirationDate]);
    }
}
