//! Record accumulation and scoring

use cedula_domain::{Field, FieldMap, Record, Score};
use tracing::debug;

/// Accumulated state handed to observers after every merge
///
/// A copy: mutating it has no effect on the accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanState {
    /// Fields detected so far this session
    pub record: Record,

    /// Completeness of `record`
    pub score: Score,
}

impl ScanState {
    /// Check if every field has been detected
    pub fn is_complete(&self) -> bool {
        self.score.is_complete()
    }
}

/// What a single merge changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Fields seen for the first time this session
    pub detected: Vec<Field>,

    /// Fields whose stored value was replaced by a different one
    pub replaced: Vec<Field>,

    /// Fields offered with an empty value and left untouched
    pub ignored_empty: Vec<Field>,
}

impl MergeReport {
    /// Check if the merge left the record as it was
    pub fn is_noop(&self) -> bool {
        self.detected.is_empty() && self.replaced.is_empty()
    }

    /// Number of fields written by the merge
    pub fn changed_count(&self) -> usize {
        self.detected.len() + self.replaced.len()
    }
}

/// Owns the evolving record and its score
///
/// Values only ever move forward within a session: a stored value can be
/// replaced by a different non-empty value, never cleared, until
/// [`reset`](Self::reset).
///
/// # Examples
///
/// ```
/// use cedula_accumulator::RecordAccumulator;
/// use cedula_domain::{Field, FieldMap};
///
/// let mut accumulator = RecordAccumulator::new();
///
/// let mut fields = FieldMap::new();
/// fields.insert(Field::IdNumber, "0-1234-5678".to_string());
/// accumulator.merge(&fields);
///
/// // A worse frame reads the label but not the value
/// fields.insert(Field::IdNumber, String::new());
/// let state = accumulator.merge(&fields);
///
/// assert_eq!(state.record.get(Field::IdNumber), Some("0-1234-5678"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordAccumulator {
    record: Record,
    score: Score,
    last_report: MergeReport,
}

impl RecordAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the record and the score
    pub fn reset(&mut self) {
        self.record.clear();
        self.score = Score::ZERO;
        self.last_report = MergeReport::default();
    }

    /// Merge one snapshot's fields and return the updated state
    ///
    /// Empty values are ignored, identical values are no-ops, different
    /// non-empty values replace what was stored. The score is recomputed
    /// from the record afterwards.
    pub fn merge(&mut self, extracted: &FieldMap) -> ScanState {
        let mut report = MergeReport::default();

        for (field, value) in extracted {
            if value.is_empty() {
                report.ignored_empty.push(*field);
                continue;
            }

            match self.record.get(*field) {
                Some(current) if current == value => {}
                Some(current) => {
                    debug!("Replacing {}: {:?} -> {:?}", field, current, value);
                    self.record.set(*field, value.as_str());
                    report.replaced.push(*field);
                }
                None => {
                    debug!("Detected {}: {:?}", field, value);
                    self.record.set(*field, value.as_str());
                    report.detected.push(*field);
                }
            }
        }

        self.score = self.record.score();
        self.last_report = report;
        self.state()
    }

    /// Copy of the current record and score
    pub fn state(&self) -> ScanState {
        ScanState {
            record: self.record.clone(),
            score: self.score,
        }
    }

    /// Get the current record
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Get the current score
    pub fn score(&self) -> Score {
        self.score
    }

    /// What the most recent merge changed
    pub fn last_report(&self) -> &MergeReport {
        &self.last_report
    }
}
