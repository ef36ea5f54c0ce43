//! Completeness score

use crate::Field;

/// Percentage of the record's fields detected at least once, in `[0, 100]`
///
/// Computed as `min(100, 100 * detected / 9)` without rounding; four fields
/// give `44.444...`. Rounding is a display concern (see the `Display` impl,
/// which prints two decimals).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f64);

impl Score {
    /// The empty score
    pub const ZERO: Score = Score(0.0);

    /// The complete score
    pub const COMPLETE: Score = Score(100.0);

    /// Compute the score for a number of detected fields
    pub fn from_detected(detected: usize) -> Self {
        let raw = 100.0 * detected as f64 / Field::COUNT as f64;
        Self(raw.min(100.0))
    }

    /// Get the score as a percentage
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check if every field has been detected
    pub fn is_complete(&self) -> bool {
        self.0 >= 100.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
