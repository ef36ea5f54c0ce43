//! Metrics collection for scan runs

use cedula_accumulator::MergeReport;

/// Counters collected while a worker drives a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanMetrics {
    /// Frames delivered by the capture source
    pub frames_captured: u64,

    /// Snapshots merged into the session
    pub snapshots_merged: u64,

    /// Merged snapshots with no lines at all
    pub empty_snapshots: u64,

    /// Ticks where the capture source failed
    pub capture_failures: u64,

    /// Frames the recognizer failed on
    pub recognizer_failures: u64,

    /// Frames the recognizer did not finish in time
    pub recognizer_timeouts: u64,

    /// Ticks skipped while a timed-out recognizer call was still running
    pub busy_ticks: u64,

    /// Fields detected for the first time
    pub fields_detected: u64,

    /// Fields replaced by a different value
    pub fields_replaced: u64,

    /// Empty values offered and ignored
    pub empty_values_ignored: u64,

    /// Merged snapshots needed to complete the record, if it completed
    pub completed_after: Option<u64>,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl ScanMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a captured frame
    pub fn record_frame(&mut self) {
        self.frames_captured += 1;
    }

    /// Record a capture failure
    pub fn record_capture_failure(&mut self) {
        self.capture_failures += 1;
    }

    /// Record a recognizer failure
    pub fn record_recognizer_failure(&mut self) {
        self.recognizer_failures += 1;
    }

    /// Record a recognizer timeout
    pub fn record_recognizer_timeout(&mut self) {
        self.recognizer_timeouts += 1;
    }

    /// Record a tick skipped because the recognizer was still busy
    pub fn record_busy_tick(&mut self) {
        self.busy_ticks += 1;
    }

    /// Record a merged snapshot and what it changed
    pub fn record_merge(&mut self, report: &MergeReport, empty_snapshot: bool) {
        self.snapshots_merged += 1;
        if empty_snapshot {
            self.empty_snapshots += 1;
        }
        self.fields_detected += report.detected.len() as u64;
        self.fields_replaced += report.replaced.len() as u64;
        self.empty_values_ignored += report.ignored_empty.len() as u64;
    }

    /// Record that the record became complete (first time only)
    pub fn record_completion(&mut self) {
        if self.completed_after.is_none() {
            self.completed_after = Some(self.snapshots_merged);
        }
    }

    /// Frames lost to capture, recognizer or timeout failures
    pub fn total_failures(&self) -> u64 {
        self.capture_failures + self.recognizer_failures + self.recognizer_timeouts
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Scan Metrics Summary".to_string(),
            "====================".to_string(),
            format!("Frames captured: {}", self.frames_captured),
            format!("Snapshots merged: {}", self.snapshots_merged),
            format!("Empty snapshots: {}", self.empty_snapshots),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
            format!("Fields detected: {}", self.fields_detected),
            format!("Fields replaced: {}", self.fields_replaced),
            format!("Empty values ignored: {}", self.empty_values_ignored),
        ];

        match self.completed_after {
            Some(n) => lines.push(format!("Completed after: {} snapshot(s)", n)),
            None => lines.push("Completed after: not completed".to_string()),
        }

        if self.total_failures() > 0 {
            lines.push(String::new());
            lines.push("Failures:".to_string());
            lines.push(format!("  Capture: {}", self.capture_failures));
            lines.push(format!("  Recognizer: {}", self.recognizer_failures));
            lines.push(format!("  Timeout: {}", self.recognizer_timeouts));
            lines.push(format!("  Busy ticks: {}", self.busy_ticks));
            lines.push(format!("  Total: {}", self.total_failures()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedula_domain::Field;

    #[test]
    fn test_metrics_creation() {
        let metrics = ScanMetrics::new();
        assert_eq!(metrics.frames_captured, 0);
        assert_eq!(metrics.total_failures(), 0);
        assert_eq!(metrics.completed_after, None);
    }

    #[test]
    fn test_record_merge() {
        let mut metrics = ScanMetrics::new();
        let report = MergeReport {
            detected: vec![Field::IdNumber, Field::Sex],
            replaced: vec![Field::FullName],
            ignored_empty: vec![Field::BirthDate],
        };
        metrics.record_merge(&report, false);
        metrics.record_merge(&MergeReport::default(), true);

        assert_eq!(metrics.snapshots_merged, 2);
        assert_eq!(metrics.empty_snapshots, 1);
        assert_eq!(metrics.fields_detected, 2);
        assert_eq!(metrics.fields_replaced, 1);
        assert_eq!(metrics.empty_values_ignored, 1);
    }

    #[test]
    fn test_completion_recorded_once() {
        let mut metrics = ScanMetrics::new();
        metrics.record_merge(&MergeReport::default(), false);
        metrics.record_merge(&MergeReport::default(), false);
        metrics.record_completion();
        metrics.record_merge(&MergeReport::default(), false);
        metrics.record_completion();

        assert_eq!(metrics.completed_after, Some(2));
    }

    #[test]
    fn test_failures() {
        let mut metrics = ScanMetrics::new();
        metrics.record_capture_failure();
        metrics.record_recognizer_failure();
        metrics.record_recognizer_failure();
        metrics.record_recognizer_timeout();
        metrics.record_busy_tick();

        // Busy ticks lose no frame
        assert_eq!(metrics.total_failures(), 4);
        assert_eq!(metrics.busy_ticks, 1);
    }

    #[test]
    fn test_reset() {
        let mut metrics = ScanMetrics::new();
        metrics.record_frame();
        metrics.record_recognizer_timeout();
        metrics.record_completion();

        metrics.reset();

        assert_eq!(metrics, ScanMetrics::default());
    }

    #[test]
    fn test_summary() {
        let mut metrics = ScanMetrics::new();
        metrics.record_frame();
        metrics.record_merge(
            &MergeReport {
                detected: vec![Field::IdNumber],
                ..Default::default()
            },
            false,
        );
        metrics.record_recognizer_failure();
        metrics.total_runtime_ms = 120;

        let summary = metrics.summary();
        assert!(summary.contains("Frames captured: 1"));
        assert!(summary.contains("Fields detected: 1"));
        assert!(summary.contains("Total runtime: 120ms"));
        assert!(summary.contains("not completed"));
        assert!(summary.contains("Recognizer: 1"));
    }
}
