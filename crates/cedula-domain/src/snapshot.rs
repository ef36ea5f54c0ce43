//! Snapshots (recognizer text) and frames (captured images)

/// Text produced by the recognizer for one sampled frame
///
/// An ordered sequence of lines, possibly empty. Snapshots are ephemeral:
/// they are merged into a record and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    lines: Vec<String>,
}

impl Snapshot {
    /// Create a snapshot from already-split lines
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Split raw recognizer output into lines
    ///
    /// Both `\n` and `\r\n` terminate a line. Lines are kept untrimmed since
    /// label matching runs against the raw text.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// An empty snapshot (nothing was recognized)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines in recognizer order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the snapshot has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&str> for Snapshot {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl<S: Into<String>> FromIterator<S> for Snapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One captured image, opaque to this workspace
///
/// Only the recognizer interprets `data`; the scanner just moves frames from
/// the capture source to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Capture sequence number, starting at 0 for each source
    pub sequence: u64,

    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl Frame {
    /// Create a new frame
    pub fn new(sequence: u64, data: Vec<u8>) -> Self {
        Self { sequence, data }
    }
}
