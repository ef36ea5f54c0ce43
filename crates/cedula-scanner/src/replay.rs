//! Replay collaborators: feed recorded recognizer transcripts as frames

use cedula_domain::traits::{FrameSource, Recognizer};
use cedula_domain::Frame;
use std::convert::Infallible;
use std::string::FromUtf8Error;

/// Frame source replaying a fixed list of payloads
///
/// Each payload becomes one frame, in order. Once exhausted the source
/// returns `None`, unless it loops.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    payloads: Vec<Vec<u8>>,
    position: usize,
    sequence: u64,
    looping: bool,
}

impl ReplaySource {
    /// Create a source over raw payloads
    pub fn new(payloads: Vec<Vec<u8>>) -> Self {
        Self {
            payloads,
            ..Self::default()
        }
    }

    /// Create a source whose frames carry UTF-8 transcripts
    ///
    /// Pair it with [`TranscriptRecognizer`].
    pub fn from_transcripts<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            transcripts
                .into_iter()
                .map(|text| text.into().into_bytes())
                .collect(),
        )
    }

    /// Start over from the first payload when the end is reached
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Number of payloads in one pass
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Check if there is nothing to replay
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl FrameSource for ReplaySource {
    type Error = Infallible;

    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
        if self.position >= self.payloads.len() {
            if !self.looping || self.payloads.is_empty() {
                return Ok(None);
            }
            self.position = 0;
        }

        let frame = Frame::new(self.sequence, self.payloads[self.position].clone());
        self.position += 1;
        self.sequence += 1;
        Ok(Some(frame))
    }
}

/// Recognizer for frames that already carry recognized text
///
/// Used to replay transcripts captured from a real recognizer: the frame
/// payload is decoded as UTF-8 and returned as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptRecognizer;

impl Recognizer for TranscriptRecognizer {
    type Error = FromUtf8Error;

    fn recognize(&self, frame: &Frame) -> Result<String, Self::Error> {
        String::from_utf8(frame.data.clone())
    }
}
