//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the scanning core and its
//! collaborators. Implementations live in other crates.

use crate::{FieldMap, Frame, Snapshot};

/// Trait for turning a snapshot into detected fields
///
/// Implemented by the application layer (cedula-extractor). Extraction is
/// total: any input, however garbled, yields a (possibly empty) map.
pub trait FieldExtractor {
    /// Extract the fields detected in one snapshot
    fn extract(&self, snapshot: &Snapshot) -> FieldMap;
}

/// Trait for the optical character recognizer
///
/// Opaque to this workspace: image in, raw multi-line text out. Calls may be
/// slow and may fail; callers treat a failure as "no snapshot this cycle".
pub trait Recognizer {
    /// Error type for recognition
    type Error;

    /// Recognize the text visible in a frame
    fn recognize(&self, frame: &Frame) -> Result<String, Self::Error>;
}

/// Trait for the capture device supplying frames
pub trait FrameSource {
    /// Error type for capture
    type Error;

    /// Take the next frame
    ///
    /// `Ok(None)` means the source is exhausted and no more frames will come.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}
