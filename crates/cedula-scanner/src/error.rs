//! Error types for scanner operations

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while driving a scan
///
/// Capture, recognizer and timeout errors are swallowed by the worker loop
/// (logged and counted, the frame is skipped). Only configuration errors
/// reach the caller of `ScanWorker::run*`.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// Capture device failed to deliver a frame
    #[error("Capture error: {0}")]
    Capture(String),

    /// Recognizer failed on a frame
    #[error("Recognizer error: {0}")]
    Recognizer(String),

    /// Recognizer did not answer in time
    #[error("Recognizer timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
