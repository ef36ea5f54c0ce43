//! Scripted recognizer for deterministic testing

use cedula_domain::traits::Recognizer;
use cedula_domain::Frame;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

/// Error returned by [`MockRecognizer`] for scripted failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Mock recognizer error: {0}")]
pub struct MockRecognizerError(pub String);

/// Mock recognizer returning pre-configured text
///
/// Scripted responses are consumed in order, one per call; once the script
/// runs out every call returns the default text. No image is ever looked at.
///
/// # Examples
///
/// ```
/// use cedula_domain::traits::Recognizer;
/// use cedula_domain::Frame;
/// use cedula_scanner::MockRecognizer;
///
/// let recognizer = MockRecognizer::new("");
/// recognizer.push_text("Vencimiento: 15/03/2031");
/// recognizer.push_error("camera glare");
///
/// let frame = Frame::new(0, Vec::new());
/// assert_eq!(recognizer.recognize(&frame).unwrap(), "Vencimiento: 15/03/2031");
/// assert!(recognizer.recognize(&frame).is_err());
/// assert_eq!(recognizer.recognize(&frame).unwrap(), "");
/// assert_eq!(recognizer.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    default_response: String,
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl MockRecognizer {
    /// Create a recognizer returning `response` once the script is empty
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
            delay: None,
        }
    }

    /// Block every call for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful recognition
    pub fn push_text(&self, text: impl Into<String>) {
        lock(&self.script).push_back(Ok(text.into()));
    }

    /// Queue a failed recognition
    pub fn push_error(&self, message: impl Into<String>) {
        lock(&self.script).push_back(Err(message.into()));
    }

    /// Get the number of times recognize was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Number of scripted responses not consumed yet
    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new("")
    }
}

impl Recognizer for MockRecognizer {
    type Error = MockRecognizerError;

    fn recognize(&self, _frame: &Frame) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        match lock(&self.script).pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(MockRecognizerError(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
