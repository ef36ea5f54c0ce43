//! Cedula Scanner
//!
//! Background driver that feeds camera frames through a recognizer into a
//! scan session until the record is complete.
//!
//! # Overview
//!
//! The scanner is responsible for:
//! - **Sampling**: Pulling one frame per tick from a [`FrameSource`](cedula_domain::traits::FrameSource)
//! - **Recognition**: Running the [`Recognizer`](cedula_domain::traits::Recognizer) off the async
//!   runtime, bounded by a timeout
//! - **Merging**: Handing each recognized snapshot to the session, which extracts and merges fields
//! - **Metrics collection**: Counting frames, merges and failures
//!
//! A failing frame (capture error, recognizer error, timeout) is logged and
//! skipped. It never touches the accumulated record.
//!
//! # Usage
//!
//! ```no_run
//! use cedula_scanner::{ReplaySource, ScanWorker, ScannerConfig, TranscriptRecognizer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = ReplaySource::from_transcripts([
//!         "Número de Cédula: 1-0234-0567\nJUAN PEREZ GOMEZ",
//!         "Vencimiento: 15/03/2031",
//!     ]);
//!     let mut worker = ScanWorker::new(ScannerConfig::default());
//!
//!     // Run until the source is exhausted, the record completes or Ctrl+C
//!     let state = worker.run(source, TranscriptRecognizer).await?;
//!     println!("{}", state.score);
//!     println!("\n{}", worker.metrics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use cedula_scanner::ScannerConfig;
//!
//! // Default: 10 samples per second, 10s recognizer timeout
//! let config = ScannerConfig::default();
//!
//! // Realtime: sample every camera frame at 30 fps
//! let config = ScannerConfig::realtime();
//!
//! // Low power: two samples per second
//! let config = ScannerConfig::low_power();
//! ```
//!
//! # Configuration
//!
//! The scanner can be configured via TOML:
//!
//! ```toml
//! [scanner]
//! sample_interval_ms = 100
//! recognizer_timeout_ms = 10000
//! stop_on_complete = true
//! max_frames = 300
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod mock;
mod replay;
mod worker;

pub use config::ScannerConfig;
pub use error::ScannerError;
pub use metrics::ScanMetrics;
pub use mock::{MockRecognizer, MockRecognizerError};
pub use replay::{ReplaySource, TranscriptRecognizer};
pub use worker::ScanWorker;
