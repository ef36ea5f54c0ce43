//! Cedula Accumulator
//!
//! Owns the record reconstructed from a stream of snapshots.
//!
//! # Overview
//!
//! - [`RecordAccumulator`] merges each snapshot's fields into a persistent
//!   record and recomputes the completeness score. Merges are idempotent
//!   and monotonic: values are added or replaced by other non-empty values,
//!   never cleared, until an explicit reset.
//! - [`ScanSession`] wraps an extractor and an accumulator in an explicit
//!   `Idle` / `Scanning` state machine driven by `start`, `stop` and
//!   `frame_observed`.
//!
//! Both are synchronous and single-owner. The driver loop in
//! `cedula-scanner` is the only thing that needs to care about time.
//!
//! # Score
//!
//! `min(100, 100 * detected / 9)`, kept unrounded:
//!
//! ```
//! use cedula_accumulator::ScanSession;
//! use cedula_domain::Snapshot;
//!
//! let mut session = ScanSession::default_config();
//! session.start();
//! let state = session.frame_observed(&Snapshot::from_text(
//!     "Número de Cédula: 1-0234-0567\nJUAN PEREZ GOMEZ\nMASCULINO\nFecha de Nacimiento: 01/01/1990",
//! ));
//!
//! assert_eq!(state.score.value(), 100.0 * 4.0 / 9.0);
//! assert_eq!(state.score.to_string(), "44.44%");
//! ```

#![warn(missing_docs)]

mod accumulator;
mod session;

pub use accumulator::{MergeReport, RecordAccumulator, ScanState};
pub use session::{ScanSession, SessionState};
