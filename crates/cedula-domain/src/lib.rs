//! Cedula Domain Layer
//!
//! This crate contains the field schema and value objects shared by every
//! other crate in the workspace. It has ZERO external dependencies and
//! defines the concepts and trait interfaces the extractor, accumulator and
//! scanner are written against.
//!
//! ## Key Concepts
//!
//! - **Field**: One of the nine named slots printed on a national ID card
//! - **Snapshot**: The text lines a recognizer produced for one frame
//! - **Record**: Session-scoped mapping of fields to detected values
//! - **Score**: Percentage of the nine fields detected at least once
//! - **Frame**: An opaque captured image handed to the recognizer
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Collaborators (capture, recognition, extraction) are traits here and
//!   implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod record;
pub mod score;
pub mod snapshot;
pub mod traits;

// Re-exports for convenience
pub use field::{Field, Sex};
pub use record::{FieldMap, Record};
pub use score::Score;
pub use snapshot::{Frame, Snapshot};
