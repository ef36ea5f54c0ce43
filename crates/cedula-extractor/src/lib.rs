//! Cedula Extractor
//!
//! Converts one recognizer snapshot into the ID-card fields it mentions.
//!
//! # Overview
//!
//! The Extractor is a pure function over text. It has no memory of earlier
//! snapshots and never fails: garbled or empty input simply yields an empty
//! field map.
//!
//! # Rules
//!
//! Each line is classified independently, first rule wins:
//!
//! - **Labels**: `Número de Cédula`, `Fecha de Nacimiento`,
//!   `Lugar de Nacimiento`, `Nombre del Padre`, `Nombre de la Madre`,
//!   `Domicilio Electoral`, `Vencimiento`. The value is the text after the
//!   colon following the label.
//! - **Sex**: the whole line is `MASCULINO` or `FEMENINO`, any case.
//! - **Full name**: the whole line is uppercase letters and spaces.
//!
//! # Example Usage
//!
//! ```
//! use cedula_domain::Field;
//! use cedula_extractor::CedulaExtractor;
//!
//! let extractor = CedulaExtractor::default_config();
//! let fields = extractor.extract_text("Número de Cédula: 1-0234-0567\nJUAN PEREZ GOMEZ");
//!
//! assert_eq!(fields[&Field::IdNumber], "1-0234-0567");
//! assert_eq!(fields[&Field::FullName], "JUAN PEREZ GOMEZ");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::CedulaExtractor;
pub use parser::classify_line;
