//! Command implementations.

pub mod extract;
pub mod fields;
pub mod scan;

pub use self::extract::execute_extract;
pub use self::fields::execute_fields;
pub use self::scan::execute_scan;
