//! Fields command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the fields command.
pub fn execute_fields(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_schema()?);
    Ok(())
}
