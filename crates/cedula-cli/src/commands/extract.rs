//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cedula_extractor::CedulaExtractor;
use std::fs;
use std::io::{self, Read};

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_transcript(&args)?;

    let extractor = CedulaExtractor::new(config.extractor.clone());
    let fields = extractor.extract_text(&text);
    tracing::debug!("Extracted {} field(s)", fields.len());

    println!("{}", formatter.format_extraction(&fields)?);

    Ok(())
}

/// Read the transcript from the file or stdin.
fn read_transcript(args: &ExtractArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = &args.file {
        Ok(fs::read_to_string(path)?)
    } else {
        Err(CliError::InvalidInput(
            "Must specify either a file or --stdin".to_string(),
        ))
    }
}
