//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cedula_extractor::CedulaExtractor;
use cedula_scanner::{ReplaySource, ScanWorker, ScannerConfig, TranscriptRecognizer};
use std::fs;
use std::path::PathBuf;

/// Execute the scan command.
pub async fn execute_scan(args: ScanArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let transcripts = read_transcripts(&args.files)?;
    let scanner_config = scanner_config(&args, &config.scanner);

    tracing::info!("Replaying {} transcript(s)", transcripts.len());

    let extractor = CedulaExtractor::new(config.extractor.clone());
    let mut worker = ScanWorker::with_extractor(scanner_config, extractor);
    let state = worker
        .run(ReplaySource::from_transcripts(transcripts), TranscriptRecognizer)
        .await?;

    println!("{}", formatter.format_state(&state)?);

    if args.metrics && formatter.format() == OutputFormat::Table {
        println!();
        println!("{}", worker.metrics().summary());
    }

    if !state.is_complete() && formatter.format() == OutputFormat::Table {
        let missing = state
            .record
            .missing()
            .iter()
            .map(|field| field.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        eprintln!("{}", formatter.warning(&format!("Not detected: {}", missing)));
    }

    Ok(())
}

/// Read every transcript file, in order.
fn read_transcripts(files: &[PathBuf]) -> Result<Vec<String>> {
    if files.is_empty() {
        return Err(CliError::InvalidInput("No transcript files given".to_string()));
    }

    files
        .iter()
        .map(|path| {
            fs::read_to_string(path).map_err(|e| {
                CliError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
            })
        })
        .collect()
}

/// Apply command line overrides to the configured scanner settings.
fn scanner_config(args: &ScanArgs, base: &ScannerConfig) -> ScannerConfig {
    let mut config = base.clone();
    if let Some(interval_ms) = args.interval_ms {
        config.sample_interval_ms = interval_ms;
    }
    if args.keep_going {
        config.stop_on_complete = false;
    }
    config
}
