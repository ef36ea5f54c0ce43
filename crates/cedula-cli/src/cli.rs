//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cedula CLI - Extract identity card fields from recognizer output.
#[derive(Debug, Parser)]
#[command(name = "cedula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CEDULA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (detected values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay recognizer transcripts through the scanner
    Scan(ScanArgs),

    /// Extract fields from a single recognizer transcript
    Extract(ExtractArgs),

    /// List the fields of an identity record
    Fields,

    /// Enter an interactive scan session
    Session,
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Transcript files, one recognizer output per file, in frame order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Time between two sampled frames in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Keep sampling after every field was detected
    #[arg(short, long)]
    pub keep_going: bool,

    /// Print scan metrics after the record
    #[arg(short, long)]
    pub metrics: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Transcript file
    #[arg(required_unless_present = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the transcript from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
