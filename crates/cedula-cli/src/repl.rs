//! Interactive session mode.
//!
//! Each line typed is one line of recognizer output. Lines are buffered and
//! an empty line submits the buffer as one snapshot. Lines starting with `:`
//! drive the session lifecycle.

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cedula_accumulator::{MergeReport, ScanSession, ScanState};
use cedula_domain::Snapshot;
use cedula_extractor::CedulaExtractor;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive session REPL.
pub fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Cedula session - Type ':start' to begin scanning, ':help' for commands")
    );
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize editor: {}", e),
        ))
    })?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut shell = SessionShell::new(CedulaExtractor::new(config.extractor.clone()));

    loop {
        let prompt = format!("cedula [{}]> ", shell.session.state().as_str());

        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str()).ok();
                }

                match parse_repl_line(&line) {
                    Ok(ReplInput::Command(ReplCommand::Exit)) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(input) => {
                        if let Err(e) = execute_repl_input(input, &mut shell, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use ':quit' to exit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// Session lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplCommand {
    Start,
    Stop,
    Status,
    Help,
    Exit,
}

/// One parsed line of input.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput {
    Command(ReplCommand),
    /// Empty line: submit the buffered lines
    Submit,
    /// Recognizer text to buffer
    Text(String),
}

/// What submitting the buffer did.
#[derive(Debug)]
enum Submitted {
    /// Nothing was buffered
    Nothing,
    /// The session is idle, the buffer was dropped
    Idle,
    /// The snapshot was merged
    Merged(ScanState),
}

/// Session plus the lines typed since the last submit.
struct SessionShell {
    session: ScanSession,
    pending: Vec<String>,
}

impl SessionShell {
    fn new(extractor: CedulaExtractor) -> Self {
        Self {
            session: ScanSession::new(extractor),
            pending: Vec::new(),
        }
    }

    fn buffer(&mut self, line: String) {
        self.pending.push(line);
    }

    fn submit(&mut self) -> Submitted {
        if self.pending.is_empty() {
            return Submitted::Nothing;
        }

        let snapshot = Snapshot::new(std::mem::take(&mut self.pending));
        if !self.session.is_scanning() {
            return Submitted::Idle;
        }

        Submitted::Merged(self.session.frame_observed(&snapshot))
    }

    fn start(&mut self) -> ScanState {
        self.pending.clear();
        self.session.start()
    }

    fn stop(&mut self) -> ScanState {
        self.pending.clear();
        self.session.stop()
    }
}

/// Parse a REPL line.
fn parse_repl_line(line: &str) -> Result<ReplInput> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Ok(ReplInput::Submit);
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return Ok(ReplInput::Text(line.to_string()));
    };

    match command.trim() {
        "start" | "s" => Ok(ReplInput::Command(ReplCommand::Start)),
        "stop" | "x" => Ok(ReplInput::Command(ReplCommand::Stop)),
        "status" | "st" => Ok(ReplInput::Command(ReplCommand::Status)),
        "help" | "?" => Ok(ReplInput::Command(ReplCommand::Help)),
        "quit" | "exit" | "q" => Ok(ReplInput::Command(ReplCommand::Exit)),
        other => Err(CliError::InvalidInput(format!(
            "Unknown command: :{}. Type ':help' for available commands.",
            other
        ))),
    }
}

/// Execute one parsed line.
fn execute_repl_input(input: ReplInput, shell: &mut SessionShell, formatter: &Formatter) -> Result<()> {
    match input {
        ReplInput::Text(line) => shell.buffer(line),
        ReplInput::Submit => match shell.submit() {
            Submitted::Nothing => {}
            Submitted::Idle => {
                println!("{}", formatter.warning("Session is idle, snapshot ignored. Type ':start' first."));
            }
            Submitted::Merged(state) => {
                print_merge(shell.session.last_report(), &state, formatter)?;
            }
        },
        ReplInput::Command(ReplCommand::Start) => {
            let state = shell.start();
            println!("{}", formatter.success("Scanning started"));
            println!("{}", formatter.format_state(&state)?);
        }
        ReplInput::Command(ReplCommand::Stop) => {
            if !shell.session.is_scanning() {
                println!("{}", formatter.info("Session is already idle"));
                return Ok(());
            }
            let last = shell.stop();
            println!("{}", formatter.success("Scanning stopped"));
            println!("{}", formatter.format_state(&last)?);
        }
        ReplInput::Command(ReplCommand::Status) => {
            let state = shell.session.current();
            println!(
                "{}",
                formatter.info(&format!(
                    "Session {} ({} snapshot(s) merged, {} line(s) pending)",
                    shell.session.state().as_str(),
                    shell.session.frames_merged(),
                    shell.pending.len()
                ))
            );
            println!("{}", formatter.format_state(&state)?);
        }
        ReplInput::Command(ReplCommand::Help) => print_help(formatter),
        // Handled by the loop
        ReplInput::Command(ReplCommand::Exit) => {}
    }

    Ok(())
}

/// Print what a merge changed.
fn print_merge(report: &MergeReport, state: &ScanState, formatter: &Formatter) -> Result<()> {
    if formatter.format() != OutputFormat::Table {
        println!("{}", formatter.format_state(state)?);
        return Ok(());
    }

    if report.is_noop() {
        println!("{}", formatter.info("No new fields"));
    }
    for field in &report.detected {
        let value = state.record.get(*field).unwrap_or_default();
        println!("{}", formatter.success(&format!("{}: {}", field.display_name(), value)));
    }
    for field in &report.replaced {
        let value = state.record.get(*field).unwrap_or_default();
        println!(
            "{}",
            formatter.warning(&format!("{} corrected: {}", field.display_name(), value))
        );
    }
    println!("{}", formatter.progress(state.score));

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  :start, :s          - Start scanning (restarts an active scan)");
    println!("  :stop, :x           - Stop scanning and show the final record");
    println!("  :status, :st        - Show the current record and score");
    println!("  :help, :?           - Show this help");
    println!("  :quit, :exit, :q    - Exit");
    println!();
    println!("  Any other line is recognizer text. An empty line submits the");
    println!("  lines typed so far as one snapshot.");
    println!();
}
