//! Cedula CLI - Extract identity card fields from recognizer output.

use cedula_cli::commands;
use cedula_cli::repl;
use cedula_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> cedula_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config from the given path, or the default one
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => load_default_config(),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None | Some(Command::Session) => {
            repl::run_repl(&config, &formatter)?;
        }
        Some(Command::Scan(args)) => {
            commands::execute_scan(args, &config, &formatter).await?;
        }
        Some(Command::Extract(args)) => {
            commands::execute_extract(args, &config, &formatter)?;
        }
        Some(Command::Fields) => {
            commands::execute_fields(&formatter)?;
        }
    }

    Ok(())
}

/// Load `~/.cedula/config.toml`, writing the defaults there on first run
fn load_default_config() -> Config {
    let first_run = Config::path().map(|path| !path.exists()).unwrap_or(false);

    match Config::load() {
        Ok(config) => {
            if first_run {
                config.save().ok();
            }
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring configuration file: {}", e);
            Config::default()
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`, `debug` with --verbose)
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
