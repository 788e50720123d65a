//! mt-console - vehicle maintenance tracker in the terminal.
//!
//! ```bash
//! # Interactive
//! mt-console
//!
//! # Scripted, one JSON event per line
//! printf 'login owner@example.com secret123\nquit\n' | mt-console --format json
//! ```

use mt_app::{Controller, ControllerConfig};
use mt_console::{Cli, ConsoleErrorResult, Printer, logger, repl};
use mt_db::SqliteDirectory;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ConsoleErrorResult<()> {
    // Load and validate configuration
    let config = mt_config::Config::load()?;
    config.validate()?;

    let log_file = config.log_file_path()?;
    if let Some(parent) = log_file.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting mt-console v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let directory = Arc::new(SqliteDirectory::open(&database_path).await?);

    let handle = Controller::spawn(directory, ControllerConfig::from_config(&config));

    let mut printer = Printer::new(std::io::stdout(), cli.output_format());
    repl::run(handle, BufReader::new(tokio::io::stdin()), &mut printer).await
}
