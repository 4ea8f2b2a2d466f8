mod cli;
mod commands;
mod menu;
mod render;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use priotask_core::{StoreConfig, TaskStore};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::menu::Menu;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = StoreConfig::new(cli.data_file);
    let mut store = match TaskStore::from_config(&config) {
        Ok(store) => store,
        Err(error) => {
            eprintln!(
                "cannot open task file '{}': {}",
                config.data_file.display(),
                render::error_line(&error)
            );
            return ExitCode::FAILURE;
        }
    };
    for warning in store.load_warnings() {
        eprintln!("warning ({}): {warning}", store.location());
    }

    let result = match cli.command {
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(&mut store, stdin.lock(), stdout.lock())
                .run()
                .map(|()| true)
        }
        Some(command) => commands::run(&mut store, command, &mut io::stdout().lock()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!(error = %error, "terminal i/o failed");
            eprintln!("i/o error: {error}");
            ExitCode::FAILURE
        }
    }
}

// Load warnings are already printed for the user, so only errors log by default.
const DEFAULT_LOG_FILTER: &str = "error";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
