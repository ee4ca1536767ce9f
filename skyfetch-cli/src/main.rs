//! Binary crate for the `skyfetch` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and dispatching commands/providers
//! - Interactive provider configuration
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use skyfetch_core::config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod cli;
mod commands;
mod output;
mod select;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `RUST_LOG` environment variable (if set)
/// 2. `-v`/`-vv` flags (info/debug)
/// 3. The config file's `log_level`, defaulting to warn
fn init_tracing(verbose: u8, config_level: Option<&str>) {
    let default = match verbose {
        0 => config_level.unwrap_or("warn"),
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Peek at the config only for the log level; parse problems are
    // re-reported once logging is up.
    let peek = Config::config_file_path()
        .ok()
        .map(|path| Config::load_from(&path).unwrap_or_default())
        .unwrap_or_default();
    init_tracing(cli.verbose, peek.log_level());

    let app = match app::App::new(&cli) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("skyfetch: {err:#}");
            return ExitCode::from(2);
        }
    };

    match app.run(cli).await {
        Ok(app::Outcome::Success) => ExitCode::SUCCESS,
        Ok(app::Outcome::PartialFailure) => ExitCode::from(1),
        Err(err) => {
            eprintln!("skyfetch: {err:#}");
            ExitCode::from(2)
        }
    }
}
