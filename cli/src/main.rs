//! TailSentry Ops CLI
//!
//! Operator helpers for a local TailSentry deployment:
//! - `activate`: check the project's virtual environment and show how to use it
//! - `fix-session`: set DEVELOPMENT=true in the app's .env and restart the server

mod args;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tailsentry_ops_core::{AppError, Config};
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is kept for output meant for `eval` and JSON
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e.downcast_ref::<AppError>().and_then(AppError::remediation) {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_env();

    match cli.command {
        Command::Activate(args) => commands::activate(config, args).await,
        Command::FixSession(args) => commands::fix_session(config, args).await,
    }
}
