//! # Rookie Hub CLI
//!
//! Entry point for the `rookie` command.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod error;
mod handlers;
mod render;
mod state;
mod telemetry;

use cli::Cli;
use config::AppConfig;
use error::AppError;
use render::Format;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_telemetry(&TelemetryConfig::from_env());

    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        storage = ?config.storage,
        "Configuration loaded"
    );

    let mut state = match AppState::open(&config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let format = Format::from_flag(cli.json);
    match handlers::dispatch(&mut state, cli.command) {
        Ok(reply) => match render::reply(&reply, format) {
            Ok(out) => {
                print!("{out}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                let err = AppError::Internal(format!("failed to render output: {err}"));
                eprintln!("{}", render::error(&err, format));
                err.exit_code()
            }
        },
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            eprintln!("{}", render::error(&err, format));
            err.exit_code()
        }
    }
}
