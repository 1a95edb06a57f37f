// src/main.rs
use std::process::ExitCode;

use products_api::config::Config;
use products_api::{logging, server};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = match logging::init(config.log_format, &config.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("App startup");

    match server::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "{e}");
            ExitCode::FAILURE
        }
    }
}
