//! PawHotel CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use pawhotel_core::config::{AppConfig, LoggingConfig};
use pawhotel_core::error::AppError;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(&config).await {
        let code = exit_code(&e);
        if code == 1 {
            tracing::debug!(kind = %e.kind, "Command rejected");
        } else {
            tracing::error!(kind = %e.kind, error = %e, "Command failed");
        }
        output::print_error(&e.to_string());
        std::process::exit(code);
    }
}

/// 1 for requests the operator can correct, 2 for system failures.
fn exit_code(err: &AppError) -> i32 {
    if err.kind.is_caller_facing() { 1 } else { 2 }
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
