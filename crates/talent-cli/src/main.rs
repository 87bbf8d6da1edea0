#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::process;

use crate::commands::App;
use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "talent_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "talent_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "talent_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "talent_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "command completed successfully"
        );
        process::exit(0);
    };

    tracing::debug!(
        target: TRACING_TARGET_SHUTDOWN,
        error = %error,
        "command terminated with error"
    );
    eprintln!("Error: {error:#}");

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let app = App::connect(&cli).await?;
    app.run(&cli.command).await
}
