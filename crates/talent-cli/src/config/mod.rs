//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── http: ReqwestConfig       # Backend URL, timeout, user agent
//! ├── session: SessionConfig    # Where the session is persisted
//! ├── json                      # Raw JSON output
//! └── command: Command          # What to do
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! talent --api-url http://hr.internal:5000/api login --username hr_admin
//!
//! # Or via environment variables
//! TALENT_API_URL=http://hr.internal:5000/api talent dashboard
//! ```

mod session;

use std::process;

use clap::Parser;
pub use session::SessionConfig;
use talent_reqwest::ReqwestConfig;

use crate::commands::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "talent")]
#[command(about = "Applicant-tracking client for HR staff and department managers")]
#[command(version)]
pub struct Cli {
    /// Backend connection configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,

    /// Session persistence configuration.
    #[clap(flatten)]
    pub session: SessionConfig,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so that its
    /// variables can serve as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.http.api_url,
            http_timeout_secs = self.http.http_timeout,
            session_file = %self.session.session_file.display(),
            command = self.command.name(),
            "Configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
