//! Session persistence configuration.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use talent_session::FileStore;

/// Where the session survives between invocations.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// File holding the access token, refresh token and cached profile
    #[arg(
        long = "session-file",
        env = "TALENT_SESSION_FILE",
        default_value = ".talent-session.json"
    )]
    pub session_file: PathBuf,
}

impl SessionConfig {
    /// Opens the session file, creating nothing until the first login.
    pub async fn open_store(&self) -> anyhow::Result<FileStore> {
        FileStore::open(&self.session_file)
            .await
            .with_context(|| format!("failed to open session file {}", self.session_file.display()))
    }
}
