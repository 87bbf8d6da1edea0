//! Internal error types for talent-reqwest.

use thiserror::Error;

/// Result type alias for talent-reqwest internals.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for talent-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The configured base URL is not usable.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<Error> for talent_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    talent_core::Error::timeout()
                        .with_message("Request timed out")
                        .with_source(e)
                } else if e.is_connect() {
                    talent_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    talent_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    talent_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => talent_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => talent_core::Error::configuration()
                .with_message(format!("invalid API base URL: {e}"))
                .with_source(e),
        }
    }
}
