//! Structured error handling for talent operations.

use hipstr::HipStr;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while talking to the backend
/// or managing the client-side session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed before anything was sent.
    InvalidInput,
    /// Network-related error occurred.
    NetworkError,
    /// Timeout occurred.
    Timeout,
    /// The backend rejected the supplied credentials.
    Authentication,
    /// An authenticated call was answered with 401.
    Unauthorized,
    /// An authenticated call was answered with 403.
    Forbidden,
    /// A refresh was requested but no refresh token is stored.
    NoRefreshToken,
    /// The refresh endpoint rejected the refresh token or could not be reached.
    RefreshFailed,
    /// Resource not found.
    NotFound,
    /// The backend answered with an unexpected non-success status.
    ExternalError,
    /// Serialization/deserialization error.
    Serialization,
    /// The persistent session store could not be read or written.
    Storage,
    /// Configuration error.
    Configuration,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Maps an HTTP status code of a failed response to an error kind.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidInput,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            _ => Self::ExternalError,
        }
    }

    /// Check if this error kind means the session can no longer be used.
    #[must_use]
    pub const fn ends_session(&self) -> bool {
        matches!(self, Self::NoRefreshToken | Self::RefreshFailed)
    }

    /// Check if this error kind is typically retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::Timeout)
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// HTTP status of the failed response, if the backend answered.
    pub status: Option<u16>,
    /// Primary error message.
    pub message: Option<HipStr<'static>>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<HipStr<'static>>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            status: None,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Creates an error for a failed HTTP response.
    pub fn from_status(status: u16) -> Self {
        Self::new(ErrorKind::from_status(status)).with_status(status)
    }

    /// Creates an invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a credential rejection error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates an unauthorized (401) error.
    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized).with_status(401)
    }

    /// Creates an error for a refresh attempted without a refresh token.
    pub fn no_refresh_token() -> Self {
        Self::new(ErrorKind::NoRefreshToken).with_message("No refresh token available")
    }

    /// Creates an error for a failed token refresh.
    pub fn refresh_failed() -> Self {
        Self::new(ErrorKind::RefreshFailed)
    }

    /// Creates a serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a storage error.
    pub fn storage() -> Self {
        Self::new(ErrorKind::Storage)
    }

    /// Creates a configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Sets the HTTP status of the failed response.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<HipStr<'static>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<HipStr<'static>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns true if the backend answered this call with 401.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Unauthorized
    }

    /// Check if this error is retryable based on its kind.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON payload")
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(ErrorKind::Storage, error).with_message("I/O operation failed")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.status.is_none());
        assert!(error.message.is_none());
        assert!(error.source.is_none());
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::configuration()
            .with_message("bad base url")
            .with_context("TALENT_API_URL");

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(error.message.as_deref(), Some("bad base url"));
        assert_eq!(error.context.as_deref(), Some("TALENT_API_URL"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::authentication().with_message("Invalid credentials");

        let display_str = error.to_string();
        assert!(display_str.contains("authentication"));
        assert!(display_str.contains("Invalid credentials"));
    }

    #[test]
    fn test_from_status() {
        let error = Error::from_status(401);
        assert!(error.is_unauthorized());
        assert_eq!(error.status, Some(401));

        assert_eq!(Error::from_status(403).kind, ErrorKind::Forbidden);
        assert_eq!(Error::from_status(404).kind, ErrorKind::NotFound);
        assert_eq!(Error::from_status(500).kind, ErrorKind::ExternalError);
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::from(io_error);

        assert_eq!(error.kind, ErrorKind::Storage);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_ends_session() {
        assert!(ErrorKind::RefreshFailed.ends_session());
        assert!(ErrorKind::NoRefreshToken.ends_session());
        assert!(!ErrorKind::Unauthorized.ends_session());
        assert!(!ErrorKind::NetworkError.ends_session());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("no_refresh_token").unwrap(),
            ErrorKind::NoRefreshToken
        );
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
        assert!(ErrorKind::from_str("invalid").is_err());
    }
}
