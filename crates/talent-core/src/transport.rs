//! Transport seam between the session logic and the HTTP client.

use std::fmt;

use crate::Result;
use crate::types::{AuthResponse, Credentials, RefreshResponse, User};

/// Content type attached to JSON requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Headers attached to an outgoing request.
///
/// Built fresh for every call so a token replaced by a refresh is picked
/// up by the very next request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    authorization: Option<String>,
    content_type: Option<&'static str>,
}

impl RequestHeaders {
    /// Headers for a JSON request, authorized when a token is given.
    pub fn json(access_token: Option<&str>) -> Self {
        Self {
            authorization: bearer(access_token),
            content_type: Some(JSON_CONTENT_TYPE),
        }
    }

    /// Headers for a multipart upload.
    ///
    /// No content type is set so the transport can add the multipart boundary.
    pub fn upload(access_token: Option<&str>) -> Self {
        Self {
            authorization: bearer(access_token),
            content_type: None,
        }
    }

    /// Headers carrying an explicit bearer credential, e.g. a refresh token.
    pub fn bearer(token: &str) -> Self {
        Self::json(Some(token))
    }

    /// Value of the `Authorization` header, if any.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Value of the `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Returns true if the request carries a bearer token.
    pub fn is_authorized(&self) -> bool {
        self.authorization.is_some()
    }

    /// Iterates over `(name, value)` pairs to attach to the request.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let authorization = self
            .authorization
            .as_deref()
            .map(|value| ("Authorization", value));
        let content_type = self.content_type.map(|value| ("Content-Type", value));
        authorization.into_iter().chain(content_type)
    }
}

impl fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHeaders")
            .field("authorized", &self.is_authorized())
            .field("content_type", &self.content_type)
            .finish()
    }
}

fn bearer(token: Option<&str>) -> Option<String> {
    token
        .filter(|token| !token.is_empty())
        .map(|token| format!("Bearer {token}"))
}

/// Backend operations the session logic depends on.
///
/// Implementations report a 401 answer as
/// [`ErrorKind::Unauthorized`](crate::ErrorKind::Unauthorized) so callers can
/// decide whether to refresh.
#[async_trait::async_trait]
pub trait AuthTransport: Send + Sync {
    /// Calls `POST /auth/login`.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// Calls `POST /auth/refresh` bearing the refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse>;

    /// Calls `GET /auth/me` with the given headers.
    async fn current_user(&self, headers: &RequestHeaders) -> Result<User>;
}
