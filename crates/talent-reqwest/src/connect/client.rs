//! Reqwest-based HTTP client for the backend REST API.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use talent_core::types::Acknowledgement;
use talent_core::{AuthTransport, RequestHeaders};
use url::Url;

use super::ReqwestConfig;
use crate::error::Error;

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "talent_reqwest::client";

/// Error body shapes the backend uses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .or(self.msg)
            .filter(|message| !message.trim().is_empty())
    }
}

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    base_url: Url,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client for the applicant-tracking backend.
///
/// Implements [`AuthTransport`] for the `/auth` endpoints and performs the
/// raw requests of the domain services.
///
/// # Examples
///
/// ```rust,ignore
/// use talent_reqwest::{ReqwestClient, ReqwestConfig};
/// use talent_session::{MemoryStore, SessionService};
///
/// let client = ReqwestClient::new(ReqwestConfig::default())?;
/// let session = SessionService::new(client.clone(), MemoryStore::new());
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: ReqwestConfig) -> talent_core::Result<Self> {
        let base_url = config.base_url()?;
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = timeout.as_millis(),
            "Creating reqwest client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|e| {
                talent_core::Error::configuration()
                    .with_message("failed to create HTTP client")
                    .with_source(e)
            })?;

        let inner = ReqwestClientInner {
            http,
            base_url,
            config,
        };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            base_url = %client.inner.base_url,
            "Reqwest client created successfully"
        );

        Ok(client)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Wraps this client for use as the session's transport.
    pub fn into_transport(self) -> Arc<dyn AuthTransport> {
        Arc::new(self)
    }

    /// Resolves path segments below the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> talent_core::Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                talent_core::Error::configuration().with_message("API base URL cannot have a path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts a request carrying the given headers.
    pub fn request(
        &self,
        method: Method,
        segments: &[&str],
        headers: &RequestHeaders,
    ) -> talent_core::Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        let builder = headers
            .iter()
            .fold(self.inner.http.request(method, url), |builder, (name, value)| {
                builder.header(name, value)
            });
        Ok(builder)
    }

    /// Sends a request and decodes a JSON answer.
    pub async fn send<T>(&self, request: RequestBuilder) -> talent_core::Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(request).await?;
        let body = response.bytes().await.map_err(Error::from)?;
        let value = serde_json::from_slice(&body).map_err(Error::from)?;
        Ok(value)
    }

    /// Sends a request whose answer may be empty.
    pub async fn send_ack(&self, request: RequestBuilder) -> talent_core::Result<Acknowledgement> {
        let response = self.execute(request).await?;
        let body = response.bytes().await.map_err(Error::from)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Acknowledgement::default());
        }
        let value = serde_json::from_slice(&body).map_err(Error::from)?;
        Ok(value)
    }

    /// Sends a request, turning non-success statuses into errors.
    async fn execute(&self, request: RequestBuilder) -> talent_core::Result<Response> {
        let (client, request) = request.build_split();
        let request = request.map_err(Error::from)?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            path = %path,
            "Sending request"
        );

        let response = match client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Request failed"
                );
                return Err(Error::from(e).into());
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                method = %method,
                path = %path,
                status = status.as_u16(),
                "Request completed"
            );
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .into_message()
            .or_else(|| status.canonical_reason().map(str::to_owned))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Backend rejected request"
        );

        Err(talent_core::Error::from_status(status.as_u16()).with_message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new(ReqwestConfig::default()).unwrap();
        assert!(client.config().user_agent.is_none());
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
    }

    #[test]
    fn test_invalid_base_url() {
        let error = ReqwestClient::new(ReqwestConfig::new("localhost:5000")).unwrap_err();
        assert_eq!(error.kind, talent_core::ErrorKind::Configuration);
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ReqwestClient::new(ReqwestConfig::default()).unwrap();
        let url = client.endpoint(&["jobs", "department", "R&D / Lab"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/jobs/department/R&D%20%2F%20Lab"
        );
    }

    #[test]
    fn test_error_body_message_priority() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "bad", "message": "Invalid credentials"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid credentials"));

        let body: ErrorBody = serde_json::from_str(r#"{"msg": "Token has expired"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Token has expired"));
    }
}
