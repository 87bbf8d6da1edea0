//! Builds the headers every outgoing request carries.

use talent_core::RequestHeaders;

use crate::storage::SessionStorage;

/// Tracing target for header construction.
const TRACING_TARGET: &str = "talent_session::headers";

/// Shape of the request body, which decides the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestKind {
    /// JSON body (or none).
    #[default]
    Json,
    /// Multipart file upload; the transport sets the boundary.
    Upload,
}

/// Reads the access token at call time and turns it into request headers.
///
/// The token is never cached here, so a request issued right after a
/// refresh already carries the new token.
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    storage: SessionStorage,
}

impl HeaderBuilder {
    /// Creates a builder reading from the given storage.
    pub fn new(storage: SessionStorage) -> Self {
        Self { storage }
    }

    /// Headers for a request of the given kind.
    ///
    /// Without a stored token (or if the store cannot be read) the headers
    /// carry no authorization, which is what anonymous endpoints expect.
    pub async fn build(&self, kind: RequestKind) -> RequestHeaders {
        let token = match self.storage.access_token().await {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Could not read access token, sending anonymous request"
                );
                None
            }
        };

        match kind {
            RequestKind::Json => RequestHeaders::json(token.as_deref()),
            RequestKind::Upload => RequestHeaders::upload(token.as_deref()),
        }
    }

    /// Headers for a JSON request.
    pub async fn json(&self) -> RequestHeaders {
        self.build(RequestKind::Json).await
    }

    /// Headers for a multipart upload.
    pub async fn upload(&self) -> RequestHeaders {
        self.build(RequestKind::Upload).await
    }
}
