//! Authentication transport implementation.
//!
//! This module implements the [`AuthTransport`] trait for [`ReqwestClient`].

use reqwest::Method;
use talent_core::types::{AuthResponse, Credentials, RefreshResponse, User};
use talent_core::{AuthTransport, RequestHeaders, Result};

use crate::connect::{ReqwestClient, TRACING_TARGET};

#[async_trait::async_trait]
impl AuthTransport for ReqwestClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            username = %credentials.username,
            "Requesting session"
        );

        let request = self
            .request(Method::POST, &["auth", "login"], &RequestHeaders::json(None))?
            .json(credentials);
        self.send(request).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let request = self
            .request(
                Method::POST,
                &["auth", "refresh"],
                &RequestHeaders::bearer(refresh_token),
            )?
            .json(&serde_json::json!({}));
        self.send(request).await
    }

    async fn current_user(&self, headers: &RequestHeaders) -> Result<User> {
        let request = self.request(Method::GET, &["auth", "me"], headers)?;
        self.send(request).await
    }
}
