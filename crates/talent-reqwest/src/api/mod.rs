//! Domain services of the applicant-tracking backend.
//!
//! [`TalentApi`] pairs the HTTP client with the [`SessionService`]: public
//! endpoints are called anonymously, everything else goes through
//! [`SessionService::authorized`] so a 401 is answered with a single
//! refresh and one retry.

mod applications;
mod candidates;
mod departments;
mod interviews;
mod jobs;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use talent_core::types::Acknowledgement;
use talent_core::{RequestHeaders, Result};
use talent_session::{RequestKind, SessionService};

use crate::connect::ReqwestClient;

/// Tracing target for domain service calls.
pub const TRACING_TARGET: &str = "talent_reqwest::api";

/// Typed access to the jobs, applications, candidates, interview request
/// and department endpoints.
#[derive(Debug, Clone)]
pub struct TalentApi {
    client: ReqwestClient,
    session: SessionService,
}

impl TalentApi {
    /// Creates the API over a client and the session that authorizes it.
    pub fn new(client: ReqwestClient, session: SessionService) -> Self {
        Self { client, session }
    }

    /// Underlying HTTP client.
    pub fn client(&self) -> &ReqwestClient {
        &self.client
    }

    /// Session used to authorize calls.
    pub fn session(&self) -> &SessionService {
        &self.session
    }

    /// Calls an endpoint that needs no authentication.
    async fn public<T>(&self, segments: &[&str]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self
            .client
            .request(Method::GET, segments, &RequestHeaders::json(None))?;
        self.client.send(request).await
    }

    /// Calls an authenticated endpoint and decodes its answer.
    async fn authorized<T>(&self, method: Method, segments: &[&str], body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.session
            .authorized(RequestKind::Json, |headers| {
                let request = self
                    .client
                    .request(method.clone(), segments, &headers)
                    .map(|builder| match &body {
                        Some(body) => builder.json(body),
                        None => builder,
                    });
                async move { self.client.send(request?).await }
            })
            .await
    }

    /// Calls an authenticated endpoint whose answer may be empty.
    async fn authorized_ack(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
    ) -> Result<Acknowledgement> {
        self.session
            .authorized(RequestKind::Json, |headers| {
                let request = self
                    .client
                    .request(method.clone(), segments, &headers)
                    .map(|builder| match &body {
                        Some(body) => builder.json(body),
                        None => builder,
                    });
                async move { self.client.send_ack(request?).await }
            })
            .await
    }
}

/// Serializes a request body once so it can be resent on retry.
fn json_body<B>(body: &B) -> Result<Option<Value>>
where
    B: Serialize + ?Sized,
{
    Ok(Some(serde_json::to_value(body)?))
}
