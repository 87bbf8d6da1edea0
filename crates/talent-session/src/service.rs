//! Session service: sole owner of the authentication protocol.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use talent_core::types::{Capability, Credentials, Role, User};
use talent_core::{AuthTransport, Error, ErrorKind, RequestHeaders, Result};
use tokio::sync::Mutex;

use crate::headers::{HeaderBuilder, RequestKind};
use crate::storage::SessionStorage;
use crate::store::SessionStore;

/// Tracing target for session service operations.
pub const TRACING_TARGET: &str = "talent_session::service";

/// Message used when the backend gives no reason for a failed login.
const GENERIC_LOGIN_FAILURE: &str = "Login failed, please check your credentials and try again";

/// A refresh shared by every caller that asks while it is in flight.
type InFlightRefresh = Shared<BoxFuture<'static, std::result::Result<String, RefreshFailure>>>;

/// Cloneable summary of a failed refresh, handed to every waiting caller.
#[derive(Debug, Clone)]
struct RefreshFailure {
    status: Option<u16>,
    message: String,
}

impl RefreshFailure {
    fn from_error(error: &Error) -> Self {
        Self {
            status: error.status,
            message: error
                .message
                .as_deref()
                .map_or_else(|| error.kind.to_string(), str::to_owned),
        }
    }

    fn into_error(self) -> Error {
        let error = Error::refresh_failed().with_message(self.message);
        match self.status {
            Some(status) => error.with_status(status),
            None => error,
        }
    }
}

struct SessionServiceInner {
    storage: SessionStorage,
    headers: HeaderBuilder,
    transport: Arc<dyn AuthTransport>,
    refresh: Mutex<Option<InFlightRefresh>>,
}

/// Removes every session key, logging instead of failing.
async fn clear_session(storage: &SessionStorage) {
    match storage.clear().await {
        Ok(()) => {
            tracing::info!(target: TRACING_TARGET, "Session cleared");
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "Failed to clear session storage"
            );
        }
    }
}

/// Owns login, logout, token refresh and the local authentication checks.
///
/// Cheap to clone; clones share storage, transport and the in-flight refresh.
///
/// # Examples
///
/// ```rust,ignore
/// use talent_core::types::Credentials;
/// use talent_session::{MemoryStore, SessionService};
///
/// let service = SessionService::new(transport, MemoryStore::new());
/// let user = service.login(&Credentials::new("hr_admin", "secret")).await?;
/// assert!(service.is_authenticated().await);
/// ```
#[derive(Clone)]
pub struct SessionService {
    inner: Arc<SessionServiceInner>,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("storage", &self.inner.storage)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Creates a service over the given transport and store.
    pub fn new<T, S>(transport: T, store: S) -> Self
    where
        T: AuthTransport + 'static,
        S: SessionStore + 'static,
    {
        Self::from_parts(Arc::new(transport), SessionStorage::new(store))
    }

    /// Creates a service from already shared parts.
    pub fn from_parts(transport: Arc<dyn AuthTransport>, storage: SessionStorage) -> Self {
        let inner = SessionServiceInner {
            headers: HeaderBuilder::new(storage.clone()),
            storage,
            transport,
            refresh: Mutex::new(None),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Typed access to the stored session.
    pub fn storage(&self) -> &SessionStorage {
        &self.inner.storage
    }

    /// Builder for the headers of outgoing requests.
    pub fn headers(&self) -> &HeaderBuilder {
        &self.inner.headers
    }

    /// Logs in and persists the new session.
    ///
    /// On failure nothing is written and the error is
    /// [`ErrorKind::Authentication`], carrying the backend's message when it
    /// sent one.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(Error::authentication().with_message("Username and password are required"));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            username = %credentials.username,
            "Logging in"
        );

        let session = match self.inner.transport.login(credentials).await {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    username = %credentials.username,
                    error = %error,
                    "Login failed"
                );
                return Err(login_error(error));
            }
        };

        self.inner.storage.save(&session).await?;

        tracing::info!(
            target: TRACING_TARGET,
            user_id = session.user.id,
            role = %session.user.role(),
            "Logged in"
        );

        Ok(session.user)
    }

    /// Removes every session key. Never fails; storage errors are logged.
    pub async fn logout(&self) {
        clear_session(&self.inner.storage).await;
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Concurrent callers share a single backend call. Without a stored
    /// refresh token this fails with [`ErrorKind::NoRefreshToken`] and
    /// touches neither the network nor the store. Any other failure ends the
    /// session and yields [`ErrorKind::RefreshFailed`].
    pub async fn refresh_access_token(&self) -> Result<String> {
        let Some(refresh_token) = self.inner.storage.refresh_token().await? else {
            tracing::debug!(target: TRACING_TARGET, "No refresh token stored");
            return Err(Error::no_refresh_token());
        };

        let in_flight = {
            let mut slot = self.inner.refresh.lock().await;
            match slot.as_ref() {
                Some(in_flight) => {
                    tracing::debug!(target: TRACING_TARGET, "Joining in-flight token refresh");
                    in_flight.clone()
                }
                None => {
                    let in_flight = run_refresh(
                        Arc::clone(&self.inner.transport),
                        self.inner.storage.clone(),
                        Arc::downgrade(&self.inner),
                        refresh_token,
                    )
                    .boxed()
                    .shared();
                    *slot = Some(in_flight.clone());
                    in_flight
                }
            }
        };

        in_flight.await.map_err(RefreshFailure::into_error)
    }

    /// Fetches the current user from the backend.
    ///
    /// Returns `None` instead of an error; see
    /// [`resolve_current_user`](Self::resolve_current_user) for the reason.
    pub async fn current_user(&self) -> Option<User> {
        self.resolve_current_user().await.ok()
    }

    /// Fetches the current user, reporting why none could be obtained.
    ///
    /// A 401 triggers exactly one refresh and one retry; if either fails the
    /// session is cleared. Other failures leave the session untouched.
    pub async fn resolve_current_user(&self) -> Result<User> {
        let headers = self.inner.headers.json().await;
        let sent = headers.authorization().map(str::to_owned);
        let error = match self.inner.transport.current_user(&headers).await {
            Ok(user) => return Ok(user),
            Err(error) => error,
        };

        if !error.is_unauthorized() {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Could not fetch current user"
            );
            return Err(error);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            "Access token rejected, refreshing before retrying"
        );

        let recovered = self
            .recover_unauthorized(RequestKind::Json, sent.as_deref())
            .await;
        if let Err(error) = recovered {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Token refresh failed, ending session"
            );
            self.logout().await;
            return Err(error);
        }

        let headers = self.inner.headers.json().await;
        match self.inner.transport.current_user(&headers).await {
            Ok(user) => Ok(user),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Current user still unavailable after refresh, ending session"
                );
                self.logout().await;
                Err(error)
            }
        }
    }

    /// Runs an authenticated call, refreshing once on 401.
    ///
    /// `call` receives freshly built headers on every attempt. If the first
    /// attempt is answered with 401 the access token is refreshed (sharing
    /// any refresh already in flight) and the call is retried once. A failed
    /// refresh, or a retry that is rejected again, ends the session and the
    /// error is returned.
    pub async fn authorized<T, F, Fut>(&self, kind: RequestKind, call: F) -> Result<T>
    where
        F: Fn(RequestHeaders) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let headers = self.inner.headers.build(kind).await;
        let sent = headers.authorization().map(str::to_owned);
        match call(headers).await {
            Err(error) if error.is_unauthorized() => {}
            result => return result,
        }

        if let Err(error) = self.recover_unauthorized(kind, sent.as_deref()).await {
            if error.kind == ErrorKind::NoRefreshToken {
                self.logout().await;
            }
            return Err(error);
        }

        let headers = self.inner.headers.build(kind).await;
        match call(headers).await {
            Err(error) if error.is_unauthorized() => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Request still unauthorized after refresh, ending session"
                );
                self.logout().await;
                Err(error)
            }
            result => result,
        }
    }

    /// Makes a fresh access token available after a 401.
    ///
    /// `sent` is the authorization the rejected request carried. If the
    /// stored token no longer matches it, another caller already refreshed
    /// and the retry can go out without a new backend call.
    async fn recover_unauthorized(&self, kind: RequestKind, sent: Option<&str>) -> Result<()> {
        let current = self.inner.headers.build(kind).await;
        if current.is_authorized() && current.authorization() != sent {
            tracing::debug!(
                target: TRACING_TARGET,
                "Access token already replaced, retrying without refresh"
            );
            return Ok(());
        }

        self.refresh_access_token().await.map(drop)
    }

    /// True iff an access token is stored. Does not contact the backend.
    pub async fn is_authenticated(&self) -> bool {
        match self.inner.storage.access_token().await {
            Ok(token) => token.is_some(),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Could not read access token"
                );
                false
            }
        }
    }

    /// True iff the cached profile's `is_hr` flag is exactly `true`.
    pub async fn is_hr(&self) -> bool {
        self.inner
            .storage
            .cached_is_hr()
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Could not read cached user"
                );
                false
            })
    }

    /// Role derived from the cached profile, if one is cached.
    pub async fn role(&self) -> Option<Role> {
        self.inner.storage.cached_role().await.ok().flatten()
    }

    /// True if the cached role grants the capability.
    pub async fn has_capability(&self, capability: Capability) -> bool {
        self.role().await.is_some_and(|role| role.has(capability))
    }
}

/// Performs the backend refresh and stores the new access token.
///
/// Clears the in-flight slot when done so the next 401 starts a new refresh.
/// The slot owner is held weakly since the future itself sits in that slot.
async fn run_refresh(
    transport: Arc<dyn AuthTransport>,
    storage: SessionStorage,
    owner: Weak<SessionServiceInner>,
    refresh_token: String,
) -> std::result::Result<String, RefreshFailure> {
    tracing::debug!(target: TRACING_TARGET, "Refreshing access token");

    let outcome = match transport.refresh(&refresh_token).await {
        Ok(response) if !response.access_token.is_empty() => storage
            .replace_access_token(&response.access_token)
            .await
            .map(|()| response.access_token)
            .map_err(|error| RefreshFailure::from_error(&error)),
        Ok(_) => Err(RefreshFailure {
            status: None,
            message: "Invalid response format from refresh endpoint".to_owned(),
        }),
        Err(error) => Err(RefreshFailure::from_error(&error)),
    };

    match &outcome {
        Ok(_) => {
            tracing::info!(target: TRACING_TARGET, "Access token refreshed");
        }
        Err(failure) => {
            tracing::warn!(
                target: TRACING_TARGET,
                status = ?failure.status,
                reason = %failure.message,
                "Access token refresh failed, ending session"
            );
            clear_session(&storage).await;
        }
    }

    if let Some(owner) = owner.upgrade() {
        *owner.refresh.lock().await = None;
    }
    outcome
}

fn login_error(error: Error) -> Error {
    let message = error
        .status
        .and(error.message.clone())
        .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.into());
    let status = error.status;

    let mapped = Error::authentication()
        .with_message(message)
        .with_source(error);
    match status {
        Some(status) => mapped.with_status(status),
        None => mapped,
    }
}
