//! In-memory stand-in for the backend's `/auth` endpoints.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use talent_core::types::{AuthResponse, Credentials, RefreshResponse, User};
use talent_core::{AuthTransport, Error, RequestHeaders, Result};

use crate::fixtures::PASSWORD;

#[derive(Debug, Default)]
struct MockState {
    users: HashMap<String, User>,
    access_tokens: HashMap<String, i64>,
    refresh_tokens: HashMap<String, i64>,
    revoked_access: HashSet<String>,
    reject_access: bool,
    network_down: bool,
    refresh_delay: Option<Duration>,
    issued: usize,
}

#[derive(Debug, Default)]
struct Counters {
    login: AtomicUsize,
    refresh: AtomicUsize,
    current_user: AtomicUsize,
}

/// A fake backend that issues, refreshes and validates tokens in memory.
///
/// Every registered user logs in with [`PASSWORD`]. Tokens are opaque
/// strings of the form `access-N` / `refresh-N`.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    counters: Arc<Counters>,
}

impl MockTransport {
    /// Creates a backend with no users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that knows the given user.
    pub fn with_user(user: User) -> Self {
        let transport = Self::new();
        transport.add_user(user);
        transport
    }

    /// Registers another user.
    pub fn add_user(&self, user: User) {
        self.state().users.insert(user.username.clone(), user);
    }

    /// Invalidates every access token issued so far.
    pub fn expire_access_tokens(&self) {
        let mut state = self.state();
        let issued: Vec<String> = state.access_tokens.keys().cloned().collect();
        state.revoked_access.extend(issued);
    }

    /// Invalidates every refresh token issued so far.
    pub fn revoke_refresh_tokens(&self) {
        self.state().refresh_tokens.clear();
    }

    /// Makes `/auth/me` answer 401 for every access token, including new ones.
    pub fn reject_all_access_tokens(&self, reject: bool) {
        self.state().reject_access = reject;
    }

    /// Makes every call fail with a network error.
    pub fn set_network_down(&self, down: bool) {
        self.state().network_down = down;
    }

    /// Delays refresh answers, to let concurrent callers pile up.
    pub fn set_refresh_delay(&self, delay: Duration) {
        self.state().refresh_delay = Some(delay);
    }

    /// Registers an access token as if the backend had issued it.
    pub fn issue_access_token(&self, token: &str, user_id: i64) {
        self.state().access_tokens.insert(token.to_owned(), user_id);
    }

    /// Registers a refresh token as if the backend had issued it.
    pub fn issue_refresh_token(&self, token: &str, user_id: i64) {
        self.state().refresh_tokens.insert(token.to_owned(), user_id);
    }

    /// Number of `POST /auth/login` calls received.
    pub fn login_calls(&self) -> usize {
        self.counters.login.load(Ordering::SeqCst)
    }

    /// Number of `POST /auth/refresh` calls received.
    pub fn refresh_calls(&self) -> usize {
        self.counters.refresh.load(Ordering::SeqCst)
    }

    /// Number of `GET /auth/me` calls received.
    pub fn current_user_calls(&self) -> usize {
        self.counters.current_user.load(Ordering::SeqCst)
    }

    /// Total number of calls received.
    pub fn total_calls(&self) -> usize {
        self.login_calls() + self.refresh_calls() + self.current_user_calls()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_network(&self) -> Result<()> {
        if self.state().network_down {
            return Err(Error::network_error().with_message("Connection failed"));
        }
        Ok(())
    }

    fn user_by_id(state: &MockState, user_id: i64) -> Option<User> {
        state.users.values().find(|user| user.id == user_id).cloned()
    }
}

fn token_from(headers: &RequestHeaders) -> Option<&str> {
    headers
        .authorization()
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[async_trait::async_trait]
impl AuthTransport for MockTransport {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.counters.login.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;

        let mut state = self.state();
        let user = match state.users.get(&credentials.username) {
            Some(user) if credentials.password == PASSWORD => user.clone(),
            _ => {
                return Err(Error::from_status(401).with_message("Invalid username or password"));
            }
        };

        state.issued += 1;
        let access_token = format!("access-{}", state.issued);
        let refresh_token = format!("refresh-{}", state.issued);
        state.access_tokens.insert(access_token.clone(), user.id);
        state.refresh_tokens.insert(refresh_token.clone(), user.id);

        Ok(AuthResponse {
            access_token,
            refresh_token,
            user,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        self.counters.refresh.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;

        let delay = self.state().refresh_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        let Some(&user_id) = state.refresh_tokens.get(refresh_token) else {
            return Err(Error::from_status(401).with_message("Refresh token expired"));
        };

        state.issued += 1;
        let access_token = format!("access-{}", state.issued);
        state.access_tokens.insert(access_token.clone(), user_id);

        Ok(RefreshResponse::new(access_token))
    }

    async fn current_user(&self, headers: &RequestHeaders) -> Result<User> {
        self.counters.current_user.fetch_add(1, Ordering::SeqCst);
        self.check_network()?;

        let state = self.state();
        let user = token_from(headers)
            .filter(|_| !state.reject_access)
            .filter(|token| !state.revoked_access.contains(*token))
            .and_then(|token| state.access_tokens.get(token))
            .and_then(|&user_id| Self::user_by_id(&state, user_id));

        user.ok_or_else(Error::unauthorized)
    }
}
