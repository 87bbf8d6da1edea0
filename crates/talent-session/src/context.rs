//! Process-wide holder of the current user profile.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use talent_core::types::User;
use tokio::sync::watch;

use crate::service::SessionService;

/// Tracing target for the session context.
const TRACING_TARGET: &str = "talent_session::context";

/// What the context currently knows about the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserState {
    /// A profile fetch has not finished yet.
    #[default]
    Loading,
    /// The backend confirmed the profile.
    Present(User),
    /// There is no user; `error` explains a failed fetch.
    Absent { error: Option<String> },
}

impl UserState {
    /// Returns true while a fetch is pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the profile if one is present.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Present(user) => Some(user),
            _ => None,
        }
    }
}

struct SessionContextInner {
    service: SessionService,
    state: watch::Sender<UserState>,
    started: AtomicBool,
}

/// Cache of the current user, loaded once and refreshable on demand.
///
/// Clones share the same state; subscribers are notified on every change.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionContextInner>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates a context in the [`UserState::Loading`] state without
    /// fetching anything; the first [`loaded`](Self::loaded) call loads it.
    pub fn new(service: SessionService) -> Self {
        let (state, _) = watch::channel(UserState::Loading);
        let inner = SessionContextInner {
            service,
            state,
            started: AtomicBool::new(false),
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates a context and loads the user right away.
    pub async fn init(service: SessionService) -> Self {
        let context = Self::new(service);
        context.loaded().await;
        context
    }

    /// Fetches the user again and publishes the result.
    ///
    /// Without a stored access token the context becomes
    /// [`UserState::Absent`] without contacting the backend.
    pub async fn refresh_user(&self) -> UserState {
        self.inner.started.store(true, Ordering::SeqCst);

        if !self.inner.service.is_authenticated().await {
            tracing::debug!(target: TRACING_TARGET, "No session, skipping profile fetch");
            return self.publish(UserState::Absent { error: None });
        }

        self.publish(UserState::Loading);
        let state = match self.inner.service.resolve_current_user().await {
            Ok(user) => UserState::Present(user),
            Err(error) => UserState::Absent {
                error: Some(error.to_string()),
            },
        };

        tracing::debug!(
            target: TRACING_TARGET,
            present = state.user().is_some(),
            "Profile fetch finished"
        );
        self.publish(state)
    }

    /// Waits until the state is no longer [`UserState::Loading`], starting
    /// the initial load if nobody has yet.
    pub async fn loaded(&self) -> UserState {
        if !self.inner.started.swap(true, Ordering::SeqCst) {
            return self.refresh_user().await;
        }

        let mut receiver = self.inner.state.subscribe();
        match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Current state, possibly still loading.
    pub fn state(&self) -> UserState {
        self.inner.state.borrow().clone()
    }

    /// Current profile, if present.
    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user().cloned()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.inner.state.subscribe()
    }

    /// Session service backing this context.
    pub fn service(&self) -> &SessionService {
        &self.inner.service
    }

    fn publish(&self, state: UserState) -> UserState {
        self.inner.state.send_replace(state.clone());
        state
    }
}
