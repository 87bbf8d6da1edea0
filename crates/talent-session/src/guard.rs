//! Route guards deciding whether a protected page may be shown.
//!
//! A guard checks, in order:
//!
//! 1. a stored access token, else redirect to login;
//! 2. the page's role or capability requirement against the cached profile;
//! 3. the loaded [`SessionContext`]: no user means the session is cleared
//!    and the caller is sent to login.
//!
//! Anything unexpected also ends at the login page.

use std::fmt;

use talent_core::types::{Capability, Role, User};

use crate::context::{SessionContext, UserState};
use crate::service::SessionService;

/// Tracing target for route guards.
pub const TRACING_TARGET: &str = "talent_session::guard";

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Path of the generic dashboard.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// What a page asks of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any authenticated user.
    Authenticated,
    /// Users of exactly this role.
    Role(Role),
    /// Users whose role grants this capability.
    Capability(Capability),
}

/// Where a denied visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login page.
    Login,
    /// The generic dashboard.
    Dashboard,
    /// The landing page of a role.
    Landing(Role),
}

impl Destination {
    /// Path of the destination page.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::Landing(role) => role.landing_path(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the page to this user.
    Render(User),
    /// Show nothing and go elsewhere.
    Redirect(Destination),
}

impl GuardDecision {
    /// The user, if the page may be rendered.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Render(user) => Some(user),
            Self::Redirect(_) => None,
        }
    }

    /// The redirect, if access was denied.
    pub fn redirect(&self) -> Option<Destination> {
        match self {
            Self::Render(_) => None,
            Self::Redirect(destination) => Some(*destination),
        }
    }
}

/// Gate in front of a protected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    requirement: Requirement,
}

impl RouteGuard {
    /// Guard with an explicit requirement.
    pub const fn new(requirement: Requirement) -> Self {
        Self { requirement }
    }

    /// Any authenticated user may pass.
    pub const fn authenticated() -> Self {
        Self::new(Requirement::Authenticated)
    }

    /// HR staff only; others go to the generic dashboard.
    pub const fn hr_only() -> Self {
        Self::new(Requirement::Role(Role::Hr))
    }

    /// Managers only; HR staff go to their own landing page.
    pub const fn manager_only() -> Self {
        Self::new(Requirement::Role(Role::Manager))
    }

    /// Users whose role grants the capability.
    pub const fn requires(capability: Capability) -> Self {
        Self::new(Requirement::Capability(capability))
    }

    /// The requirement this guard enforces.
    pub const fn requirement(&self) -> Requirement {
        self.requirement
    }

    /// Runs the guard.
    pub async fn check(&self, service: &SessionService, context: &SessionContext) -> GuardDecision {
        if !service.is_authenticated().await {
            tracing::debug!(target: TRACING_TARGET, "No session, redirecting to login");
            return GuardDecision::Redirect(Destination::Login);
        }

        if let Some(destination) = self.role_redirect(service).await {
            tracing::debug!(
                target: TRACING_TARGET,
                requirement = ?self.requirement,
                destination = %destination,
                "Requirement not met"
            );
            return GuardDecision::Redirect(destination);
        }

        match context.loaded().await {
            UserState::Present(user) => GuardDecision::Render(user),
            UserState::Absent { error } => {
                tracing::info!(
                    target: TRACING_TARGET,
                    error = error.as_deref().unwrap_or("none"),
                    "Session has no user, logging out"
                );
                service.logout().await;
                GuardDecision::Redirect(Destination::Login)
            }
            UserState::Loading => {
                tracing::error!(
                    target: TRACING_TARGET,
                    "Session context still loading after load completed"
                );
                GuardDecision::Redirect(Destination::Login)
            }
        }
    }

    async fn role_redirect(&self, service: &SessionService) -> Option<Destination> {
        match self.requirement {
            Requirement::Authenticated => None,
            Requirement::Role(Role::Hr) => (!service.is_hr().await).then_some(Destination::Dashboard),
            Requirement::Role(Role::Manager) => service
                .is_hr()
                .await
                .then_some(Destination::Landing(Role::Hr)),
            Requirement::Capability(capability) => (!service.has_capability(capability).await)
                .then_some(Destination::Dashboard),
        }
    }
}

/// Page a user is sent to right after logging in.
pub fn landing_path(user: &User) -> &'static str {
    user.role().landing_path()
}

#[cfg(test)]
mod tests {
    use talent_test::MockTransport;
    use talent_test::fixtures::{credentials_for, hr_admin, manager};

    use super::*;
    use crate::MemoryStore;
    use crate::store::{ACCESS_TOKEN_KEY, SessionStore, USER_KEY};

    async fn logged_in(user: talent_core::types::User) -> (SessionService, SessionContext) {
        let transport = MockTransport::with_user(user.clone());
        let service = SessionService::new(transport, MemoryStore::new());
        service.login(&credentials_for(&user)).await.unwrap();
        let context = SessionContext::new(service.clone());
        (service, context)
    }

    #[tokio::test]
    async fn test_anonymous_hr_page_goes_to_login() {
        let service = SessionService::new(MockTransport::new(), MemoryStore::new());
        let context = SessionContext::new(service.clone());

        let decision = RouteGuard::hr_only().check(&service, &context).await;
        assert_eq!(decision, GuardDecision::Redirect(Destination::Login));
    }

    #[tokio::test]
    async fn test_manager_on_hr_page_goes_to_dashboard() {
        let (service, context) = logged_in(manager("Sales")).await;

        let decision = RouteGuard::hr_only().check(&service, &context).await;
        assert_eq!(decision.redirect(), Some(Destination::Dashboard));
        assert_eq!(decision.redirect().map(Destination::path), Some("/dashboard"));
    }

    #[tokio::test]
    async fn test_hr_on_manager_page_goes_to_candidatures() {
        let (service, context) = logged_in(hr_admin()).await;

        let decision = RouteGuard::manager_only().check(&service, &context).await;
        assert_eq!(decision.redirect().map(Destination::path), Some("/candidatures"));
    }

    #[tokio::test]
    async fn test_hr_admin_renders_hr_page() {
        let (service, context) = logged_in(hr_admin()).await;
        assert!(service.is_hr().await);

        let decision = RouteGuard::hr_only().check(&service, &context).await;
        assert_eq!(decision.user(), Some(&hr_admin()));
        assert_eq!(landing_path(&hr_admin()), "/candidatures");
    }

    #[tokio::test]
    async fn test_capability_requirement() {
        let (service, context) = logged_in(manager("Sales")).await;

        let decision = RouteGuard::requires(Capability::RequestInterviews)
            .check(&service, &context)
            .await;
        assert!(decision.user().is_some());

        let decision = RouteGuard::requires(Capability::ManageJobs)
            .check(&service, &context)
            .await;
        assert_eq!(decision.redirect(), Some(Destination::Dashboard));
    }

    #[tokio::test]
    async fn test_stale_token_without_user_logs_out() {
        let store = MemoryStore::with_entries([
            (ACCESS_TOKEN_KEY, "forged"),
            (USER_KEY, r#"{"id": 1, "username": "hr_admin", "is_hr": true}"#),
        ]);
        let service = SessionService::new(MockTransport::with_user(hr_admin()), store.clone());
        let context = SessionContext::new(service.clone());

        let decision = RouteGuard::hr_only().check(&service, &context).await;
        assert_eq!(decision, GuardDecision::Redirect(Destination::Login));
        assert!(store.keys().await.is_empty());
        assert!(store.get(ACCESS_TOKEN_KEY).await.unwrap().is_none());
    }
}
