//! Authentication payloads exchanged with the `/auth` endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::User;

/// Username and password sent to `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful answer of `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Successful answer of `POST /auth/refresh`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub access_token: String,
}

impl RefreshResponse {
    /// Creates a refresh response carrying a new access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for RefreshResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshResponse").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("hr_admin", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("hr_admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_auth_response_debug_hides_tokens() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"access_token": "a-secret", "refresh_token": "r-secret",
                "user": {"id": 1, "username": "hr_admin", "is_hr": true}}"#,
        )
        .unwrap();
        let debug = format!("{response:?}");
        assert!(!debug.contains("a-secret"));
        assert!(!debug.contains("r-secret"));
    }

    #[test]
    fn test_refresh_response_without_token() {
        let response: RefreshResponse = serde_json::from_str("{}").unwrap();
        assert!(response.access_token.is_empty());
    }
}
