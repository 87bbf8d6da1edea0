//! Typed access to the session keys of a [`SessionStore`].

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use talent_core::Result;
use talent_core::types::{AuthResponse, Role, User};

use crate::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, SessionStore, USER_KEY};

/// Tracing target for session storage.
const TRACING_TARGET: &str = "talent_session::storage";

/// Typed view over the three session keys.
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct SessionStorage {
    inner: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStorage").finish_non_exhaustive()
    }
}

impl SessionStorage {
    /// Wraps a store.
    pub fn new<S>(store: S) -> Self
    where
        S: SessionStore + 'static,
    {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Stored access token; empty values count as absent.
    pub async fn access_token(&self) -> Result<Option<String>> {
        self.non_empty(ACCESS_TOKEN_KEY).await
    }

    /// Stored refresh token; empty values count as absent.
    pub async fn refresh_token(&self) -> Result<Option<String>> {
        self.non_empty(REFRESH_TOKEN_KEY).await
    }

    /// Cached user blob as raw JSON.
    ///
    /// An unparsable blob reads as absent.
    pub async fn cached_user_value(&self) -> Result<Option<Value>> {
        let Some(raw) = self.inner.get(USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Cached user profile is not valid JSON"
                );
                Ok(None)
            }
        }
    }

    /// Cached user profile, if present and well-formed.
    pub async fn cached_user(&self) -> Result<Option<User>> {
        let user = self
            .cached_user_value()
            .await?
            .and_then(|value| serde_json::from_value(value).ok());
        Ok(user)
    }

    /// True only if the cached profile has `is_hr` set to the boolean `true`.
    pub async fn cached_is_hr(&self) -> Result<bool> {
        let is_hr = self
            .cached_user_value()
            .await?
            .is_some_and(|value| value.get("is_hr") == Some(&Value::Bool(true)));
        Ok(is_hr)
    }

    /// Role derived from the cached profile, if a profile object is cached.
    pub async fn cached_role(&self) -> Result<Option<Role>> {
        let role = self
            .cached_user_value()
            .await?
            .filter(Value::is_object)
            .map(|value| Role::from_is_hr(value.get("is_hr") == Some(&Value::Bool(true))));
        Ok(role)
    }

    /// Persists a freshly created session in one write.
    pub async fn save(&self, session: &AuthResponse) -> Result<()> {
        let user = serde_json::to_string(&session.user)?;
        self.inner
            .set_many(&[
                (ACCESS_TOKEN_KEY, session.access_token.clone()),
                (REFRESH_TOKEN_KEY, session.refresh_token.clone()),
                (USER_KEY, user),
            ])
            .await
    }

    /// Replaces the access token, leaving the other keys untouched.
    pub async fn replace_access_token(&self, access_token: &str) -> Result<()> {
        self.inner
            .set(ACCESS_TOKEN_KEY, access_token.to_owned())
            .await
    }

    /// Removes every session key.
    pub async fn clear(&self) -> Result<()> {
        self.inner.remove_many(&SESSION_KEYS).await
    }

    async fn non_empty(&self, key: &str) -> Result<Option<String>> {
        let value = self.inner.get(key).await?;
        Ok(value.filter(|value| !value.is_empty()))
    }
}
