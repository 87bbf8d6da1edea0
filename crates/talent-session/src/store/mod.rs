//! Persistent key-value storage for the session.
//!
//! The session lives under three well-known keys. Writes always replace a
//! whole value, and [`SessionStore::set_many`] writes several keys at once so
//! a login never leaves a half-written session behind.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
use talent_core::Result;

/// Key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key holding the serialized user profile.
pub const USER_KEY: &str = "user";

/// Every key that belongs to a session.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Key-value storage surviving process restarts.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes all entries in a single step.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Removes all keys in a single step. Missing keys are ignored.
    async fn remove_many(&self, keys: &[&str]) -> Result<()>;

    /// Writes one entry.
    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_many(&[(key, value)]).await
    }

    /// Removes one key.
    async fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key]).await
    }
}
