//! Turning failed domain fetches into empty results.

use talent_core::Result;

/// Tracing target for degraded results.
const TRACING_TARGET: &str = "talent_reqwest::degrade";

/// Extension for domain fetch results shown to a user.
///
/// A failed listing should leave an empty list and a message rather than
/// break the whole view.
pub trait ResultExt<T> {
    /// Returns the value, or `T::default()` after logging the error.
    fn or_degrade(self, what: &str) -> T;

    /// Like [`or_degrade`](Self::or_degrade), but also records a notice for
    /// the user.
    ///
    /// Errors that ended the session are returned instead, so the caller
    /// can send the user back to the login page.
    fn or_notice(self, what: &str, notices: &mut Vec<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T>
where
    T: Default,
{
    fn or_degrade(self, what: &str) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    what,
                    error = %error,
                    "Fetch failed, showing empty result"
                );
                T::default()
            }
        }
    }

    fn or_notice(self, what: &str, notices: &mut Vec<String>) -> Result<T> {
        match self {
            Err(error) if error.kind.ends_session() => Err(error),
            Err(error) => {
                notices.push(format!("Could not load {what}"));
                Ok(Err::<T, _>(error).or_degrade(what))
            }
            ok => ok,
        }
    }
}
