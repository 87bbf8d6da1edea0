//! Replies of mutating endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Confirmation returned by create, update and delete calls.
///
/// The backend answers with either the stored entity or a short message;
/// both shapes deserialize into this, with unknown fields kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Acknowledgement {
    /// Message to show the user, falling back to `default`.
    pub fn message_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(default)
    }
}
