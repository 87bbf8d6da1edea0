//! User profile as returned by the backend.

use serde::{Deserialize, Serialize};

use super::{Capability, Role, null_as_default};

/// Profile of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub is_hr: bool,
}

impl User {
    /// Returns the role derived from the `is_hr` flag.
    #[must_use]
    pub const fn role(&self) -> Role {
        Role::from_is_hr(self.is_hr)
    }

    /// Returns true if the user's role grants the capability.
    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        self.role().has(capability)
    }

    /// Returns true if the user belongs to the named department.
    pub fn belongs_to(&self, department: &str) -> bool {
        self.department_name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(department.trim()))
    }
}
