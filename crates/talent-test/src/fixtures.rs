//! Users and credentials shared by the test suites.

use talent_core::types::{Credentials, User};

/// Password accepted for every fixture user.
pub const PASSWORD: &str = "correct-horse";

/// An HR staff member.
pub fn hr_admin() -> User {
    User {
        id: 1,
        username: "hr_admin".into(),
        email: "hr_admin@talent.test".into(),
        role_id: Some(1),
        department_id: None,
        department_name: None,
        is_hr: true,
    }
}

/// A manager of the given department.
pub fn manager(department: &str) -> User {
    User {
        id: 2,
        username: "manager".into(),
        email: "manager@talent.test".into(),
        role_id: Some(2),
        department_id: Some(7),
        department_name: Some(department.to_owned()),
        is_hr: false,
    }
}

/// Valid credentials for a fixture user.
pub fn credentials_for(user: &User) -> Credentials {
    Credentials::new(user.username.clone(), PASSWORD)
}
