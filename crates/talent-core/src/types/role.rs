//! Roles and capabilities used for client-side authorization checks.
//!
//! These checks only decide what the client shows; the backend re-validates
//! every request on its own.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Role of an authenticated user.
///
/// Every authenticated user is exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Human-resources staff with global visibility.
    Hr,
    /// Department manager limited to their department.
    Manager,
}

impl Role {
    /// Derives the role from the backend's `is_hr` flag.
    #[must_use]
    pub const fn from_is_hr(is_hr: bool) -> Self {
        if is_hr { Self::Hr } else { Self::Manager }
    }

    /// Returns true if this role grants the capability.
    #[must_use]
    pub const fn has(self, capability: Capability) -> bool {
        capability.is_permitted_by_role(self)
    }

    /// Returns the page a user with this role lands on after login.
    #[must_use]
    pub const fn landing_path(self) -> &'static str {
        match self {
            Self::Hr => "/candidatures",
            Self::Manager => "/manager-dashboard",
        }
    }
}

/// Granular capabilities checked by route guards and views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    /// Can see applications of every department.
    ViewAllApplications,
    /// Can see applications of their own department.
    ViewDepartmentApplications,
    /// Can create, edit and delete job postings.
    ManageJobs,
    /// Can create, edit and seed departments.
    ManageDepartments,
    /// Can change the status of an application.
    UpdateApplicationStatus,
    /// Can trigger the AI analysis of a CV.
    AnalyzeApplications,
    /// Can ask HR for an interview with a candidate.
    RequestInterviews,
    /// Can approve or reject interview requests.
    ReviewInterviewRequests,
}

impl Capability {
    /// Checks if the given role satisfies this capability.
    pub const fn is_permitted_by_role(self, role: Role) -> bool {
        use Role::{Hr, Manager};

        match self {
            Self::ViewAllApplications => matches!(role, Hr),
            Self::ViewDepartmentApplications => matches!(role, Hr | Manager),
            Self::ManageJobs => matches!(role, Hr),
            Self::ManageDepartments => matches!(role, Hr),
            Self::UpdateApplicationStatus => matches!(role, Hr | Manager),
            Self::AnalyzeApplications => matches!(role, Hr | Manager),
            Self::RequestInterviews => matches!(role, Manager),
            Self::ReviewInterviewRequests => matches!(role, Hr),
        }
    }

    /// Returns all capabilities granted to the given role.
    pub fn capabilities_for_role(role: Role) -> Vec<Self> {
        Self::iter()
            .filter(|capability| capability.is_permitted_by_role(role))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_is_hr() {
        assert_eq!(Role::from_is_hr(true), Role::Hr);
        assert_eq!(Role::from_is_hr(false), Role::Manager);
    }

    #[test]
    fn test_hr_capabilities() {
        assert!(Role::Hr.has(Capability::ViewAllApplications));
        assert!(Role::Hr.has(Capability::ManageJobs));
        assert!(Role::Hr.has(Capability::ReviewInterviewRequests));
        assert!(!Role::Hr.has(Capability::RequestInterviews));
    }

    #[test]
    fn test_manager_capabilities() {
        assert!(Role::Manager.has(Capability::ViewDepartmentApplications));
        assert!(Role::Manager.has(Capability::RequestInterviews));
        assert!(!Role::Manager.has(Capability::ViewAllApplications));
        assert!(!Role::Manager.has(Capability::ManageDepartments));
    }

    #[test]
    fn test_capabilities_for_role() {
        let hr = Capability::capabilities_for_role(Role::Hr);
        assert!(hr.contains(&Capability::ManageJobs));
        assert!(!hr.contains(&Capability::RequestInterviews));

        let manager = Capability::capabilities_for_role(Role::Manager);
        assert_eq!(manager.len(), 4);
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Hr.landing_path(), "/candidatures");
        assert_eq!(Role::Manager.landing_path(), "/manager-dashboard");
    }
}
