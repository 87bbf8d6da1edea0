//! Filtering and summaries over fetched application records.

use serde::{Deserialize, Serialize};

use crate::types::{ApplicationRecord, ApplicationStatus, Capability, User};

/// Criteria for narrowing down a list of applications.
///
/// Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// Exact job title.
    pub job_title: Option<String>,
    /// Exact status.
    pub status: Option<ApplicationStatus>,
    /// Department name, compared case-insensitively.
    pub department: Option<String>,
}

impl ApplicationFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one job title.
    #[must_use]
    pub fn with_job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Returns true if the record satisfies every set criterion.
    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        let job_matches = self.job_title.as_deref().is_none_or(|title| {
            record
                .job
                .as_ref()
                .is_some_and(|job| job.title == title)
        });
        let status_matches = self.status.is_none_or(|status| record.status == status);
        let department_matches = self.department.as_deref().is_none_or(|wanted| {
            record
                .department()
                .is_some_and(|department| department.eq_ignore_ascii_case(wanted.trim()))
        });

        job_matches && status_matches && department_matches
    }

    /// Applies the filter, keeping the original order.
    pub fn apply<'a>(&self, records: &'a [ApplicationRecord]) -> Vec<&'a ApplicationRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Application counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub new: usize,
    pub reviewing: usize,
    pub interview: usize,
    pub rejected: usize,
    pub hired: usize,
}

impl ApplicationStats {
    /// Counts the given records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ApplicationRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.status {
                ApplicationStatus::New => stats.new += 1,
                ApplicationStatus::Reviewing => stats.reviewing += 1,
                ApplicationStatus::Interview => stats.interview += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
                ApplicationStatus::Hired => stats.hired += 1,
                ApplicationStatus::Other(_) => {}
            }
            stats
        })
    }

    /// Applications still waiting for a final decision.
    #[must_use]
    pub const fn open(&self) -> usize {
        self.new + self.reviewing + self.interview
    }
}

/// Returns the first `count` records in the order the backend sent them.
pub fn latest(records: &[ApplicationRecord], count: usize) -> &[ApplicationRecord] {
    &records[..records.len().min(count)]
}

/// Keeps the records the user is meant to see.
///
/// HR sees everything; a manager only sees applications for jobs of their
/// own department. A manager without a department sees nothing.
pub fn visible_applications(user: &User, records: Vec<ApplicationRecord>) -> Vec<ApplicationRecord> {
    if user.can(Capability::ViewAllApplications) {
        return records;
    }

    records
        .into_iter()
        .filter(|record| record.department().is_some_and(|name| user.belongs_to(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ApplicationRecord> {
        serde_json::from_str(
            r#"[
                {"id": 1, "status": 1, "job": {"id": 10, "title": "Analyst", "department": "Finance"}},
                {"id": 2, "status": 2, "job": {"id": 11, "title": "Engineer", "department": "Engineering"}},
                {"id": 3, "status": 3, "job": {"id": 11, "title": "Engineer", "department": "engineering"}},
                {"id": 4, "status": 5, "job": null},
                {"id": 5, "status": 4, "job": {"id": 10, "title": "Analyst", "department": "Finance"}}
            ]"#,
        )
        .unwrap()
    }

    fn user(is_hr: bool, department: Option<&str>) -> User {
        User {
            id: 1,
            username: "someone".into(),
            email: String::new(),
            role_id: None,
            department_id: department.map(|_| 1),
            department_name: department.map(str::to_owned),
            is_hr,
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let records = records();
        assert_eq!(ApplicationFilter::new().apply(&records).len(), 5);
    }

    #[test]
    fn test_filter_by_job_and_status() {
        let records = records();
        let filtered = ApplicationFilter::new()
            .with_job_title("Analyst")
            .with_status(ApplicationStatus::Rejected)
            .apply(&records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 5);
    }

    #[test]
    fn test_filter_by_department_ignores_case() {
        let records = records();
        let filtered = ApplicationFilter::new()
            .with_department("ENGINEERING")
            .apply(&records);
        let ids: Vec<i64> = filtered.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_stats() {
        let records = records();
        let stats = ApplicationStats::from_records(&records);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.reviewing, 1);
        assert_eq!(stats.interview, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.hired, 1);
        assert_eq!(stats.open(), 3);
    }

    #[test]
    fn test_latest() {
        let records = records();
        assert_eq!(latest(&records, 2).len(), 2);
        assert_eq!(latest(&records, 50).len(), 5);
    }

    #[test]
    fn test_visibility_by_role() {
        let hr = user(true, None);
        assert_eq!(visible_applications(&hr, records()).len(), 5);

        let manager = user(false, Some("Finance"));
        let visible = visible_applications(&manager, records());
        assert!(visible.iter().all(|record| record.department() == Some("Finance")));
        assert_eq!(visible.len(), 2);

        let orphan = user(false, None);
        assert!(visible_applications(&orphan, records()).is_empty());
    }
}
