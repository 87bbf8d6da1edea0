//! Candidate applications and their lifecycle status.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::null_as_default;
use crate::display;
use crate::{Error, Result};

/// Lifecycle status of an application, transported as a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    /// Code 1: freshly submitted.
    New,
    /// Code 2: being reviewed.
    Reviewing,
    /// Code 3: interview stage.
    Interview,
    /// Code 4: rejected.
    Rejected,
    /// Code 5: hired.
    Hired,
    /// Any code this client does not know about.
    Other(u16),
}

impl ApplicationStatus {
    /// All statuses known to this client, in pipeline order.
    pub const KNOWN: [Self; 5] = [
        Self::New,
        Self::Reviewing,
        Self::Interview,
        Self::Rejected,
        Self::Hired,
    ];

    /// Returns the numeric code sent to the backend.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::New => 1,
            Self::Reviewing => 2,
            Self::Interview => 3,
            Self::Rejected => 4,
            Self::Hired => 5,
            Self::Other(code) => code,
        }
    }

    /// Returns the status for a numeric code.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::New,
            2 => Self::Reviewing,
            3 => Self::Interview,
            4 => Self::Rejected,
            5 => Self::Hired,
            other => Self::Other(other),
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Reviewing => "Under review",
            Self::Interview => "Interview",
            Self::Rejected => "Rejected",
            Self::Hired => "Hired",
            Self::Other(_) => display::UNKNOWN_STATUS,
        }
    }

    /// Returns true once the application reached a final decision.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Rejected | Self::Hired)
    }

    /// Parses a status from its code or its English name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Ok(code) = input.parse::<u16>() {
            return Ok(Self::from_code(code));
        }

        let status = match input.to_ascii_lowercase().as_str() {
            "new" | "submitted" => Self::New,
            "reviewing" | "review" => Self::Reviewing,
            "interview" => Self::Interview,
            "rejected" => Self::Rejected,
            "hired" | "accepted" => Self::Hired,
            _ => {
                return Err(Error::invalid_input()
                    .with_message(format!("unknown application status '{input}'")));
            }
        };
        Ok(status)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Text(String),
            Malformed(IgnoredAny),
        }

        // One unreadable status must not fail a whole listing.
        let status = match Raw::deserialize(deserializer)? {
            Raw::Code(code) => u16::try_from(code).map_or(Self::Other(0), Self::from_code),
            Raw::Text(text) => Self::parse(&text).unwrap_or(Self::Other(0)),
            Raw::Malformed(_) => Self::Other(0),
        };
        Ok(status)
    }
}

/// Candidate personal data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

impl Candidate {
    /// Returns "first last", or a placeholder when both are empty.
    pub fn full_name(&self) -> String {
        display::person_name(&self.first_name, &self.last_name)
    }
}

/// Job data nested in an application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// An application as listed by `GET /applications`.
///
/// The nested candidate and job may be missing or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: i64,
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub candidate: Option<Candidate>,
    #[serde(default)]
    pub job: Option<JobSummary>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub cv_filename: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ApplicationRecord {
    /// Candidate name or a placeholder.
    pub fn candidate_name(&self) -> String {
        self.candidate
            .as_ref()
            .map(Candidate::full_name)
            .unwrap_or_else(|| display::UNKNOWN_CANDIDATE.to_owned())
    }

    /// Job title or a placeholder.
    pub fn job_title(&self) -> &str {
        self.job
            .as_ref()
            .map(|job| job.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(display::UNSPECIFIED_POSITION)
    }

    /// Department of the job, if known.
    pub fn department(&self) -> Option<&str> {
        self.job
            .as_ref()
            .and_then(|job| job.department.as_deref())
            .filter(|department| !department.is_empty())
    }

    /// Department of the job or a placeholder.
    pub fn department_name(&self) -> &str {
        self.department().unwrap_or(display::UNSPECIFIED_DEPARTMENT)
    }

    /// Status text from the backend, falling back to the local label.
    pub fn status_label(&self) -> &str {
        self.status_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(self.status.label())
    }
}

/// A candidate together with all of their applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDetails {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
}

/// A CV file attached to a new application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Form data submitted by a candidate applying to a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub job_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cover_letter: Option<String>,
    pub cv: Option<CvUpload>,
}

impl NewApplication {
    /// Checks the fields the backend requires.
    pub fn validate(&self) -> Result<()> {
        if self.job_id <= 0 {
            return Err(Error::invalid_input().with_message("job_id must be a positive number"));
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::invalid_input().with_message("first and last name are required"));
        }
        if !self.email.contains('@') {
            return Err(Error::invalid_input().with_message("a valid email address is required"));
        }
        Ok(())
    }
}

/// Result of `POST /applications/{id}/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysis {
    #[serde(default)]
    pub ai_analysis: Option<String>,
    #[serde(default)]
    pub ai_score: Option<f64>,
}

impl CvAnalysis {
    /// Analysis text, or a notice when the backend produced none.
    pub fn summary(&self) -> &str {
        self.ai_analysis
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("No analysis available")
    }

    /// Score between 0 and 100, zero when missing.
    pub fn score(&self) -> f64 {
        self.ai_score.unwrap_or_default()
    }
}

/// Body of `PUT /applications/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_status_deserializes_from_number_and_string() {
        let status: ApplicationStatus = serde_json::from_str("3").unwrap();
        assert_eq!(status, ApplicationStatus::Interview);

        let status: ApplicationStatus = serde_json::from_str(r#""2""#).unwrap();
        assert_eq!(status, ApplicationStatus::Reviewing);

        let status: ApplicationStatus = serde_json::from_str("9").unwrap();
        assert_eq!(status, ApplicationStatus::Other(9));
        assert_eq!(status.label(), display::UNKNOWN_STATUS);
    }

    #[test]
    fn test_unreadable_status_keeps_record() {
        let status: ApplicationStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, ApplicationStatus::Other(0));

        let status: ApplicationStatus = serde_json::from_str("300").unwrap();
        assert_eq!(status, ApplicationStatus::Other(300));

        let status: ApplicationStatus = serde_json::from_str("-1").unwrap();
        assert_eq!(status, ApplicationStatus::Other(0));

        let status: ApplicationStatus = serde_json::from_str("null").unwrap();
        assert_eq!(status, ApplicationStatus::Other(0));
    }

    #[test]
    fn test_malformed_rows_do_not_fail_listing() {
        let records: Vec<ApplicationRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "status": 1},
                {"id": 2, "status": "archived"},
                {"id": 3, "status": 300},
                {"id": 4, "status": 2,
                 "candidate": {"first_name": null, "last_name": "Hopper", "email": null},
                 "job": {"id": 10, "title": null, "department": null}}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[1].status.label(), display::UNKNOWN_STATUS);
        assert_eq!(records[2].status.code(), 300);
        assert_eq!(records[3].candidate_name(), "Hopper");
        assert_eq!(records[3].job_title(), display::UNSPECIFIED_POSITION);
        assert_eq!(records[3].department_name(), display::UNSPECIFIED_DEPARTMENT);
    }

    #[test]
    fn test_status_update_is_numeric() {
        let update = StatusUpdate {
            status: ApplicationStatus::Hired,
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"status":5}"#);
    }

    #[test]
    fn test_parse_status_names() {
        assert_eq!(
            ApplicationStatus::parse("rejected").unwrap(),
            ApplicationStatus::Rejected
        );
        assert_eq!(
            ApplicationStatus::parse(" 1 ").unwrap(),
            ApplicationStatus::New
        );
        let error = ApplicationStatus::parse("maybe").unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_record_with_null_job_uses_placeholders() {
        let record: ApplicationRecord = serde_json::from_str(
            r#"{"id": 7, "candidate": null, "job": null, "status": 1}"#,
        )
        .unwrap();
        assert_eq!(record.candidate_name(), display::UNKNOWN_CANDIDATE);
        assert_eq!(record.job_title(), display::UNSPECIFIED_POSITION);
        assert_eq!(record.department_name(), display::UNSPECIFIED_DEPARTMENT);
        assert_eq!(record.status_label(), "New");
    }

    #[test]
    fn test_record_prefers_backend_status_text() {
        let record: ApplicationRecord = serde_json::from_str(
            r#"{"id": 8, "status": 2, "status_text": "En cours d'examen",
                "candidate": {"first_name": "Ada", "last_name": "Lovelace"},
                "job": {"id": 1, "title": "Analyst", "department": "Finance"}}"#,
        )
        .unwrap();
        assert_eq!(record.status_label(), "En cours d'examen");
        assert_eq!(record.candidate_name(), "Ada Lovelace");
        assert_eq!(record.department(), Some("Finance"));
    }

    #[test]
    fn test_new_application_validation() {
        let mut application = NewApplication {
            job_id: 4,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@navy.test".into(),
            phone: String::new(),
            cover_letter: None,
            cv: None,
        };
        assert!(application.validate().is_ok());

        application.email = "not-an-email".into();
        assert!(application.validate().is_err());

        application.email = "grace@navy.test".into();
        application.job_id = 0;
        assert!(application.validate().is_err());
    }
}
