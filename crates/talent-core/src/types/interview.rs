//! Interview requests raised by managers and reviewed by HR.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{Candidate, JobSummary};
use crate::display;
use crate::{Error, Result};

/// Review status of an interview request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Waiting for HR.
    #[default]
    Pending,
    /// Approved by HR.
    Approved,
    /// Rejected by HR.
    Rejected,
    /// Any value this client does not know about.
    #[serde(other)]
    Unknown,
}

impl InterviewStatus {
    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown => display::UNKNOWN_STATUS,
        }
    }
}

/// An interview request as returned by `GET /interview-requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub id: i64,
    pub application_id: i64,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub candidate: Option<Candidate>,
    #[serde(default)]
    pub job: Option<JobSummary>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default, alias = "interview_date")]
    pub requested_date: Option<String>,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default, alias = "notes")]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl InterviewRequest {
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

    /// Department name, the department id, or a placeholder.
    pub fn department_name(&self) -> String {
        let named = self
            .job
            .as_ref()
            .and_then(|job| job.department.as_deref())
            .filter(|name| !name.is_empty());
        display::department_name(named, self.department_id)
    }

    /// Requesting manager or a placeholder.
    pub fn manager(&self) -> &str {
        self.manager_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(display::UNSPECIFIED)
    }

    /// Requested date or a placeholder.
    pub fn requested_date(&self) -> &str {
        self.requested_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .unwrap_or(display::INVALID_DATE)
    }
}

/// Body of `POST /interview-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInterviewRequest {
    pub application_id: i64,
    pub requested_date: String,
    #[serde(default)]
    pub comments: String,
}

impl NewInterviewRequest {
    /// Creates a new request for the given application.
    pub fn new(
        application_id: i64,
        requested_date: impl Into<String>,
        comments: Option<String>,
    ) -> Self {
        Self {
            application_id,
            requested_date: requested_date.into(),
            comments: comments.unwrap_or_default(),
        }
    }

    /// Checks the fields the backend requires.
    pub fn validate(&self) -> Result<()> {
        if self.application_id <= 0 {
            return Err(Error::invalid_input()
                .with_message("application_id must be a positive number"));
        }
        if self.requested_date.trim().is_empty() {
            return Err(Error::invalid_input().with_message("requested_date is required"));
        }
        Ok(())
    }
}

/// Body of `PUT /interview-requests/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewStatusUpdate {
    pub status: InterviewStatus,
}
