//! Records exchanged with the backend.

mod ack;
mod application;
mod department;
mod interview;
mod job;
mod role;
mod session;
mod user;

pub use ack::Acknowledgement;
pub use application::{
    ApplicationRecord, ApplicationStatus, Candidate, CandidateDetails, CvAnalysis, CvUpload,
    JobSummary, NewApplication, StatusUpdate,
};
pub use department::{Department, DepartmentDraft};
pub use interview::{
    InterviewRequest, InterviewStatus, InterviewStatusUpdate, NewInterviewRequest,
};
pub use job::{JobPosition, JobUpdate, active_jobs};
pub use role::{Capability, Role};
pub use session::{AuthResponse, Credentials, RefreshResponse};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Deserializes an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers missing fields; the backend also sends
/// `null` for empty columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
