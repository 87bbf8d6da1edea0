use reqwest::Method;
use talent_core::types::{Acknowledgement, JobPosition, JobUpdate};
use talent_core::{Error, Result};

use super::{TRACING_TARGET, TalentApi, json_body};

impl TalentApi {
    /// Lists every job posting. No authentication needed.
    pub async fn list_jobs(&self) -> Result<Vec<JobPosition>> {
        self.public(&["jobs"]).await
    }

    /// Fetches one job posting. No authentication needed.
    pub async fn get_job(&self, id: i64) -> Result<JobPosition> {
        self.public(&["jobs", &id.to_string()]).await
    }

    /// Lists the postings of a department. No authentication needed.
    pub async fn list_jobs_by_department(&self, department: &str) -> Result<Vec<JobPosition>> {
        self.public(&["jobs", "department", department.trim()]).await
    }

    /// Publishes a new posting.
    pub async fn create_job(&self, job: &JobPosition) -> Result<Acknowledgement> {
        if job.title.trim().is_empty() {
            return Err(Error::invalid_input().with_message("job title is required"));
        }

        tracing::info!(
            target: TRACING_TARGET,
            title = %job.title,
            department = %job.department,
            "Creating job posting"
        );
        self.authorized_ack(Method::POST, &["jobs"], json_body(job)?)
            .await
    }

    /// Changes the given fields of a posting.
    pub async fn update_job(&self, id: i64, update: &JobUpdate) -> Result<Acknowledgement> {
        if update.is_empty() {
            return Err(Error::invalid_input().with_message("nothing to update"));
        }

        tracing::info!(target: TRACING_TARGET, job_id = id, "Updating job posting");
        self.authorized_ack(Method::PUT, &["jobs", &id.to_string()], json_body(update)?)
            .await
    }

    /// Removes a posting.
    pub async fn delete_job(&self, id: i64) -> Result<Acknowledgement> {
        tracing::info!(target: TRACING_TARGET, job_id = id, "Deleting job posting");
        self.authorized_ack(Method::DELETE, &["jobs", &id.to_string()], None)
            .await
    }
}
