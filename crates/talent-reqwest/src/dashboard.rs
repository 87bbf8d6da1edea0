//! Role-specific landing views.

use serde::Serialize;
use talent_core::filter::{ApplicationStats, latest, visible_applications};
use talent_core::types::{
    ApplicationRecord, InterviewRequest, InterviewStatus, JobPosition, Role, User, active_jobs,
};
use talent_core::{Error, Result};

use crate::api::TalentApi;
use crate::degrade::ResultExt;

/// Tracing target for dashboard loading.
const TRACING_TARGET: &str = "talent_reqwest::dashboard";

/// Message shown to a manager whose account has no department.
pub const NO_DEPARTMENT_MESSAGE: &str =
    "Your account is not linked to a department. Please contact an administrator.";

/// Data behind a role's landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Role the view was built for.
    pub role: Role,
    /// Department the view is scoped to; `None` for HR.
    pub department: Option<String>,
    /// Applications the user may see.
    pub applications: Vec<ApplicationRecord>,
    /// Open job postings.
    pub jobs: Vec<JobPosition>,
    /// Interview requests the user may see.
    pub interview_requests: Vec<InterviewRequest>,
    /// Counts by status over `applications`.
    pub stats: ApplicationStats,
    /// Parts that could not be loaded.
    pub notices: Vec<String>,
}

impl Dashboard {
    /// Loads the view matching the user's role.
    ///
    /// A listing that fails is left empty with a notice. A manager without
    /// a department gets an error instead of data, and errors that ended the
    /// session are returned as-is.
    pub async fn load(api: &TalentApi, user: &User) -> Result<Self> {
        match user.role() {
            Role::Hr => Self::load_hr(api, user).await,
            Role::Manager => Self::load_manager(api, user).await,
        }
    }

    /// The most recent applications, as ordered by the backend.
    pub fn recent_applications(&self, count: usize) -> &[ApplicationRecord] {
        latest(&self.applications, count)
    }

    /// Interview requests still waiting for a decision.
    pub fn pending_interviews(&self) -> impl Iterator<Item = &InterviewRequest> {
        self.interview_requests
            .iter()
            .filter(|request| request.status == InterviewStatus::Pending)
    }

    async fn load_hr(api: &TalentApi, user: &User) -> Result<Self> {
        tracing::debug!(target: TRACING_TARGET, user_id = user.id, "Loading HR dashboard");

        let mut notices = Vec::new();
        let (applications, jobs, interview_requests) = tokio::join!(
            api.list_applications(),
            api.list_jobs(),
            api.list_interview_requests(),
        );

        let applications = applications.or_notice("applications", &mut notices)?;
        let jobs = jobs.or_notice("job postings", &mut notices)?;
        let interview_requests = interview_requests.or_notice("interview requests", &mut notices)?;

        Ok(Self::assemble(Role::Hr, None, applications, jobs, interview_requests, notices))
    }

    async fn load_manager(api: &TalentApi, user: &User) -> Result<Self> {
        let Some(department_id) = user.department_id else {
            tracing::warn!(
                target: TRACING_TARGET,
                user_id = user.id,
                "Manager has no department"
            );
            return Err(Error::invalid_input().with_message(NO_DEPARTMENT_MESSAGE));
        };

        tracing::debug!(
            target: TRACING_TARGET,
            user_id = user.id,
            department_id,
            "Loading manager dashboard"
        );

        let mut notices = Vec::new();
        let department_key = department_id.to_string();
        let (applications, jobs, interview_requests) = tokio::join!(
            api.list_applications(),
            api.list_jobs_by_department(&department_key),
            api.list_interview_requests(),
        );

        let applications = applications.or_notice("applications", &mut notices)?;
        let applications = if user.department_name.is_some() {
            visible_applications(user, applications)
        } else {
            applications
        };
        let jobs = jobs.or_notice("job postings", &mut notices)?;
        let interview_requests: Vec<InterviewRequest> = interview_requests
            .or_notice("interview requests", &mut notices)?
            .into_iter()
            .filter(|request| request.department_id.is_none_or(|id| id == department_id))
            .collect();

        let department = Some(user.department_name.clone().unwrap_or(department_key));
        Ok(Self::assemble(
            Role::Manager,
            department,
            applications,
            jobs,
            interview_requests,
            notices,
        ))
    }

    fn assemble(
        role: Role,
        department: Option<String>,
        applications: Vec<ApplicationRecord>,
        jobs: Vec<JobPosition>,
        interview_requests: Vec<InterviewRequest>,
        notices: Vec<String>,
    ) -> Self {
        let stats = ApplicationStats::from_records(&applications);
        let jobs = active_jobs(jobs);

        tracing::info!(
            target: TRACING_TARGET,
            role = %role,
            applications = stats.total,
            jobs = jobs.len(),
            interview_requests = interview_requests.len(),
            notices = notices.len(),
            "Dashboard loaded"
        );

        Self {
            role,
            department,
            applications,
            jobs,
            interview_requests,
            stats,
            notices,
        }
    }
}
