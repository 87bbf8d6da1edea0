use reqwest::Method;
use talent_core::Result;
use talent_core::types::{
    Acknowledgement, InterviewRequest, InterviewStatus, InterviewStatusUpdate, NewInterviewRequest,
};

use super::{TRACING_TARGET, TalentApi, json_body};

impl TalentApi {
    /// Lists interview requests visible to the current user.
    pub async fn list_interview_requests(&self) -> Result<Vec<InterviewRequest>> {
        self.authorized(Method::GET, &["interview-requests"], None)
            .await
    }

    /// Fetches one interview request.
    pub async fn get_interview_request(&self, id: i64) -> Result<InterviewRequest> {
        self.authorized(Method::GET, &["interview-requests", &id.to_string()], None)
            .await
    }

    /// Asks HR for an interview with the candidate of an application.
    pub async fn create_interview_request(
        &self,
        request: &NewInterviewRequest,
    ) -> Result<Acknowledgement> {
        request.validate()?;

        tracing::info!(
            target: TRACING_TARGET,
            application_id = request.application_id,
            requested_date = %request.requested_date,
            "Requesting interview"
        );
        self.authorized_ack(Method::POST, &["interview-requests"], json_body(request)?)
            .await
    }

    /// Approves or rejects an interview request.
    pub async fn update_interview_status(
        &self,
        id: i64,
        status: InterviewStatus,
    ) -> Result<Acknowledgement> {
        tracing::info!(
            target: TRACING_TARGET,
            interview_request_id = id,
            status = %status,
            "Updating interview request status"
        );

        let body = json_body(&InterviewStatusUpdate { status })?;
        self.authorized_ack(
            Method::PUT,
            &["interview-requests", &id.to_string(), "status"],
            body,
        )
        .await
    }
}
