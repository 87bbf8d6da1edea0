use reqwest::Method;
use reqwest::multipart::{Form, Part};
use talent_core::Result;
use talent_core::types::{
    Acknowledgement, ApplicationRecord, ApplicationStatus, CvAnalysis, NewApplication,
    StatusUpdate,
};

use super::{TRACING_TARGET, TalentApi, json_body};
use crate::error::Error;

impl TalentApi {
    /// Lists the applications visible to the current user.
    pub async fn list_applications(&self) -> Result<Vec<ApplicationRecord>> {
        self.authorized(Method::GET, &["applications"], None).await
    }

    /// Fetches one application with its candidate and job.
    pub async fn get_application(&self, id: i64) -> Result<ApplicationRecord> {
        self.authorized(Method::GET, &["applications", &id.to_string()], None)
            .await
    }

    /// Submits a candidate's application, optionally with a CV file.
    ///
    /// Open to anonymous visitors. Sent as multipart with the upload header
    /// variant so the transport sets the boundary.
    pub async fn create_application(&self, application: &NewApplication) -> Result<Acknowledgement> {
        application.validate()?;
        let form = application_form(application)?;

        tracing::info!(
            target: TRACING_TARGET,
            job_id = application.job_id,
            with_cv = application.cv.is_some(),
            "Submitting application"
        );

        let headers = self.session().headers().upload().await;
        let request = self
            .client()
            .request(Method::POST, &["applications"], &headers)?
            .multipart(form);
        self.client().send_ack(request).await
    }

    /// Moves an application to another status.
    pub async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Acknowledgement> {
        tracing::info!(
            target: TRACING_TARGET,
            application_id = id,
            status = status.code(),
            "Updating application status"
        );

        let body = json_body(&StatusUpdate { status })?;
        self.authorized_ack(Method::PUT, &["applications", &id.to_string(), "status"], body)
            .await
    }

    /// Asks the backend to analyze the application's CV.
    pub async fn analyze_application(&self, id: i64) -> Result<CvAnalysis> {
        tracing::info!(target: TRACING_TARGET, application_id = id, "Requesting CV analysis");

        let body = json_body(&serde_json::json!({}))?;
        self.authorized(Method::POST, &["applications", &id.to_string(), "analyze"], body)
            .await
    }
}

fn application_form(application: &NewApplication) -> Result<Form> {
    let mut form = Form::new()
        .text("job_id", application.job_id.to_string())
        .text("first_name", application.first_name.clone())
        .text("last_name", application.last_name.clone())
        .text("email", application.email.clone())
        .text("phone", application.phone.clone());

    if let Some(cover_letter) = application.cover_letter.as_ref().filter(|c| !c.is_empty()) {
        form = form.text("cover_letter", cover_letter.clone());
    }

    if let Some(cv) = &application.cv {
        let mut part = Part::bytes(cv.bytes.clone()).file_name(cv.file_name.clone());
        if let Some(content_type) = &cv.content_type {
            part = part.mime_str(content_type).map_err(Error::from)?;
        }
        form = form.part("cv", part);
    }

    Ok(form)
}
