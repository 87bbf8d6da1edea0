use reqwest::Method;
use talent_core::types::{Acknowledgement, Department, DepartmentDraft};
use talent_core::{Error, Result};

use super::{TRACING_TARGET, TalentApi, json_body};

impl TalentApi {
    /// Lists departments.
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        self.authorized(Method::GET, &["departments"], None).await
    }

    /// Fetches one department.
    pub async fn get_department(&self, id: i64) -> Result<Department> {
        self.authorized(Method::GET, &["departments", &id.to_string()], None)
            .await
    }

    /// Creates a department.
    pub async fn create_department(&self, draft: &DepartmentDraft) -> Result<Acknowledgement> {
        if draft.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            return Err(Error::invalid_input().with_message("department name is required"));
        }

        tracing::info!(target: TRACING_TARGET, name = ?draft.name, "Creating department");
        self.authorized_ack(Method::POST, &["departments"], json_body(draft)?)
            .await
    }

    /// Updates a department.
    pub async fn update_department(
        &self,
        id: i64,
        draft: &DepartmentDraft,
    ) -> Result<Acknowledgement> {
        tracing::info!(target: TRACING_TARGET, department_id = id, "Updating department");
        self.authorized_ack(Method::PUT, &["departments", &id.to_string()], json_body(draft)?)
            .await
    }

    /// Creates the standard set of departments.
    pub async fn seed_departments(&self) -> Result<Acknowledgement> {
        tracing::info!(target: TRACING_TARGET, "Seeding departments");
        let body = json_body(&serde_json::json!({}))?;
        self.authorized_ack(Method::POST, &["departments", "seed"], body)
            .await
    }
}
