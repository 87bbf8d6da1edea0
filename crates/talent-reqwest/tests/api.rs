//! Domain services and dashboards against a mocked backend.

use serde_json::json;
use talent_core::ErrorKind;
use talent_core::types::{
    ApplicationStatus, CvUpload, InterviewStatus, NewApplication, NewInterviewRequest, User,
};
use talent_reqwest::{Dashboard, NO_DEPARTMENT_MESSAGE, ReqwestClient, ReqwestConfig, TalentApi};
use talent_session::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use talent_session::{MemoryStore, SessionService};
use talent_test::fixtures::{hr_admin, manager};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, user: Option<&User>) -> TalentApi {
    let client =
        ReqwestClient::new(ReqwestConfig::new(format!("{}/api", server.uri()))).unwrap();
    let store = match user {
        Some(user) => MemoryStore::with_entries([
            (ACCESS_TOKEN_KEY, "access-1".to_owned()),
            (REFRESH_TOKEN_KEY, "refresh-1".to_owned()),
            (USER_KEY, serde_json::to_string(user).unwrap()),
        ]),
        None => MemoryStore::new(),
    };
    TalentApi::new(client.clone(), SessionService::new(client, store))
}

fn applications() -> serde_json::Value {
    json!([
        {"id": 1, "status": 1, "candidate": {"first_name": "Ada", "last_name": "Lovelace"},
         "job": {"id": 10, "title": "Engineer", "department": "Engineering"}},
        {"id": 2, "status": 3, "candidate": null,
         "job": {"id": 11, "title": "Account manager", "department": "Sales"}},
        {"id": 3, "status": "2", "job": null}
    ])
}

#[tokio::test]
async fn test_job_listing_is_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Engineer", "department": "Engineering", "is_active": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    let jobs = api.list_jobs().await.unwrap();
    assert_eq!(jobs.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_jobs_by_department_encodes_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, None);
    let jobs = api.list_jobs_by_department("R&D / Lab").await.unwrap();
    assert!(jobs.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/api/jobs/department/R&D%20%2F%20Lab");
}

#[tokio::test]
async fn test_application_records_tolerate_missing_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applications()))
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    let records = api.list_applications().await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].candidate_name(), "Ada Lovelace");
    assert_eq!(records[1].candidate_name(), "Unknown candidate");
    assert_eq!(records[2].job_title(), "Unspecified position");
    assert_eq!(records[2].status, ApplicationStatus::Reviewing);
}

#[tokio::test]
async fn test_status_update_sends_numeric_code() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/applications/7/status"))
        .and(body_json(json!({"status": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Status updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    let ack = api
        .update_application_status(7, ApplicationStatus::Interview)
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Status updated"));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/jobs/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    let ack = api.delete_job(4).await.unwrap();
    assert!(ack.message.is_none());
}

#[tokio::test]
async fn test_create_application_is_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/applications"))
        .and(body_string_contains("Lovelace"))
        .and(body_string_contains("cv.pdf"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, None);
    let ack = api
        .create_application(&NewApplication {
            job_id: 10,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: String::new(),
            cover_letter: None,
            cv: Some(CvUpload {
                file_name: "cv.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: b"%PDF-1.4".to_vec(),
            }),
        })
        .await
        .unwrap();
    assert_eq!(ack.id, Some(42));

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn test_invalid_input_is_rejected_locally() {
    let server = MockServer::start().await;
    let api = api_for(&server, Some(&manager("Sales")));

    let error = api
        .create_interview_request(&NewInterviewRequest::new(0, "2026-11-02", None))
        .await
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidInput);

    let error = api
        .create_interview_request(&NewInterviewRequest::new(3, "  ", None))
        .await
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidInput);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_interview_status_update() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/interview-requests/5/status"))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    api.update_interview_status(5, InterviewStatus::Approved)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_not_found_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/departments/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Department not found"})))
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    let error = api.get_department(99).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(error.status, Some(404));
    assert_eq!(error.message.as_deref(), Some("Department not found"));
}

#[tokio::test]
async fn test_hr_dashboard_degrades_failed_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applications()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/interview-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "application_id": 1, "status": "pending"},
            {"id": 2, "application_id": 2, "status": "approved"}
        ])))
        .mount(&server)
        .await;

    let api = api_for(&server, Some(&hr_admin()));
    let dashboard = Dashboard::load(&api, &hr_admin()).await.unwrap();

    assert_eq!(dashboard.stats.total, 3);
    assert_eq!(dashboard.stats.new, 1);
    assert!(dashboard.jobs.is_empty());
    assert_eq!(dashboard.notices, vec!["Could not load job postings".to_owned()]);
    assert_eq!(dashboard.pending_interviews().count(), 1);
    assert_eq!(dashboard.recent_applications(2).len(), 2);
}

#[tokio::test]
async fn test_manager_dashboard_is_department_scoped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(applications()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/department/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "title": "Account manager", "department": "Sales"},
            {"id": 12, "title": "Closed role", "department": "Sales", "is_active": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/interview-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "application_id": 2, "department_id": 7},
            {"id": 2, "application_id": 1, "department_id": 3}
        ])))
        .mount(&server)
        .await;

    let user = manager("Sales");
    let api = api_for(&server, Some(&user));
    let dashboard = Dashboard::load(&api, &user).await.unwrap();

    assert_eq!(dashboard.department.as_deref(), Some("Sales"));
    assert_eq!(dashboard.applications.len(), 1);
    assert_eq!(dashboard.stats.interview, 1);
    assert_eq!(dashboard.jobs.len(), 1);
    assert_eq!(dashboard.interview_requests.len(), 1);
    assert!(dashboard.notices.is_empty());
}

#[tokio::test]
async fn test_manager_without_department() {
    let server = MockServer::start().await;

    let mut user = manager("Sales");
    user.department_id = None;
    user.department_name = None;

    let api = api_for(&server, Some(&user));
    let error = Dashboard::load(&api, &user).await.unwrap_err();
    assert_eq!(error.message.as_deref(), Some(NO_DEPARTMENT_MESSAGE));
    assert!(server.received_requests().await.unwrap().is_empty());
}
