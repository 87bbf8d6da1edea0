//! Session lifecycle against a mocked backend.

use std::time::Duration;

use serde_json::json;
use talent_core::ErrorKind;
use talent_core::types::Credentials;
use talent_reqwest::{ReqwestClient, ReqwestConfig, TalentApi};
use talent_session::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use talent_session::{MemoryStore, SessionService, SessionStore};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hr_profile() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "hr_admin",
        "email": "hr@talent.test",
        "role_id": 1,
        "is_hr": true
    })
}

fn client_for(server: &MockServer) -> ReqwestClient {
    ReqwestClient::new(ReqwestConfig::new(format!("{}/api", server.uri()))).unwrap()
}

fn seeded_store(access_token: &str) -> MemoryStore {
    MemoryStore::with_entries([
        (ACCESS_TOKEN_KEY, access_token.to_owned()),
        (REFRESH_TOKEN_KEY, "refresh-1".to_owned()),
        (USER_KEY, hr_profile().to_string()),
    ])
}

#[tokio::test]
async fn test_login_persists_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "hr_admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "user": hr_profile()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let session = SessionService::new(client_for(&server), store.clone());

    let user = session
        .login(&Credentials::new("hr_admin", "secret"))
        .await
        .unwrap();

    assert!(user.is_hr);
    assert!(session.is_hr().await);
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("access-1")
    );
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("refresh-1")
    );
}

#[tokio::test]
async fn test_login_rejection_carries_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let session = SessionService::new(client_for(&server), store.clone());

    let error = session
        .login(&Credentials::new("hr_admin", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Authentication);
    assert_eq!(error.status, Some(401));
    assert_eq!(error.message.as_deref(), Some("Invalid credentials"));
    assert!(store.keys().await.is_empty());
}

#[tokio::test]
async fn test_current_user_refreshes_expired_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Token has expired"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(header("Authorization", "Bearer refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hr_profile()))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store("stale");
    let session = SessionService::new(client_for(&server), store.clone());

    let user = session.current_user().await.unwrap();
    assert_eq!(user.username, "hr_admin");
    assert_eq!(
        store.get(ACCESS_TOKEN_KEY).await.unwrap().as_deref(),
        Some("fresh")
    );
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY).await.unwrap().as_deref(),
        Some("refresh-1")
    );
}

#[tokio::test]
async fn test_expired_refresh_token_ends_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Token has expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store("stale");
    let client = client_for(&server);
    let api = TalentApi::new(client.clone(), SessionService::new(client, store.clone()));

    let error = api.list_applications().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::RefreshFailed);
    assert!(store.keys().await.is_empty());
    assert!(!api.session().is_authenticated().await);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "fresh"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(5)
        .mount(&server)
        .await;

    let store = seeded_store("stale");
    let client = client_for(&server);
    let api = TalentApi::new(client.clone(), SessionService::new(client, store));

    let results = futures::future::join_all((0..5).map(|_| api.list_applications())).await;
    assert!(results.iter().all(Result::is_ok));
}

#[tokio::test]
async fn test_401_after_refresh_ends_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "Not allowed"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = seeded_store("stale");
    let client = client_for(&server);
    let api = TalentApi::new(client.clone(), SessionService::new(client, store.clone()));

    let error = api.list_applications().await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Unauthorized);
    assert_eq!(error.status, Some(401));
    assert!(store.keys().await.is_empty());
}
