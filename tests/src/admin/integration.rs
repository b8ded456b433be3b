#![cfg(test)]
use std::collections::HashMap;

use crprobe_common::config::{AdminCredentials, SERVICE_ROLE_VAR, SUPABASE_URL_VAR};
use crprobe_common::error::ConfigError;
use crprobe_core::StatusCode;
use crprobe_core::admin::{
    self, DeleteMode, DeletionOutcome, DeletionRequest, SupabaseAdmin, UserAdmin, UserId,
};
use crprobe_core::error::AdminError;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "e62acac9-90a3-4ff2-ac95-de6005ef0bbf";
const KEY: &str = "service-role-secret";

fn user() -> UserId {
    USER.parse().unwrap()
}

fn env(url: Option<&str>, key: Option<&str>) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    if let Some(url) = url {
        vars.insert(SUPABASE_URL_VAR.to_string(), url.to_string());
    }
    if let Some(key) = key {
        vars.insert(SERVICE_ROLE_VAR.to_string(), key.to_string());
    }
    vars
}

fn request(mode: DeleteMode) -> DeletionRequest {
    DeletionRequest {
        user_id: user(),
        mode,
        soft: false,
    }
}

#[tokio::test]
async fn delete_sends_service_role_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/auth/v1/admin/users/{USER}")))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer service-role-secret"))
        .and(body_json(json!({ "should_soft_delete": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let vars = env(Some(&server.uri()), Some(KEY));
    let outcome = admin::delete_from_env(&vars, &request(DeleteMode::Execute))
        .await
        .unwrap();

    assert_eq!(outcome, DeletionOutcome::Deleted);
}

#[tokio::test]
async fn soft_delete_flag_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(body_json(json!({ "should_soft_delete": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = SupabaseAdmin::new(AdminCredentials::new(
        Url::parse(&server.uri()).unwrap(),
        KEY,
    ))
    .unwrap();

    client.delete_user(&user(), true).await.unwrap();
}

#[tokio::test]
async fn rejected_delete_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
        .mount(&server)
        .await;

    let vars = env(Some(&server.uri()), Some(KEY));
    let err = admin::delete_from_env(&vars, &request(DeleteMode::Execute))
        .await
        .unwrap_err();

    match err {
        AdminError::Rejected { status, body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "User not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = MockServer::start().await;

    let vars = env(Some(&server.uri()), None);
    let err = admin::delete_from_env(&vars, &request(DeleteMode::Execute))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AdminError::Config(ConfigError::Missing { var: SERVICE_ROLE_VAR, .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_url_fails_before_any_request() {
    let vars = env(None, Some(KEY));
    let err = admin::delete_from_env(&vars, &request(DeleteMode::Execute))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AdminError::Config(ConfigError::Missing { var: SUPABASE_URL_VAR, .. })
    ));
}

/// Dry run and real deletion share validation and differ only in the delete call.
#[tokio::test]
async fn dry_run_validates_but_sends_nothing() {
    let server = MockServer::start().await;

    let vars = env(Some(&server.uri()), Some(KEY));
    let outcome = admin::delete_from_env(&vars, &request(DeleteMode::DryRun))
        .await
        .unwrap();

    assert_eq!(outcome, DeletionOutcome::Skipped);
    assert!(server.received_requests().await.unwrap().is_empty());

    let err = admin::delete_from_env(&env(None, None), &request(DeleteMode::DryRun))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Config(_)));
}
