//! Firestore REST client and token exchange against a mock HTTP server.

use std::sync::Arc;

use firestore_import::auth::{load_service_account, TokenProvider};
use firestore_import::error_handling::{ImportError, StoreError};
use firestore_import::store::{Authorization, DocumentStore, FirestoreStore};
use firestore_import::{run_imports, Config, ImportTask};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod helpers;
use helpers::{events_json, record, write_json};

const COMMIT_PATH: &str = "/v1/projects/demo-import/databases/(default)/documents:commit";

fn commit_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "writeResults": [],
        "commitTime": "2024-01-01T00:00:00Z"
    }))
}

fn store_for(server: &MockServer, auth: Authorization) -> FirestoreStore {
    FirestoreStore::new(
        Arc::new(reqwest::Client::new()),
        &server.uri(),
        "demo-import",
        "(default)",
        auth,
    )
    .expect("Mock server URI should parse")
}

async fn commit_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == COMMIT_PATH)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn test_thousand_records_issue_three_commits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(header("authorization", "Bearer owner"))
        .respond_with(commit_ok())
        .expect(3)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let events = write_json(&dir, "events.json", &events_json(1000));
    let config = Config {
        tasks: vec![ImportTask::new(&events, "events", true)],
        ..Default::default()
    };
    let store = store_for(&server, Authorization::Emulator);

    let report = run_imports(&store, &config).await.unwrap();
    assert_eq!(report.total_batches(), 3);

    let sizes: Vec<usize> = commit_bodies(&server)
        .await
        .iter()
        .map(|b| b["writes"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![499, 499, 2]);
}

#[tokio::test]
async fn test_commit_body_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(commit_ok())
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server, Authorization::AccessToken("static-token".into()));
    let mut batch = store.batch();
    batch.set(
        "users",
        "a@b.com".to_string(),
        record(json!({"email": "a@b.com", "age": 36, "tags": ["x"]})),
    );
    store.commit(batch).await.unwrap();

    let bodies = commit_bodies(&server).await;
    assert_eq!(
        bodies[0],
        json!({"writes": [{"update": {
            "name": "projects/demo-import/databases/(default)/documents/users/a@b.com",
            "fields": {
                "email": {"stringValue": "a@b.com"},
                "age": {"integerValue": "36"},
                "tags": {"arrayValue": {"values": [{"stringValue": "x"}]}}
            }
        }}]})
    );
    // No update mask: the write replaces the whole document
    assert!(bodies[0]["writes"][0].get("updateMask").is_none());
}

#[tokio::test]
async fn test_rejected_commit_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Missing or insufficient permissions.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let events = write_json(&dir, "events.json", &events_json(1000));
    let users = write_json(&dir, "users.json", r#"[{"email": "a@b.com"}]"#);
    let config = Config {
        tasks: vec![
            ImportTask::new(&events, "events", false),
            ImportTask::new(&users, "users", false),
        ],
        ..Default::default()
    };
    let store = store_for(&server, Authorization::Emulator);

    match run_imports(&store, &config).await {
        Err(ImportError::Store {
            source: StoreError::CommitRejected { status, message },
            ..
        }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Missing or insufficient permissions.");
        }
        other => panic!("expected a rejected commit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_service_account_token_is_exchanged_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(header("authorization", "Bearer ya29.test-token"))
        .respond_with(commit_ok())
        .expect(2)
        .mount(&server)
        .await;

    let fixture =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/service_account.json");
    let mut key = load_service_account(&fixture).await.unwrap();
    key.token_uri = format!("{}/token", server.uri());

    let client = Arc::new(reqwest::Client::new());
    let provider = TokenProvider::new(key, Arc::clone(&client));
    assert_eq!(provider.project_id(), "demo-import");

    let store = FirestoreStore::new(
        client,
        &server.uri(),
        "demo-import",
        "(default)",
        Authorization::ServiceAccount(provider),
    )
    .unwrap();

    for key in ["evt_001", "evt_002"] {
        let mut batch = store.batch();
        batch.set("events", key.to_string(), record(json!({"id": key})));
        store.commit(batch).await.unwrap();
    }
}

#[tokio::test]
async fn test_token_endpoint_rejection_fails_commit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let fixture =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/service_account.json");
    let mut key = load_service_account(&fixture).await.unwrap();
    key.token_uri = format!("{}/token", server.uri());

    let client = Arc::new(reqwest::Client::new());
    let store = store_for(
        &server,
        Authorization::ServiceAccount(TokenProvider::new(key, client)),
    );

    let mut batch = store.batch();
    batch.set("events", "evt_001".to_string(), record(json!({"id": "evt_001"})));
    let result = store.commit(batch).await;
    assert!(matches!(result, Err(StoreError::Auth(_))));
}
