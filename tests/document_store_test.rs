// ABOUTME: Integration tests for the Firestore REST store and in-memory merge semantics
// ABOUTME: Verifies commit requests against a mock Firestore server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellness Coach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::sample_day;
use serde_json::{json, Map, Value};
use url::Url;
use wellness_coach::errors::ErrorCode;
use wellness_coach::store::{DocumentPath, DocumentStore, FirestoreStore, InMemoryDocumentStore};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMIT_PATH: &str = "/projects/demo-project/databases/test-db/documents:commit";

fn store_for(server: &MockServer) -> FirestoreStore {
    FirestoreStore::new(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "demo-project",
        "test-db",
    )
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn test_merge_sends_masked_update_with_server_timestamp() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "writeResults": [{ "updateTime": "2025-06-02T10:00:00Z" }],
            "commitTime": "2025-06-02T10:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = store_for(&mock_server).with_token("test-token");
    let doc = DocumentPath::health_log("user_1", sample_day()).unwrap();
    store
        .merge(
            &doc,
            fields(json!({
                "exercise_data": [{
                    "exercise_type": "STEPS_DAILY",
                    "stats": { "total_steps": 7600, "goal": 8000, "hourly_steps": { "7": 2000 } }
                }]
            })),
            Some("timestamp"),
        )
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    let write = &body["writes"][0];

    assert_eq!(
        write["update"]["name"],
        "projects/demo-project/databases/test-db/documents/users/user_1/health_logs/2025-06-02"
    );
    assert_eq!(write["updateMask"]["fieldPaths"], json!(["exercise_data"]));
    assert_eq!(write["updateTransforms"][0]["fieldPath"], "timestamp");
    assert_eq!(write["updateTransforms"][0]["setToServerValue"], "REQUEST_TIME");

    let entry = &write["update"]["fields"]["exercise_data"]["arrayValue"]["values"][0]["mapValue"]["fields"];
    assert_eq!(entry["exercise_type"], json!({ "stringValue": "STEPS_DAILY" }));
    assert_eq!(
        entry["stats"]["mapValue"]["fields"]["total_steps"],
        json!({ "integerValue": "7600" })
    );
    assert_eq!(
        entry["stats"]["mapValue"]["fields"]["hourly_steps"]["mapValue"]["fields"]["7"],
        json!({ "integerValue": "2000" })
    );
    assert!(write.get("currentDocument").is_none());
}

#[tokio::test]
async fn test_merge_without_token_sends_no_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let doc = DocumentPath::health_log("user_1", sample_day()).unwrap();
    store_for(&mock_server)
        .merge(&doc, fields(json!({ "exercise_data": [] })), None)
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(body["writes"][0].get("updateTransforms").is_none());
}

#[tokio::test]
async fn test_rejected_commit_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED" }
        })))
        .mount(&mock_server)
        .await;

    let doc = DocumentPath::health_log("user_1", sample_day()).unwrap();
    let error = store_for(&mock_server)
        .merge(&doc, fields(json!({ "exercise_data": [] })), Some("timestamp"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("403"));
    assert!(error.message.contains("insufficient permissions"));
}

#[tokio::test]
async fn test_in_memory_merge_creates_then_merges() {
    let store = InMemoryDocumentStore::new();
    let doc = DocumentPath::health_log("user_1", sample_day()).unwrap();
    assert!(store.get(&doc).is_none());

    store
        .merge(&doc, fields(json!({ "user_profile": { "user_id": "user_1" } })), None)
        .await
        .unwrap();
    store
        .merge(
            &doc,
            fields(json!({ "exercise_data": [], "sleep_data": { "duration_minutes": 420, "stages": [] } })),
            Some("timestamp"),
        )
        .await
        .unwrap();

    let stored = store.get(&doc).unwrap();
    assert_eq!(stored["user_profile"]["user_id"], "user_1");
    assert_eq!(stored["sleep_data"]["duration_minutes"], 420);
    assert!(stored.contains_key("timestamp"));
}
