// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for TSIG key reconciliation against a mock server.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::reconcile_tsigkey;
use crate::api::PdnsClient;
use crate::config::Connection;
use crate::model::{ObjectState, TsigAlgorithm, TsigKeySpec};

const KEY_MATERIAL: &str = "+8fQxgYhf5PVGPKclKnk8ReujIfWXOw/aEzzPPhDi6A=";

async fn client_for(server: &MockServer) -> PdnsClient {
    let conn = Connection::new(&server.uri(), "apikey".to_string(), "localhost".to_string(), 5)
        .expect("valid connection");
    PdnsClient::new(conn).expect("client builds")
}

async fn mount_key_listing(server: &MockServer, keys: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/tsigkeys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keys))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_invalid_base64_fails_before_any_api_call() {
    // Unreachable endpoint: if validation let the call through, the test
    // would see a transport error instead.
    let conn = Connection::new("http://127.0.0.1:1", "apikey".to_string(), "localhost".to_string(), 1)
        .expect("valid connection");
    let client = PdnsClient::new(conn).expect("client builds");

    let spec = TsigKeySpec {
        algorithm: Some(TsigAlgorithm::HmacSha256),
        key: Some("not base64 !!".to_string()),
    };
    let err = reconcile_tsigkey(&client, "k3", ObjectState::Present, &spec)
        .await
        .expect_err("malformed material is rejected locally");
    assert_eq!(err.class(), "ValidationError");
    assert!(err.to_string().contains("base64"));
}

#[tokio::test]
async fn test_exists_on_missing_key_is_negative_not_error() {
    let server = MockServer::start().await;
    mount_key_listing(&server, serde_json::json!([])).await;

    let client = client_for(&server).await;
    let report = reconcile_tsigkey(&client, "k1", ObjectState::Exists, &TsigKeySpec::default())
        .await
        .expect("probe succeeds");
    assert!(!report.changed);
    assert!(!report.key.exists);
    assert_eq!(report.key.name, "k1.");
}

#[tokio::test]
async fn test_absent_on_missing_key_is_noop() {
    let server = MockServer::start().await;
    mount_key_listing(&server, serde_json::json!([])).await;

    let client = client_for(&server).await;
    let report = reconcile_tsigkey(&client, "k1", ObjectState::Absent, &TsigKeySpec::default())
        .await
        .expect("absent on absent succeeds");
    assert!(!report.changed);
}

#[tokio::test]
async fn test_create_defaults_to_hmac_md5() {
    let server = MockServer::start().await;
    mount_key_listing(&server, serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/servers/localhost/tsigkeys"))
        .and(body_json(serde_json::json!({
            "name": "k2.",
            "algorithm": "hmac-md5"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "k2.",
            "name": "k2.",
            "algorithm": "hmac-md5",
            "key": "Z2VuZXJhdGVk",
            "type": "TSIGKey"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let report = reconcile_tsigkey(&client, "k2", ObjectState::Present, &TsigKeySpec::default())
        .await
        .expect("creation succeeds");
    assert!(report.changed);
    assert_eq!(report.key.algorithm.as_deref(), Some("hmac-md5"));
    assert_eq!(report.key.key.as_deref(), Some("Z2VuZXJhdGVk"));
}

#[tokio::test]
async fn test_present_on_identical_key_is_noop() {
    let server = MockServer::start().await;
    mount_key_listing(
        &server,
        serde_json::json!([{"id": "k3.", "name": "k3.", "algorithm": "hmac-sha256", "key": ""}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/tsigkeys/k3."))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "k3.",
            "name": "k3.",
            "algorithm": "hmac-sha256",
            "key": KEY_MATERIAL
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let spec = TsigKeySpec {
        algorithm: Some(TsigAlgorithm::HmacSha256),
        key: Some(KEY_MATERIAL.to_string()),
    };
    // No PUT is mounted: an update attempt would fail the call.
    let report = reconcile_tsigkey(&client, "k3", ObjectState::Present, &spec)
        .await
        .expect("converged key is a no-op");
    assert!(!report.changed);
    assert_eq!(report.key.key.as_deref(), Some(KEY_MATERIAL));
}

#[tokio::test]
async fn test_present_updates_only_differing_attributes() {
    let server = MockServer::start().await;
    mount_key_listing(
        &server,
        serde_json::json!([{"id": "k3.", "name": "k3.", "algorithm": "hmac-md5", "key": ""}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/tsigkeys/k3."))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "k3.",
            "name": "k3.",
            "algorithm": "hmac-md5",
            "key": KEY_MATERIAL
        })))
        .mount(&server)
        .await;
    // The payload carries the algorithm only; the unchanged material is not
    // re-sent.
    Mock::given(method("PUT"))
        .and(path("/api/v1/servers/localhost/tsigkeys/k3."))
        .and(body_json(serde_json::json!({"algorithm": "hmac-sha256"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "k3.",
            "name": "k3.",
            "algorithm": "hmac-sha256",
            "key": KEY_MATERIAL
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let spec = TsigKeySpec {
        algorithm: Some(TsigAlgorithm::HmacSha256),
        key: Some(KEY_MATERIAL.to_string()),
    };
    let report = reconcile_tsigkey(&client, "k3", ObjectState::Present, &spec)
        .await
        .expect("update succeeds");
    assert!(report.changed);
    assert_eq!(report.key.algorithm.as_deref(), Some("hmac-sha256"));
}

#[tokio::test]
async fn test_key_name_matching_is_case_and_dot_insensitive() {
    let server = MockServer::start().await;
    mount_key_listing(
        &server,
        serde_json::json!([{"id": "K1.", "name": "K1.", "algorithm": "hmac-md5", "key": ""}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/tsigkeys/K1."))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "K1.",
            "name": "K1.",
            "algorithm": "hmac-md5",
            "key": KEY_MATERIAL
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let report = reconcile_tsigkey(&client, "k1", ObjectState::Exists, &TsigKeySpec::default())
        .await
        .expect("probe succeeds");
    assert!(report.key.exists);
}
