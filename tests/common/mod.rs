// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared fixtures for the integration tests.
//!
//! Each test runs one or more reconciliation invocations against a wiremock
//! server that plays the part of a PowerDNS Authoritative management API.
//! Idempotence is exercised with two servers: one presenting the state
//! before the change, one presenting the converged state.

// Not every test binary uses every helper.
#![allow(dead_code)]

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pdnsctl::api::PdnsClient;
use pdnsctl::config::Connection;

/// Start a mock management API and a client pointed at it.
pub async fn spawn() -> (MockServer, PdnsClient) {
    let server = MockServer::start().await;
    let conn = Connection::new(&server.uri(), "apikey".to_string(), "localhost".to_string(), 5)
        .expect("valid connection");
    let client = PdnsClient::new(conn).expect("client builds");
    (server, client)
}

/// Mount a zone listing answering the exact-name filter.
pub async fn mount_zone_listing(server: &MockServer, name: &str, entries: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/zones"))
        .and(query_param("zone", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(entries))
        .mount(server)
        .await;
}

/// Mount the targeted zone read.
pub async fn mount_zone_get(server: &MockServer, zone_id: &str, zone: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/servers/localhost/zones/{zone_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone))
        .mount(server)
        .await;
}

/// Mount the zone metadata listing.
pub async fn mount_metadata(server: &MockServer, zone_id: &str, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/servers/localhost/zones/{zone_id}/metadata"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Minimal zone object as the server would return it.
#[must_use]
pub fn zone_json(name: &str, kind: &str) -> serde_json::Value {
    serde_json::json!({
        "id": name,
        "name": name,
        "kind": kind,
        "serial": 1,
        "account": "",
        "dnssec": false,
        "masters": [],
        "catalog": "",
        "api_rectify": false,
        "nsec3param": "",
        "nsec3narrow": false,
        "presigned": false,
        "soa_edit": "",
        "soa_edit_api": "",
        "master_tsig_key_ids": [],
        "slave_tsig_key_ids": [],
        "url": format!("/api/v1/servers/localhost/zones/{name}")
    })
}
