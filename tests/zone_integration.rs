// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end zone reconciliation against a mock management API.

mod common;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{mount_metadata, mount_zone_get, mount_zone_listing, spawn, zone_json};
use pdnsctl::config::Compat;
use pdnsctl::model::{ZoneDoc, ZoneState};
use pdnsctl::reconcilers::reconcile_zone;

const NATIVE_DOC: &str = r"
properties:
  kind: Native
  nameservers:
    - ns1.example.
  soa:
    mname: localhost.
    rname: hostmaster.localhost.
metadata:
  allow_axfr_from: [AUTO-NS]
  ixfr: true
  axfr_source: 127.0.0.1
";

/// Creating a Native zone sends the SOA and NS record sets, applies the
/// endpoint metadata, and reports the readable-back values.
#[tokio::test]
async fn test_create_native_zone_with_metadata() {
    let (server, client) = spawn().await;
    mount_zone_listing(&server, "d2.example.", serde_json::json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/servers/localhost/zones"))
        .and(query_param("rrsets", "false"))
        .and(body_json(serde_json::json!({
            "name": "d2.example.",
            "kind": "Native",
            "nameservers": [],
            "rrsets": [
                {
                    "name": "d2.example.",
                    "type": "SOA",
                    "ttl": 86400,
                    "records": [{
                        "content": "localhost. hostmaster.localhost. 1 86400 7200 3600000 172800",
                        "disabled": false
                    }]
                },
                {
                    "name": "d2.example.",
                    "type": "NS",
                    "ttl": 86400,
                    "records": [{"content": "ns1.example.", "disabled": false}]
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(zone_json("d2.example.", "Native")))
        .expect(1)
        .mount(&server)
        .await;

    for (kind, values) in [
        ("ALLOW-AXFR-FROM", serde_json::json!(["AUTO-NS"])),
        ("AXFR-SOURCE", serde_json::json!(["127.0.0.1"])),
        ("IXFR", serde_json::json!(["1"])),
    ] {
        Mock::given(method("PUT"))
            .and(path(format!(
                "/api/v1/servers/localhost/zones/d2.example./metadata/{kind}"
            )))
            .and(body_json(
                serde_json::json!({"kind": kind, "metadata": values}),
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    mount_zone_get(&server, "d2.example.", zone_json("d2.example.", "Native")).await;
    mount_metadata(
        &server,
        "d2.example.",
        serde_json::json!([
            {"kind": "ALLOW-AXFR-FROM", "metadata": ["AUTO-NS"]},
            {"kind": "AXFR-SOURCE", "metadata": ["127.0.0.1"]},
            {"kind": "IXFR", "metadata": ["1"]}
        ]),
    )
    .await;

    let doc = ZoneDoc::from_yaml(NATIVE_DOC).expect("doc parses");
    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d2.example.",
        ZoneState::Present,
        &doc,
    )
    .await
    .expect("creation succeeds");

    assert!(report.changed);
    assert!(report.zone.exists);
    assert_eq!(report.zone.kind.as_deref(), Some("Native"));
    let meta = report.zone.metadata.expect("metadata in snapshot");
    assert_eq!(meta.get("allow_axfr_from"), Some(&serde_json::json!(["AUTO-NS"])));
    assert_eq!(meta.get("ixfr"), Some(&serde_json::json!(true)));
    assert_eq!(meta.get("axfr_source"), Some(&serde_json::json!("127.0.0.1")));
}

/// Re-submitting the same document against the converged zone is a no-op:
/// no PUT, PATCH or metadata write is mounted, so any mutation attempt would
/// fail the invocation.
#[tokio::test]
async fn test_identical_document_is_idempotent() {
    let (server, client) = spawn().await;
    mount_zone_listing(
        &server,
        "d2.example.",
        serde_json::json!([{"id": "d2.example.", "name": "d2.example.", "kind": "Native"}]),
    )
    .await;
    mount_zone_get(&server, "d2.example.", zone_json("d2.example.", "Native")).await;
    mount_metadata(
        &server,
        "d2.example.",
        serde_json::json!([
            {"kind": "ALLOW-AXFR-FROM", "metadata": ["AUTO-NS"]},
            {"kind": "AXFR-SOURCE", "metadata": ["127.0.0.1"]},
            {"kind": "IXFR", "metadata": ["1"]}
        ]),
    )
    .await;

    let doc = ZoneDoc::from_yaml(NATIVE_DOC).expect("doc parses");
    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d2.example.",
        ZoneState::Present,
        &doc,
    )
    .await
    .expect("converged zone is a no-op");

    assert!(!report.changed);
    let meta = report.zone.metadata.expect("metadata in snapshot");
    assert_eq!(meta.get("ixfr"), Some(&serde_json::json!(true)));
}

/// A zone created with an extra record set carries it at the default TTL
/// with exactly the given records.
#[tokio::test]
async fn test_create_zone_with_rrset_at_default_ttl() {
    let (server, client) = spawn().await;
    mount_zone_listing(&server, "d2.example.", serde_json::json!([])).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/servers/localhost/zones"))
        .and(body_json(serde_json::json!({
            "name": "d2.example.",
            "kind": "Native",
            "nameservers": [],
            "rrsets": [
                {
                    "name": "d2.example.",
                    "type": "SOA",
                    "ttl": 86400,
                    "records": [{
                        "content": "localhost. hostmaster.localhost. 1 86400 7200 3600000 172800",
                        "disabled": false
                    }]
                },
                {
                    "name": "d2.example.",
                    "type": "NS",
                    "ttl": 86400,
                    "records": [{"content": "ns1.example.", "disabled": false}]
                },
                {
                    "name": "t1.d2.example.",
                    "type": "A",
                    "ttl": 3600,
                    "records": [
                        {"content": "192.168.0.1", "disabled": false},
                        {"content": "192.168.1.2", "disabled": false}
                    ]
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(zone_json("d2.example.", "Native")))
        .expect(1)
        .mount(&server)
        .await;

    mount_zone_get(&server, "d2.example.", zone_json("d2.example.", "Native")).await;
    mount_metadata(&server, "d2.example.", serde_json::json!([])).await;

    let doc = ZoneDoc::from_yaml(
        r"
properties:
  kind: Native
  nameservers:
    - ns1.example.
  soa:
    mname: localhost.
    rname: hostmaster.localhost.
  rrsets:
    - name: t1.d2.example.
      type: A
      records:
        - content: 192.168.0.1
        - content: 192.168.1.2
",
    )
    .expect("doc parses");

    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d2.example.",
        ZoneState::Present,
        &doc,
    )
    .await
    .expect("creation succeeds");
    assert!(report.changed);
}

/// Changing a Slave zone's master list updates exactly that attribute,
/// preserving the caller's order on the wire.
#[tokio::test]
async fn test_slave_masters_change() {
    let (server, client) = spawn().await;
    mount_zone_listing(
        &server,
        "d3.example.",
        serde_json::json!([{"id": "d3.example.", "name": "d3.example.", "kind": "Slave"}]),
    )
    .await;

    let mut before = zone_json("d3.example.", "Slave");
    before["masters"] = serde_json::json!(["1.1.1.1", "::1"]);
    let mut after = zone_json("d3.example.", "Slave");
    after["masters"] = serde_json::json!(["2.2.2.2", "::1"]);

    // First read sees the old masters; the post-update snapshot sees the new.
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/zones/d3.example."))
        .respond_with(ResponseTemplate::new(200).set_body_json(before))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/zones/d3.example."))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .mount(&server)
        .await;
    mount_metadata(&server, "d3.example.", serde_json::json!([])).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/servers/localhost/zones/d3.example."))
        .and(body_json(serde_json::json!({"masters": ["2.2.2.2", "::1"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let doc = ZoneDoc::from_yaml("properties:\n  kind: Slave\n  masters: ['2.2.2.2', '::1']\n")
        .expect("doc parses");
    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d3.example.",
        ZoneState::Present,
        &doc,
    )
    .await
    .expect("update succeeds");

    assert!(report.changed);
    assert_eq!(
        report.zone.masters,
        Some(vec!["2.2.2.2".to_string(), "::1".to_string()])
    );
}

/// Reordering the master list is not a change.
#[tokio::test]
async fn test_slave_masters_reorder_is_noop() {
    let (server, client) = spawn().await;
    mount_zone_listing(
        &server,
        "d3.example.",
        serde_json::json!([{"id": "d3.example.", "name": "d3.example.", "kind": "Slave"}]),
    )
    .await;
    let mut zone = zone_json("d3.example.", "Slave");
    zone["masters"] = serde_json::json!(["1.1.1.1", "::1"]);
    mount_zone_get(&server, "d3.example.", zone).await;
    mount_metadata(&server, "d3.example.", serde_json::json!([])).await;

    let doc = ZoneDoc::from_yaml("properties:\n  kind: Slave\n  masters: ['::1', 1.1.1.1]\n")
        .expect("doc parses");
    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d3.example.",
        ZoneState::Present,
        &doc,
    )
    .await
    .expect("reorder is a no-op");
    assert!(!report.changed);
}

/// The existence probe performs reads only; any write would hit an unmounted
/// route and fail the invocation.
#[tokio::test]
async fn test_exists_probe_never_mutates() {
    let (server, client) = spawn().await;
    mount_zone_listing(
        &server,
        "d1.example.",
        serde_json::json!([{"id": "d1.example.", "name": "d1.example.", "kind": "Master"}]),
    )
    .await;
    mount_zone_get(&server, "d1.example.", zone_json("d1.example.", "Master")).await;
    mount_metadata(&server, "d1.example.", serde_json::json!([])).await;

    // Properties are supplied but must be ignored by the probe.
    let doc = ZoneDoc::from_yaml("properties:\n  kind: Native\n").expect("doc parses");
    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d1.example.",
        ZoneState::Exists,
        &doc,
    )
    .await
    .expect("probe succeeds");

    assert!(!report.changed);
    assert!(report.zone.exists);
    assert_eq!(report.zone.kind.as_deref(), Some("Master"));
}

/// Deleting an existing zone reports the change; the snapshot shows absence.
#[tokio::test]
async fn test_absent_deletes_existing_zone() {
    let (server, client) = spawn().await;
    mount_zone_listing(
        &server,
        "d2.example.",
        serde_json::json!([{"id": "d2.example.", "name": "d2.example.", "kind": "Native"}]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/servers/localhost/zones/d2.example."))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d2.example.",
        ZoneState::Absent,
        &ZoneDoc::default(),
    )
    .await
    .expect("deletion succeeds");
    assert!(report.changed);
    assert!(!report.zone.exists);
}

/// NOTIFY against a Master zone triggers the action and always reports a
/// change.
#[tokio::test]
async fn test_notify_master_zone() {
    let (server, client) = spawn().await;
    mount_zone_listing(
        &server,
        "d1.example.",
        serde_json::json!([{"id": "d1.example.", "name": "d1.example.", "kind": "Master"}]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/servers/localhost/zones/d1.example./notify"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_zone_get(&server, "d1.example.", zone_json("d1.example.", "Master")).await;
    mount_metadata(&server, "d1.example.", serde_json::json!([])).await;

    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d1.example.",
        ZoneState::Notify,
        &ZoneDoc::default(),
    )
    .await
    .expect("notify succeeds");
    assert!(report.changed);
}

/// A failed snapshot read after creation still reports the mutation.
#[tokio::test]
async fn test_partial_snapshot_after_create_failure() {
    let (server, client) = spawn().await;
    mount_zone_listing(&server, "d3.example.", serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/servers/localhost/zones"))
        .respond_with(ResponseTemplate::new(201).set_body_json(zone_json("d3.example.", "Slave")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/servers/localhost/zones/d3.example."))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "backend overloaded"
        })))
        .mount(&server)
        .await;

    let doc = ZoneDoc::from_yaml("properties:\n  kind: Slave\n  masters: [1.1.1.1]\n")
        .expect("doc parses");
    let report = reconcile_zone(
        &client,
        &Compat::default(),
        "d3.example.",
        ZoneState::Present,
        &doc,
    )
    .await
    .expect("creation itself succeeded");

    assert!(report.changed, "the mutation must not be hidden");
    assert!(report.zone.exists);
    assert_eq!(report.zone.kind, None, "snapshot is partial");
}
