// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for wire type serialization.

use super::{
    CryptokeyInfo, MetadataItem, RecordWire, RrsetWire, TsigKeyPayload, ZoneInfo, ZonePayload,
};

#[test]
fn test_zone_info_deserializes_server_response() {
    let json = r#"{
        "account": "ops",
        "api_rectify": false,
        "catalog": "",
        "dnssec": false,
        "id": "d2.example.",
        "kind": "Native",
        "last_check": 0,
        "masters": [],
        "name": "d2.example.",
        "notified_serial": 0,
        "nsec3narrow": false,
        "nsec3param": "",
        "presigned": false,
        "serial": 1,
        "soa_edit": "",
        "soa_edit_api": "DEFAULT",
        "master_tsig_key_ids": [],
        "slave_tsig_key_ids": [],
        "url": "/api/v1/servers/localhost/zones/d2.example."
    }"#;

    let zone: ZoneInfo = serde_json::from_str(json).expect("zone parses");
    assert_eq!(zone.id, "d2.example.");
    assert_eq!(zone.kind, "Native");
    assert_eq!(zone.serial, 1);
    assert_eq!(zone.account, "ops");
    assert_eq!(zone.catalog.as_deref(), Some(""));
    assert!(zone.rrsets.is_empty());
}

#[test]
fn test_zone_info_tolerates_missing_catalog() {
    // pre-4.7 servers do not return the field at all
    let json = r#"{"id": "d1.example.", "name": "d1.example.", "kind": "Master"}"#;
    let zone: ZoneInfo = serde_json::from_str(json).expect("zone parses");
    assert_eq!(zone.catalog, None);
    assert!(!zone.dnssec);
}

#[test]
fn test_zone_payload_omits_unspecified_attributes() {
    let payload = ZonePayload {
        kind: Some("Master".to_string()),
        ..ZonePayload::default()
    };
    let json = serde_json::to_value(&payload).expect("payload serializes");
    assert_eq!(json, serde_json::json!({"kind": "Master"}));
}

#[test]
fn test_zone_payload_is_empty() {
    assert!(ZonePayload::default().is_empty());
    let payload = ZonePayload {
        account: Some("ops".to_string()),
        ..ZonePayload::default()
    };
    assert!(!payload.is_empty());
}

#[test]
fn test_rrset_wire_round_trip_with_changetype() {
    let rrset = RrsetWire {
        name: "t1.d2.example.".to_string(),
        rtype: "A".to_string(),
        ttl: 3600,
        changetype: Some("REPLACE".to_string()),
        records: vec![RecordWire {
            content: "192.168.0.1".to_string(),
            disabled: false,
        }],
    };
    let json = serde_json::to_value(&rrset).expect("rrset serializes");
    assert_eq!(json["type"], "A");
    assert_eq!(json["changetype"], "REPLACE");
}

#[test]
fn test_rrset_wire_read_has_no_changetype() {
    let json = r#"{"name": "d2.example.", "type": "SOA", "ttl": 3600,
                   "records": [{"content": "a. b. 1 2 3 4 5", "disabled": false}]}"#;
    let rrset: RrsetWire = serde_json::from_str(json).expect("rrset parses");
    assert_eq!(rrset.changetype, None);
    assert_eq!(rrset.records.len(), 1);
}

#[test]
fn test_record_wire_disabled_defaults_false() {
    let record: RecordWire =
        serde_json::from_str(r#"{"content": "192.168.0.1"}"#).expect("record parses");
    assert!(!record.disabled);
}

#[test]
fn test_tsigkey_payload_is_empty() {
    assert!(TsigKeyPayload::default().is_empty());
    let payload = TsigKeyPayload {
        algorithm: Some("hmac-sha256".to_string()),
        ..TsigKeyPayload::default()
    };
    assert!(!payload.is_empty());
}

#[test]
fn test_cryptokey_info_deserializes() {
    let json = r#"{
        "active": true,
        "algorithm": "ED25519",
        "bits": 256,
        "dnskey": "257 3 15 lMu/7quhLeSueMcdlt3T0sxln32yhrhASCKKDB1xJOk=",
        "ds": ["1234 15 2 deadbeef"],
        "flags": 257,
        "id": 1,
        "keytype": "csk",
        "published": true,
        "type": "Cryptokey"
    }"#;
    let key: CryptokeyInfo = serde_json::from_str(json).expect("cryptokey parses");
    assert_eq!(key.id, 1);
    assert_eq!(key.keytype, "csk");
    assert!(key.active);
    assert_eq!(key.bits, Some(256));
}

#[test]
fn test_metadata_item_round_trip() {
    let item = MetadataItem {
        kind: "ALLOW-AXFR-FROM".to_string(),
        metadata: vec!["AUTO-NS".to_string()],
    };
    let json = serde_json::to_string(&item).expect("item serializes");
    let back: MetadataItem = serde_json::from_str(&json).expect("item parses");
    assert_eq!(back, item);
}
