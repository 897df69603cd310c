// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Request and response bodies of the PowerDNS Authoritative management API.
//!
//! These are statically defined for the supported server versions instead of
//! being generated from the server's API description at runtime. Fields the
//! server manages on its own (serials, URLs, DNSSEC status) appear only on
//! the response side; outbound payloads carry `Option` fields so that an
//! attribute the caller never specified is omitted from the JSON entirely
//! rather than sent as an explicit default.

use serde::{Deserialize, Serialize};

/// Partial zone object returned by the zone listing endpoint.
///
/// The listing is used to translate a user-facing zone name into the zone id
/// required by every other zone operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSummary {
    /// Opaque zone identifier used in API paths.
    pub id: String,
    /// Absolute zone name.
    pub name: String,
    /// Zone kind as reported by the server.
    #[serde(default)]
    pub kind: String,
}

/// Full zone object as returned by a targeted zone read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneInfo {
    /// Opaque zone identifier used in API paths.
    pub id: String,
    /// Absolute zone name.
    pub name: String,
    /// Zone kind (Native, Master, Slave, Producer, Consumer).
    pub kind: String,
    /// Serial from the zone's SOA record.
    #[serde(default)]
    pub serial: u32,
    /// Account label used for local policy.
    #[serde(default)]
    pub account: String,
    /// Whether the zone is DNSSEC-signed.
    #[serde(default)]
    pub dnssec: bool,
    /// Master addresses (Slave and Consumer zones).
    #[serde(default)]
    pub masters: Vec<String>,
    /// Catalog zone containing this zone; absent on servers without
    /// catalog support, empty string when not a member.
    #[serde(default)]
    pub catalog: Option<String>,
    /// Rectify record sets after API changes.
    #[serde(default)]
    pub api_rectify: bool,
    /// NSEC3 parameters, empty when unset.
    #[serde(default)]
    pub nsec3param: String,
    /// NSEC3 narrow mode.
    #[serde(default)]
    pub nsec3narrow: bool,
    /// Zone carries pre-signed RRSIGs (server-managed, read-only).
    #[serde(default)]
    pub presigned: bool,
    /// SOA-EDIT method, empty when unset.
    #[serde(default)]
    pub soa_edit: String,
    /// SOA-EDIT-API method, empty when unset.
    #[serde(default)]
    pub soa_edit_api: String,
    /// TSIG keys used for master operation.
    #[serde(default)]
    pub master_tsig_key_ids: Vec<String>,
    /// TSIG keys used for slave operation.
    #[serde(default)]
    pub slave_tsig_key_ids: Vec<String>,
    /// Record sets, present only when requested with `rrsets=true`.
    #[serde(default)]
    pub rrsets: Vec<RrsetWire>,
}

/// One record set on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RrsetWire {
    /// Absolute record name.
    pub name: String,
    /// Record type ("A", "MX", ...).
    #[serde(rename = "type")]
    pub rtype: String,
    /// TTL in seconds.
    #[serde(default)]
    pub ttl: u32,
    /// Mutation verb for PATCH bodies ("REPLACE" or "DELETE"); never present
    /// on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changetype: Option<String>,
    /// The records of the set.
    #[serde(default)]
    pub records: Vec<RecordWire>,
}

/// One resource record on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordWire {
    /// Type-specific content string.
    pub content: String,
    /// Whether the record is disabled.
    #[serde(default)]
    pub disabled: bool,
}

/// Outbound zone body for create and update calls.
///
/// Every field is optional: an update sends only the attributes whose
/// canonical value differs, and a create omits whatever the caller never
/// specified.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZonePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_rectify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsec3param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsec3narrow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soa_edit_api: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_tsig_key_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slave_tsig_key_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrsets: Option<Vec<RrsetWire>>,
}

impl ZonePayload {
    /// Whether the payload carries any attribute at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().is_none_or(|fields| fields.is_empty()))
            .unwrap_or(true)
    }
}

/// PATCH body for record set mutations within a zone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RrsetChanges {
    pub rrsets: Vec<RrsetWire>,
}

/// TSIG key object as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct TsigKeyInfo {
    /// Opaque key identifier used in API paths.
    pub id: String,
    /// Key name (trailing-dot convention).
    pub name: String,
    /// HMAC algorithm name.
    #[serde(default)]
    pub algorithm: String,
    /// Base64-encoded secret.
    #[serde(default)]
    pub key: String,
}

/// Outbound TSIG key body for create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TsigKeyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl TsigKeyPayload {
    /// Whether the payload carries any attribute at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.algorithm.is_none() && self.key.is_none()
    }
}

/// Cryptokey object as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptokeyInfo {
    /// Numeric key id assigned by the server at creation.
    pub id: u32,
    /// Key role: "ksk", "zsk" or "csk".
    #[serde(default)]
    pub keytype: String,
    /// Whether the key is used for signing.
    #[serde(default)]
    pub active: bool,
    /// Whether the DNSKEY record is published in the zone.
    #[serde(default)]
    pub published: bool,
    /// DNSKEY record content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnskey: Option<String>,
    /// DS records for the parent zone (KSK and CSK only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ds: Option<Vec<String>>,
    /// DNSSEC algorithm name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Key size in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    /// DNSKEY flags field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

/// Outbound cryptokey body for create and update calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CryptokeyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keytype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnskey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privatekey: Option<String>,
}

/// One zone metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    /// Metadata kind, e.g. "ALLOW-AXFR-FROM".
    pub kind: String,
    /// Values; single-valued kinds use a one-element list.
    #[serde(default)]
    pub metadata: Vec<String>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
