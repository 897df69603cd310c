// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Result records returned to the caller.
//!
//! Every invocation ends in exactly one of these shapes, serialized to JSON
//! on stdout: a kind-specific report with a `changed` flag and a resource
//! snapshot, or a structured failure record. Failures always carry
//! `changed: false` at the record level; a mutation that succeeded before a
//! later step failed is reported as success with a best-effort snapshot, not
//! as a failure.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::api::types::{CryptokeyInfo, RrsetWire};
use crate::errors::ReconcileError;

/// Result of a zone invocation.
#[derive(Debug, Serialize)]
pub struct ZoneReport {
    pub changed: bool,
    pub zone: ZoneSnapshot,
}

/// Snapshot of a zone as reported back to the caller.
#[derive(Debug, Default, Serialize)]
pub struct ZoneSnapshot {
    /// Zone name as the caller supplied it, in absolute form.
    pub name: String,
    /// Whether the zone exists on the server.
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<String>>,
    /// Normalized metadata mapping (both storage routes combined).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
}

impl ZoneSnapshot {
    /// Snapshot of a zone that does not exist.
    #[must_use]
    pub fn absent(name: &str) -> Self {
        Self {
            name: name.to_string(),
            exists: false,
            ..Self::default()
        }
    }
}

/// Result of a TSIG key invocation.
#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub changed: bool,
    pub key: KeySnapshot,
}

/// Snapshot of a TSIG key as reported back to the caller.
#[derive(Debug, Default, Serialize)]
pub struct KeySnapshot {
    /// Key name as the caller supplied it.
    pub name: String,
    /// Whether the key exists on the server.
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Base64-encoded key material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl KeySnapshot {
    /// Snapshot of a key that does not exist.
    #[must_use]
    pub fn absent(name: &str) -> Self {
        Self {
            name: name.to_string(),
            exists: false,
            ..Self::default()
        }
    }
}

/// Result of an rrset invocation.
#[derive(Debug, Serialize)]
pub struct RrsetReport {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether any record set matched; present for existence probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// Matching record sets, or the zone's record sets after changes.
    pub rrsets: Vec<RrsetWire>,
}

/// Result of a cryptokey invocation.
#[derive(Debug, Serialize)]
pub struct CryptokeyReport {
    pub changed: bool,
    /// Whether the targeted key (or any key) exists; present for probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// The zone's cryptokeys after all changes.
    pub cryptokeys: Vec<CryptokeyInfo>,
}

/// Structured failure record produced at the invocation boundary.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub changed: bool,
    pub msg: String,
    pub error: FailureDetail,
}

/// Machine-readable failure classification.
#[derive(Debug, Serialize)]
pub struct FailureDetail {
    /// Error class name ("ValidationError", "NotFoundError", ...).
    pub kind: &'static str,
    /// HTTP status for server failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&ReconcileError> for FailureReport {
    fn from(err: &ReconcileError) -> Self {
        Self {
            changed: false,
            msg: err.to_string(),
            error: FailureDetail {
                kind: err.class(),
                status: err.status(),
            },
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
