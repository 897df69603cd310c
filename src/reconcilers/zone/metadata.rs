// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone metadata registry and convergence.
//!
//! Every metadata key the server recognizes is enumerated here with its value
//! class, its write route and its mutability. The server stores metadata in
//! two places: most keys live behind the per-zone metadata endpoint, but a
//! handful are fields of the zone object itself and travel in zone
//! create/update bodies. The registry hides that split from the zone
//! reconciler.
//!
//! Convergence follows the full-replace contract: when a caller supplies a
//! metadata mapping, every writable key is driven to the supplied value or,
//! when unspecified, back to its default. Keys the server manages on its own
//! (`PRESIGNED`, `LUA-AXFR-SCRIPT`) are reported in snapshots but never
//! written.

use std::collections::BTreeMap;

use crate::api::types::{MetadataItem, ZoneInfo, ZonePayload};
use crate::api::PdnsClient;
use crate::config::Compat;
use crate::errors::ReconcileError;
use crate::model::ZoneMetadataSpec;
use crate::normalize::same_set;

/// Value class of a metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaClass {
    /// Boolean stored as "1"; unset and falsy encodings mean false.
    Flag,
    /// Boolean signalled by the key's existence; the stored value is empty.
    Presence,
    /// Three-valued boolean: unset defers to the server-wide setting.
    Ternary,
    /// List of strings, compared as a set.
    List,
    /// Single string; empty means unset.
    Text,
}

/// Where a metadata key is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaRoute {
    /// Per-zone metadata endpoint (modify/delete by kind).
    Endpoint,
    /// Field of the zone object, carried in create/update bodies.
    ZoneObject,
}

/// Canonical metadata value used for comparison and snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Flag(bool),
    Ternary(Option<bool>),
    List(Vec<String>),
    Text(String),
}

impl MetaValue {
    /// Whether this value is the canonical "not set" for its class.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Flag(v) => !v,
            Self::Ternary(v) => v.is_none(),
            Self::List(v) => v.is_empty(),
            Self::Text(v) => v.is_empty(),
        }
    }

    /// Semantic equality: lists compare as sets, everything else exactly.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => same_set(a, b),
            _ => self == other,
        }
    }

    /// Encoding for the metadata endpoint.
    #[must_use]
    fn endpoint_values(&self) -> Vec<String> {
        match self {
            Self::Flag(_) => vec!["1".to_string()],
            Self::Ternary(v) => match v {
                Some(true) => vec!["1".to_string()],
                _ => vec!["0".to_string()],
            },
            Self::List(v) => v.clone(),
            Self::Text(v) => vec![v.clone()],
        }
    }

    /// JSON value for result snapshots; an unset ternary has none.
    #[must_use]
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Flag(v) => Some(serde_json::Value::Bool(*v)),
            Self::Ternary(v) => v.map(serde_json::Value::Bool),
            Self::List(v) => Some(serde_json::json!(v)),
            Self::Text(v) => Some(serde_json::Value::String(v.clone())),
        }
    }
}

/// Every metadata key recognized for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MetaKey {
    AllowAxfrFrom,
    AllowDnsupdateFrom,
    AlsoNotify,
    ApiRectify,
    AxfrMasterTsig,
    AxfrSource,
    ForwardDnsupdate,
    GssAcceptorPrincipal,
    GssAllowAxfrPrincipal,
    Ixfr,
    LuaAxfrScript,
    NotifyDnsupdate,
    Nsec3Narrow,
    Nsec3Param,
    Presigned,
    PublishCdnskey,
    PublishCds,
    SlaveRenotify,
    SoaEdit,
    SoaEditApi,
    SoaEditDnsupdate,
    TsigAllowAxfr,
    TsigAllowDnsupdate,
}

impl MetaKey {
    /// All recognized keys.
    pub const ALL: [MetaKey; 23] = [
        Self::AllowAxfrFrom,
        Self::AllowDnsupdateFrom,
        Self::AlsoNotify,
        Self::ApiRectify,
        Self::AxfrMasterTsig,
        Self::AxfrSource,
        Self::ForwardDnsupdate,
        Self::GssAcceptorPrincipal,
        Self::GssAllowAxfrPrincipal,
        Self::Ixfr,
        Self::LuaAxfrScript,
        Self::NotifyDnsupdate,
        Self::Nsec3Narrow,
        Self::Nsec3Param,
        Self::Presigned,
        Self::PublishCdnskey,
        Self::PublishCds,
        Self::SlaveRenotify,
        Self::SoaEdit,
        Self::SoaEditApi,
        Self::SoaEditDnsupdate,
        Self::TsigAllowAxfr,
        Self::TsigAllowDnsupdate,
    ];

    /// Metadata kind as the API spells it.
    #[must_use]
    pub fn api_kind(self) -> &'static str {
        match self {
            Self::AllowAxfrFrom => "ALLOW-AXFR-FROM",
            Self::AllowDnsupdateFrom => "ALLOW-DNSUPDATE-FROM",
            Self::AlsoNotify => "ALSO-NOTIFY",
            Self::ApiRectify => "API-RECTIFY",
            Self::AxfrMasterTsig => "AXFR-MASTER-TSIG",
            Self::AxfrSource => "AXFR-SOURCE",
            Self::ForwardDnsupdate => "FORWARD-DNSUPDATE",
            Self::GssAcceptorPrincipal => "GSS-ACCEPTOR-PRINCIPAL",
            Self::GssAllowAxfrPrincipal => "GSS-ALLOW-AXFR-PRINCIPAL",
            Self::Ixfr => "IXFR",
            Self::LuaAxfrScript => "LUA-AXFR-SCRIPT",
            Self::NotifyDnsupdate => "NOTIFY-DNSUPDATE",
            Self::Nsec3Narrow => "NSEC3NARROW",
            Self::Nsec3Param => "NSEC3PARAM",
            Self::Presigned => "PRESIGNED",
            Self::PublishCdnskey => "PUBLISH-CDNSKEY",
            Self::PublishCds => "PUBLISH-CDS",
            Self::SlaveRenotify => "SLAVE-RENOTIFY",
            Self::SoaEdit => "SOA-EDIT",
            Self::SoaEditApi => "SOA-EDIT-API",
            Self::SoaEditDnsupdate => "SOA-EDIT-DNSUPDATE",
            Self::TsigAllowAxfr => "TSIG-ALLOW-AXFR",
            Self::TsigAllowDnsupdate => "TSIG-ALLOW-DNSUPDATE",
        }
    }

    /// Key name as it appears in desired-state documents and snapshots.
    #[must_use]
    pub fn user_name(self) -> &'static str {
        match self {
            Self::AllowAxfrFrom => "allow_axfr_from",
            Self::AllowDnsupdateFrom => "allow_dnsupdate_from",
            Self::AlsoNotify => "also_notify",
            Self::ApiRectify => "api_rectify",
            Self::AxfrMasterTsig => "axfr_master_tsig",
            Self::AxfrSource => "axfr_source",
            Self::ForwardDnsupdate => "forward_dnsupdate",
            Self::GssAcceptorPrincipal => "gss_acceptor_principal",
            Self::GssAllowAxfrPrincipal => "gss_allow_axfr_principal",
            Self::Ixfr => "ixfr",
            Self::LuaAxfrScript => "lua_axfr_script",
            Self::NotifyDnsupdate => "notify_dnsupdate",
            Self::Nsec3Narrow => "nsec3narrow",
            Self::Nsec3Param => "nsec3param",
            Self::Presigned => "presigned",
            Self::PublishCdnskey => "publish_cdnskey",
            Self::PublishCds => "publish_cds",
            Self::SlaveRenotify => "slave_renotify",
            Self::SoaEdit => "soa_edit",
            Self::SoaEditApi => "soa_edit_api",
            Self::SoaEditDnsupdate => "soa_edit_dnsupdate",
            Self::TsigAllowAxfr => "tsig_allow_axfr",
            Self::TsigAllowDnsupdate => "tsig_allow_dnsupdate",
        }
    }

    /// Value class.
    #[must_use]
    pub fn class(self) -> MetaClass {
        match self {
            Self::AllowAxfrFrom
            | Self::AllowDnsupdateFrom
            | Self::AlsoNotify
            | Self::AxfrMasterTsig
            | Self::PublishCds
            | Self::TsigAllowAxfr
            | Self::TsigAllowDnsupdate => MetaClass::List,
            Self::ApiRectify
            | Self::Ixfr
            | Self::NotifyDnsupdate
            | Self::Nsec3Narrow
            | Self::Presigned
            | Self::PublishCdnskey => MetaClass::Flag,
            Self::ForwardDnsupdate => MetaClass::Presence,
            Self::SlaveRenotify => MetaClass::Ternary,
            Self::AxfrSource
            | Self::GssAcceptorPrincipal
            | Self::GssAllowAxfrPrincipal
            | Self::LuaAxfrScript
            | Self::Nsec3Param
            | Self::SoaEdit
            | Self::SoaEditApi
            | Self::SoaEditDnsupdate => MetaClass::Text,
        }
    }

    /// Write route.
    #[must_use]
    pub fn route(self) -> MetaRoute {
        match self {
            Self::ApiRectify
            | Self::AxfrMasterTsig
            | Self::Nsec3Narrow
            | Self::Nsec3Param
            | Self::Presigned
            | Self::SoaEdit
            | Self::SoaEditApi
            | Self::TsigAllowAxfr => MetaRoute::ZoneObject,
            _ => MetaRoute::Endpoint,
        }
    }

    /// Whether the key may be written at all.
    #[must_use]
    pub fn writable(self) -> bool {
        !matches!(self, Self::LuaAxfrScript | Self::Presigned)
    }

    /// Desired canonical value, with defaults filled for unspecified keys.
    #[must_use]
    pub fn desired(self, spec: &ZoneMetadataSpec) -> MetaValue {
        fn list(v: &Option<Vec<String>>) -> MetaValue {
            MetaValue::List(v.clone().unwrap_or_default())
        }
        fn flag(v: Option<bool>) -> MetaValue {
            MetaValue::Flag(v.unwrap_or(false))
        }
        fn text(v: &Option<String>) -> MetaValue {
            MetaValue::Text(v.clone().unwrap_or_default())
        }

        match self {
            Self::AllowAxfrFrom => list(&spec.allow_axfr_from),
            Self::AllowDnsupdateFrom => list(&spec.allow_dnsupdate_from),
            Self::AlsoNotify => list(&spec.also_notify),
            Self::ApiRectify => flag(spec.api_rectify),
            Self::AxfrMasterTsig => list(&spec.axfr_master_tsig),
            Self::AxfrSource => text(&spec.axfr_source),
            Self::ForwardDnsupdate => flag(spec.forward_dnsupdate),
            Self::GssAcceptorPrincipal => text(&spec.gss_acceptor_principal),
            Self::GssAllowAxfrPrincipal => text(&spec.gss_allow_axfr_principal),
            Self::Ixfr => flag(spec.ixfr),
            Self::LuaAxfrScript => MetaValue::Text(String::new()),
            Self::NotifyDnsupdate => flag(spec.notify_dnsupdate),
            Self::Nsec3Narrow => flag(spec.nsec3narrow),
            Self::Nsec3Param => text(&spec.nsec3param),
            Self::Presigned => MetaValue::Flag(false),
            Self::PublishCdnskey => flag(spec.publish_cdnskey),
            Self::PublishCds => list(&spec.publish_cds),
            Self::SlaveRenotify => MetaValue::Ternary(spec.slave_renotify),
            Self::SoaEdit => MetaValue::Text(
                spec.soa_edit.map(|v| v.as_str().to_string()).unwrap_or_default(),
            ),
            Self::SoaEditApi => MetaValue::Text(
                spec.soa_edit_api
                    .map(|v| v.as_str().to_string())
                    .unwrap_or_default(),
            ),
            Self::SoaEditDnsupdate => MetaValue::Text(
                spec.soa_edit_dnsupdate
                    .map(|v| v.as_str().to_string())
                    .unwrap_or_default(),
            ),
            Self::TsigAllowAxfr => list(&spec.tsig_allow_axfr),
            Self::TsigAllowDnsupdate => list(&spec.tsig_allow_dnsupdate),
        }
    }
}

/// Canonical current metadata, combining the zone object's fields with the
/// metadata endpoint's entries.
#[must_use]
pub fn current_meta(
    zone: &ZoneInfo,
    items: &[MetadataItem],
    compat: &Compat,
) -> BTreeMap<MetaKey, MetaValue> {
    let mut current = BTreeMap::new();

    for key in MetaKey::ALL {
        let value = match key.route() {
            MetaRoute::ZoneObject => from_zone_object(key, zone),
            MetaRoute::Endpoint => from_endpoint(key, items, compat),
        };
        current.insert(key, value);
    }

    current
}

fn from_zone_object(key: MetaKey, zone: &ZoneInfo) -> MetaValue {
    match key {
        MetaKey::ApiRectify => MetaValue::Flag(zone.api_rectify),
        MetaKey::AxfrMasterTsig => MetaValue::List(zone.slave_tsig_key_ids.clone()),
        MetaKey::Nsec3Narrow => MetaValue::Flag(zone.nsec3narrow),
        MetaKey::Nsec3Param => MetaValue::Text(zone.nsec3param.clone()),
        MetaKey::Presigned => MetaValue::Flag(zone.presigned),
        MetaKey::SoaEdit => MetaValue::Text(zone.soa_edit.clone()),
        MetaKey::SoaEditApi => MetaValue::Text(zone.soa_edit_api.clone()),
        MetaKey::TsigAllowAxfr => MetaValue::List(zone.master_tsig_key_ids.clone()),
        // Not a zone-object key; the route table keeps this unreachable.
        _ => MetaValue::Text(String::new()),
    }
}

fn from_endpoint(key: MetaKey, items: &[MetadataItem], compat: &Compat) -> MetaValue {
    let item = items.iter().find(|i| i.kind == key.api_kind());
    let first = item.and_then(|i| i.metadata.first().map(String::as_str));

    match key.class() {
        MetaClass::Flag => {
            // Servers are inconsistent between omitting an unset flag and
            // returning an explicit falsy value; both normalize to false.
            MetaValue::Flag(first.is_some_and(|v| !compat.is_falsy(v)))
        }
        MetaClass::Presence => MetaValue::Flag(item.is_some()),
        MetaClass::Ternary => MetaValue::Ternary(first.map(|v| v == "1")),
        MetaClass::List => MetaValue::List(item.map(|i| i.metadata.clone()).unwrap_or_default()),
        MetaClass::Text => MetaValue::Text(first.unwrap_or_default().to_string()),
    }
}

/// Stage creation-time zone-object metadata into the create payload.
///
/// Only keys the caller actually set are carried; creation never sends
/// explicit defaults.
pub fn stage_object_meta_create(spec: &ZoneMetadataSpec, payload: &mut ZonePayload) {
    for key in MetaKey::ALL {
        if key.route() != MetaRoute::ZoneObject || !key.writable() {
            continue;
        }
        let desired = key.desired(spec);
        if !desired.is_unset() {
            set_zone_object_field(key, &desired, payload);
        }
    }
}

/// Diff zone-object metadata and stage every differing field into the update
/// payload, including resets to defaults for keys the caller left unset.
pub fn stage_object_meta_update(
    spec: &ZoneMetadataSpec,
    current: &BTreeMap<MetaKey, MetaValue>,
    payload: &mut ZonePayload,
) {
    for key in MetaKey::ALL {
        if key.route() != MetaRoute::ZoneObject || !key.writable() {
            continue;
        }
        let desired = key.desired(spec);
        let differs = current.get(&key).is_none_or(|cur| !desired.equivalent(cur));
        if differs {
            set_zone_object_field(key, &desired, payload);
        }
    }
}

fn set_zone_object_field(key: MetaKey, value: &MetaValue, payload: &mut ZonePayload) {
    match (key, value) {
        (MetaKey::ApiRectify, MetaValue::Flag(v)) => payload.api_rectify = Some(*v),
        (MetaKey::Nsec3Narrow, MetaValue::Flag(v)) => payload.nsec3narrow = Some(*v),
        (MetaKey::Nsec3Param, MetaValue::Text(v)) => payload.nsec3param = Some(v.clone()),
        (MetaKey::SoaEdit, MetaValue::Text(v)) => payload.soa_edit = Some(v.clone()),
        (MetaKey::SoaEditApi, MetaValue::Text(v)) => payload.soa_edit_api = Some(v.clone()),
        (MetaKey::AxfrMasterTsig, MetaValue::List(v)) => {
            payload.slave_tsig_key_ids = Some(v.clone());
        }
        (MetaKey::TsigAllowAxfr, MetaValue::List(v)) => {
            payload.master_tsig_key_ids = Some(v.clone());
        }
        _ => {}
    }
}

/// Write every specified endpoint-route key after zone creation.
///
/// # Errors
///
/// Returns a classified error when a metadata call fails.
pub async fn apply_endpoint_meta(
    client: &PdnsClient,
    zone_id: &str,
    spec: &ZoneMetadataSpec,
) -> Result<(), ReconcileError> {
    for key in MetaKey::ALL {
        if key.route() != MetaRoute::Endpoint || !key.writable() {
            continue;
        }
        let desired = key.desired(spec);
        if desired.is_unset() {
            continue;
        }
        let values = endpoint_encoding(key, &desired);
        client.modify_metadata(zone_id, key.api_kind(), values).await?;
    }
    Ok(())
}

/// Converge every endpoint-route key toward the supplied mapping.
///
/// Keys left unspecified are driven back to their defaults (deleted); this is
/// the full-replace side of the metadata contract.
///
/// # Errors
///
/// Returns a classified error when a metadata call fails.
pub async fn update_endpoint_meta(
    client: &PdnsClient,
    zone_id: &str,
    spec: &ZoneMetadataSpec,
    current: &BTreeMap<MetaKey, MetaValue>,
) -> Result<bool, ReconcileError> {
    let mut changed = false;

    for key in MetaKey::ALL {
        if key.route() != MetaRoute::Endpoint || !key.writable() {
            continue;
        }
        let desired = key.desired(spec);
        let unchanged = current.get(&key).is_some_and(|cur| desired.equivalent(cur));
        if unchanged {
            continue;
        }
        if desired.is_unset() {
            client.delete_metadata(zone_id, key.api_kind()).await?;
        } else {
            let values = endpoint_encoding(key, &desired);
            client.modify_metadata(zone_id, key.api_kind(), values).await?;
        }
        changed = true;
    }

    Ok(changed)
}

fn endpoint_encoding(key: MetaKey, value: &MetaValue) -> Vec<String> {
    match key.class() {
        // The key's existence carries the boolean; the stored value is empty.
        MetaClass::Presence => vec![String::new()],
        _ => value.endpoint_values(),
    }
}

/// User-facing metadata mapping for result snapshots.
#[must_use]
pub fn snapshot_meta(current: &BTreeMap<MetaKey, MetaValue>) -> BTreeMap<String, serde_json::Value> {
    let mut snapshot = BTreeMap::new();
    for (key, value) in current {
        if let Some(json) = value.to_json() {
            snapshot.insert(key.user_name().to_string(), json);
        }
    }
    snapshot
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod metadata_tests;
