// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone reconciliation.
//!
//! One invocation drives a single zone toward its target condition:
//!
//! - `present` creates the zone or converges kind, masters, account, catalog
//!   and metadata
//! - `absent` deletes the zone; deleting a missing zone is a no-op
//! - `exists` probes without modifying anything
//! - `notify` queues NOTIFY to the slaves of a Master/Producer zone
//! - `retrieve` pulls a Slave/Consumer zone from its master
//!
//! Creation-only properties (nameservers, SOA, initial record sets, TTL) are
//! never part of an update payload; the mutable attribute set is exactly
//! kind, masters, account, catalog and metadata.

pub mod metadata;

use tracing::{debug, info, warn};

use crate::api::types::{RecordWire, RrsetWire, ZoneInfo, ZonePayload, ZoneSummary};
use crate::api::PdnsClient;
use crate::config::Compat;
use crate::errors::ReconcileError;
use crate::model::{ZoneDoc, ZoneKind, ZoneProperties, ZoneState};
use crate::normalize::{canonical_name, names_equal, same_set};
use crate::report::{ZoneReport, ZoneSnapshot};

use metadata::{
    apply_endpoint_meta, current_meta, snapshot_meta, stage_object_meta_create,
    stage_object_meta_update, update_endpoint_meta,
};

/// Drive one zone toward the requested target condition.
///
/// # Errors
///
/// Returns a validation error for locally detected precondition failures, a
/// not-found error when `notify`/`retrieve` target a missing zone, and
/// classified transport/server errors from the API.
pub async fn reconcile_zone(
    client: &PdnsClient,
    compat: &Compat,
    name: &str,
    state: ZoneState,
    doc: &ZoneDoc,
) -> Result<ZoneReport, ReconcileError> {
    let zone_name = canonical_name(name);
    debug!(zone = %zone_name, state = ?state, "reconciling zone");

    let existing = find_zone(client, &zone_name).await?;

    let Some(summary) = existing else {
        return match state {
            ZoneState::Exists | ZoneState::Absent => Ok(ZoneReport {
                changed: false,
                zone: ZoneSnapshot::absent(&zone_name),
            }),
            ZoneState::Notify | ZoneState::Retrieve => Err(ReconcileError::NotFound {
                kind: "zone",
                name: zone_name,
            }),
            ZoneState::Present => create_zone(client, compat, &zone_name, doc).await,
        };
    };

    match state {
        ZoneState::Exists => {
            let snapshot = build_snapshot(client, compat, &summary.id).await?;
            Ok(ZoneReport {
                changed: false,
                zone: snapshot,
            })
        }
        ZoneState::Absent => {
            client.delete_zone(&summary.id).await?;
            info!(zone = %zone_name, "zone deleted");
            Ok(ZoneReport {
                changed: true,
                zone: ZoneSnapshot::absent(&zone_name),
            })
        }
        ZoneState::Notify => {
            if summary.kind != "Master" && summary.kind != "Producer" {
                return Err(ReconcileError::validation(format!(
                    "NOTIFY cannot be requested for '{}' zones",
                    summary.kind
                )));
            }
            client.notify_zone(&summary.id).await?;
            info!(zone = %zone_name, "NOTIFY queued");
            Ok(ZoneReport {
                changed: true,
                zone: best_effort_snapshot(client, compat, &summary.id, &zone_name).await,
            })
        }
        ZoneState::Retrieve => {
            if summary.kind != "Slave" && summary.kind != "Consumer" {
                return Err(ReconcileError::validation(format!(
                    "retrieval cannot be requested for '{}' zones",
                    summary.kind
                )));
            }
            client.axfr_retrieve_zone(&summary.id).await?;
            info!(zone = %zone_name, "retrieval queued");
            Ok(ZoneReport {
                changed: true,
                zone: best_effort_snapshot(client, compat, &summary.id, &zone_name).await,
            })
        }
        ZoneState::Present => update_zone(client, compat, &summary.id, &zone_name, doc).await,
    }
}

/// Translate a user-facing zone name into the server's zone entry.
pub(crate) async fn find_zone(
    client: &PdnsClient,
    zone_name: &str,
) -> Result<Option<ZoneSummary>, ReconcileError> {
    let matches = client.list_zones(Some(zone_name)).await?;
    Ok(matches
        .into_iter()
        .find(|z| names_equal(&z.name, zone_name)))
}

fn check_kind_supported(compat: &Compat, kind: ZoneKind) -> Result<(), ReconcileError> {
    if matches!(kind, ZoneKind::Producer | ZoneKind::Consumer) && !compat.producer_consumer_kinds {
        return Err(ReconcileError::validation(format!(
            "zone kind '{kind}' requires a server with Producer/Consumer support"
        )));
    }
    Ok(())
}

fn check_catalog_supported(compat: &Compat) -> Result<(), ReconcileError> {
    if !compat.catalog_zones {
        return Err(ReconcileError::validation(
            "'catalog' requires a server with catalog zone support",
        ));
    }
    Ok(())
}

/// Assemble the creation-time record sets: SOA first, apex NS second, then
/// the caller's record sets.
fn creation_rrsets(
    zone_name: &str,
    props: &ZoneProperties,
) -> Result<Vec<RrsetWire>, ReconcileError> {
    let soa = props.soa.as_ref().ok_or_else(|| {
        ReconcileError::validation(format!(
            "'properties -> soa' must be specified for '{}' zone creation",
            props.kind
        ))
    })?;
    let nameservers = props
        .nameservers
        .as_ref()
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| {
            ReconcileError::validation(format!(
                "'properties -> nameservers' must be specified for '{}' zone creation",
                props.kind
            ))
        })?;

    let mut rrsets = vec![
        RrsetWire {
            name: zone_name.to_string(),
            rtype: "SOA".to_string(),
            ttl: props.ttl,
            changetype: None,
            records: vec![RecordWire {
                content: soa.content(),
                disabled: false,
            }],
        },
        RrsetWire {
            name: zone_name.to_string(),
            rtype: "NS".to_string(),
            ttl: props.ttl,
            changetype: None,
            records: nameservers
                .iter()
                .map(|ns| RecordWire {
                    content: ns.clone(),
                    disabled: false,
                })
                .collect(),
        },
    ];

    if let Some(extra) = &props.rrsets {
        for entry in extra {
            if entry.rtype.eq_ignore_ascii_case("SOA") {
                return Err(ReconcileError::validation(format!(
                    "'{}' type is not permitted in 'properties -> rrsets'",
                    entry.rtype
                )));
            }
            rrsets.push(RrsetWire {
                name: canonical_name(&entry.name),
                rtype: entry.rtype.clone(),
                ttl: entry.ttl,
                changetype: None,
                records: entry
                    .records
                    .iter()
                    .map(|r| RecordWire {
                        content: r.content.clone(),
                        disabled: r.disabled,
                    })
                    .collect(),
            });
        }
    }

    Ok(rrsets)
}

async fn create_zone(
    client: &PdnsClient,
    compat: &Compat,
    zone_name: &str,
    doc: &ZoneDoc,
) -> Result<ZoneReport, ReconcileError> {
    let props = doc.properties.as_ref().ok_or_else(|| {
        ReconcileError::validation("'properties' must be specified for zone creation")
    })?;
    check_kind_supported(compat, props.kind)?;

    let mut payload = ZonePayload {
        name: Some(zone_name.to_string()),
        kind: Some(props.kind.as_str().to_string()),
        ..ZonePayload::default()
    };

    if props.kind.is_primary_style() {
        // NS records are supplied through the record sets; the server-side
        // nameserver convenience list stays empty.
        payload.nameservers = Some(Vec::new());
        payload.rrsets = Some(creation_rrsets(zone_name, props)?);
    }

    if props.kind.is_secondary_style() {
        payload.masters.clone_from(&props.masters);
    }

    if let Some(account) = &props.account {
        payload.account = Some(account.clone());
    }

    if let Some(catalog) = &props.catalog {
        check_catalog_supported(compat)?;
        payload.catalog = Some(canonical_name(catalog));
    }

    if let Some(meta) = &doc.metadata {
        stage_object_meta_create(meta, &mut payload);
    }

    let created = client.create_zone(&payload).await?;
    info!(zone = %zone_name, kind = %props.kind, "zone created");

    if let Some(meta) = &doc.metadata {
        apply_endpoint_meta(client, &created.id, meta).await?;
    }

    Ok(ZoneReport {
        changed: true,
        zone: best_effort_snapshot(client, compat, &created.id, zone_name).await,
    })
}

async fn update_zone(
    client: &PdnsClient,
    compat: &Compat,
    zone_id: &str,
    zone_name: &str,
    doc: &ZoneDoc,
) -> Result<ZoneReport, ReconcileError> {
    let zone = client.get_zone(zone_id, false).await?;
    let items = client.list_metadata(zone_id).await?;
    let current = current_meta(&zone, &items, compat);

    let mut payload = ZonePayload::default();

    if let Some(props) = &doc.properties {
        check_kind_supported(compat, props.kind)?;

        if zone.kind != props.kind.as_str() {
            payload.kind = Some(props.kind.as_str().to_string());
        }

        if props.kind.is_secondary_style() {
            if let Some(masters) = &props.masters {
                if !same_set(masters, &zone.masters) {
                    payload.masters = Some(masters.clone());
                }
            }
        }

        if let Some(account) = props.account.as_ref().filter(|a| !a.is_empty()) {
            if zone.account != *account {
                payload.account = Some(account.clone());
            }
        }

        if let Some(catalog) = props.catalog.as_ref().filter(|c| !c.is_empty()) {
            check_catalog_supported(compat)?;
            let desired = canonical_name(catalog);
            if zone.catalog.as_deref() != Some(desired.as_str()) {
                payload.catalog = Some(desired);
            }
        }
    }

    if let Some(meta) = &doc.metadata {
        stage_object_meta_update(meta, &current, &mut payload);
    }

    let mut changed = false;

    if !payload.is_empty() {
        client.put_zone(zone_id, &payload).await?;
        info!(zone = %zone_name, "zone updated");
        changed = true;
    }

    if let Some(meta) = &doc.metadata {
        if update_endpoint_meta(client, zone_id, meta, &current).await? {
            changed = true;
        }
    }

    let snapshot = if changed {
        best_effort_snapshot(client, compat, zone_id, zone_name).await
    } else {
        snapshot_of(&zone, &current)
    };

    Ok(ZoneReport {
        changed,
        zone: snapshot,
    })
}

/// Fetch the zone and its metadata and build the caller-facing snapshot.
///
/// # Errors
///
/// Returns a classified error when either read fails.
pub async fn build_snapshot(
    client: &PdnsClient,
    compat: &Compat,
    zone_id: &str,
) -> Result<ZoneSnapshot, ReconcileError> {
    let zone = client.get_zone(zone_id, false).await?;
    let items = client.list_metadata(zone_id).await?;
    let current = current_meta(&zone, &items, compat);
    Ok(snapshot_of(&zone, &current))
}

/// Snapshot after a successful mutation: a failed follow-up read must not
/// hide the mutation, so it degrades to a partial snapshot.
async fn best_effort_snapshot(
    client: &PdnsClient,
    compat: &Compat,
    zone_id: &str,
    zone_name: &str,
) -> ZoneSnapshot {
    match build_snapshot(client, compat, zone_id).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(zone = %zone_name, error = %err, "snapshot read failed after mutation");
            ZoneSnapshot {
                name: zone_name.to_string(),
                exists: true,
                ..ZoneSnapshot::default()
            }
        }
    }
}

fn snapshot_of(
    zone: &ZoneInfo,
    current: &std::collections::BTreeMap<metadata::MetaKey, metadata::MetaValue>,
) -> ZoneSnapshot {
    ZoneSnapshot {
        name: zone.name.clone(),
        exists: true,
        kind: Some(zone.kind.clone()),
        serial: Some(zone.serial),
        account: Some(zone.account.clone()),
        dnssec: Some(zone.dnssec),
        catalog: zone.catalog.clone(),
        masters: Some(zone.masters.clone()),
        metadata: Some(snapshot_meta(current)),
    }
}
