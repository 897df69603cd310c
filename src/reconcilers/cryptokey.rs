// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Cryptokey (DNSSEC signing key) reconciliation.
//!
//! A cryptokey is addressed by its owning zone and the numeric id the server
//! assigns at creation. Creation takes one of two shapes: generation (the
//! server produces the material from `algorithm` and, for RSA variants,
//! `bits`) or import (`dnskey` plus `privatekey`). After creation only the
//! `active` and `published` flags and the key's existence are mutable; the
//! algorithm and the key bits are not, and are dropped from update payloads.

use tracing::{debug, info, warn};

use crate::api::types::{CryptokeyInfo, CryptokeyPayload};
use crate::api::PdnsClient;
use crate::constants::DEFAULT_RSA_BITS;
use crate::errors::ReconcileError;
use crate::model::{CryptokeySpec, ObjectState};
use crate::normalize::canonical_name;
use crate::report::CryptokeyReport;

use super::zone::find_zone;

/// Drive one zone's cryptokeys toward the requested target condition.
///
/// # Errors
///
/// Returns a not-found error when the owning zone (or a targeted key id on
/// update) is missing, a validation error for malformed creation shapes, and
/// classified transport/server errors from the API.
pub async fn reconcile_cryptokey(
    client: &PdnsClient,
    zone_name: &str,
    state: ObjectState,
    spec: &CryptokeySpec,
) -> Result<CryptokeyReport, ReconcileError> {
    let zone_name = canonical_name(zone_name);
    debug!(zone = %zone_name, state = ?state, "reconciling cryptokey");

    let summary = find_zone(client, &zone_name)
        .await?
        .ok_or_else(|| ReconcileError::NotFound {
            kind: "zone",
            name: zone_name.clone(),
        })?;
    let zone_id = summary.id;

    let existing = client.list_cryptokeys(&zone_id).await?;

    match state {
        ObjectState::Exists => probe(client, &zone_id, spec, existing).await,
        ObjectState::Present => match spec.id {
            None => create(client, &zone_id, &zone_name, spec).await,
            Some(id) => update(client, &zone_id, &zone_name, id, spec, &existing).await,
        },
        ObjectState::Absent => {
            let id = spec.id.ok_or_else(|| {
                ReconcileError::validation("'id' is required for cryptokey removal")
            })?;
            if !existing.iter().any(|k| k.id == id) {
                return Ok(CryptokeyReport {
                    changed: false,
                    exists: None,
                    cryptokeys: existing,
                });
            }
            client.delete_cryptokey(&zone_id, id).await?;
            info!(zone = %zone_name, id, "cryptokey deleted");
            Ok(CryptokeyReport {
                changed: true,
                exists: None,
                cryptokeys: list_after_change(client, &zone_id, &zone_name).await,
            })
        }
    }
}

async fn probe(
    client: &PdnsClient,
    zone_id: &str,
    spec: &CryptokeySpec,
    existing: Vec<CryptokeyInfo>,
) -> Result<CryptokeyReport, ReconcileError> {
    let cryptokeys = match spec.id {
        Some(id) => client
            .get_cryptokey(zone_id, id)
            .await?
            .into_iter()
            .collect(),
        None => existing,
    };
    Ok(CryptokeyReport {
        changed: false,
        exists: Some(!cryptokeys.is_empty()),
        cryptokeys,
    })
}

/// Build the creation payload, enforcing the generate-xor-import shape.
fn creation_payload(spec: &CryptokeySpec) -> Result<CryptokeyPayload, ReconcileError> {
    let keytype = spec.keytype.ok_or_else(|| {
        ReconcileError::validation("'keytype' is required for cryptokey creation")
    })?;

    let generated = spec.algorithm.is_some();
    let imported = spec.dnskey.is_some() && spec.privatekey.is_some();

    if generated && imported {
        return Err(ReconcileError::validation(
            "'algorithm' and 'dnskey'/'privatekey' are mutually exclusive for cryptokey creation",
        ));
    }
    if !generated && !imported {
        return Err(ReconcileError::validation(
            "cryptokey creation requires either 'algorithm' or both 'dnskey' and 'privatekey'",
        ));
    }

    let mut payload = CryptokeyPayload {
        keytype: Some(keytype.as_str().to_string()),
        active: Some(spec.active.unwrap_or(false)),
        published: Some(spec.published.unwrap_or(true)),
        ..CryptokeyPayload::default()
    };

    if generated {
        let algorithm = spec.algorithm.clone().unwrap_or_default();
        if algorithm.to_lowercase().contains("rsa") {
            payload.bits = Some(spec.bits.unwrap_or(DEFAULT_RSA_BITS));
        }
        payload.algorithm = Some(algorithm);
    } else {
        payload.dnskey.clone_from(&spec.dnskey);
        payload.privatekey.clone_from(&spec.privatekey);
    }

    Ok(payload)
}

async fn create(
    client: &PdnsClient,
    zone_id: &str,
    zone_name: &str,
    spec: &CryptokeySpec,
) -> Result<CryptokeyReport, ReconcileError> {
    let payload = creation_payload(spec)?;
    let created = client.create_cryptokey(zone_id, &payload).await?;
    info!(zone = %zone_name, id = created.id, keytype = %created.keytype, "cryptokey created");

    Ok(CryptokeyReport {
        changed: true,
        exists: None,
        cryptokeys: list_after_change(client, zone_id, zone_name).await,
    })
}

async fn update(
    client: &PdnsClient,
    zone_id: &str,
    zone_name: &str,
    id: u32,
    spec: &CryptokeySpec,
    existing: &[CryptokeyInfo],
) -> Result<CryptokeyReport, ReconcileError> {
    let found = existing
        .iter()
        .find(|k| k.id == id)
        .ok_or(ReconcileError::NotFound {
            kind: "cryptokey",
            name: id.to_string(),
        })?;

    // Only the flags are mutable; algorithm and key material in the desired
    // description are dropped here rather than sent.
    let mut payload = CryptokeyPayload::default();
    if let Some(active) = spec.active {
        if active != found.active {
            payload.active = Some(active);
        }
    }
    if let Some(published) = spec.published {
        if published != found.published {
            payload.published = Some(published);
        }
    }

    if payload.active.is_none() && payload.published.is_none() {
        return Ok(CryptokeyReport {
            changed: false,
            exists: None,
            cryptokeys: existing.to_vec(),
        });
    }

    client.modify_cryptokey(zone_id, id, &payload).await?;
    info!(zone = %zone_name, id, "cryptokey flags updated");

    Ok(CryptokeyReport {
        changed: true,
        exists: None,
        cryptokeys: list_after_change(client, zone_id, zone_name).await,
    })
}

/// List the zone's keys after a successful mutation; a failed re-read
/// degrades the snapshot instead of hiding the mutation.
async fn list_after_change(
    client: &PdnsClient,
    zone_id: &str,
    zone_name: &str,
) -> Vec<CryptokeyInfo> {
    match client.list_cryptokeys(zone_id).await {
        Ok(keys) => keys,
        Err(err) => {
            warn!(zone = %zone_name, error = %err, "cryptokey read failed after mutation");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "cryptokey_tests.rs"]
mod cryptokey_tests;
