// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TSIG key reconciliation.
//!
//! Keys are globally scoped and addressed by name (case-insensitive,
//! trailing-dot convention). Creation lets the server generate the material
//! when none is supplied; updates send only the attributes whose canonical
//! value differs. Supplied key material must be valid base64 before the
//! server is contacted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, info};

use crate::api::types::TsigKeyPayload;
use crate::api::PdnsClient;
use crate::errors::ReconcileError;
use crate::model::{ObjectState, TsigAlgorithm, TsigKeySpec};
use crate::normalize::{canonical_name, names_equal};
use crate::report::{KeyReport, KeySnapshot};

/// Drive one TSIG key toward the requested target condition.
///
/// # Errors
///
/// Returns a validation error for malformed key material and classified
/// transport/server errors from the API.
pub async fn reconcile_tsigkey(
    client: &PdnsClient,
    name: &str,
    state: ObjectState,
    spec: &TsigKeySpec,
) -> Result<KeyReport, ReconcileError> {
    let key_name = canonical_name(name);
    debug!(key = %key_name, state = ?state, "reconciling TSIG key");

    if let Some(material) = &spec.key {
        BASE64.decode(material).map_err(|e| {
            ReconcileError::validation(format!("'key' is not valid base64: {e}"))
        })?;
    }

    // The listing translates the user-facing name into the key id used by
    // every targeted call; it omits the key material.
    let listing = client.list_tsigkeys().await?;
    let existing = listing.iter().find(|k| names_equal(&k.name, &key_name));

    let Some(found) = existing else {
        return match state {
            ObjectState::Exists | ObjectState::Absent => Ok(KeyReport {
                changed: false,
                key: KeySnapshot::absent(&key_name),
            }),
            ObjectState::Present => create_key(client, &key_name, spec).await,
        };
    };

    let info = client.get_tsigkey(&found.id).await?;

    match state {
        ObjectState::Exists => Ok(KeyReport {
            changed: false,
            key: KeySnapshot {
                name: key_name,
                exists: true,
                algorithm: Some(info.algorithm),
                key: Some(info.key),
            },
        }),
        ObjectState::Absent => {
            client.delete_tsigkey(&found.id).await?;
            info!(key = %key_name, "TSIG key deleted");
            Ok(KeyReport {
                changed: true,
                key: KeySnapshot::absent(&key_name),
            })
        }
        ObjectState::Present => {
            let mut payload = TsigKeyPayload::default();

            if let Some(algorithm) = spec.algorithm {
                if info.algorithm != algorithm.as_str() {
                    payload.algorithm = Some(algorithm.as_str().to_string());
                }
            }
            if let Some(material) = &spec.key {
                if info.key != *material {
                    payload.key = Some(material.clone());
                }
            }

            if payload.is_empty() {
                return Ok(KeyReport {
                    changed: false,
                    key: KeySnapshot {
                        name: key_name,
                        exists: true,
                        algorithm: Some(info.algorithm),
                        key: Some(info.key),
                    },
                });
            }

            let updated = client.put_tsigkey(&found.id, &payload).await?;
            info!(key = %key_name, "TSIG key updated");
            Ok(KeyReport {
                changed: true,
                key: KeySnapshot {
                    name: key_name,
                    exists: true,
                    algorithm: Some(updated.algorithm),
                    key: Some(updated.key),
                },
            })
        }
    }
}

async fn create_key(
    client: &PdnsClient,
    key_name: &str,
    spec: &TsigKeySpec,
) -> Result<KeyReport, ReconcileError> {
    let payload = TsigKeyPayload {
        name: Some(key_name.to_string()),
        algorithm: Some(
            spec.algorithm
                .unwrap_or(TsigAlgorithm::HmacMd5)
                .as_str()
                .to_string(),
        ),
        key: spec.key.clone(),
    };

    let created = client.create_tsigkey(&payload).await?;
    info!(key = %key_name, algorithm = %created.algorithm, "TSIG key created");

    Ok(KeyReport {
        changed: true,
        key: KeySnapshot {
            name: key_name.to_string(),
            exists: true,
            algorithm: Some(created.algorithm),
            key: Some(created.key),
        },
    })
}

#[cfg(test)]
#[path = "tsigkey_tests.rs"]
mod tsigkey_tests;
