// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record set reconciliation.
//!
//! A record set is addressed by (zone, name, type). Records within a set are
//! compared as a content set with the disabled flag attached: order never
//! matters, and a record differing only in its disabled flag is a changed
//! record, not a different one.
//!
//! The `keep` flag switches from whole-set semantics to record-level
//! semantics: `present` merges the given records into the existing set and
//! `absent` removes only the given records, deleting the set when nothing
//! survives.
//!
//! The apex SOA record set is owned by the server and always rejected here;
//! the apex NS set requires the explicit `allow_apex_ns` opt-in.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::api::types::{RecordWire, RrsetChanges, RrsetWire};
use crate::api::PdnsClient;
use crate::errors::ReconcileError;
use crate::model::{ObjectState, RecordSpec, RrsetDoc};
use crate::normalize::{canonical_name, names_equal};
use crate::report::RrsetReport;

use super::zone::find_zone;

/// One desired record set, with wire-ready content.
#[derive(Debug)]
struct DesiredSet {
    rtype: String,
    records: Vec<RecordSpec>,
}

/// Drive the record sets of one zone toward the requested target condition.
///
/// # Errors
///
/// Returns a not-found error when the owning zone is missing, a validation
/// error for protected types or malformed documents, and classified
/// transport/server errors from the API.
pub async fn reconcile_rrsets(
    client: &PdnsClient,
    zone_name: &str,
    state: ObjectState,
    doc: &RrsetDoc,
) -> Result<RrsetReport, ReconcileError> {
    let zone_name = canonical_name(zone_name);
    debug!(zone = %zone_name, state = ?state, "reconciling record sets");

    let summary = find_zone(client, &zone_name)
        .await?
        .ok_or_else(|| ReconcileError::NotFound {
            kind: "zone",
            name: zone_name.clone(),
        })?;

    let zone = client.get_zone(&summary.id, true).await?;
    let current = zone.rrsets;

    let rrset_name = doc.name.as_deref().map(canonical_name);
    let type_filter = doc.rtype.as_deref().map(str::to_uppercase);

    if state == ObjectState::Exists {
        let matching = filter_rrsets(&current, rrset_name.as_deref(), type_filter.as_deref());
        let exists = (rrset_name.is_some() || type_filter.is_some()).then(|| !matching.is_empty());
        return Ok(RrsetReport {
            changed: false,
            name: rrset_name,
            exists,
            rrsets: matching,
        });
    }

    let name = rrset_name.clone().ok_or_else(|| {
        ReconcileError::validation("'name' is required for present and absent record sets")
    })?;

    let desired = desired_sets(doc, state)?;
    for set in &desired {
        check_protected(&zone_name, &name, &set.rtype, doc.allow_apex_ns)?;
    }

    let mut changes = Vec::new();
    for set in &desired {
        if let Some(change) = plan_change(&current, &name, set, doc, state) {
            changes.push(change);
        }
    }

    if changes.is_empty() {
        let matching = filter_rrsets(&current, Some(&name), None);
        return Ok(RrsetReport {
            changed: false,
            name: Some(name),
            exists: None,
            rrsets: matching,
        });
    }

    client
        .patch_zone_rrsets(&summary.id, &RrsetChanges { rrsets: changes })
        .await?;
    info!(zone = %zone_name, rrset = %name, "record sets updated");

    // The mutation already happened; a failed re-read degrades the snapshot,
    // it does not turn the invocation into a failure.
    let rrsets = match client.get_zone(&summary.id, true).await {
        Ok(after) => after.rrsets,
        Err(err) => {
            warn!(zone = %zone_name, error = %err, "record set read failed after mutation");
            Vec::new()
        }
    };

    Ok(RrsetReport {
        changed: true,
        name: Some(name),
        exists: None,
        rrsets,
    })
}

/// Collect the desired record sets from the document, enforcing the
/// generic-versus-typed exclusivity.
fn desired_sets(doc: &RrsetDoc, state: ObjectState) -> Result<Vec<DesiredSet>, ReconcileError> {
    let typed = doc.typed_sets();
    let generic_type = doc.rtype.as_deref();

    if !typed.is_empty() && generic_type.is_some() {
        return Err(ReconcileError::validation(
            "'type'/'records' and typed record forms are mutually exclusive",
        ));
    }

    if !typed.is_empty() {
        return Ok(typed
            .into_iter()
            .map(|(rtype, records)| DesiredSet {
                rtype: rtype.to_string(),
                records,
            })
            .collect());
    }

    let Some(rtype) = generic_type else {
        return Err(ReconcileError::validation(
            "a record type is required: give 'type' or a typed record form",
        ));
    };

    let records = doc.records.clone().unwrap_or_default();
    if state == ObjectState::Present && records.is_empty() {
        return Err(ReconcileError::validation(
            "state is present but no records were provided",
        ));
    }

    Ok(vec![DesiredSet {
        rtype: rtype.to_uppercase(),
        records,
    }])
}

/// Reject mutations of server-managed record sets.
fn check_protected(
    zone_name: &str,
    rrset_name: &str,
    rtype: &str,
    allow_apex_ns: bool,
) -> Result<(), ReconcileError> {
    if rtype.eq_ignore_ascii_case("SOA") {
        return Err(ReconcileError::validation(
            "the SOA record set is managed by the server and cannot be targeted",
        ));
    }
    if rtype.eq_ignore_ascii_case("NS") && names_equal(rrset_name, zone_name) && !allow_apex_ns {
        return Err(ReconcileError::validation(
            "the apex NS record set requires 'allow_apex_ns: true'",
        ));
    }
    Ok(())
}

/// Decide the mutation, if any, for one desired set against the zone's
/// current record sets.
fn plan_change(
    current: &[RrsetWire],
    name: &str,
    set: &DesiredSet,
    doc: &RrsetDoc,
    state: ObjectState,
) -> Option<RrsetWire> {
    let existing = current
        .iter()
        .find(|r| names_equal(&r.name, name) && r.rtype.eq_ignore_ascii_case(&set.rtype));

    let desired: BTreeSet<(String, bool)> = set
        .records
        .iter()
        .map(|r| (r.content.clone(), r.disabled))
        .collect();

    match (state, doc.keep, existing) {
        (ObjectState::Present, false, existing) => {
            // Whole-set replace; identical content and TTL is a no-op.
            let identical = existing.is_some_and(|e| record_set(e) == desired && e.ttl == doc.ttl);
            if identical {
                None
            } else {
                Some(replace(name, set, doc.ttl, set.records.clone()))
            }
        }
        (ObjectState::Present, true, None) => Some(replace(name, set, doc.ttl, set.records.clone())),
        (ObjectState::Present, true, Some(existing)) => {
            let have = record_set(existing);
            let new: Vec<RecordSpec> = set
                .records
                .iter()
                .filter(|r| !have.contains(&(r.content.clone(), r.disabled)))
                .cloned()
                .collect();
            if new.is_empty() {
                return None;
            }
            let mut merged: Vec<RecordSpec> = existing
                .records
                .iter()
                .map(|r| RecordSpec {
                    content: r.content.clone(),
                    disabled: r.disabled,
                })
                .collect();
            merged.extend(new);
            Some(replace(name, set, existing.ttl, merged))
        }
        // Removing something that is not there is a no-op, not a failure.
        (ObjectState::Absent, _, None) => None,
        (ObjectState::Absent, false, Some(_)) => Some(delete(name, set)),
        (ObjectState::Absent, true, Some(existing)) => {
            let survivors: Vec<RecordSpec> = existing
                .records
                .iter()
                .filter(|r| !desired.contains(&(r.content.clone(), r.disabled)))
                .map(|r| RecordSpec {
                    content: r.content.clone(),
                    disabled: r.disabled,
                })
                .collect();
            if survivors.len() == existing.records.len() {
                None
            } else if survivors.is_empty() {
                Some(delete(name, set))
            } else {
                Some(replace(name, set, existing.ttl, survivors))
            }
        }
        (ObjectState::Exists, _, _) => None,
    }
}

fn record_set(rrset: &RrsetWire) -> BTreeSet<(String, bool)> {
    rrset
        .records
        .iter()
        .map(|r| (r.content.clone(), r.disabled))
        .collect()
}

fn replace(name: &str, set: &DesiredSet, ttl: u32, records: Vec<RecordSpec>) -> RrsetWire {
    RrsetWire {
        name: name.to_lowercase(),
        rtype: set.rtype.clone(),
        ttl,
        changetype: Some("REPLACE".to_string()),
        records: records
            .into_iter()
            .map(|r| RecordWire {
                content: r.content,
                disabled: r.disabled,
            })
            .collect(),
    }
}

fn delete(name: &str, set: &DesiredSet) -> RrsetWire {
    RrsetWire {
        name: name.to_lowercase(),
        rtype: set.rtype.clone(),
        ttl: 0,
        changetype: Some("DELETE".to_string()),
        records: Vec::new(),
    }
}

/// Filter the zone's record sets by optional name and type.
fn filter_rrsets(
    current: &[RrsetWire],
    name: Option<&str>,
    rtype: Option<&str>,
) -> Vec<RrsetWire> {
    current
        .iter()
        .filter(|r| name.is_none_or(|n| names_equal(&r.name, n)))
        .filter(|r| rtype.is_none_or(|t| r.rtype.eq_ignore_ascii_case(t)))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "rrset_tests.rs"]
mod rrset_tests;
