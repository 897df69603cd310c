// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Canonicalization helpers shared by all reconcilers.
//!
//! The management API and callers disagree on small things: trailing dots,
//! name casing, and whether an unset flag comes back as an empty string, a
//! literal `"0"`, or not at all. Everything that compares desired state to
//! current state goes through these helpers so that semantically equal values
//! compare equal.

use std::collections::BTreeSet;

/// Return the name in absolute form, appending the trailing dot if absent.
///
/// Original case is preserved; the API expects absolute names on write.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Comparison key for a DNS name: absolute form, lowercased.
#[must_use]
pub fn name_key(name: &str) -> String {
    canonical_name(name).to_lowercase()
}

/// Case-insensitive, trailing-dot-insensitive name equality.
#[must_use]
pub fn names_equal(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

/// Compare two string lists as sets, ignoring order and duplicates.
#[must_use]
pub fn same_set(a: &[String], b: &[String]) -> bool {
    let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}

/// Wrap a value in exactly one pair of double quotes.
///
/// Some record fields (TXT strings, CAA values) must be quoted on the wire;
/// callers may or may not have quoted them already.
#[must_use]
pub fn quoted(value: &str) -> String {
    let inner = value.strip_prefix('"').unwrap_or(value);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    format!("\"{inner}\"")
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod normalize_tests;
