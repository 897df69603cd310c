// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # pdnsctl - Declarative state reconciler for PowerDNS Authoritative servers
//!
//! pdnsctl manages the configuration objects of a PowerDNS Authoritative
//! server - zones, TSIG keys, record sets and DNSSEC cryptokeys - through
//! the server's management REST API. Each invocation receives a desired-state
//! description, compares it against the server's current state, applies the
//! minimal set of API calls needed to converge, and reports whether a change
//! occurred.
//!
//! ## Overview
//!
//! The crate is organized around a small pipeline:
//!
//! - [`model`] - typed desired-state documents, one per resource kind
//! - [`normalize`] - canonical forms so equal-but-differently-shaped values
//!   compare equal (trailing dots, name casing, falsy metadata, set ordering)
//! - [`api`] - statically typed client for the management API with failure
//!   classification
//! - [`reconcilers`] - the diffing and convergence logic per resource kind
//! - [`report`] - the result records handed back to the caller
//!
//! ## Example
//!
//! ```rust,no_run
//! use pdnsctl::config::{Compat, Connection};
//! use pdnsctl::api::PdnsClient;
//! use pdnsctl::model::{ZoneDoc, ZoneState};
//! use pdnsctl::reconcilers::reconcile_zone;
//!
//! # async fn example() -> Result<(), pdnsctl::errors::ReconcileError> {
//! let conn = Connection::new(
//!     "http://localhost:8081",
//!     "api-key".to_string(),
//!     "localhost".to_string(),
//!     30,
//! )?;
//! let client = PdnsClient::new(conn)?;
//! let doc = ZoneDoc::from_yaml("properties:\n  kind: Slave\n  masters: [1.1.1.1]\n")?;
//!
//! let report = reconcile_zone(
//!     &client,
//!     &Compat::default(),
//!     "d3.example.",
//!     ZoneState::Present,
//!     &doc,
//! )
//! .await?;
//! assert!(report.changed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Invocation model
//!
//! One invocation is one converge-then-exit pass: a fixed, small sequence of
//! sequential API calls with no background tasks, no local state and no
//! internal retries. Idempotence is the load-bearing property - applying the
//! same description twice yields `changed=true` then `changed=false`.

pub mod api;
pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod normalize;
pub mod reconcilers;
pub mod report;
