// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Reconciliation logic for the managed resource kinds.
//!
//! Each reconciler performs one converge-then-exit pass:
//!
//! 1. **Fetch** - read the resource's current state from the management API
//! 2. **Decide** - compare canonical desired and current forms
//! 3. **Apply** - no-op, create, update or delete; trigger for notify/retrieve
//! 4. **Report** - a `changed` flag plus the resulting resource snapshot
//!
//! There is no retry loop inside an invocation: a failed API call surfaces
//! immediately. A mutation that succeeded before a later snapshot read failed
//! still reports `changed=true` with a best-effort snapshot.
//!
//! # Available reconcilers
//!
//! - [`reconcile_zone`] - zones (present/absent/exists/notify/retrieve)
//! - [`reconcile_rrsets`] - record sets within a zone
//! - [`reconcile_tsigkey`] - server-wide TSIG keys
//! - [`reconcile_cryptokey`] - DNSSEC signing keys of a zone

pub mod cryptokey;
pub mod rrset;
pub mod tsigkey;
pub mod zone;

pub use cryptokey::reconcile_cryptokey;
pub use rrset::reconcile_rrsets;
pub use tsigkey::reconcile_tsigkey;
pub use zone::reconcile_zone;
