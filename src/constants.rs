// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for pdnsctl.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// Default management API URL of a local PowerDNS Authoritative server
pub const DEFAULT_API_URL: &str = "http://localhost:8081";

/// Default server instance identifier within the management API
pub const DEFAULT_SERVER_ID: &str = "localhost";

/// Header carrying the API key credential
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Default per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// DNS Defaults
// ============================================================================

/// Default TTL for the SOA and NS records created with a new zone (1 day)
pub const DEFAULT_ZONE_TTL_SECS: u32 = 86400;

/// Default TTL for a managed RRset (1 hour)
pub const DEFAULT_RRSET_TTL_SECS: u32 = 3600;

/// Default initial SOA serial number
pub const DEFAULT_SOA_SERIAL: u32 = 1;

/// Default SOA refresh interval (1 day)
pub const DEFAULT_SOA_REFRESH_SECS: u32 = 86400;

/// Default SOA retry interval (2 hours)
pub const DEFAULT_SOA_RETRY_SECS: u32 = 7200;

/// Default SOA expire time (~41 days)
pub const DEFAULT_SOA_EXPIRE_SECS: u32 = 3_600_000;

/// Default SOA negative-caching TTL (2 days)
pub const DEFAULT_SOA_NEGATIVE_TTL_SECS: u32 = 172_800;

// ============================================================================
// Cryptokey Defaults
// ============================================================================

/// Default key size in bits for RSA-family cryptokey generation
pub const DEFAULT_RSA_BITS: u32 = 4096;
