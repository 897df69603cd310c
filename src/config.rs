// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Connection settings and server-compatibility flags.
//!
//! The management API differs across server versions. Instead of discovering
//! capabilities from the server's API description on every invocation, the
//! supported feature set is explicit configuration: callers running against
//! an older server disable the features it lacks and get local validation
//! errors instead of opaque server rejections.

use std::time::Duration;

use url::Url;

use crate::errors::ReconcileError;

/// How to reach one PowerDNS Authoritative server's management API.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Base URL of the management API (scheme + host + port).
    pub api_url: Url,
    /// API key credential, sent on every request.
    pub api_key: String,
    /// Server instance identifier within the API ("localhost" by default).
    pub server_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Connection {
    /// Build a connection, validating the URL up front.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `api_url` is not an absolute HTTP(S) URL.
    pub fn new(
        api_url: &str,
        api_key: String,
        server_id: String,
        timeout_secs: u64,
    ) -> Result<Self, ReconcileError> {
        let url = Url::parse(api_url)
            .map_err(|e| ReconcileError::validation(format!("invalid api_url '{api_url}': {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ReconcileError::validation(format!(
                "api_url '{api_url}' must use http or https"
            )));
        }
        Ok(Self {
            api_url: url,
            api_key,
            server_id,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Version-specific capability flags for the target server.
#[derive(Debug, Clone)]
pub struct Compat {
    /// Server supports catalog zone membership (4.7.0+).
    pub catalog_zones: bool,
    /// Server supports the Producer and Consumer zone kinds (4.7.0+).
    pub producer_consumer_kinds: bool,
    /// Whether a literal `"0"` in a flag-like metadata value counts as unset.
    ///
    /// Server responses have been inconsistent across versions between
    /// omitting an unset flag and returning an explicit zero; the boundary is
    /// a knob rather than a constant.
    pub falsy_zero: bool,
}

impl Default for Compat {
    fn default() -> Self {
        Self {
            catalog_zones: true,
            producer_consumer_kinds: true,
            falsy_zero: true,
        }
    }
}

impl Compat {
    /// Whether a raw metadata string value represents "unset"/"false".
    ///
    /// Empty strings and the literal `false` are always falsy; `"0"` is
    /// falsy when [`Compat::falsy_zero`] is set.
    #[must_use]
    pub fn is_falsy(&self, raw: &str) -> bool {
        raw.is_empty() || raw == "false" || (self.falsy_zero && raw == "0")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
