// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for reconciliation against the PowerDNS management API.
//!
//! Every failure surfaced by the reconcilers falls into one of four classes:
//!
//! - [`ReconcileError::Validation`] - the desired description failed a locally
//!   checked precondition; the server was never contacted
//! - [`ReconcileError::NotFound`] - a targeted resource does not exist where
//!   an operation required it to (update, delete, notify, retrieve)
//! - [`ReconcileError::Server`] - the API returned a failure status; the
//!   server's message is surfaced verbatim
//! - [`ReconcileError::Transport`] - the API could not be reached at all
//!
//! No retries happen at this layer; a call either returns a result or one of
//! these errors, and the invocation boundary turns the error into a
//! structured failure record.

use thiserror::Error;

/// Failures surfaced by reconcilers and the API client.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The desired description fails a precondition checked entirely locally.
    ///
    /// Examples: missing required property for creation, a forbidden RRset
    /// type, malformed base64 key material. No API call is attempted.
    #[error("{0}")]
    Validation(String),

    /// A targeted resource does not exist when an operation required it.
    ///
    /// An `exists` probe and `absent` against a missing resource are normal
    /// negatives and never produce this error.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// Resource kind ("zone", "TSIG key", "RRset", "cryptokey")
        kind: &'static str,
        /// Identifier the caller supplied
        name: String,
    },

    /// The API call returned a non-success status.
    ///
    /// The message is the server's response body, verbatim.
    #[error("API returned {status}: {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Server-provided error message
        message: String,
    },

    /// Connection-level failure reaching the API.
    #[error("failed to reach API: {message}")]
    Transport {
        /// Reason for the connection failure
        message: String,
    },
}

impl ReconcileError {
    /// Stable machine-readable class name, used in failure records.
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Server { .. } => "ServerError",
            Self::Transport { .. } => "TransportError",
        }
    }

    /// HTTP status of a server failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Shorthand for a [`ReconcileError::Validation`] with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<reqwest::Error> for ReconcileError {
    fn from(err: reqwest::Error) -> Self {
        // A status error here means the body was already consumed elsewhere;
        // classification by status happens in the client, which reads the
        // body before constructing a Server error.
        if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
