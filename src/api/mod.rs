// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed client for the PowerDNS Authoritative management API.
//!
//! All reconcilers go through this module; it owns URL construction, the API
//! key header, JSON bodies, and failure classification. There is no retry
//! logic here: a call either returns a parsed response or a classified
//! [`ReconcileError`], and the caller decides what a failure means.
//!
//! Classification rules:
//! - HTTP 404 on a targeted read is "not found", not an error; the affected
//!   operations return `Option` instead of failing
//! - any other non-2xx status becomes [`ReconcileError::Server`] carrying the
//!   server's message verbatim
//! - connection-level failures become [`ReconcileError::Transport`]

pub mod types;

use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::config::Connection;
use crate::constants::API_KEY_HEADER;
use crate::errors::ReconcileError;

use types::{
    CryptokeyInfo, CryptokeyPayload, MetadataItem, RrsetChanges, TsigKeyInfo, TsigKeyPayload,
    ZoneInfo, ZonePayload, ZoneSummary,
};

/// Client bound to one server instance of one management API endpoint.
#[derive(Debug, Clone)]
pub struct PdnsClient {
    http: HttpClient,
    conn: Connection,
}

impl PdnsClient {
    /// Build a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(conn: Connection) -> Result<Self, ReconcileError> {
        let http = HttpClient::builder()
            .timeout(conn.timeout)
            .build()
            .map_err(|e| ReconcileError::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { http, conn })
    }

    /// Server instance identifier this client addresses.
    #[must_use]
    pub fn server_id(&self) -> &str {
        &self.conn.server_id
    }

    fn url(&self, path: &str) -> String {
        let base = self.conn.api_url.as_str().trim_end_matches('/');
        format!("{base}/api/v1/servers/{}{path}", self.conn.server_id)
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&T>,
    ) -> Result<Response, ReconcileError> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "management API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(API_KEY_HEADER, &self.conn.api_key)
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReconcileError::Transport {
                message: e.to_string(),
            })?;
        Ok(response)
    }

    /// Turn a non-success response into a `Server` error with the server's
    /// message surfaced verbatim.
    async fn check(response: Response) -> Result<Response, ReconcileError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ReconcileError::Server {
            status: status.as_u16(),
            message: extract_error(&body),
        })
    }

    // ------------------------------------------------------------------
    // Zones
    // ------------------------------------------------------------------

    /// List zones, optionally filtered by exact name.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn list_zones(
        &self,
        name: Option<&str>,
    ) -> Result<Vec<ZoneSummary>, ReconcileError> {
        let query: Vec<(&str, &str)> = match name {
            Some(n) => vec![("zone", n)],
            None => vec![],
        };
        let response = self
            .send::<()>(Method::GET, "/zones", &query, None)
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch one zone by id, with or without its record sets.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn get_zone(
        &self,
        zone_id: &str,
        with_rrsets: bool,
    ) -> Result<ZoneInfo, ReconcileError> {
        let rrsets = if with_rrsets { "true" } else { "false" };
        let response = self
            .send::<()>(
                Method::GET,
                &format!("/zones/{zone_id}"),
                &[("rrsets", rrsets)],
                None,
            )
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a zone; the response omits record sets.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn create_zone(&self, payload: &ZonePayload) -> Result<ZoneInfo, ReconcileError> {
        let response = self
            .send(
                Method::POST,
                "/zones",
                &[("rrsets", "false")],
                Some(payload),
            )
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Update mutable zone attributes.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn put_zone(
        &self,
        zone_id: &str,
        payload: &ZonePayload,
    ) -> Result<(), ReconcileError> {
        let response = self
            .send(Method::PUT, &format!("/zones/{zone_id}"), &[], Some(payload))
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Apply record set mutations to a zone.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn patch_zone_rrsets(
        &self,
        zone_id: &str,
        changes: &RrsetChanges,
    ) -> Result<(), ReconcileError> {
        let response = self
            .send(
                Method::PATCH,
                &format!("/zones/{zone_id}"),
                &[],
                Some(changes),
            )
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete a zone.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn delete_zone(&self, zone_id: &str) -> Result<(), ReconcileError> {
        let response = self
            .send::<()>(Method::DELETE, &format!("/zones/{zone_id}"), &[], None)
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Queue NOTIFY messages to the zone's slaves.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn notify_zone(&self, zone_id: &str) -> Result<(), ReconcileError> {
        let response = self
            .send::<()>(Method::PUT, &format!("/zones/{zone_id}/notify"), &[], None)
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Retrieve a slave zone from its master.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn axfr_retrieve_zone(&self, zone_id: &str) -> Result<(), ReconcileError> {
        let response = self
            .send::<()>(
                Method::PUT,
                &format!("/zones/{zone_id}/axfr-retrieve"),
                &[],
                None,
            )
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Zone metadata
    // ------------------------------------------------------------------

    /// List all metadata entries of a zone.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn list_metadata(&self, zone_id: &str) -> Result<Vec<MetadataItem>, ReconcileError> {
        let response = self
            .send::<()>(Method::GET, &format!("/zones/{zone_id}/metadata"), &[], None)
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Replace the values of one metadata kind.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn modify_metadata(
        &self,
        zone_id: &str,
        kind: &str,
        values: Vec<String>,
    ) -> Result<(), ReconcileError> {
        let item = MetadataItem {
            kind: kind.to_string(),
            metadata: values,
        };
        let response = self
            .send(
                Method::PUT,
                &format!("/zones/{zone_id}/metadata/{kind}"),
                &[],
                Some(&item),
            )
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Clear one metadata kind.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn delete_metadata(&self, zone_id: &str, kind: &str) -> Result<(), ReconcileError> {
        let response = self
            .send::<()>(
                Method::DELETE,
                &format!("/zones/{zone_id}/metadata/{kind}"),
                &[],
                None,
            )
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // TSIG keys
    // ------------------------------------------------------------------

    /// List all TSIG keys on the server. The listing omits key material.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn list_tsigkeys(&self) -> Result<Vec<TsigKeyInfo>, ReconcileError> {
        let response = self.send::<()>(Method::GET, "/tsigkeys", &[], None).await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch one TSIG key, including its material.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn get_tsigkey(&self, key_id: &str) -> Result<TsigKeyInfo, ReconcileError> {
        let response = self
            .send::<()>(Method::GET, &format!("/tsigkeys/{key_id}"), &[], None)
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a TSIG key; the server generates material when none is given.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn create_tsigkey(
        &self,
        payload: &TsigKeyPayload,
    ) -> Result<TsigKeyInfo, ReconcileError> {
        let response = self
            .send(Method::POST, "/tsigkeys", &[], Some(payload))
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Update a TSIG key's algorithm and/or material.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn put_tsigkey(
        &self,
        key_id: &str,
        payload: &TsigKeyPayload,
    ) -> Result<TsigKeyInfo, ReconcileError> {
        let response = self
            .send(Method::PUT, &format!("/tsigkeys/{key_id}"), &[], Some(payload))
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a TSIG key.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn delete_tsigkey(&self, key_id: &str) -> Result<(), ReconcileError> {
        let response = self
            .send::<()>(Method::DELETE, &format!("/tsigkeys/{key_id}"), &[], None)
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cryptokeys
    // ------------------------------------------------------------------

    /// List all cryptokeys of a zone. The listing omits private material.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn list_cryptokeys(
        &self,
        zone_id: &str,
    ) -> Result<Vec<CryptokeyInfo>, ReconcileError> {
        let response = self
            .send::<()>(
                Method::GET,
                &format!("/zones/{zone_id}/cryptokeys"),
                &[],
                None,
            )
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch one cryptokey; `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure; a 404 is a
    /// normal negative, not an error.
    pub async fn get_cryptokey(
        &self,
        zone_id: &str,
        key_id: u32,
    ) -> Result<Option<CryptokeyInfo>, ReconcileError> {
        let response = self
            .send::<()>(
                Method::GET,
                &format!("/zones/{zone_id}/cryptokeys/{key_id}"),
                &[],
                None,
            )
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::check(response).await?.json().await?))
    }

    /// Create a cryptokey by generation or import.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn create_cryptokey(
        &self,
        zone_id: &str,
        payload: &CryptokeyPayload,
    ) -> Result<CryptokeyInfo, ReconcileError> {
        let response = self
            .send(
                Method::POST,
                &format!("/zones/{zone_id}/cryptokeys"),
                &[],
                Some(payload),
            )
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Update a cryptokey's active/published flags.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn modify_cryptokey(
        &self,
        zone_id: &str,
        key_id: u32,
        payload: &CryptokeyPayload,
    ) -> Result<(), ReconcileError> {
        let response = self
            .send(
                Method::PUT,
                &format!("/zones/{zone_id}/cryptokeys/{key_id}"),
                &[],
                Some(payload),
            )
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete a cryptokey.
    ///
    /// # Errors
    ///
    /// Returns a classified error on transport or server failure.
    pub async fn delete_cryptokey(
        &self,
        zone_id: &str,
        key_id: u32,
    ) -> Result<(), ReconcileError> {
        let response = self
            .send::<()>(
                Method::DELETE,
                &format!("/zones/{zone_id}/cryptokeys/{key_id}"),
                &[],
                None,
            )
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Pull the message out of the server's error body.
///
/// Error responses are usually `{"error": "..."}`, but some endpoints return
/// a bare string.
fn extract_error(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return message.to_string();
        }
    }
    body.to_string()
}
