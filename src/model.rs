// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Desired-state documents for the managed resource kinds.
//!
//! Callers describe what they want as a YAML document (zones, record sets) or
//! plain flags (TSIG keys, cryptokeys); this module is the typed form of
//! those descriptions. Every recognized attribute is an explicit field —
//! unknown keys are rejected at parse time instead of being silently
//! ignored — and optional attributes stay `Option` so that "caller did not
//! specify" is distinguishable from "caller specified the default".
//!
//! # Example zone document
//!
//! ```yaml
//! properties:
//!   kind: Native
//!   nameservers:
//!     - ns1.example.
//!   soa:
//!     mname: localhost.
//!     rname: hostmaster.localhost.
//! metadata:
//!   allow_axfr_from: [AUTO-NS]
//!   ixfr: true
//! ```

use std::fmt;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_RRSET_TTL_SECS, DEFAULT_SOA_EXPIRE_SECS, DEFAULT_SOA_NEGATIVE_TTL_SECS,
    DEFAULT_SOA_REFRESH_SECS, DEFAULT_SOA_RETRY_SECS, DEFAULT_SOA_SERIAL, DEFAULT_ZONE_TTL_SECS,
};
use crate::errors::ReconcileError;
use crate::normalize::quoted;

/// Target condition for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ZoneState {
    /// Create the zone if necessary, otherwise converge its configuration.
    Present,
    /// Remove the zone if it exists.
    Absent,
    /// Probe existence without modifying anything.
    Exists,
    /// Send NOTIFY to the zone's slaves (Master/Producer zones).
    Notify,
    /// Retrieve the zone from its master (Slave/Consumer zones).
    Retrieve,
}

/// Target condition for TSIG keys, record sets and cryptokeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ObjectState {
    /// Create or converge the resource.
    Present,
    /// Remove the resource if it exists.
    Absent,
    /// Probe existence without modifying anything.
    Exists,
}

/// Zone kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ZoneKind {
    Native,
    Master,
    Slave,
    Producer,
    Consumer,
}

impl ZoneKind {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "Native",
            Self::Master => "Master",
            Self::Slave => "Slave",
            Self::Producer => "Producer",
            Self::Consumer => "Consumer",
        }
    }

    /// Kinds that hold authoritative data locally and need SOA and NS
    /// records at creation.
    #[must_use]
    pub fn is_primary_style(self) -> bool {
        matches!(self, Self::Native | Self::Master | Self::Producer)
    }

    /// Kinds that replicate from a master list.
    #[must_use]
    pub fn is_secondary_style(self) -> bool {
        matches!(self, Self::Slave | Self::Consumer)
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SOA record fields, used only at zone creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoaSpec {
    /// Primary name server (absolute name).
    pub mname: String,
    /// Responsible party, formatted as a DNS name (absolute).
    pub rname: String,
    /// Initial serial number.
    #[serde(default = "default_soa_serial")]
    pub serial: u32,
    /// Refresh interval in seconds.
    #[serde(default = "default_soa_refresh")]
    pub refresh: u32,
    /// Retry interval in seconds.
    #[serde(default = "default_soa_retry")]
    pub retry: u32,
    /// Expire time in seconds.
    #[serde(default = "default_soa_expire")]
    pub expire: u32,
    /// Negative-caching TTL in seconds.
    #[serde(default = "default_soa_negative_ttl")]
    pub ttl: u32,
}

impl SoaSpec {
    /// Render the record content string the API expects.
    #[must_use]
    pub fn content(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire, self.ttl
        )
    }
}

/// Zone properties from the desired-state document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneProperties {
    /// Zone kind; required whenever properties are given.
    pub kind: ZoneKind,
    /// Account label used for local policy.
    #[serde(default)]
    pub account: Option<String>,
    /// Catalog zone this zone should be a member of (absolute name).
    #[serde(default)]
    pub catalog: Option<String>,
    /// Nameserver names for the NS records created with the zone. Order is
    /// significant: it is the order the NS records are written in.
    #[serde(default)]
    pub nameservers: Option<Vec<String>>,
    /// TTL for the SOA and NS records created with the zone.
    #[serde(default = "default_zone_ttl")]
    pub ttl: u32,
    /// SOA fields; required for primary-style zone creation.
    #[serde(default)]
    pub soa: Option<SoaSpec>,
    /// Additional record sets created with the zone. SOA is not permitted.
    #[serde(default)]
    pub rrsets: Option<Vec<RrsetEntry>>,
    /// Master addresses (Slave and Consumer zones).
    #[serde(default)]
    pub masters: Option<Vec<String>>,
}

/// One record set inside a zone document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RrsetEntry {
    /// Absolute record name.
    pub name: String,
    /// Record type ("A", "MX", ...).
    #[serde(rename = "type")]
    pub rtype: String,
    /// TTL in seconds.
    #[serde(default = "default_rrset_ttl")]
    pub ttl: u32,
    /// The records of the set.
    pub records: Vec<RecordSpec>,
}

/// One resource record in generic (pre-rendered content) form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSpec {
    /// Type-specific content string.
    pub content: String,
    /// Whether the record is disabled.
    #[serde(default)]
    pub disabled: bool,
}

/// SOA-EDIT methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SoaEditKind {
    #[serde(rename = "INCREMENT-WEEKS")]
    IncrementWeeks,
    #[serde(rename = "INCEPTION-EPOCH")]
    InceptionEpoch,
    #[serde(rename = "INCEPTION-INCREMENT")]
    InceptionIncrement,
    #[serde(rename = "EPOCH")]
    Epoch,
    #[serde(rename = "NONE")]
    None,
}

impl SoaEditKind {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IncrementWeeks => "INCREMENT-WEEKS",
            Self::InceptionEpoch => "INCEPTION-EPOCH",
            Self::InceptionIncrement => "INCEPTION-INCREMENT",
            Self::Epoch => "EPOCH",
            Self::None => "NONE",
        }
    }
}

/// SOA-EDIT-API / SOA-EDIT-DNSUPDATE methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SoaEditApiKind {
    #[serde(rename = "DEFAULT")]
    Default,
    #[serde(rename = "INCREASE")]
    Increase,
    #[serde(rename = "EPOCH")]
    Epoch,
    #[serde(rename = "SOA-EDIT")]
    SoaEdit,
    #[serde(rename = "SOA-EDIT-INCREASE")]
    SoaEditIncrease,
}

impl SoaEditApiKind {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Increase => "INCREASE",
            Self::Epoch => "EPOCH",
            Self::SoaEdit => "SOA-EDIT",
            Self::SoaEditIncrease => "SOA-EDIT-INCREASE",
        }
    }
}

/// Zone metadata from the desired-state document.
///
/// Supplying this mapping at all means "replace the whole metadata set":
/// every key left unset here is reset to its default on the server. Omitting
/// the mapping leaves the server's metadata untouched. This full-replace
/// contract is load-bearing for existing automation and must not be relaxed
/// into a sparse patch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneMetadataSpec {
    /// Subnets (or AUTO-NS) from which AXFR requests are accepted.
    #[serde(default)]
    pub allow_axfr_from: Option<Vec<String>>,
    /// Subnets from which DNSUPDATE requests are accepted.
    #[serde(default)]
    pub allow_dnsupdate_from: Option<Vec<String>>,
    /// Addresses receiving NOTIFY for updates.
    #[serde(default)]
    pub also_notify: Option<Vec<String>>,
    /// Rectify record sets after API changes.
    #[serde(default)]
    pub api_rectify: Option<bool>,
    /// TSIG keys validating NOTIFY from masters and signing AXFR/IXFR
    /// requests to them. Only the first key is used by the server.
    #[serde(default)]
    pub axfr_master_tsig: Option<Vec<String>>,
    /// Source address for AXFR and IXFR requests.
    #[serde(default)]
    pub axfr_source: Option<String>,
    /// Forward DNSUPDATE requests to one of the zone's masters.
    #[serde(default)]
    pub forward_dnsupdate: Option<bool>,
    /// Kerberos/GSS principal identifying this server.
    #[serde(default)]
    pub gss_acceptor_principal: Option<String>,
    /// Kerberos/GSS principal required in AXFR requests.
    #[serde(default)]
    pub gss_allow_axfr_principal: Option<String>,
    /// Attempt IXFR when retrieving zone updates.
    #[serde(default)]
    pub ixfr: Option<bool>,
    /// Send NOTIFY to all slaves after a DNSUPDATE.
    #[serde(default)]
    pub notify_dnsupdate: Option<bool>,
    /// NSEC3 narrow mode.
    #[serde(default)]
    pub nsec3narrow: Option<bool>,
    /// NSEC3 parameters.
    #[serde(default)]
    pub nsec3param: Option<String>,
    /// Publish CDNSKEY records of the zone's KSKs.
    #[serde(default)]
    pub publish_cdnskey: Option<bool>,
    /// Signature algorithm numbers for CDS records of the zone's KSKs.
    #[serde(default)]
    pub publish_cds: Option<Vec<String>>,
    /// Re-send NOTIFY to slaves after receiving AXFR from a master.
    /// Three-valued: unset defers to the server-wide setting.
    #[serde(default)]
    pub slave_renotify: Option<bool>,
    /// Serial-editing method when serving the SOA record.
    #[serde(default)]
    pub soa_edit: Option<SoaEditKind>,
    /// Serial-editing method after an API edit.
    #[serde(default)]
    pub soa_edit_api: Option<SoaEditApiKind>,
    /// Serial-editing method after a DNSUPDATE.
    #[serde(default)]
    pub soa_edit_dnsupdate: Option<SoaEditApiKind>,
    /// TSIG keys signing NOTIFY and validating AXFR/IXFR requests.
    /// Only the first key is used by the server.
    #[serde(default)]
    pub tsig_allow_axfr: Option<Vec<String>>,
    /// TSIG keys for which DNSUPDATE requests are accepted.
    #[serde(default)]
    pub tsig_allow_dnsupdate: Option<Vec<String>>,
}

/// Complete zone document: properties plus metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneDoc {
    /// Zone properties; required for creation, optional for updates.
    #[serde(default)]
    pub properties: Option<ZoneProperties>,
    /// Zone metadata; presence triggers the full-replace contract.
    #[serde(default)]
    pub metadata: Option<ZoneMetadataSpec>,
}

impl ZoneDoc {
    /// Parse a zone document from YAML.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the parse failure.
    pub fn from_yaml(text: &str) -> Result<Self, ReconcileError> {
        serde_yaml::from_str(text)
            .map_err(|e| ReconcileError::validation(format!("invalid zone document: {e}")))
    }
}

/// TSIG key algorithms, per RFC 2845 and its updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum TsigAlgorithm {
    #[serde(rename = "hmac-md5")]
    HmacMd5,
    #[serde(rename = "hmac-sha1")]
    HmacSha1,
    #[serde(rename = "hmac-sha224")]
    HmacSha224,
    #[serde(rename = "hmac-sha256")]
    HmacSha256,
    #[serde(rename = "hmac-sha384")]
    HmacSha384,
    #[serde(rename = "hmac-sha512")]
    HmacSha512,
}

impl TsigAlgorithm {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HmacMd5 => "hmac-md5",
            Self::HmacSha1 => "hmac-sha1",
            Self::HmacSha224 => "hmac-sha224",
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha384 => "hmac-sha384",
            Self::HmacSha512 => "hmac-sha512",
        }
    }
}

/// Desired TSIG key attributes.
#[derive(Debug, Clone, Default)]
pub struct TsigKeySpec {
    /// HMAC algorithm; defaults to hmac-md5 at creation, left untouched on
    /// update when unset.
    pub algorithm: Option<TsigAlgorithm>,
    /// Base64-encoded key material; server-generated at creation when unset.
    pub key: Option<String>,
}

/// DNSSEC key roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KeyRole {
    Ksk,
    Zsk,
    Csk,
}

impl KeyRole {
    /// Wire representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ksk => "ksk",
            Self::Zsk => "zsk",
            Self::Csk => "csk",
        }
    }
}

/// Desired cryptokey attributes.
#[derive(Debug, Clone, Default)]
pub struct CryptokeySpec {
    /// Server-assigned key id; targets an existing key when set.
    pub id: Option<u32>,
    /// Key role; required for creation.
    pub keytype: Option<KeyRole>,
    /// Whether the key signs the zone.
    pub active: Option<bool>,
    /// Whether the DNSKEY record is published.
    pub published: Option<bool>,
    /// Algorithm for server-side generation.
    pub algorithm: Option<String>,
    /// Key size in bits for RSA-family generation.
    pub bits: Option<u32>,
    /// DNSKEY record content for import.
    pub dnskey: Option<String>,
    /// Private key material (ISC format) for import.
    pub privatekey: Option<String>,
}

/// Record set document for the rrset command.
///
/// Records are given either in generic form (`type` + `records` with
/// pre-rendered content) or as exactly one typed form (`A`, `MX`, ...); the
/// two are mutually exclusive.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RrsetDoc {
    /// Absolute record name; required for present and absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Record type for the generic form, or a filter for existence probes.
    #[serde(rename = "type", default)]
    pub rtype: Option<String>,
    /// TTL in seconds.
    #[serde(default = "default_rrset_ttl")]
    pub ttl: u32,
    /// Merge semantics: `present` adds the given records to the existing set
    /// and `absent` removes only the given records.
    #[serde(default)]
    pub keep: bool,
    /// Explicit opt-in required to touch the apex NS record set.
    #[serde(default)]
    pub allow_apex_ns: bool,
    /// Generic records (pre-rendered content strings).
    #[serde(default)]
    pub records: Option<Vec<RecordSpec>>,
    /// IPv4 address records.
    #[serde(rename = "A", default)]
    pub a: Option<Vec<AddressRecord>>,
    /// IPv6 address records.
    #[serde(rename = "AAAA", default)]
    pub aaaa: Option<Vec<AddressRecord>>,
    /// Certificate authority authorization records.
    #[serde(rename = "CAA", default)]
    pub caa: Option<Vec<CaaRecord>>,
    /// Canonical name records.
    #[serde(rename = "CNAME", default)]
    pub cname: Option<Vec<CnameRecord>>,
    /// Mail exchange records.
    #[serde(rename = "MX", default)]
    pub mx: Option<Vec<MxRecord>>,
    /// Nameserver delegation records.
    #[serde(rename = "NS", default)]
    pub ns: Option<Vec<NsRecord>>,
    /// Pointer records.
    #[serde(rename = "PTR", default)]
    pub ptr: Option<Vec<PtrRecord>>,
    /// Service location records.
    #[serde(rename = "SRV", default)]
    pub srv: Option<Vec<SrvRecord>>,
    /// SSH fingerprint records.
    #[serde(rename = "SSHFP", default)]
    pub sshfp: Option<Vec<SshfpRecord>>,
    /// TLSA records.
    #[serde(rename = "TLSA", default)]
    pub tlsa: Option<Vec<TlsaRecord>>,
    /// Text records.
    #[serde(rename = "TXT", default)]
    pub txt: Option<Vec<TxtRecord>>,
}

impl Default for RrsetDoc {
    fn default() -> Self {
        Self {
            name: None,
            rtype: None,
            ttl: DEFAULT_RRSET_TTL_SECS,
            keep: false,
            allow_apex_ns: false,
            records: None,
            a: None,
            aaaa: None,
            caa: None,
            cname: None,
            mx: None,
            ns: None,
            ptr: None,
            srv: None,
            sshfp: None,
            tlsa: None,
            txt: None,
        }
    }
}

impl RrsetDoc {
    /// Parse a record set document from YAML.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the parse failure.
    pub fn from_yaml(text: &str) -> Result<Self, ReconcileError> {
        serde_yaml::from_str(text)
            .map_err(|e| ReconcileError::validation(format!("invalid rrset document: {e}")))
    }

    /// Render every typed form present in the document to
    /// `(type, records)` pairs with wire-ready content strings.
    #[must_use]
    pub fn typed_sets(&self) -> Vec<(&'static str, Vec<RecordSpec>)> {
        let mut sets = Vec::new();

        fn push<T: RenderRecord>(
            sets: &mut Vec<(&'static str, Vec<RecordSpec>)>,
            rtype: &'static str,
            records: &Option<Vec<T>>,
        ) {
            if let Some(records) = records {
                sets.push((rtype, records.iter().map(RenderRecord::render).collect()));
            }
        }

        push(&mut sets, "A", &self.a);
        push(&mut sets, "AAAA", &self.aaaa);
        push(&mut sets, "CAA", &self.caa);
        push(&mut sets, "CNAME", &self.cname);
        push(&mut sets, "MX", &self.mx);
        push(&mut sets, "NS", &self.ns);
        push(&mut sets, "PTR", &self.ptr);
        push(&mut sets, "SRV", &self.srv);
        push(&mut sets, "SSHFP", &self.sshfp);
        push(&mut sets, "TLSA", &self.tlsa);
        push(&mut sets, "TXT", &self.txt);
        sets
    }
}

/// A typed record form that can render itself to generic content.
pub trait RenderRecord {
    /// Produce the wire content string plus the disabled flag.
    fn render(&self) -> RecordSpec;
}

/// Address record (A and AAAA).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressRecord {
    pub address: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for AddressRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: self.address.clone(),
            disabled: self.disabled,
        }
    }
}

/// CAA record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaaRecord {
    #[serde(default)]
    pub flags: u8,
    pub tag: String,
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for CaaRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: format!("{} {} {}", self.flags, self.tag, quoted(&self.value)),
            disabled: self.disabled,
        }
    }
}

/// CNAME record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CnameRecord {
    pub cname: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for CnameRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: self.cname.clone(),
            disabled: self.disabled,
        }
    }
}

/// MX record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for MxRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: format!("{} {}", self.preference, self.exchange),
            disabled: self.disabled,
        }
    }
}

/// NS record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NsRecord {
    pub host: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for NsRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: self.host.clone(),
            disabled: self.disabled,
        }
    }
}

/// PTR record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PtrRecord {
    pub ptrdname: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for PtrRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: self.ptrdname.clone(),
            disabled: self.disabled,
        }
    }
}

/// SRV record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SrvRecord {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for SrvRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: format!(
                "{} {} {} {}",
                self.priority, self.weight, self.port, self.target
            ),
            disabled: self.disabled,
        }
    }
}

/// SSHFP record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshfpRecord {
    pub algorithm: u8,
    pub fp_type: u8,
    pub fingerprint: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for SshfpRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: format!("{} {} {}", self.algorithm, self.fp_type, self.fingerprint),
            disabled: self.disabled,
        }
    }
}

/// TLSA record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsaRecord {
    pub usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub cert_assoc_data: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for TlsaRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: format!(
                "{} {} {} {}",
                self.usage, self.selector, self.matching_type, self.cert_assoc_data
            ),
            disabled: self.disabled,
        }
    }
}

/// TXT record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxtRecord {
    pub strings: String,
    #[serde(default)]
    pub disabled: bool,
}

impl RenderRecord for TxtRecord {
    fn render(&self) -> RecordSpec {
        RecordSpec {
            content: quoted(&self.strings),
            disabled: self.disabled,
        }
    }
}

fn default_soa_serial() -> u32 {
    DEFAULT_SOA_SERIAL
}

fn default_soa_refresh() -> u32 {
    DEFAULT_SOA_REFRESH_SECS
}

fn default_soa_retry() -> u32 {
    DEFAULT_SOA_RETRY_SECS
}

fn default_soa_expire() -> u32 {
    DEFAULT_SOA_EXPIRE_SECS
}

fn default_soa_negative_ttl() -> u32 {
    DEFAULT_SOA_NEGATIVE_TTL_SECS
}

fn default_zone_ttl() -> u32 {
    DEFAULT_ZONE_TTL_SECS
}

fn default_rrset_ttl() -> u32 {
    DEFAULT_RRSET_TTL_SECS
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
