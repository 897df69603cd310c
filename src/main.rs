// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};

use pdnsctl::api::PdnsClient;
use pdnsctl::config::{Compat, Connection};
use pdnsctl::constants::{DEFAULT_API_URL, DEFAULT_SERVER_ID, DEFAULT_TIMEOUT_SECS};
use pdnsctl::errors::ReconcileError;
use pdnsctl::model::{
    CryptokeySpec, KeyRole, ObjectState, RrsetDoc, TsigAlgorithm, TsigKeySpec, ZoneDoc, ZoneState,
};
use pdnsctl::reconcilers::{
    reconcile_cryptokey, reconcile_rrsets, reconcile_tsigkey, reconcile_zone,
};
use pdnsctl::report::FailureReport;

/// Environment variable consulted when `--api-key` is not given, so the
/// credential can stay off the process argument list.
const API_KEY_ENV: &str = "PDNSCTL_API_KEY";

#[derive(Debug, Parser)]
#[command(
    name = "pdnsctl",
    version,
    about = "Declarative state reconciler for PowerDNS Authoritative servers"
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ConnectionArgs {
    /// Management API URL
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// API key credential (falls back to PDNSCTL_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Server instance identifier within the management API
    #[arg(long, global = true, default_value = DEFAULT_SERVER_ID)]
    server_id: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Target server lacks catalog zone support (pre-4.7)
    #[arg(long, global = true)]
    no_catalog_zones: bool,

    /// Target server lacks the Producer and Consumer zone kinds (pre-4.7)
    #[arg(long, global = true)]
    no_producer_consumer: bool,

    /// Do not treat a literal "0" metadata value as unset
    #[arg(long, global = true)]
    no_falsy_zero: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage a zone
    Zone {
        /// Zone name
        name: String,

        /// Target condition
        #[arg(long, value_enum, default_value = "present")]
        state: ZoneState,

        /// YAML document with zone properties and metadata
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Manage a TSIG key
    Tsigkey {
        /// Key name
        name: String,

        /// Target condition
        #[arg(long, value_enum, default_value = "present")]
        state: ObjectState,

        /// Message digest algorithm (defaults to hmac-md5 at creation)
        #[arg(long, value_enum)]
        algorithm: Option<TsigAlgorithm>,

        /// Base64-encoded key material (server-generated when omitted)
        #[arg(long)]
        key: Option<String>,
    },

    /// Manage record sets within a zone
    Rrset {
        /// Owning zone name
        zone: String,

        /// Target condition
        #[arg(long, value_enum, default_value = "present")]
        state: ObjectState,

        /// YAML document describing the record sets
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Manage a DNSSEC cryptokey of a zone
    Cryptokey {
        /// Owning zone name
        zone: String,

        /// Target condition
        #[arg(long, value_enum, default_value = "present")]
        state: ObjectState,

        /// Server-assigned key id (targets an existing key)
        #[arg(long)]
        id: Option<u32>,

        /// Key role
        #[arg(long, value_enum)]
        keytype: Option<KeyRole>,

        /// Whether the key signs the zone
        #[arg(long)]
        active: Option<bool>,

        /// Whether the DNSKEY record is published
        #[arg(long)]
        published: Option<bool>,

        /// Algorithm for server-side key generation
        #[arg(long)]
        algorithm: Option<String>,

        /// Key size in bits (RSA variants)
        #[arg(long)]
        bits: Option<u32>,

        /// DNSKEY record content for import
        #[arg(long)]
        dnskey: Option<String>,

        /// File holding the private key material (ISC format) for import
        #[arg(long)]
        privatekey_file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Every failure becomes a structured record on stdout; the caller always
    // receives well-formed JSON.
    match runtime.block_on(run(cli)) {
        Ok(report) => {
            print_json(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(class = err.class(), "reconciliation failed: {err}");
            let failure = FailureReport::from(&err);
            match serde_json::to_value(&failure) {
                Ok(value) => print_json(&value),
                Err(_) => println!("{{\"changed\": false}}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// One invocation is a fixed, sequential call flow; a single-threaded
/// runtime is all it needs.
fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")
}

/// Logging goes to stderr so stdout carries nothing but the result record.
///
/// Respects RUST_LOG for the filter (default `info`) and RUST_LOG_FORMAT=json
/// for JSON output.
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .init();
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{{\"changed\": false}}"),
    }
}

async fn run(cli: Cli) -> Result<serde_json::Value, ReconcileError> {
    let api_key = cli
        .connection
        .api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .ok_or_else(|| {
            ReconcileError::validation(format!(
                "an API key is required: pass --api-key or set {API_KEY_ENV}"
            ))
        })?;

    let conn = Connection::new(
        &cli.connection.api_url,
        api_key,
        cli.connection.server_id.clone(),
        cli.connection.timeout_secs,
    )?;
    let compat = Compat {
        catalog_zones: !cli.connection.no_catalog_zones,
        producer_consumer_kinds: !cli.connection.no_producer_consumer,
        falsy_zero: !cli.connection.no_falsy_zero,
    };
    let client = PdnsClient::new(conn)?;
    debug!(server_id = client.server_id(), "client ready");

    match cli.command {
        Command::Zone { name, state, file } => {
            let doc = match file {
                Some(path) => ZoneDoc::from_yaml(&read_document(&path)?)?,
                None => ZoneDoc::default(),
            };
            let report = reconcile_zone(&client, &compat, &name, state, &doc).await?;
            to_json(&report)
        }
        Command::Tsigkey {
            name,
            state,
            algorithm,
            key,
        } => {
            let spec = TsigKeySpec { algorithm, key };
            let report = reconcile_tsigkey(&client, &name, state, &spec).await?;
            to_json(&report)
        }
        Command::Rrset { zone, state, file } => {
            let doc = match file {
                Some(path) => RrsetDoc::from_yaml(&read_document(&path)?)?,
                None => RrsetDoc::default(),
            };
            let report = reconcile_rrsets(&client, &zone, state, &doc).await?;
            to_json(&report)
        }
        Command::Cryptokey {
            zone,
            state,
            id,
            keytype,
            active,
            published,
            algorithm,
            bits,
            dnskey,
            privatekey_file,
        } => {
            let privatekey = match privatekey_file {
                Some(path) => Some(read_document(&path)?),
                None => None,
            };
            let spec = CryptokeySpec {
                id,
                keytype,
                active,
                published,
                algorithm,
                bits,
                dnskey,
                privatekey,
            };
            let report = reconcile_cryptokey(&client, &zone, state, &spec).await?;
            to_json(&report)
        }
    }
}

fn read_document(path: &Path) -> Result<String, ReconcileError> {
    std::fs::read_to_string(path).map_err(|e| {
        ReconcileError::validation(format!("cannot read '{}': {e}", path.display()))
    })
}

fn to_json<T: serde::Serialize>(report: &T) -> Result<serde_json::Value, ReconcileError> {
    serde_json::to_value(report).map_err(|e| ReconcileError::Validation(e.to_string()))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
