// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for CLI argument parsing.

use clap::Parser;

use super::{Cli, Command};
use pdnsctl::model::{ObjectState, ZoneState};

#[test]
fn test_zone_defaults_to_present() {
    let cli = Cli::try_parse_from(["pdnsctl", "zone", "d1.example."]).expect("args parse");
    match cli.command {
        Command::Zone { name, state, file } => {
            assert_eq!(name, "d1.example.");
            assert_eq!(state, ZoneState::Present);
            assert!(file.is_none());
        }
        _ => panic!("expected zone subcommand"),
    }
    assert_eq!(cli.connection.api_url, "http://localhost:8081");
    assert_eq!(cli.connection.server_id, "localhost");
}

#[test]
fn test_zone_state_notify_parses() {
    let cli = Cli::try_parse_from(["pdnsctl", "zone", "d1.example.", "--state", "notify"])
        .expect("args parse");
    match cli.command {
        Command::Zone { state, .. } => assert_eq!(state, ZoneState::Notify),
        _ => panic!("expected zone subcommand"),
    }
}

#[test]
fn test_global_connection_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pdnsctl",
        "tsigkey",
        "k1",
        "--state",
        "exists",
        "--api-key",
        "foobar",
        "--api-url",
        "http://pdns.server.example:80",
    ])
    .expect("args parse");
    assert_eq!(cli.connection.api_key.as_deref(), Some("foobar"));
    assert_eq!(cli.connection.api_url, "http://pdns.server.example:80");
    match cli.command {
        Command::Tsigkey { state, .. } => assert_eq!(state, ObjectState::Exists),
        _ => panic!("expected tsigkey subcommand"),
    }
}

#[test]
fn test_tsigkey_algorithm_value_enum() {
    let cli = Cli::try_parse_from([
        "pdnsctl",
        "tsigkey",
        "k3",
        "--algorithm",
        "hmac-sha256",
        "--key",
        "c2VjcmV0",
    ])
    .expect("args parse");
    match cli.command {
        Command::Tsigkey { algorithm, key, .. } => {
            assert_eq!(
                algorithm.map(|a| a.as_str().to_string()).as_deref(),
                Some("hmac-sha256")
            );
            assert_eq!(key.as_deref(), Some("c2VjcmV0"));
        }
        _ => panic!("expected tsigkey subcommand"),
    }
}

#[test]
fn test_tsigkey_rejects_unknown_algorithm() {
    let result = Cli::try_parse_from(["pdnsctl", "tsigkey", "k3", "--algorithm", "hmac-sha999"]);
    assert!(result.is_err());
}

#[test]
fn test_cryptokey_bool_flags_take_values() {
    let cli = Cli::try_parse_from([
        "pdnsctl",
        "cryptokey",
        "crypto.example.",
        "--id",
        "1",
        "--active",
        "true",
        "--published",
        "false",
    ])
    .expect("args parse");
    match cli.command {
        Command::Cryptokey {
            id,
            active,
            published,
            ..
        } => {
            assert_eq!(id, Some(1));
            assert_eq!(active, Some(true));
            assert_eq!(published, Some(false));
        }
        _ => panic!("expected cryptokey subcommand"),
    }
}

#[test]
fn test_compat_flags_default_off() {
    let cli = Cli::try_parse_from(["pdnsctl", "zone", "d1.example."]).expect("args parse");
    assert!(!cli.connection.no_catalog_zones);
    assert!(!cli.connection.no_producer_consumer);
    assert!(!cli.connection.no_falsy_zero);
}

#[test]
fn test_read_document_missing_file_is_validation_error() {
    let err = super::read_document(std::path::Path::new("/nonexistent/zone.yaml"))
        .expect_err("missing file must fail");
    assert_eq!(err.class(), "ValidationError");
}

#[test]
fn test_read_document_round_trips_through_yaml() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "properties:\n  kind: Slave\n  masters: [1.1.1.1]\n").expect("write doc");

    let text = super::read_document(file.path()).expect("file reads");
    let doc = pdnsctl::model::ZoneDoc::from_yaml(&text).expect("doc parses");
    let props = doc.properties.expect("properties present");
    assert!(props.kind.is_secondary_style());
}
