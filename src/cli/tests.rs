//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cli::{Cli, Commands};
use crate::logging::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["schemagen", "generate"]).unwrap();
    match cli.command {
        Commands::Generate {
            config,
            force,
            open,
            dry_run,
        } => {
            assert_eq!(config, PathBuf::from("schemagen.toml"));
            assert!(!force);
            assert!(!open);
            assert!(!dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_with_flags() {
    let cli = Cli::try_parse_from([
        "schemagen",
        "generate",
        "--config",
        "conf/app.toml",
        "--force",
        "--open",
        "--dry-run",
    ])
    .unwrap();
    match cli.command {
        Commands::Generate {
            config,
            force,
            open,
            dry_run,
        } => {
            assert_eq!(config, PathBuf::from("conf/app.toml"));
            assert!(force);
            assert!(open);
            assert!(dry_run);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_inspect_command() {
    let cli = Cli::try_parse_from(["schemagen", "inspect", "-c", "x.toml"]).unwrap();
    match cli.command {
        Commands::Inspect { config } => assert_eq!(config, PathBuf::from("x.toml")),
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_init_command() {
    let cli = Cli::try_parse_from(["schemagen", "init", "--output", "out.toml", "--db-type", "postgres"]).unwrap();
    match cli.command {
        Commands::Init { output, db_type } => {
            assert_eq!(output, PathBuf::from("out.toml"));
            assert_eq!(db_type, "postgres");
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn test_global_log_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "schemagen",
        "inspect",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .unwrap();
    let log = cli.log_config();
    assert_eq!(log.log_level, "debug");
    assert_eq!(log.format, LogFormat::Json);
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["schemagen", "serve"]).is_err());
}

#[test]
fn test_init_writes_then_keeps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemagen.toml");
    crate::cli::init(&path, "postgresql").unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    assert!(first.contains("db_type = \"postgresql\""));
    std::fs::write(&path, "# edited").unwrap();
    crate::cli::init(&path, "mysql").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited");
}

#[test]
fn test_init_rejects_unknown_db_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemagen.toml");
    assert!(crate::cli::init(&path, "cobol").is_err());
    assert!(!path.exists());
}
