//! # CLI Module
//!
//! Command-line interface of the `schemagen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Introspect the configured database and write every planned artifact:
//!
//! ```bash
//! schemagen generate --config schemagen.toml
//! ```
//!
//! Options:
//! - `--config <FILE>` - Generator config (default: `schemagen.toml`)
//! - `--force` - Overwrite existing files
//! - `--open` - Open the output directory afterwards
//! - `--dry-run` - List planned files without writing anything
//!
//! ### `inspect`
//!
//! Print the tables and columns the generator sees, after filtering and naming:
//!
//! ```bash
//! schemagen inspect --config schemagen.toml
//! ```
//!
//! ### `init`
//!
//! Write a commented starter config. An existing file is never overwritten.
//!
//! ```bash
//! schemagen init --db-type postgresql
//! ```
//!
//! ## Global Options
//!
//! - `--log-level <LEVEL>` (`SCHEMAGEN_LOG_LEVEL`)
//! - `--log-format <pretty|json>` (`SCHEMAGEN_LOG_FORMAT`)

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{generate, init, inspect, run, run_cli, Cli, Commands};
