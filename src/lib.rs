//! # schemagen
//!
//! **schemagen** reads a relational schema through a live database connection
//! and writes data-access sources (entities, mappers, mapping XML, services,
//! controllers, facades) from templates, one artifact set per table.
//!
//! ## Architecture
//!
//! The library is organized leaf-first:
//!
//! - **[`dialect`]** - Per-database catalog queries and identity detection
//! - **[`naming`]** - Identifier transforms (prefix stripping, camel case)
//! - **[`types`]** - Native column type to semantic type conversion
//! - **[`schema`]** - Connections, drivers and the table/column introspector
//! - **[`generator`]** - Artifact naming, package planning and rendering
//! - **[`config`]** - TOML configuration, environment overrides, starter config
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `schemagen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(schemagen generate)
//!     participant Config as config::load_config
//!     participant Conn as schema::connect
//!     participant Intro as schema::Introspector
//!     participant Engine as generator::RenderingEngine
//!     participant FS as File System
//!
//!     CLI->>Config: load_config("schemagen.toml")
//!     Config-->>CLI: GeneratorConfig (validated)
//!     CLI->>Conn: connect(&data_source)
//!     Conn-->>CLI: Box<dyn SchemaConnection>
//!     CLI->>Intro: load(conn)
//!     Intro->>Conn: table listing query
//!     Intro->>Conn: column query per table
//!     Intro->>Conn: close()
//!     Intro-->>CLI: Catalog { tables, not_found }
//!     CLI->>Engine: batch_output(&tables)
//!     Engine->>FS: create_dir_all + write per planned file
//!     Engine-->>CLI: RunReport
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! schemagen init --db-type mysql
//! $EDITOR schemagen.toml
//! schemagen generate --dry-run
//! schemagen generate
//! ```
//!
//! ## Library Use
//!
//! Any [`schema::SchemaConnection`] works, which keeps the pipeline testable
//! without a database:
//!
//! ```rust,ignore
//! use schemagen::config::load_config;
//! use schemagen::generator::{Generator, MiniJinjaRenderer};
//!
//! let config = load_config("schemagen.toml".as_ref())?;
//! let renderer = MiniJinjaRenderer::new();
//! let mut conn = schemagen::schema::connect(&config.data_source)?;
//! let report = Generator::new(&config, &renderer).run(conn.as_mut())?;
//! ```
//!
//! ## Cargo Features
//!
//! - `mysql` (default) - sqlx MySQL driver
//! - `postgres` (default) - sqlx PostgreSQL driver
//!
//! Oracle and SQL Server have catalog queries but no compiled driver; they can
//! be used through a custom [`schema::SchemaConnection`].

pub mod cli;
pub mod config;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod schema;
pub mod types;

pub use error::GenError;
