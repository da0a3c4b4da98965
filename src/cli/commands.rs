use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{self, write_starter_config, GeneratorConfig, DEFAULT_CONFIG_FILE};
use crate::dialect::DbType;
use crate::generator::{Generator, MiniJinjaRenderer, RunStatus};
use crate::logging::{init_logging, LogConfig, LogFormat};
use crate::schema::{self, Catalog, SchemaConnection};

/// Command-line interface for schemagen
///
/// Introspects a database schema and renders data-access sources from templates.
#[derive(Parser, Debug)]
#[command(name = "schemagen", version)]
#[command(about = "Generate entity, mapper, service and controller sources from a database schema", long_about = None)]
pub struct Cli {
    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "SCHEMAGEN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: pretty or json
    #[arg(long, global = true, env = "SCHEMAGEN_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Introspect the schema and write every planned artifact
    Generate {
        /// Path to the generator config (TOML)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Open the output directory when done
        #[arg(long, default_value_t = false)]
        open: bool,

        /// Introspect and list planned files without writing anything
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the tables and columns the generator would see
    Inspect {
        /// Path to the generator config (TOML)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write a starter config (never overwrites)
    Init {
        /// Where to write the config
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Database kind written into the starter config
        #[arg(long, default_value = "mysql")]
        db_type: String,
    },
}

impl Cli {
    /// Logging settings from the environment, overridden by flags
    pub fn log_config(&self) -> LogConfig {
        let mut log = LogConfig::from_env();
        if let Some(level) = &self.log_level {
            log.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            log.format = LogFormat::parse(format);
        }
        log
    }
}

/// Parse arguments, set up logging and run the selected command
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_config())?;
    run(cli)
}

/// Run a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            force,
            open,
            dry_run,
        } => {
            let mut cfg = config::load_config(&config)?;
            cfg.global.open |= open;
            let mut conn = schema::connect(&cfg.data_source)
                .with_context(|| format!("Failed to connect to {}", cfg.data_source.db_type))?;
            generate(&cfg, conn.as_mut(), force, dry_run)
        }
        Commands::Inspect { config } => {
            let cfg = config::load_config(&config)?;
            let mut conn = schema::connect(&cfg.data_source)
                .with_context(|| format!("Failed to connect to {}", cfg.data_source.db_type))?;
            inspect(&cfg, conn.as_mut())
        }
        Commands::Init { output, db_type } => init(&output, &db_type),
    }
}

/// Run (or dry-run) generation over an open connection
pub fn generate(
    config: &GeneratorConfig,
    conn: &mut dyn SchemaConnection,
    force: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let renderer = MiniJinjaRenderer::new().with_template_dir(config.templates.dir.clone());
    let generator = Generator::new(config, &renderer).with_overwrite(force || config.global.file_override);

    if dry_run {
        let (catalog, files) = generator.dry_run(conn)?;
        print_not_found(&catalog);
        for file in &files {
            let marker = if file.path.exists() { "exists" } else { "new" };
            println!("{marker:>6}  {}  ({})", file.path.display(), file.template);
        }
        println!("🔍 Dry run: {} files planned for {} tables", files.len(), catalog.tables.len());
        return Ok(());
    }

    let report = generator.run(conn)?;
    for table in &report.not_found {
        println!("⚠️  Table not found: {table}");
    }
    println!(
        "✅ {} tables: {} files written, {} skipped",
        report.tables,
        report.written.len(),
        report.skipped.len()
    );
    if report.status == RunStatus::CompletedWithErrors {
        bail!(
            "generation completed with errors: {}",
            report.error.unwrap_or_default()
        );
    }
    Ok(())
}

/// Introspect and print the model
pub fn inspect(config: &GeneratorConfig, conn: &mut dyn SchemaConnection) -> anyhow::Result<()> {
    let renderer = MiniJinjaRenderer::new();
    let catalog = Generator::new(config, &renderer).introspect(conn)?;
    print_not_found(&catalog);
    for table in &catalog.tables {
        println!(
            "{} → {}{}",
            table.name,
            table.entity_name,
            table
                .comment
                .as_deref()
                .map(|c| format!("  -- {c}"))
                .unwrap_or_default()
        );
        for field in table.common_fields.iter().chain(&table.fields) {
            let mut flags = Vec::new();
            if field.key_flag {
                flags.push("PK");
            }
            if field.key_identity_flag {
                flags.push("identity");
            }
            if table.common_fields.contains(field) {
                flags.push("inherited");
            }
            println!(
                "    {:<24} {:<20} {:<10} {:<20} {}",
                field.name,
                field.native_type,
                field.column_type,
                field.property_name,
                flags.join(",")
            );
        }
    }
    Ok(())
}

fn print_not_found(catalog: &Catalog) {
    for table in &catalog.not_found {
        println!("⚠️  Table not found: {table}");
    }
}

/// Write the starter config unless the file already exists
pub fn init(output: &Path, db_type: &str) -> anyhow::Result<()> {
    let db_type: DbType = serde_json::from_value(serde_json::Value::from(db_type))
        .with_context(|| format!("Unknown database type: {db_type}"))?;
    if write_starter_config(output, db_type)? {
        println!("✅ Wrote starter config → {}", output.display());
    } else {
        println!("⚠️  Skipping existing config file: {}", output.display());
    }
    Ok(())
}
