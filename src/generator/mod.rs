//! # Generator Module
//!
//! Turns an introspected schema into source files.
//!
//! ## Architecture
//!
//! ```text
//! SchemaConnection → Introspector → PackagePlan → RenderingEngine → files on disk
//! ```
//!
//! 1. **Introspection** - [`crate::schema::Introspector`] lists and models the tables
//! 2. **Planning** - [`PackagePlan`] maps every enabled [`ArtifactKind`] to a
//!    package and directory; [`NameRules`] names each table's artifacts
//! 3. **Rendering** - [`RenderingEngine`] builds a context per table and renders
//!    each planned file through a [`TemplateRenderer`]
//!
//! ## Overwrite Policy
//!
//! Existing files are left alone unless `global.file_override` (or `--force`) is
//! set; in that case they are rewritten in full. Running twice without overwrite
//! writes nothing the second time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemagen::config::load_config;
//! use schemagen::generator::{Generator, MiniJinjaRenderer};
//! use schemagen::schema::connect;
//!
//! let config = load_config("schemagen.toml".as_ref())?;
//! let renderer = MiniJinjaRenderer::new().with_template_dir(config.templates.dir.clone());
//! let mut conn = connect(&config.data_source)?;
//! let report = Generator::new(&config, &renderer).run(conn.as_mut())?;
//! println!("{} files written", report.written.len());
//! ```

mod context;
mod engine;
mod open;
mod plan;
mod render;

pub use context::{build_context, today};
pub use engine::{expand_output_path, PlannedFile, RenderingEngine, RunReport, RunStatus};
pub use open::open_output_dir;
pub use plan::{artifact_name, resolve_path, ArtifactKind, NameRules, PackagePlan, PlannedPackage};
pub use render::{builtin_template, MiniJinjaRenderer, TemplateRenderer};

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::schema::{Catalog, Introspector, SchemaConnection};

/// One full run: introspect, plan, render
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
    renderer: &'a dyn TemplateRenderer,
    overwrite: bool,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig, renderer: &'a dyn TemplateRenderer) -> Self {
        Generator {
            config,
            renderer,
            overwrite: config.global.file_override,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validate, then introspect through `conn`. The connection is closed
    /// exactly once, including when validation fails.
    pub fn introspect<C: SchemaConnection + ?Sized>(&self, conn: &mut C) -> Result<Catalog, GenError> {
        let introspector = match self
            .config
            .validate()
            .and_then(|()| Introspector::from_config(self.config))
        {
            Ok(introspector) => introspector,
            Err(e) => {
                if let Err(close) = conn.close() {
                    warn!(error = %close, "failed to close schema connection");
                }
                return Err(e);
            }
        };
        let catalog = introspector.load(conn)?;
        info!(
            tables = catalog.tables.len(),
            dialect = %introspector.dialect().db_type,
            "schema introspected"
        );
        Ok(catalog)
    }

    /// Introspect and list the files a run would produce, without writing
    pub fn dry_run<C: SchemaConnection + ?Sized>(&self, conn: &mut C) -> Result<(Catalog, Vec<PlannedFile>), GenError> {
        let catalog = self.introspect(conn)?;
        let engine = self.engine();
        let files = catalog
            .tables
            .iter()
            .flat_map(|table| engine.planned_files(table))
            .collect();
        Ok((catalog, files))
    }

    /// Full run. Fatal errors come back as `Err`; render and write failures
    /// end the batch early and show up as [`RunStatus::CompletedWithErrors`].
    pub fn run<C: SchemaConnection + ?Sized>(&self, conn: &mut C) -> Result<RunReport, GenError> {
        let catalog = self.introspect(conn)?;
        let engine = self.engine();
        if engine.plan().is_empty() {
            warn!("no artifact kind has both a package and a template; nothing to generate");
        }
        if let Err(e) = engine.mkdirs() {
            warn!(error = %e, "could not prepare output directories");
        }
        let mut report = engine.batch_output(&catalog.tables);
        report.not_found = catalog.not_found;
        if self.config.global.open {
            open_output_dir(&self.config.global.output_root());
        }
        Ok(report)
    }

    fn engine(&self) -> RenderingEngine<'a> {
        RenderingEngine::new(self.config, self.renderer).with_overwrite(self.overwrite)
    }
}
