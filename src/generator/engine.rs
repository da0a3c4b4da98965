//! Batch emission of artifacts under the overwrite policy.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::context::{build_context, today};
use super::plan::{ArtifactKind, PackagePlan};
use super::render::TemplateRenderer;
use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::schema::TableModel;

/// Outcome of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The batch stopped at a render or write failure; earlier files were kept
    CompletedWithErrors,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub status: RunStatus,
    /// Tables the batch was given
    pub tables: usize,
    pub written: Vec<PathBuf>,
    /// Existing files left alone because overwrite is off
    pub skipped: Vec<PathBuf>,
    /// Configured include/exclude entries that matched nothing
    pub not_found: BTreeSet<String>,
    /// The failure that stopped the batch
    pub error: Option<String>,
}

impl RunReport {
    fn new(tables: usize) -> Self {
        RunReport {
            status: RunStatus::Completed,
            tables,
            written: Vec::new(),
            skipped: Vec::new(),
            not_found: BTreeSet::new(),
            error: None,
        }
    }
}

/// One file the batch would produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Native name of the source table
    pub table: String,
    /// Template reference
    pub template: String,
    pub path: PathBuf,
}

/// Renders and writes every planned artifact of every table
pub struct RenderingEngine<'a> {
    config: &'a GeneratorConfig,
    renderer: &'a dyn TemplateRenderer,
    plan: PackagePlan,
    date: String,
    overwrite: bool,
}

impl<'a> RenderingEngine<'a> {
    pub fn new(config: &'a GeneratorConfig, renderer: &'a dyn TemplateRenderer) -> Self {
        let global = &config.global;
        RenderingEngine {
            config,
            renderer,
            plan: PackagePlan::build(global, &config.packages, &config.templates),
            date: global.date.clone().unwrap_or_else(today),
            overwrite: global.file_override,
        }
    }

    /// Override the configured overwrite policy
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn plan(&self) -> &PackagePlan {
        &self.plan
    }

    /// Files for `table`: custom outputs first, then artifact kinds in order
    pub fn planned_files(&self, table: &TableModel) -> Vec<PlannedFile> {
        let global = &self.config.global;
        let mut files: Vec<PlannedFile> = self
            .config
            .file_outputs
            .iter()
            .map(|output| PlannedFile {
                table: table.name.clone(),
                template: output.template.clone(),
                path: expand_output_path(&output.path, table, &global.output_root()),
            })
            .collect();
        for kind in ArtifactKind::ALL {
            let Some(path) = self.plan.file_path(table, kind) else {
                continue;
            };
            let Some(template) = self.config.templates.reference(kind, global.kotlin) else {
                continue;
            };
            files.push(PlannedFile {
                table: table.name.clone(),
                template: template.to_string(),
                path,
            });
        }
        files
    }

    /// Create every planned package directory up front
    pub fn mkdirs(&self) -> Result<(), GenError> {
        for (kind, planned) in self.plan.iter() {
            if !planned.dir.exists() {
                create_dirs(&planned.dir)?;
                debug!(kind = kind.key(), dir = %planned.dir.display(), "created output directory");
            }
        }
        Ok(())
    }

    /// Render every table. The first failure stops the batch and is reported once.
    pub fn batch_output(&self, tables: &[TableModel]) -> RunReport {
        let mut report = RunReport::new(tables.len());
        if let Err(e) = self.emit_all(tables, &mut report) {
            error!(error = %e, "generation stopped, check the configuration");
            report.status = RunStatus::CompletedWithErrors;
            report.error = Some(e.to_string());
        }
        report
    }

    fn emit_all(&self, tables: &[TableModel], report: &mut RunReport) -> Result<(), GenError> {
        for table in tables {
            let context = build_context(self.config, &self.plan, table, &self.date);
            for file in self.planned_files(table) {
                self.emit(&context, &file, report)?;
            }
        }
        Ok(())
    }

    fn emit(&self, context: &Value, file: &PlannedFile, report: &mut RunReport) -> Result<(), GenError> {
        if file.path.exists() && !self.overwrite {
            debug!(path = %file.path.display(), "file exists, skipping");
            report.skipped.push(file.path.clone());
            return Ok(());
        }
        if let Some(parent) = file.path.parent() {
            create_dirs(parent)?;
        }
        let content = self.renderer.render(&file.template, context)?;
        fs::write(&file.path, content).map_err(|source| GenError::Write {
            path: file.path.clone(),
            source,
        })?;
        info!(table = %file.table, path = %file.path.display(), "generated");
        report.written.push(file.path.clone());
        Ok(())
    }
}

/// The one directory-creation primitive: `dir` and all missing ancestors
fn create_dirs(dir: &Path) -> Result<(), GenError> {
    fs::create_dir_all(dir).map_err(|source| {
        warn!(dir = %dir.display(), error = %source, "cannot create directory");
        GenError::Write {
            path: dir.to_path_buf(),
            source,
        }
    })
}

/// Expand a custom output path pattern for `table`. Relative results land under `root`.
pub fn expand_output_path(pattern: &str, table: &TableModel, root: &Path) -> PathBuf {
    let expanded = pattern
        .replace("{output_dir}", &root.to_string_lossy())
        .replace("{entity_path}", &table.entity_path)
        .replace("{entity}", &table.entity_name)
        .replace("{table}", &table.name);
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}
