//! Artifact planning: what each table's artifacts are called and where they go.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::{validate_pattern, GlobalConfig, PackageConfig, TemplateConfig};
use crate::error::GenError;
use crate::naming;
use crate::schema::TableModel;

/// Artifact kinds, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Entity,
    Mapper,
    Xml,
    Service,
    ServiceImpl,
    Controller,
    Facade,
    FacadeImpl,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 8] = [
        ArtifactKind::Entity,
        ArtifactKind::Mapper,
        ArtifactKind::Xml,
        ArtifactKind::Service,
        ArtifactKind::ServiceImpl,
        ArtifactKind::Controller,
        ArtifactKind::Facade,
        ArtifactKind::FacadeImpl,
    ];

    /// Snake-case key used in configuration and template context
    pub fn key(self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::Mapper => "mapper",
            ArtifactKind::Xml => "xml",
            ArtifactKind::Service => "service",
            ArtifactKind::ServiceImpl => "service_impl",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Facade => "facade",
            ArtifactKind::FacadeImpl => "facade_impl",
        }
    }

    /// Name pattern used when none is configured
    pub fn default_pattern(self) -> Option<&'static str> {
        match self {
            ArtifactKind::Entity => Some("%s"),
            ArtifactKind::Mapper | ArtifactKind::Xml => Some("%sMapper"),
            ArtifactKind::Service => Some("I%sService"),
            ArtifactKind::ServiceImpl => Some("%sServiceImpl"),
            ArtifactKind::Controller | ArtifactKind::Facade | ArtifactKind::FacadeImpl => None,
        }
    }

    /// File suffix of the generated source
    pub fn suffix(self, kotlin: bool) -> &'static str {
        match self {
            ArtifactKind::Xml => ".xml",
            _ if kotlin => ".kt",
            _ => ".java",
        }
    }

    fn strips_literal(self) -> bool {
        !matches!(self, ArtifactKind::Entity | ArtifactKind::Mapper | ArtifactKind::Xml)
    }
}

/// Per-kind naming patterns (`%s` is replaced by the entity name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRules {
    patterns: BTreeMap<ArtifactKind, String>,
    strip_literal: Option<String>,
}

impl Default for NameRules {
    fn default() -> Self {
        let patterns = ArtifactKind::ALL
            .iter()
            .filter_map(|&kind| kind.default_pattern().map(|p| (kind, p.to_string())))
            .collect();
        NameRules {
            patterns,
            strip_literal: None,
        }
    }
}

impl NameRules {
    /// Defaults overlaid with the configured patterns
    ///
    /// # Errors
    ///
    /// [`GenError::Configuration`] when a pattern lacks exactly one `%s`.
    pub fn from_config(global: &GlobalConfig) -> Result<Self, GenError> {
        let mut rules = NameRules::default();
        for kind in ArtifactKind::ALL {
            if let Some(pattern) = global.name_pattern(kind) {
                validate_pattern(kind, pattern)?;
                rules.patterns.insert(kind, pattern.to_string());
            }
        }
        rules.strip_literal = global.strip_literal.clone().filter(|s| !s.is_empty());
        Ok(rules)
    }

    /// Name of `kind` for `entity`, or `None` when the kind has no rule
    pub fn name(&self, kind: ArtifactKind, entity: &str) -> Option<String> {
        let name = self.patterns.get(&kind)?.replacen("%s", entity, 1);
        match &self.strip_literal {
            Some(literal) if kind.strips_literal() => Some(name.replace(literal.as_str(), "")),
            _ => Some(name),
        }
    }

    /// Fill in the entity and artifact names of `table` from its base entity name
    pub fn apply(&self, table: &mut TableModel) {
        if let Some(entity) = self.name(ArtifactKind::Entity, &table.entity_name) {
            table.entity_name = entity;
        }
        table.entity_path = naming::lower_first(&table.entity_name);
        let entity = table.entity_name.clone();
        table.mapper_name = self.name(ArtifactKind::Mapper, &entity);
        table.xml_name = self.name(ArtifactKind::Xml, &entity);
        table.service_name = self.name(ArtifactKind::Service, &entity);
        table.service_impl_name = self.name(ArtifactKind::ServiceImpl, &entity);
        table.controller_name = self.name(ArtifactKind::Controller, &entity);
        table.facade_name = self.name(ArtifactKind::Facade, &entity);
        table.facade_impl_name = self.name(ArtifactKind::FacadeImpl, &entity);
    }
}

/// Generated name of `kind` for `table`
pub fn artifact_name(table: &TableModel, kind: ArtifactKind) -> Option<&str> {
    match kind {
        ArtifactKind::Entity => Some(table.entity_name.as_str()).filter(|n| !n.is_empty()),
        ArtifactKind::Mapper => table.mapper_name.as_deref(),
        ArtifactKind::Xml => table.xml_name.as_deref(),
        ArtifactKind::Service => table.service_name.as_deref(),
        ArtifactKind::ServiceImpl => table.service_impl_name.as_deref(),
        ArtifactKind::Controller => table.controller_name.as_deref(),
        ArtifactKind::Facade => table.facade_name.as_deref(),
        ArtifactKind::FacadeImpl => table.facade_impl_name.as_deref(),
    }
}

/// Package and directory of one artifact kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPackage {
    /// Dotted package name (`com.example.entity`)
    pub package: String,
    pub dir: PathBuf,
}

/// Resolve the package and output directory of a sub-package.
///
/// The package is `parent.sub` (or `sub` alone without a parent). The directory is
/// `output_root/<module>/<package>` with dots mapped to path separators. An empty
/// output root means the OS temp directory.
pub fn resolve_path(output_root: &Path, module_name: &str, parent: &str, sub_package: &str) -> PlannedPackage {
    let package = if parent.is_empty() {
        sub_package.to_string()
    } else {
        format!("{parent}.{sub_package}")
    };
    let mut dir = if output_root.as_os_str().is_empty() {
        std::env::temp_dir()
    } else {
        output_root.to_path_buf()
    };
    for segment in module_name.split('.').chain(package.split('.')) {
        if !segment.is_empty() {
            dir.push(segment);
        }
    }
    PlannedPackage { package, dir }
}

/// Where every enabled artifact kind is written, computed once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagePlan {
    entries: BTreeMap<ArtifactKind, PlannedPackage>,
    kotlin: bool,
}

impl PackagePlan {
    /// Plan every kind that has both a sub-package and a registered template.
    /// Later package groups win over earlier ones.
    pub fn build(global: &GlobalConfig, packages: &[PackageConfig], templates: &TemplateConfig) -> Self {
        let root = global.output_root();
        let mut entries = BTreeMap::new();
        for group in packages {
            for kind in ArtifactKind::ALL {
                let Some(sub) = group.sub_package(kind) else {
                    continue;
                };
                if templates.reference(kind, global.kotlin).is_none() {
                    tracing::debug!(kind = kind.key(), "no template registered, kind skipped");
                    continue;
                }
                entries.insert(kind, resolve_path(&root, &group.module_name, &group.parent, sub));
            }
        }
        PackagePlan {
            entries,
            kotlin: global.kotlin,
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&PlannedPackage> {
        self.entries.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Planned kinds with their packages, in emission order
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &PlannedPackage)> {
        self.entries.iter().map(|(kind, planned)| (*kind, planned))
    }

    /// Output file of `kind` for `table`, when the kind is both named and planned
    pub fn file_path(&self, table: &TableModel, kind: ArtifactKind) -> Option<PathBuf> {
        let planned = self.entries.get(&kind)?;
        let name = artifact_name(table, kind)?;
        Some(planned.dir.join(format!("{name}{}", kind.suffix(self.kotlin))))
    }
}
