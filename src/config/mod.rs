//! Generator configuration.
//!
//! A run is described by one TOML file (`schemagen.toml`). It is deserialized
//! once, overlaid with environment overrides, validated, and then only ever
//! passed around by reference.

mod env;
mod model;
mod starter;

use anyhow::Context;
use std::path::Path;

pub use env::{EnvOverrides, DATABASE_URL_VAR, OUTPUT_DIR_VAR};
pub use model::{
    DataSourceConfig, FileOutputConfig, GeneratorConfig, GlobalConfig, IdType, PackageConfig,
    StrategyConfig, TableFill, TemplateConfig, TypeOverride, BUILTIN_PREFIX,
};
pub use starter::{render_starter_config, write_starter_config, StarterConfigTemplate};

use crate::error::GenError;
use crate::generator::ArtifactKind;

/// File name `schemagen init` writes and `--config` defaults to
pub const DEFAULT_CONFIG_FILE: &str = "schemagen.toml";

/// Read, parse, overlay environment overrides and validate a config file
pub fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
    let mut config = parse_config(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", path.display()))?;
    EnvOverrides::from_env().apply(&mut config);
    config
        .validate()
        .with_context(|| format!("Invalid generator config: {}", path.display()))?;
    Ok(config)
}

/// Parse TOML text without validation or environment overlay
pub fn parse_config(contents: &str) -> anyhow::Result<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(contents)?;
    Ok(config)
}

impl GeneratorConfig {
    /// Pre-flight checks run before any database access.
    ///
    /// # Errors
    ///
    /// [`GenError::Configuration`] for contradictory filters, name patterns
    /// without exactly one `%s`, or incomplete custom outputs.
    pub fn validate(&self) -> Result<(), GenError> {
        if !self.strategy.include.is_empty() && !self.strategy.exclude.is_empty() {
            return Err(GenError::config(
                "strategy.include and strategy.exclude are mutually exclusive; configure only one",
            ));
        }
        for kind in ArtifactKind::ALL {
            if let Some(pattern) = self.global.name_pattern(kind) {
                validate_pattern(kind, pattern)?;
            }
        }
        for (i, output) in self.file_outputs.iter().enumerate() {
            if output.template.trim().is_empty() || output.path.trim().is_empty() {
                return Err(GenError::config(format!(
                    "file_outputs[{i}] needs both a template and a path"
                )));
            }
        }
        Ok(())
    }
}

/// A name pattern must carry exactly one `%s` placeholder
pub(crate) fn validate_pattern(kind: ArtifactKind, pattern: &str) -> Result<(), GenError> {
    match pattern.matches("%s").count() {
        1 => Ok(()),
        n => Err(GenError::config(format!(
            "global.{}_name '{pattern}' must contain exactly one '%s' (found {n})",
            kind.key()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DbType;
    use crate::naming::NamingStrategy;
    use crate::schema::FieldFill;
    use crate::types::SemanticType;

    const SAMPLE: &str = r#"
[data_source]
db_type = "postgres"
url = "postgres://localhost/app"

[global]
output_dir = "out"
author = "dev"
service_name = "%sService"
id_type = "ID_WORKER"

[strategy]
naming = "underline_to_camel"
table_prefix = ["t_"]
include = ["t_user"]
table_fill = [{ field = "update_time", fill = "INSERT_UPDATE" }]

[[packages]]
module_name = "app-dal.src.main.java"
parent = "com.example"
entity = "entity"
mapper = "mapper"

[templates]
controller = "templates/controller.java.j2"

[cfg]
team = "core"

[[file_outputs]]
template = "templates/dto.java.j2"
path = "{output_dir}/dto/{entity}Dto.java"

[[type_overrides]]
contains = "jsonb"
type = "string"
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.data_source.db_type, DbType::Postgresql);
        assert_eq!(config.global.id_type, Some(IdType::IdWorker));
        assert_eq!(config.strategy.naming, NamingStrategy::UnderlineToCamel);
        assert_eq!(config.strategy.column_naming(), NamingStrategy::UnderlineToCamel);
        assert_eq!(config.strategy.fill_for("update_time"), Some(FieldFill::InsertUpdate));
        assert_eq!(config.packages[0].sub_package(ArtifactKind::Entity), Some("entity"));
        assert_eq!(config.packages[0].sub_package(ArtifactKind::Service), None);
        assert_eq!(config.cfg["team"], "core");
        assert_eq!(config.type_overrides[0].ty, SemanticType::String);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_template_defaults() {
        let config = parse_config(SAMPLE).unwrap();
        let templates = &config.templates;
        assert_eq!(templates.reference(ArtifactKind::Entity, false), Some("builtin:entity"));
        assert_eq!(templates.reference(ArtifactKind::Entity, true), Some("builtin:entity_kt"));
        assert_eq!(
            templates.reference(ArtifactKind::Controller, false),
            Some("templates/controller.java.j2")
        );
        assert_eq!(templates.reference(ArtifactKind::Facade, false), None);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.data_source.db_type, DbType::Mysql);
        assert!(config.global.base_result_map);
        assert!(config.packages.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_include_and_exclude_rejected() {
        let mut config = GeneratorConfig::default();
        config.strategy.include = vec!["a".to_string()];
        config.strategy.exclude = vec!["b".to_string()];
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_name_pattern_needs_one_placeholder() {
        let mut config = GeneratorConfig::default();
        config.global.mapper_name = Some("Mapper".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mapper_name"));

        config.global.mapper_name = Some("%s%sMapper".to_string());
        assert!(config.validate().is_err());

        config.global.mapper_name = Some("%sDao".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_db_type_rejected() {
        assert!(parse_config("[data_source]\ndb_type = \"cobol\"\n").is_err());
    }
}
