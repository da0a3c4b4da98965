use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::GenError;
use crate::types::SemanticType;

/// Auto-fill rule attached to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldFill {
    /// Filled when the row is inserted
    Insert,
    /// Filled when the row is updated
    Update,
    /// Filled on insert and on update
    InsertUpdate,
}

/// One column of a [`TableModel`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Native column name
    pub name: String,
    /// Native type string as reported by the catalog
    pub native_type: String,
    /// Converted type
    pub column_type: SemanticType,
    /// Type name used in generated sources (derived from `column_type`)
    pub property_type: String,
    /// Derived property name
    pub property_name: String,
    /// `property_name` with a capitalized first character
    pub capital_name: String,
    /// Primary key (at most one per table)
    pub key_flag: bool,
    /// Value generated by the database on insert
    pub key_identity_flag: bool,
    pub comment: Option<String>,
    pub fill: Option<FieldFill>,
    /// An explicit column annotation must be emitted
    pub convert: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, native_type: impl Into<String>, column_type: SemanticType) -> Self {
        Field {
            name: name.into(),
            native_type: native_type.into(),
            column_type,
            property_type: column_type.type_name().to_string(),
            property_name: String::new(),
            capital_name: String::new(),
            key_flag: false,
            key_identity_flag: false,
            comment: None,
            fill: None,
            convert: false,
        }
    }
}

/// In-memory model of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableModel {
    /// Native table name
    pub name: String,
    pub comment: Option<String>,
    /// An explicit table-name annotation must be emitted
    pub convert: bool,
    pub entity_name: String,
    /// Entity name with a lower-cased first character
    pub entity_path: String,
    pub mapper_name: Option<String>,
    pub xml_name: Option<String>,
    pub service_name: Option<String>,
    pub service_impl_name: Option<String>,
    pub controller_name: Option<String>,
    pub facade_name: Option<String>,
    pub facade_impl_name: Option<String>,
    /// Generated fields, in catalog order
    pub fields: Vec<Field>,
    /// Columns inherited from the configured super entity
    pub common_fields: Vec<Field>,
    /// Imports the entity source needs
    pub import_packages: BTreeSet<String>,
    /// Comma-separated native column names of `fields`
    pub field_names: String,
}

impl TableModel {
    pub fn new(name: impl Into<String>, comment: Option<String>) -> Self {
        TableModel {
            name: name.into(),
            comment,
            convert: false,
            entity_name: String::new(),
            entity_path: String::new(),
            mapper_name: None,
            xml_name: None,
            service_name: None,
            service_impl_name: None,
            controller_name: None,
            facade_name: None,
            facade_impl_name: None,
            fields: Vec::new(),
            common_fields: Vec::new(),
            import_packages: BTreeSet::new(),
            field_names: String::new(),
        }
    }

    /// Attach loaded columns, collecting type imports and the column list
    pub fn set_fields(&mut self, fields: Vec<Field>, common_fields: Vec<Field>) {
        for field in &fields {
            if let Some(import) = field.column_type.import() {
                self.import_packages.insert(import.to_string());
            }
        }
        self.field_names = fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.fields = fields;
        self.common_fields = common_fields;
    }

    /// The primary-key field, if any
    pub fn key_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.key_flag)
    }
}

/// Which tables a run covers. Include and exclude are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    #[default]
    All,
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl FilterPolicy {
    /// Build from raw configuration lists
    ///
    /// # Errors
    ///
    /// [`GenError::Configuration`] when both lists are non-empty.
    pub fn from_lists(include: &[String], exclude: &[String]) -> Result<Self, GenError> {
        match (include.is_empty(), exclude.is_empty()) {
            (false, false) => Err(GenError::config(
                "strategy.include and strategy.exclude are mutually exclusive; configure only one",
            )),
            (false, true) => Ok(FilterPolicy::Include(include.to_vec())),
            (true, false) => Ok(FilterPolicy::Exclude(exclude.to_vec())),
            (true, true) => Ok(FilterPolicy::All),
        }
    }

    /// Configured names, empty for [`FilterPolicy::All`]
    pub fn names(&self) -> &[String] {
        match self {
            FilterPolicy::All => &[],
            FilterPolicy::Include(names) | FilterPolicy::Exclude(names) => names,
        }
    }
}
