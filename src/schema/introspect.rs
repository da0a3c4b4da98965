use std::collections::BTreeSet;

use tracing::{debug, error, info, warn};

use super::{CatalogRow, Field, FilterPolicy, SchemaConnection, TableModel};
use crate::config::{GeneratorConfig, IdType, StrategyConfig};
use crate::dialect::Dialect;
use crate::error::GenError;
use crate::generator::NameRules;
use crate::naming;
use crate::types::{SemanticType, TypeConverter};

const TABLE_FIELD_ANNOTATION: &str = "com.baomidou.mybatisplus.annotations.TableField";
const TABLE_ID_ANNOTATION: &str = "com.baomidou.mybatisplus.annotations.TableId";
const ID_TYPE_IMPORT: &str = "com.baomidou.mybatisplus.enums.IdType";
const FIELD_FILL_IMPORT: &str = "com.baomidou.mybatisplus.enums.FieldFill";
const VERSION_ANNOTATION: &str = "com.baomidou.mybatisplus.annotations.Version";
const TABLE_LOGIC_ANNOTATION: &str = "com.baomidou.mybatisplus.annotations.TableLogic";
const SERIALIZABLE_IMPORT: &str = "java.io.Serializable";

/// Result of [`Introspector::load_tables`]
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Selected tables, fully processed
    pub tables: Vec<TableModel>,
    /// Include/exclude entries that matched no listed table
    pub not_found: BTreeSet<String>,
}

/// Builds [`TableModel`]s from a live schema
#[derive(Debug)]
pub struct Introspector<'a> {
    dialect: &'static Dialect,
    converter: TypeConverter,
    strategy: &'a StrategyConfig,
    schema: Option<String>,
    id_type: Option<IdType>,
    names: NameRules,
}

impl<'a> Introspector<'a> {
    /// Introspector with default artifact name rules and no schema override
    pub fn new(dialect: &'static Dialect, converter: TypeConverter, strategy: &'a StrategyConfig) -> Self {
        Introspector {
            dialect,
            converter,
            strategy,
            schema: None,
            id_type: None,
            names: NameRules::default(),
        }
    }

    /// Wire dialect, type overrides, name rules and schema from a full configuration
    ///
    /// # Errors
    ///
    /// [`GenError::Configuration`] for malformed name patterns.
    pub fn from_config(config: &'a GeneratorConfig) -> Result<Self, GenError> {
        let dialect = Dialect::for_db_type(config.data_source.db_type);
        let rules = config
            .type_overrides
            .iter()
            .map(|o| (o.contains.clone(), o.ty))
            .collect();
        let converter = TypeConverter::new(dialect.type_convert).with_rules(rules);
        Ok(Introspector::new(dialect, converter, &config.strategy)
            .with_schema(config.data_source.schema_name.clone())
            .with_id_type(config.global.id_type)
            .with_name_rules(NameRules::from_config(&config.global)?))
    }

    pub fn with_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema.filter(|s| !s.is_empty());
        self
    }

    pub fn with_id_type(mut self, id_type: Option<IdType>) -> Self {
        self.id_type = id_type;
        self
    }

    pub fn with_name_rules(mut self, names: NameRules) -> Self {
        self.names = names;
        self
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    /// [`Introspector::load_tables`] with the include/exclude lists of the strategy
    pub fn load<C: SchemaConnection + ?Sized>(&self, conn: &mut C) -> Result<Catalog, GenError> {
        self.load_tables(conn, &self.strategy.include, &self.strategy.exclude)
    }

    /// List, filter and fully process the tables of the schema.
    ///
    /// The connection is closed exactly once before returning, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`GenError::Configuration`] when both lists are non-empty (no query is issued)
    /// - [`GenError::SchemaAccess`] when the table listing fails
    pub fn load_tables<C: SchemaConnection + ?Sized>(
        &self,
        conn: &mut C,
        include: &[String],
        exclude: &[String],
    ) -> Result<Catalog, GenError> {
        let result = FilterPolicy::from_lists(include, exclude)
            .and_then(|policy| self.collect_tables(conn, &policy));
        if let Err(e) = conn.close() {
            warn!(error = %e, "failed to close schema connection");
        }
        result
    }

    fn collect_tables<C: SchemaConnection + ?Sized>(
        &self,
        conn: &mut C,
        policy: &FilterPolicy,
    ) -> Result<Catalog, GenError> {
        let query = self.dialect.tables_query(self.schema.as_deref(), policy);
        debug!(sql = %query.sql, params = ?query.params, "listing tables");
        let rows = conn.query(&query).map_err(|e| {
            error!(error = %e, "table listing failed");
            GenError::SchemaAccess { message: e.message }
        })?;
        if rows.is_empty() {
            info!(schema = ?self.schema, "empty schema: table listing returned no rows");
        }

        let mut listing = Vec::with_capacity(rows.len());
        for row in &rows {
            match row.get(self.dialect.table_name).filter(|n| !n.is_empty()) {
                Some(name) => {
                    let comment = row
                        .get(self.dialect.table_comment)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string);
                    listing.push(TableModel::new(name, comment));
                }
                None => info!("empty schema: listing row without a table name"),
            }
        }

        let (selected, not_found) = self.select(listing, policy);
        if !not_found.is_empty() {
            warn!(tables = ?not_found, "configured tables not found in schema");
        }

        let mut tables = Vec::with_capacity(selected.len());
        for mut table in selected {
            let (fields, common) = match self.load_columns(conn, &table.name) {
                Ok(loaded) => loaded,
                Err(e) => {
                    error!(table = %table.name, error = %e, "column load failed, generating without fields");
                    (Vec::new(), Vec::new())
                }
            };
            table.set_fields(fields, common);
            self.process_table(&mut table);
            tables.push(table);
        }
        Ok(Catalog { tables, not_found })
    }

    /// Apply the filter policy to the listing and collect unmatched entries
    fn select(&self, listing: Vec<TableModel>, policy: &FilterPolicy) -> (Vec<TableModel>, BTreeSet<String>) {
        let matches = |entry: &str| listing.iter().any(|t| t.name.eq_ignore_ascii_case(entry));
        let track = match policy {
            FilterPolicy::All => false,
            FilterPolicy::Include(_) => true,
            // pushed-down exclusion already removed the rows it would match
            FilterPolicy::Exclude(_) => !self.dialect.pushes_filter,
        };
        let not_found: BTreeSet<String> = if track {
            policy
                .names()
                .iter()
                .filter(|entry| !matches(entry))
                .cloned()
                .collect()
        } else {
            BTreeSet::new()
        };

        let selected = match policy {
            FilterPolicy::All => listing,
            FilterPolicy::Include(names) => {
                let mut out: Vec<TableModel> = Vec::new();
                for entry in names {
                    for table in listing.iter().filter(|t| t.name.eq_ignore_ascii_case(entry)) {
                        if !out.iter().any(|t| t.name == table.name) {
                            out.push(table.clone());
                        }
                    }
                }
                out
            }
            FilterPolicy::Exclude(names) => listing
                .into_iter()
                .filter(|t| !names.iter().any(|n| n.eq_ignore_ascii_case(&t.name)))
                .collect(),
        };
        (selected, not_found)
    }

    /// Load the columns of `table`, returning `(fields, common_fields)`.
    ///
    /// # Errors
    ///
    /// [`GenError::ColumnAccess`] when the column query fails.
    pub fn load_columns<C: SchemaConnection + ?Sized>(
        &self,
        conn: &mut C,
        table: &str,
    ) -> Result<(Vec<Field>, Vec<Field>), GenError> {
        let query = self.dialect.columns_query(self.schema.as_deref(), table);
        let rows = conn.query(&query).map_err(|e| GenError::ColumnAccess {
            table: table.to_string(),
            message: e.message,
        })?;

        let mut fields = Vec::with_capacity(rows.len());
        let mut common = Vec::new();
        let mut has_key = false;
        for row in &rows {
            let Some(mut field) = self.build_field(row) else {
                continue;
            };
            if !has_key && self.dialect.is_primary_key(row) {
                has_key = true;
                field.key_flag = true;
                field.key_identity_flag = self.dialect.is_identity(row);
            }
            field.fill = self.strategy.fill_for(&field.name);
            if self.strategy.is_super_entity_column(&field.name) {
                common.push(field);
            } else {
                fields.push(field);
            }
        }
        Ok((fields, common))
    }

    fn build_field(&self, row: &CatalogRow) -> Option<Field> {
        let name = row.get(self.dialect.field_name).filter(|n| !n.is_empty())?;
        let native_type = row.get(self.dialect.field_type).unwrap_or_default();
        let column_type = self.converter.convert(native_type);
        let mut field = Field::new(name, native_type, column_type);
        field.comment = row
            .get(self.dialect.field_comment)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let mut property = naming::process_name(name, self.strategy.column_naming(), &self.strategy.field_prefix);
        if self.strategy.entity_boolean_column_remove_is_prefix && column_type == SemanticType::Boolean {
            if let Some(rest) = property.strip_prefix("is").filter(|r| r.starts_with(char::is_uppercase)) {
                property = naming::lower_first(rest);
            }
        }
        field.convert = !self.is_capital_name(name) && !maps_back(name, &property);
        field.capital_name = naming::capitalize_first(&property);
        field.property_name = property;
        Some(field)
    }

    /// Entity and artifact names, annotation flags and imports
    fn process_table(&self, table: &mut TableModel) {
        let entity = naming::capitalize_first(&naming::process_name(
            &table.name,
            self.strategy.naming,
            &self.strategy.table_prefix,
        ));
        table.entity_path = naming::lower_first(&entity);
        table.entity_name = entity;
        self.names.apply(table);
        table.convert = !self.is_capital_name(&table.name) && !maps_back(&table.name, &table.entity_name);

        let mut field_annotation = false;
        let mut id_annotation = false;
        let mut id_type_import = self.id_type.is_some();
        if self.strategy.entity_table_field_annotation {
            for field in &mut table.fields {
                field.convert = true;
                field_annotation = true;
                id_annotation = true;
            }
        } else if !self.strategy.field_prefix.is_empty() {
            for field in &mut table.fields {
                if naming::has_prefix(&field.name, &self.strategy.field_prefix) {
                    id_annotation |= field.key_flag;
                    field.convert = true;
                    field_annotation = true;
                }
            }
        }
        for field in &table.fields {
            if field.key_flag {
                id_annotation |= field.convert || field.key_identity_flag;
                id_type_import |= field.key_identity_flag;
            } else {
                field_annotation |= field.convert;
            }
        }
        if table.fields.iter().any(|f| f.fill.is_some()) {
            field_annotation = true;
            table.import_packages.insert(FIELD_FILL_IMPORT.to_string());
        }
        let has_field = |name: &Option<String>| {
            name.as_deref()
                .is_some_and(|n| table.fields.iter().any(|f| f.name == n))
        };
        let versioned = has_field(&self.strategy.version_field_name);
        let logic_delete = has_field(&self.strategy.logic_delete_field_name);
        if versioned {
            table.import_packages.insert(VERSION_ANNOTATION.to_string());
        }
        if logic_delete {
            table.import_packages.insert(TABLE_LOGIC_ANNOTATION.to_string());
        }
        if field_annotation {
            table.import_packages.insert(TABLE_FIELD_ANNOTATION.to_string());
        }
        if id_annotation || self.id_type.is_some() {
            table.import_packages.insert(TABLE_ID_ANNOTATION.to_string());
        }
        if id_type_import {
            table.import_packages.insert(ID_TYPE_IMPORT.to_string());
        }
        match self.strategy.super_entity_class.as_deref().filter(|c| !c.is_empty()) {
            Some(class) => table.import_packages.insert(class.to_string()),
            None => table.import_packages.insert(SERIALIZABLE_IMPORT.to_string()),
        };
    }

    fn is_capital_name(&self, name: &str) -> bool {
        self.strategy.capital_mode && name.chars().all(|c| !c.is_lowercase())
    }
}

/// Whether `derived` trivially maps back to `native` (case and underscores ignored)
fn maps_back(native: &str, derived: &str) -> bool {
    native.replace('_', "").eq_ignore_ascii_case(&derived.replace('_', ""))
}
