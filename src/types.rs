//! Native column type → semantic type conversion.
//!
//! Each dialect has a default mapping. A run may install a custom override that is
//! consulted first; when it declines (`None`) the dialect default applies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Closed set of column types the templates reason about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    String,
    Integer,
    Long,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Binary,
    Other,
}

impl SemanticType {
    /// Stable lower-case tag, as used in configuration and templates
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::String => "string",
            SemanticType::Integer => "integer",
            SemanticType::Long => "long",
            SemanticType::Decimal => "decimal",
            SemanticType::Boolean => "boolean",
            SemanticType::Date => "date",
            SemanticType::DateTime => "date_time",
            SemanticType::Binary => "binary",
            SemanticType::Other => "other",
        }
    }

    /// Type name emitted in generated sources
    pub fn type_name(self) -> &'static str {
        match self {
            SemanticType::String => "String",
            SemanticType::Integer => "Integer",
            SemanticType::Long => "Long",
            SemanticType::Decimal => "BigDecimal",
            SemanticType::Boolean => "Boolean",
            SemanticType::Date | SemanticType::DateTime => "Date",
            SemanticType::Binary => "byte[]",
            SemanticType::Other => "Object",
        }
    }

    /// Import a generated source needs for [`SemanticType::type_name`], if any
    pub fn import(self) -> Option<&'static str> {
        match self {
            SemanticType::Decimal => Some("java.math.BigDecimal"),
            SemanticType::Date | SemanticType::DateTime => Some("java.util.Date"),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Signature of a dialect default mapping
pub type ConvertFn = fn(&str) -> SemanticType;

/// Custom override consulted before the dialect default
pub type OverrideFn = Arc<dyn Fn(&str) -> Option<SemanticType> + Send + Sync>;

/// Converts native type strings using an optional override and a dialect default
#[derive(Clone)]
pub struct TypeConverter {
    default: ConvertFn,
    custom: Option<OverrideFn>,
}

impl TypeConverter {
    /// Converter using only the dialect default
    pub fn new(default: ConvertFn) -> Self {
        TypeConverter {
            default,
            custom: None,
        }
    }

    /// Install a custom override tried before the default
    pub fn with_override(mut self, custom: OverrideFn) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Build an override from ordered `(substring, type)` rules.
    ///
    /// The first rule whose substring occurs in the lower-cased native type wins.
    pub fn with_rules(self, rules: Vec<(String, SemanticType)>) -> Self {
        if rules.is_empty() {
            return self;
        }
        let rules: Vec<(String, SemanticType)> = rules
            .into_iter()
            .map(|(pattern, ty)| (pattern.to_lowercase(), ty))
            .collect();
        self.with_override(Arc::new(move |native: &str| {
            let lower = native.to_lowercase();
            rules
                .iter()
                .find(|(pattern, _)| lower.contains(pattern.as_str()))
                .map(|(_, ty)| *ty)
        }))
    }

    /// Map one native type string
    pub fn convert(&self, native: &str) -> SemanticType {
        if let Some(custom) = &self.custom {
            if let Some(ty) = custom(native) {
                return ty;
            }
        }
        (self.default)(native)
    }
}

impl fmt::Debug for TypeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConverter")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

fn is_datetime(t: &str) -> bool {
    t.contains("datetime") || t.contains("timestamp")
}

/// MySQL / MariaDB defaults
pub fn mysql_type(native: &str) -> SemanticType {
    let t = native.to_lowercase();
    if t.contains("char") || t.contains("text") || t.contains("json") || t.contains("enum") {
        SemanticType::String
    } else if t.contains("bigint") {
        SemanticType::Long
    } else if t.contains("int") {
        SemanticType::Integer
    } else if is_datetime(&t) || t.contains("time") {
        SemanticType::DateTime
    } else if t.contains("date") || t.contains("year") {
        SemanticType::Date
    } else if t.contains("bit") {
        SemanticType::Boolean
    } else if t.contains("decimal") || t.contains("float") || t.contains("double") {
        SemanticType::Decimal
    } else if t.contains("clob") {
        SemanticType::String
    } else if t.contains("blob") || t.contains("binary") {
        SemanticType::Binary
    } else {
        SemanticType::Other
    }
}

/// Oracle defaults. `NUMBER(n)` narrows to integer (one digit of precision
/// declaration) or long (two digits); anything else numeric is decimal.
pub fn oracle_type(native: &str) -> SemanticType {
    let t = native.to_lowercase();
    if t.contains("char") || t.contains("clob") {
        SemanticType::String
    } else if t.contains("timestamp") {
        SemanticType::DateTime
    } else if t.contains("date") {
        SemanticType::Date
    } else if t.contains("number") {
        match number_precision(&t) {
            Some(p) if p.len() == 1 => SemanticType::Integer,
            Some(p) if p.len() == 2 => SemanticType::Long,
            _ => SemanticType::Decimal,
        }
    } else if t.contains("float") || t.contains("binary_double") {
        SemanticType::Decimal
    } else if t.contains("blob") || t.contains("raw") || t.contains("binary") {
        SemanticType::Binary
    } else {
        SemanticType::Other
    }
}

/// Digits of `number(NN)`; `None` for bare `number` or `number(p,s)`
fn number_precision(t: &str) -> Option<&str> {
    let inner = t.split_once('(')?.1.strip_suffix(')')?.trim();
    if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
        Some(inner)
    } else {
        None
    }
}

/// SQL Server defaults
pub fn sqlserver_type(native: &str) -> SemanticType {
    let t = native.to_lowercase();
    if t.contains("char") || t.contains("text") || t.contains("xml") {
        SemanticType::String
    } else if t.contains("bigint") {
        SemanticType::Long
    } else if t.contains("int") {
        SemanticType::Integer
    } else if is_datetime(&t) || t.contains("time") {
        SemanticType::DateTime
    } else if t.contains("date") {
        SemanticType::Date
    } else if t.contains("bit") {
        SemanticType::Boolean
    } else if t.contains("decimal")
        || t.contains("numeric")
        || t.contains("money")
        || t.contains("float")
        || t.contains("real")
    {
        SemanticType::Decimal
    } else if t.contains("binary") || t.contains("image") {
        SemanticType::Binary
    } else {
        SemanticType::Other
    }
}

/// PostgreSQL defaults
pub fn postgres_type(native: &str) -> SemanticType {
    let t = native.to_lowercase();
    if t.contains("char") || t.contains("text") || t.contains("json") || t.contains("uuid") {
        SemanticType::String
    } else if t.contains("bigint") || t.contains("bigserial") || t == "int8" {
        SemanticType::Long
    } else if matches!(t.as_str(), "int" | "int2" | "int4")
        || t.contains("integer")
        || t.contains("smallint")
        || t.contains("serial")
    {
        SemanticType::Integer
    } else if t.contains("timestamp") || t.contains("time") {
        SemanticType::DateTime
    } else if t.contains("date") {
        SemanticType::Date
    } else if t.contains("bool") || t.contains("bit") {
        SemanticType::Boolean
    } else if t.contains("numeric")
        || t.contains("decimal")
        || t.contains("double")
        || t.contains("real")
        || t.contains("float")
    {
        SemanticType::Decimal
    } else if t.contains("bytea") {
        SemanticType::Binary
    } else {
        SemanticType::Other
    }
}
