//! Connection boundary used by the introspector.
//!
//! The introspector only ever issues catalog queries built by a
//! [`crate::dialect::Dialect`] and reads string-ish values back, so the trait is
//! deliberately small: run a query, close the connection.

use crate::error::DbError;

/// A catalog query with positional bind parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// SQL text containing dialect placeholders
    pub sql: String,
    /// Values bound to the placeholders, in order
    pub params: Vec<String>,
}

impl CatalogQuery {
    /// Query without parameters
    pub fn new(sql: impl Into<String>) -> Self {
        CatalogQuery {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a bound value
    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// One result row, keyed by result-column label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    columns: Vec<(String, Option<String>)>,
}

impl CatalogRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by drivers and test fixtures
    pub fn with(mut self, column: impl Into<String>, value: Option<&str>) -> Self {
        self.push(column, value.map(str::to_string));
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: Option<String>) {
        self.columns.push((column.into(), value));
    }

    /// Value of `column`, matched case-insensitively. SQL NULL and a missing
    /// column both read as `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .and_then(|(_, value)| value.as_deref())
    }

    /// Integer view of `column`; unparsable values read as `None`
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(|v| v.trim().parse().ok())
    }
}

/// A live (or scripted) database connection
pub trait SchemaConnection {
    /// Run one catalog query and collect every row
    fn query(&mut self, query: &CatalogQuery) -> Result<Vec<CatalogRow>, DbError>;

    /// Release the connection. Called exactly once per run by the introspector.
    fn close(&mut self) -> Result<(), DbError>;
}

impl<C: SchemaConnection + ?Sized> SchemaConnection for Box<C> {
    fn query(&mut self, query: &CatalogQuery) -> Result<Vec<CatalogRow>, DbError> {
        (**self).query(query)
    }

    fn close(&mut self) -> Result<(), DbError> {
        (**self).close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookup_is_case_insensitive() {
        let row = CatalogRow::new()
            .with("Field", Some("id"))
            .with("Extra", Some("auto_increment"))
            .with("Comment", None);
        assert_eq!(row.get("field"), Some("id"));
        assert_eq!(row.get("EXTRA"), Some("auto_increment"));
        assert_eq!(row.get("comment"), None);
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_row_integer_view() {
        let row = CatalogRow::new()
            .with("isIdentity", Some("1"))
            .with("bad", Some("x"));
        assert_eq!(row.get_i64("isidentity"), Some(1));
        assert_eq!(row.get_i64("bad"), None);
    }

    #[test]
    fn test_query_binds_in_order() {
        let q = CatalogQuery::new("select 1").bind("a").bind("b");
        assert_eq!(q.params, vec!["a".to_string(), "b".to_string()]);
    }
}
