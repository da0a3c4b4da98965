//! # Dialect Catalog
//!
//! Per-engine catalog queries, result-column labels and identity detection.
//!
//! Query builders are pure functions of structured input. Table names, schema
//! names and filter lists always travel as bind parameters; nothing user supplied
//! is spliced into SQL text.
//!
//! Lookup never fails: a [`DbType`] without a dedicated entry uses the first
//! dialect in the catalog (MySQL).

mod queries;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{CatalogQuery, CatalogRow, FilterPolicy};
use crate::types::{self, ConvertFn};

/// Database engine tag as written in configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    #[default]
    Mysql,
    Mariadb,
    Oracle,
    Db2,
    H2,
    Sqlite,
    #[serde(alias = "postgres")]
    Postgresql,
    Sqlserver,
    Other,
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DbType::Mysql => "mysql",
            DbType::Mariadb => "mariadb",
            DbType::Oracle => "oracle",
            DbType::Db2 => "db2",
            DbType::H2 => "h2",
            DbType::Sqlite => "sqlite",
            DbType::Postgresql => "postgresql",
            DbType::Sqlserver => "sqlserver",
            DbType::Other => "other",
        };
        f.write_str(tag)
    }
}

/// Positional placeholder style of a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`
    Question,
    /// `$1`
    Dollar,
    /// `:1`
    Colon,
    /// `@P1`
    AtP,
}

impl Placeholder {
    /// Placeholder for the 1-based parameter `n`
    pub fn nth(self, n: usize) -> String {
        match self {
            Placeholder::Question => "?".to_string(),
            Placeholder::Dollar => format!("${n}"),
            Placeholder::Colon => format!(":{n}"),
            Placeholder::AtP => format!("@P{n}"),
        }
    }

    /// `p1, p2, ...` for `count` parameters starting at `first`
    pub fn list(self, first: usize, count: usize) -> String {
        (first..first + count)
            .map(|n| self.nth(n))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Catalog access for one database engine
pub struct Dialect {
    pub db_type: DbType,
    pub placeholder: Placeholder,
    /// Result label of the table name in the table listing
    pub table_name: &'static str,
    /// Result label of the table comment in the table listing
    pub table_comment: &'static str,
    pub field_name: &'static str,
    pub field_type: &'static str,
    pub field_comment: &'static str,
    /// Result label of the key indicator (`PRI` marks a primary key)
    pub field_key: &'static str,
    /// Whether the table listing applies include/exclude lists server side
    pub pushes_filter: bool,
    tables: fn(&Dialect, Option<&str>, &FilterPolicy) -> CatalogQuery,
    columns: fn(&Dialect, Option<&str>, &str) -> CatalogQuery,
    identity: fn(&CatalogRow) -> bool,
    /// Default native type mapping
    pub type_convert: ConvertFn,
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialect")
            .field("db_type", &self.db_type)
            .field("pushes_filter", &self.pushes_filter)
            .finish()
    }
}

impl Dialect {
    /// Table listing, honoring `filter` where the dialect pushes it down
    pub fn tables_query(&self, schema: Option<&str>, filter: &FilterPolicy) -> CatalogQuery {
        (self.tables)(self, schema, filter)
    }

    /// Column listing for one table, in declaration order
    pub fn columns_query(&self, schema: Option<&str>, table: &str) -> CatalogQuery {
        (self.columns)(self, schema, table)
    }

    /// Whether a key column row describes a database-generated value
    pub fn is_identity(&self, row: &CatalogRow) -> bool {
        (self.identity)(row)
    }

    /// Whether a column row's key indicator marks a primary key
    pub fn is_primary_key(&self, row: &CatalogRow) -> bool {
        row.get(self.field_key)
            .is_some_and(|key| key.trim().eq_ignore_ascii_case("PRI"))
    }

    /// Resolve the dialect for `db_type`, falling back to the first catalog entry
    pub fn for_db_type(db_type: DbType) -> &'static Dialect {
        match DIALECTS.iter().find(|d| d.db_type == db_type) {
            Some(dialect) => dialect,
            None => {
                tracing::debug!(%db_type, fallback = %DIALECTS[0].db_type, "no dedicated dialect, using fallback");
                &DIALECTS[0]
            }
        }
    }
}

fn mysql_identity(row: &CatalogRow) -> bool {
    row.get("EXTRA") == Some("auto_increment")
}

fn sqlserver_identity(row: &CatalogRow) -> bool {
    row.get_i64("isIdentity") == Some(1)
}

fn never_identity(_row: &CatalogRow) -> bool {
    false
}

/// Supported dialects. The first entry is the lookup fallback.
pub static DIALECTS: [Dialect; 4] = [
    Dialect {
        db_type: DbType::Mysql,
        placeholder: Placeholder::Question,
        table_name: "NAME",
        table_comment: "COMMENT",
        field_name: "FIELD",
        field_type: "TYPE",
        field_comment: "COMMENT",
        field_key: "KEY",
        pushes_filter: false,
        tables: queries::mysql_tables,
        columns: queries::mysql_columns,
        identity: mysql_identity,
        type_convert: types::mysql_type,
    },
    Dialect {
        db_type: DbType::Oracle,
        placeholder: Placeholder::Colon,
        table_name: "TABLE_NAME",
        table_comment: "COMMENTS",
        field_name: "COLUMN_NAME",
        field_type: "DATA_TYPE",
        field_comment: "COMMENTS",
        field_key: "KEY",
        pushes_filter: true,
        tables: queries::oracle_tables,
        columns: queries::oracle_columns,
        identity: never_identity,
        type_convert: types::oracle_type,
    },
    Dialect {
        db_type: DbType::Sqlserver,
        placeholder: Placeholder::AtP,
        table_name: "TABLE_NAME",
        table_comment: "COMMENTS",
        field_name: "COLUMN_NAME",
        field_type: "DATA_TYPE",
        field_comment: "COMMENTS",
        field_key: "KEY",
        pushes_filter: false,
        tables: queries::sqlserver_tables,
        columns: queries::sqlserver_columns,
        identity: sqlserver_identity,
        type_convert: types::sqlserver_type,
    },
    Dialect {
        db_type: DbType::Postgresql,
        placeholder: Placeholder::Dollar,
        table_name: "tablename",
        table_comment: "comments",
        field_name: "name",
        field_type: "type",
        field_comment: "comment",
        field_key: "key",
        pushes_filter: false,
        tables: queries::postgres_tables,
        columns: queries::postgres_columns,
        identity: never_identity,
        type_convert: types::postgres_type,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_first_dialect() {
        assert_eq!(Dialect::for_db_type(DbType::Oracle).db_type, DbType::Oracle);
        assert_eq!(Dialect::for_db_type(DbType::Sqlite).db_type, DbType::Mysql);
        assert_eq!(Dialect::for_db_type(DbType::Other).db_type, DbType::Mysql);
    }

    #[test]
    fn test_identity_predicates() {
        let mysql = Dialect::for_db_type(DbType::Mysql);
        let row = CatalogRow::new().with("Extra", Some("auto_increment"));
        assert!(mysql.is_identity(&row));
        assert!(!mysql.is_identity(&CatalogRow::new().with("Extra", Some(""))));

        let mssql = Dialect::for_db_type(DbType::Sqlserver);
        assert!(mssql.is_identity(&CatalogRow::new().with("isIdentity", Some("1"))));
        assert!(!mssql.is_identity(&CatalogRow::new().with("isIdentity", Some("0"))));

        for db in [DbType::Oracle, DbType::Postgresql] {
            let d = Dialect::for_db_type(db);
            assert!(!d.is_identity(&row));
            assert!(!d.is_identity(&CatalogRow::new().with("isIdentity", Some("1"))));
        }
    }

    #[test]
    fn test_primary_key_indicator() {
        let d = Dialect::for_db_type(DbType::Mysql);
        assert!(d.is_primary_key(&CatalogRow::new().with("Key", Some("pri"))));
        assert!(!d.is_primary_key(&CatalogRow::new().with("Key", Some("MUL"))));
        assert!(!d.is_primary_key(&CatalogRow::new().with("Key", None)));
    }

    #[test]
    fn test_oracle_pushes_filter_as_binds() {
        let d = Dialect::for_db_type(DbType::Oracle);
        let q = d.tables_query(
            None,
            &FilterPolicy::Include(vec!["t_user".to_string(), "o'hara".to_string()]),
        );
        assert!(q.sql.contains("IN (:1, :2)"));
        assert!(!q.sql.contains("o'hara"));
        assert_eq!(q.params, vec!["T_USER".to_string(), "O'HARA".to_string()]);

        let q = d.tables_query(None, &FilterPolicy::Exclude(vec!["x".to_string()]));
        assert!(q.sql.contains("NOT IN (:1)"));
        assert_eq!(q.params, vec!["X".to_string()]);

        let q = d.tables_query(None, &FilterPolicy::All);
        assert!(!q.sql.contains(" IN "));
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_column_queries_bind_table_name() {
        let q = Dialect::for_db_type(DbType::Mysql).columns_query(None, "t_user");
        assert_eq!(q.params, vec!["t_user".to_string()]);
        assert!(!q.sql.contains("t_user"));

        let q = Dialect::for_db_type(DbType::Postgresql).columns_query(Some("app"), "orders");
        assert_eq!(q.params, vec!["app".to_string(), "orders".to_string()]);
        assert!(q.sql.contains("$2"));

        let q = Dialect::for_db_type(DbType::Sqlserver).columns_query(None, "orders");
        assert!(q.sql.contains("@P1"));
    }

    #[test]
    fn test_placeholder_list() {
        assert_eq!(Placeholder::Dollar.list(2, 3), "$2, $3, $4");
        assert_eq!(Placeholder::Question.list(1, 2), "?, ?");
        assert_eq!(Placeholder::Colon.list(1, 0), "");
    }
}
