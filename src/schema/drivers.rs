//! Live connections backed by sqlx.
//!
//! sqlx is async while the pipeline is a single synchronous pass, so each
//! connection owns a current-thread tokio runtime and blocks on it per query.

use super::SchemaConnection;
use crate::config::DataSourceConfig;
use crate::dialect::{DbType, Dialect};
use crate::error::GenError;

#[cfg(feature = "database")]
use super::{CatalogQuery, CatalogRow};
#[cfg(feature = "database")]
use crate::error::DbError;

#[cfg(feature = "database")]
macro_rules! sqlx_connection {
    ($name:ident, $conn:ty, $row:ty, $driver:literal) => {
        pub(crate) struct $name {
            runtime: tokio::runtime::Runtime,
            conn: Option<$conn>,
        }

        impl $name {
            pub(crate) fn open(url: &str) -> Result<Self, DbError> {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(DbError::new)?;
                let conn = runtime
                    .block_on(<$conn as sqlx::Connection>::connect(url))
                    .map_err(DbError::new)?;
                tracing::debug!(driver = $driver, "schema connection opened");
                Ok($name {
                    runtime,
                    conn: Some(conn),
                })
            }

            /// Read every cell as text. Some catalogs report names as binary
            /// strings, and key/identity indicators may come back as integers.
            fn convert_row(row: &$row) -> CatalogRow {
                use sqlx::{Column, Row};
                let mut out = CatalogRow::new();
                for (i, column) in row.columns().iter().enumerate() {
                    let value = match row.try_get::<Option<String>, _>(i) {
                        Ok(v) => v,
                        Err(_) => match row.try_get::<Option<Vec<u8>>, _>(i) {
                            Ok(v) => v.map(|b| String::from_utf8_lossy(&b).into_owned()),
                            Err(_) => match row.try_get::<Option<i64>, _>(i) {
                                Ok(v) => v.map(|n| n.to_string()),
                                Err(_) => row
                                    .try_get::<Option<i32>, _>(i)
                                    .ok()
                                    .flatten()
                                    .map(|n| n.to_string()),
                            },
                        },
                    };
                    out.push(column.name(), value);
                }
                out
            }
        }

        impl SchemaConnection for $name {
            fn query(&mut self, query: &CatalogQuery) -> Result<Vec<CatalogRow>, DbError> {
                let conn = self
                    .conn
                    .as_mut()
                    .ok_or_else(|| DbError::new("connection already closed"))?;
                let mut q = sqlx::query(&query.sql);
                for param in &query.params {
                    q = q.bind(param.as_str());
                }
                let rows: Vec<$row> = self
                    .runtime
                    .block_on(q.fetch_all(&mut *conn))
                    .map_err(DbError::new)?;
                Ok(rows.iter().map(Self::convert_row).collect())
            }

            fn close(&mut self) -> Result<(), DbError> {
                match self.conn.take() {
                    Some(conn) => self
                        .runtime
                        .block_on(sqlx::Connection::close(conn))
                        .map_err(DbError::new),
                    None => Ok(()),
                }
            }
        }
    };
}

#[cfg(feature = "mysql")]
sqlx_connection!(MySqlSchemaConnection, sqlx::MySqlConnection, sqlx::mysql::MySqlRow, "mysql");

#[cfg(feature = "postgres")]
sqlx_connection!(PgSchemaConnection, sqlx::PgConnection, sqlx::postgres::PgRow, "postgres");

/// Open a live connection for the configured data source.
///
/// The driver follows the resolved dialect, so MariaDB uses the MySQL driver.
///
/// # Errors
///
/// - [`GenError::Configuration`] for an empty URL or a dialect with no compiled driver
/// - [`GenError::SchemaAccess`] when the database cannot be reached
pub fn connect(source: &DataSourceConfig) -> Result<Box<dyn SchemaConnection>, GenError> {
    if source.url.trim().is_empty() {
        return Err(GenError::config("data_source.url is empty"));
    }
    let dialect = Dialect::for_db_type(source.db_type);
    match dialect.db_type {
        #[cfg(feature = "mysql")]
        DbType::Mysql => MySqlSchemaConnection::open(&source.url)
            .map(|c| Box::new(c) as Box<dyn SchemaConnection>)
            .map_err(|e| GenError::SchemaAccess { message: e.message }),
        #[cfg(feature = "postgres")]
        DbType::Postgresql => PgSchemaConnection::open(&source.url)
            .map(|c| Box::new(c) as Box<dyn SchemaConnection>)
            .map_err(|e| GenError::SchemaAccess { message: e.message }),
        other => Err(GenError::config(format!(
            "no database driver compiled in for '{other}' (configured db_type '{}')",
            source.db_type
        ))),
    }
}
