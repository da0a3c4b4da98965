//! Error taxonomy for a generation run.
//!
//! Only two kinds are fatal before any file is written: [`GenError::Configuration`]
//! and [`GenError::SchemaAccess`]. Column failures are downgraded to an empty field
//! list by the introspector, and render/write failures are caught once by the
//! rendering engine and reported through [`crate::generator::RunStatus`].

use std::fmt;
use std::path::PathBuf;

/// Errors raised by the introspection and emission pipeline
#[derive(Debug)]
pub enum GenError {
    /// Invalid or contradictory configuration, detected before touching the database
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },
    /// The table-listing query failed; the run cannot continue
    SchemaAccess {
        /// Driver error text
        message: String,
    },
    /// The column query for one table failed
    ColumnAccess {
        /// Table whose columns could not be loaded
        table: String,
        /// Driver error text
        message: String,
    },
    /// The template engine rejected a template or its context
    Render {
        /// Template reference as configured
        template: String,
        /// Engine error text
        message: String,
    },
    /// Writing a generated file (or its directory) failed
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl GenError {
    /// Shorthand for a [`GenError::Configuration`]
    pub fn config(message: impl Into<String>) -> Self {
        GenError::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error belongs to the pre-flight configuration class
    pub fn is_configuration(&self) -> bool {
        matches!(self, GenError::Configuration { .. })
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            GenError::SchemaAccess { message } => {
                write!(f, "failed to list tables: {message}")
            }
            GenError::ColumnAccess { table, message } => {
                write!(f, "failed to load columns of table '{table}': {message}")
            }
            GenError::Render { template, message } => {
                write!(f, "failed to render template '{template}': {message}")
            }
            GenError::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error reported by a [`crate::schema::SchemaConnection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbError {
    /// Driver error text
    pub message: String,
}

impl DbError {
    /// Wrap any displayable driver error
    pub fn new(message: impl fmt::Display) -> Self {
        DbError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DbError {}
