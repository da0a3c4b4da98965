//! # Schema Introspection
//!
//! Everything between a database connection and the in-memory table model:
//!
//! - [`SchemaConnection`]: the narrow query/close boundary the pipeline talks to
//! - [`Introspector`]: lists tables under a [`FilterPolicy`], loads columns and
//!   applies naming, type conversion and annotation detection
//! - [`TableModel`] / [`Field`]: the model handed to the artifact planner
//! - [`connect`]: live sqlx-backed connections (behind the `mysql` and
//!   `postgres` features)

mod connection;
mod drivers;
mod introspect;
mod model;

pub use connection::{CatalogQuery, CatalogRow, SchemaConnection};
pub use drivers::connect;
pub use introspect::{Catalog, Introspector};
pub use model::{Field, FieldFill, FilterPolicy, TableModel};
