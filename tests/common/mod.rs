#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

pub mod fake_db {
    use schemagen::error::DbError;
    use schemagen::schema::{CatalogQuery, CatalogRow, SchemaConnection};

    /// One column as `information_schema.COLUMNS` reports it
    #[derive(Clone)]
    pub struct Column {
        pub name: &'static str,
        pub ty: &'static str,
        pub key: &'static str,
        pub extra: &'static str,
        pub comment: Option<&'static str>,
    }

    pub fn col(name: &'static str, ty: &'static str) -> Column {
        Column {
            name,
            ty,
            key: "",
            extra: "",
            comment: None,
        }
    }

    pub fn pk(name: &'static str, ty: &'static str) -> Column {
        Column {
            key: "PRI",
            extra: "auto_increment",
            ..col(name, ty)
        }
    }

    /// In-memory MySQL catalog answering the queries the MySQL dialect issues
    #[derive(Default)]
    pub struct FakeMySql {
        pub tables: Vec<(&'static str, &'static str, Vec<Column>)>,
        pub fail_listing: bool,
        pub fail_columns_for: Option<&'static str>,
        pub queries: Vec<CatalogQuery>,
        pub closes: usize,
    }

    impl FakeMySql {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn table(mut self, name: &'static str, comment: &'static str, columns: Vec<Column>) -> Self {
            self.tables.push((name, comment, columns));
            self
        }

        /// `t_user` and `t_order`, the usual two-table fixture
        pub fn users_and_orders() -> Self {
            Self::new()
                .table(
                    "t_user",
                    "users",
                    vec![
                        pk("id", "bigint(20)"),
                        col("user_name", "varchar(32)"),
                        col("is_active", "bit(1)"),
                        col("create_time", "datetime"),
                    ],
                )
                .table(
                    "t_order",
                    "orders",
                    vec![
                        pk("order_id", "bigint(20)"),
                        col("user_id", "bigint(20)"),
                        col("amount", "decimal(10,2)"),
                    ],
                )
        }
    }

    impl SchemaConnection for FakeMySql {
        fn query(&mut self, query: &CatalogQuery) -> Result<Vec<CatalogRow>, DbError> {
            self.queries.push(query.clone());
            if query.sql.contains("information_schema.TABLES") {
                if self.fail_listing {
                    return Err(DbError::new("access denied for user"));
                }
                return Ok(self
                    .tables
                    .iter()
                    .map(|(name, comment, _)| {
                        CatalogRow::new()
                            .with("NAME", Some(*name))
                            .with("COMMENT", Some(*comment))
                    })
                    .collect());
            }
            let table = query.params.last().cloned().unwrap_or_default();
            if self.fail_columns_for == Some(table.as_str()) {
                return Err(DbError::new(format!("table {table} is locked")));
            }
            let columns = self
                .tables
                .iter()
                .find(|(name, _, _)| *name == table)
                .map(|(_, _, columns)| columns.clone())
                .unwrap_or_default();
            Ok(columns
                .iter()
                .map(|c| {
                    CatalogRow::new()
                        .with("FIELD", Some(c.name))
                        .with("TYPE", Some(c.ty))
                        .with("COMMENT", c.comment)
                        .with("KEY", Some(c.key))
                        .with("EXTRA", Some(c.extra))
                })
                .collect())
        }

        fn close(&mut self) -> Result<(), DbError> {
            self.closes += 1;
            Ok(())
        }
    }
}

pub mod render {
    use schemagen::error::GenError;
    use schemagen::generator::TemplateRenderer;
    use serde_json::Value;
    use std::cell::RefCell;

    /// Renders `<reference> <entity>` and remembers every call
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub calls: RefCell<Vec<String>>,
    }

    impl TemplateRenderer for RecordingRenderer {
        fn resolve(&self, reference: &str) -> Result<String, GenError> {
            Ok(reference.to_string())
        }

        fn render(&self, reference: &str, context: &Value) -> Result<String, GenError> {
            self.calls.borrow_mut().push(reference.to_string());
            Ok(format!("{reference} {}", context["entity"]))
        }
    }
}

pub mod config {
    use schemagen::config::{GeneratorConfig, PackageConfig};
    use schemagen::naming::NamingStrategy;
    use std::path::Path;

    /// MySQL config writing the default artifact set under `root`
    pub fn mysql_config(root: &Path) -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.global.output_dir = root.to_path_buf();
        config.global.author = "tests".to_string();
        config.global.date = Some("2024-01-02".to_string());
        config.strategy.naming = NamingStrategy::UnderlineToCamel;
        config.strategy.table_prefix = vec!["t_".to_string()];
        config.packages = vec![PackageConfig {
            module_name: "src.main.java".to_string(),
            parent: "com.example".to_string(),
            entity: Some("entity".to_string()),
            mapper: Some("mapper".to_string()),
            xml: Some("mapper.xml".to_string()),
            service: Some("service".to_string()),
            service_impl: Some("service.impl".to_string()),
            ..PackageConfig::default()
        }];
        config
    }
}
