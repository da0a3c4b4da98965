#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::config::mysql_config;
use common::fake_db::{col, pk, FakeMySql};
use common::render::RecordingRenderer;
use schemagen::generator::Generator;
use schemagen::schema::Introspector;
use schemagen::types::SemanticType;
use schemagen::GenError;

fn names(catalog: &schemagen::schema::Catalog) -> Vec<&str> {
    catalog.tables.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn test_no_filters_returns_full_listing() {
    let dir = tempfile::tempdir().unwrap();
    let config = mysql_config(dir.path());
    let mut db = FakeMySql::users_and_orders();
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    assert_eq!(names(&catalog), vec!["t_user", "t_order"]);
    assert!(catalog.not_found.is_empty());
    assert_eq!(db.closes, 1);
    // one listing plus one column query per table
    assert_eq!(db.queries.len(), 3);
}

#[test]
fn test_include_scenario_yields_single_user_entity() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = mysql_config(dir.path());
    config.strategy.include = vec!["t_user".to_string()];
    let mut db = FakeMySql::users_and_orders();
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    assert_eq!(catalog.tables.len(), 1);
    let user = &catalog.tables[0];
    assert_eq!(user.entity_name, "User");
    assert_eq!(user.mapper_name.as_deref(), Some("UserMapper"));
    assert_eq!(user.service_name.as_deref(), Some("IUserService"));
    assert_eq!(user.controller_name, None);
    let props: Vec<_> = user.fields.iter().map(|f| f.property_name.as_str()).collect();
    assert_eq!(props, vec!["id", "userName", "isActive", "createTime"]);
}

#[test]
fn test_include_is_case_insensitive_and_reports_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = mysql_config(dir.path());
    config.strategy.include = vec!["T_ORDER".to_string(), "t_audit".to_string(), "t_user".to_string()];
    let mut db = FakeMySql::users_and_orders();
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    assert_eq!(names(&catalog), vec!["t_order", "t_user"]);
    assert_eq!(catalog.not_found.iter().collect::<Vec<_>>(), vec!["t_audit"]);
}

#[test]
fn test_exclude_removes_matching_tables() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = mysql_config(dir.path());
    config.strategy.exclude = vec!["t_user".to_string(), "t_gone".to_string()];
    let mut db = FakeMySql::users_and_orders();
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    assert_eq!(names(&catalog), vec!["t_order"]);
    assert!(catalog.not_found.contains("t_gone"));
}

#[test]
fn test_include_and_exclude_fail_before_any_query() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = mysql_config(dir.path());
    config.strategy.include = vec!["t_user".to_string()];
    config.strategy.exclude = vec!["t_order".to_string()];
    let mut db = FakeMySql::users_and_orders();
    let renderer = RecordingRenderer::default();
    let err = Generator::new(&config, &renderer).run(&mut db).unwrap_err();
    assert!(err.is_configuration());
    assert!(db.queries.is_empty());
    assert_eq!(db.closes, 1);
    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_listing_failure_is_schema_access_and_closes_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = mysql_config(dir.path());
    let mut db = FakeMySql {
        fail_listing: true,
        ..FakeMySql::users_and_orders()
    };
    let err = Introspector::from_config(&config).unwrap().load(&mut db).unwrap_err();
    assert!(matches!(err, GenError::SchemaAccess { .. }), "{err}");
    assert_eq!(db.queries.len(), 1);
    assert_eq!(db.closes, 1);
}

#[test]
fn test_column_failure_keeps_table_without_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config = mysql_config(dir.path());
    let mut db = FakeMySql {
        fail_columns_for: Some("t_user"),
        ..FakeMySql::users_and_orders()
    };
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    assert_eq!(catalog.tables.len(), 2);
    assert!(catalog.tables[0].fields.is_empty());
    assert_eq!(catalog.tables[1].fields.len(), 3);
    assert_eq!(db.closes, 1);
}

#[test]
fn test_only_first_primary_key_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let config = mysql_config(dir.path());
    let mut db = FakeMySql::new().table(
        "t_link",
        "",
        vec![
            col("name", "varchar(10)"),
            pk("left_id", "bigint(20)"),
            pk("right_id", "bigint(20)"),
        ],
    );
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    let table = &catalog.tables[0];
    let keys: Vec<_> = table.fields.iter().filter(|f| f.key_flag).map(|f| f.name.as_str()).collect();
    assert_eq!(keys, vec!["left_id"]);
    assert!(table.fields[1].key_identity_flag);
    assert!(!table.fields[2].key_identity_flag);
}

#[test]
fn test_types_super_columns_and_fill() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = mysql_config(dir.path());
    config.strategy.include = vec!["t_user".to_string()];
    config.strategy.super_entity_columns = vec!["create_time".to_string()];
    config.strategy.entity_boolean_column_remove_is_prefix = true;
    let mut db = FakeMySql::users_and_orders();
    let catalog = Introspector::from_config(&config).unwrap().load(&mut db).unwrap();
    let user = &catalog.tables[0];
    assert_eq!(user.fields.len(), 3);
    assert_eq!(user.common_fields.len(), 1);
    assert_eq!(user.common_fields[0].name, "create_time");
    let active = user.fields.iter().find(|f| f.name == "is_active").unwrap();
    assert_eq!(active.column_type, SemanticType::Boolean);
    assert_eq!(active.property_name, "active");
    assert!(active.convert);
    assert_eq!(user.fields[0].column_type, SemanticType::Long);
}
