//! Per-table rendering context.

use serde_json::{json, Map, Value};

use super::plan::PackagePlan;
use crate::config::GeneratorConfig;
use crate::naming;
use crate::schema::TableModel;

const DEFAULT_SUPER_MAPPER: &str = "com.baomidou.mybatisplus.mapper.BaseMapper";
const DEFAULT_SUPER_SERVICE: &str = "com.baomidou.mybatisplus.service.IService";
const DEFAULT_SUPER_SERVICE_IMPL: &str = "com.baomidou.mybatisplus.service.impl.ServiceImpl";

/// Today's date as it appears in generated headers
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Last segment of a fully qualified class name
fn simple_name(class: Option<&str>) -> Value {
    match class {
        Some(class) => Value::from(class.rsplit('.').next().unwrap_or(class)),
        None => Value::Null,
    }
}

/// Configured super class, or `default` when none is set
fn super_class<'a>(configured: &'a Option<String>, default: Option<&'a str>) -> Option<&'a str> {
    configured
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(default)
}

/// Build the flat context map handed to every template of `table`
pub fn build_context(config: &GeneratorConfig, plan: &PackagePlan, table: &TableModel, date: &str) -> Value {
    let global = &config.global;
    let strategy = &config.strategy;

    let packages: Map<String, Value> = plan
        .iter()
        .map(|(kind, planned)| (kind.key().to_string(), Value::from(planned.package.clone())))
        .collect();

    let mut ctx = Map::new();
    ctx.insert("package".into(), Value::Object(packages));
    ctx.insert("author".into(), Value::from(global.author.clone()));
    ctx.insert("id_type".into(), json!(global.id_type));
    ctx.insert("logic_delete_field_name".into(), json!(strategy.logic_delete_field_name));
    ctx.insert("version_field_name".into(), json!(strategy.version_field_name));
    ctx.insert("active_record".into(), Value::from(global.active_record));
    ctx.insert("kotlin".into(), Value::from(global.kotlin));
    ctx.insert("date".into(), Value::from(date));
    ctx.insert("table".into(), json!(table));
    ctx.insert("enable_cache".into(), Value::from(global.enable_cache));
    ctx.insert("base_result_map".into(), Value::from(global.base_result_map));
    ctx.insert("base_column_list".into(), Value::from(global.base_column_list));
    ctx.insert("entity".into(), Value::from(table.entity_name.clone()));
    ctx.insert("entity_column_constant".into(), Value::from(strategy.entity_column_constant));
    ctx.insert("entity_builder_model".into(), Value::from(strategy.entity_builder_model));
    ctx.insert("entity_lombok_model".into(), Value::from(strategy.entity_lombok_model));
    ctx.insert(
        "entity_boolean_column_remove_is_prefix".into(),
        Value::from(strategy.entity_boolean_column_remove_is_prefix),
    );
    ctx.insert("rest_controller_style".into(), Value::from(strategy.rest_controller_style));
    ctx.insert(
        "controller_mapping_hyphen_style".into(),
        Value::from(strategy.controller_mapping_hyphen_style),
    );
    if strategy.controller_mapping_hyphen_style {
        ctx.insert(
            "controller_mapping_hyphen".into(),
            Value::from(naming::camel_to_hyphen(&table.entity_path)),
        );
    }

    let entity = super_class(&strategy.super_entity_class, None);
    ctx.insert("super_entity_class".into(), simple_name(entity));
    ctx.insert("super_entity_class_package".into(), json!(entity));
    let supers = [
        ("mapper", super_class(&strategy.super_mapper_class, Some(DEFAULT_SUPER_MAPPER))),
        ("service", super_class(&strategy.super_service_class, Some(DEFAULT_SUPER_SERVICE))),
        (
            "service_impl",
            super_class(&strategy.super_service_impl_class, Some(DEFAULT_SUPER_SERVICE_IMPL)),
        ),
        ("controller", super_class(&strategy.super_controller_class, None)),
        ("facade", super_class(&strategy.super_facade_class, None)),
        ("facade_impl", super_class(&strategy.super_facade_impl_class, None)),
    ];
    for (key, class) in supers {
        ctx.insert(format!("super_{key}_class_package"), json!(class));
        ctx.insert(format!("super_{key}_class"), simple_name(class));
    }

    ctx.insert("cfg".into(), Value::Object(config.cfg.clone()));
    Value::Object(ctx)
}
