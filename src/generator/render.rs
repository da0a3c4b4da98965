//! Template rendering boundary.
//!
//! The engine only needs `render(reference, context) -> text`. The default
//! implementation is backed by MiniJinja; references are either `builtin:<name>`
//! (sources embedded in the binary) or template file paths.

use minijinja::Environment;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::BUILTIN_PREFIX;
use crate::error::GenError;

/// Pluggable template renderer
pub trait TemplateRenderer {
    /// Load the template source behind `reference`
    fn resolve(&self, reference: &str) -> Result<String, GenError>;

    /// Render `reference` against `context`
    fn render(&self, reference: &str, context: &Value) -> Result<String, GenError>;
}

/// Embedded default template for `name` (`entity`, `mapper`, ...)
pub fn builtin_template(name: &str) -> Option<&'static str> {
    let source = match name {
        "entity" => include_str!("../../templates/default/entity.java.j2"),
        "entity_kt" => include_str!("../../templates/default/entity.kt.j2"),
        "mapper" => include_str!("../../templates/default/mapper.java.j2"),
        "xml" => include_str!("../../templates/default/mapper.xml.j2"),
        "service" => include_str!("../../templates/default/service.java.j2"),
        "service_impl" => include_str!("../../templates/default/service_impl.java.j2"),
        "controller" => include_str!("../../templates/default/controller.java.j2"),
        "facade" => include_str!("../../templates/default/facade.java.j2"),
        "facade_impl" => include_str!("../../templates/default/facade_impl.java.j2"),
        _ => return None,
    };
    Some(source)
}

/// MiniJinja-backed [`TemplateRenderer`]
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
    template_dir: Option<PathBuf>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("hyphen", |value: String| crate::naming::camel_to_hyphen(&value));
        env.add_filter("lower_first", |value: String| crate::naming::lower_first(&value));
        MiniJinjaRenderer {
            env,
            template_dir: None,
        }
    }

    /// Resolve relative template paths against `dir`
    pub fn with_template_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.template_dir = dir;
        self
    }

    fn template_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        match &self.template_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn resolve(&self, reference: &str) -> Result<String, GenError> {
        if let Some(name) = reference.strip_prefix(BUILTIN_PREFIX) {
            return builtin_template(name)
                .map(str::to_string)
                .ok_or_else(|| GenError::Render {
                    template: reference.to_string(),
                    message: format!("no built-in template named '{name}'"),
                });
        }
        let path = self.template_path(reference);
        std::fs::read_to_string(&path).map_err(|e| GenError::Render {
            template: reference.to_string(),
            message: format!("cannot read {}: {e}", path.display()),
        })
    }

    fn render(&self, reference: &str, context: &Value) -> Result<String, GenError> {
        let source = self.resolve(reference)?;
        self.env
            .render_str(&source, context)
            .map_err(|e| GenError::Render {
                template: reference.to_string(),
                message: format!("{e:#}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_builtin_is_embedded() {
        for name in [
            "entity",
            "entity_kt",
            "mapper",
            "xml",
            "service",
            "service_impl",
            "controller",
            "facade",
            "facade_impl",
        ] {
            assert!(builtin_template(name).is_some(), "missing builtin {name}");
        }
        assert!(builtin_template("nope").is_none());
    }

    #[test]
    fn test_render_from_file_relative_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hello.j2"), "Hello {{ entity }}!").unwrap();
        let renderer = MiniJinjaRenderer::new().with_template_dir(Some(dir.path().to_path_buf()));
        let out = renderer.render("hello.j2", &json!({"entity": "User"})).unwrap();
        assert_eq!(out, "Hello User!");
    }

    #[test]
    fn test_missing_template_is_render_error() {
        let renderer = MiniJinjaRenderer::new();
        let err = renderer.render("/definitely/missing.j2", &json!({})).unwrap_err();
        assert!(matches!(err, GenError::Render { .. }));
        let err = renderer.resolve("builtin:nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_syntax_error_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.j2"), "{% if %}").unwrap();
        let renderer = MiniJinjaRenderer::new().with_template_dir(Some(dir.path().to_path_buf()));
        assert!(matches!(
            renderer.render("bad.j2", &json!({})),
            Err(GenError::Render { .. })
        ));
    }

    #[test]
    fn test_filters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("f.j2"), "{{ name | hyphen }} {{ name | lower_first }}").unwrap();
        let renderer = MiniJinjaRenderer::new().with_template_dir(Some(dir.path().to_path_buf()));
        let out = renderer.render("f.j2", &json!({"name": "UserOrder"})).unwrap();
        assert_eq!(out, "user-order userOrder");
    }
}
