//! Identifier transforms used to derive entity and property names from native
//! table and column names. Everything here is pure.

use serde::{Deserialize, Serialize};

/// How native identifiers are turned into generated identifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Keep the native identifier as is
    #[default]
    NoChange,
    /// `user_name` becomes `userName`
    UnderlineToCamel,
}

/// Remove the first configured prefix that `name` starts with.
///
/// Matching is case-sensitive. An empty prefix list returns `name` unchanged.
pub fn strip_prefix<S: AsRef<str>>(name: &str, prefixes: &[S]) -> String {
    for prefix in prefixes {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            continue;
        }
        if let Some(rest) = name.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    name.to_string()
}

/// Whether any configured prefix matches `name` (case-sensitive)
pub fn has_prefix<S: AsRef<str>>(name: &str, prefixes: &[S]) -> bool {
    prefixes
        .iter()
        .map(AsRef::as_ref)
        .any(|p| !p.is_empty() && name.starts_with(p))
}

/// Convert `snake_case` to `lowerCamelCase`.
///
/// All-caps identifiers (`USER_NAME`) and identifiers mixing upper case with
/// underscores (`User_Name`) are lower-cased first. Identifiers without an
/// underscore pass through untouched, so camel input is preserved.
pub fn snake_to_camel(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let source = if is_capital_mode(name) || is_mixed_mode(name) {
        name.to_lowercase()
    } else {
        name.to_string()
    };
    let mut out = String::with_capacity(source.len());
    for part in source.split('_').filter(|p| !p.is_empty()) {
        if out.is_empty() {
            out.push_str(part);
        } else {
            out.push_str(&capitalize_first(part));
        }
    }
    out
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `userOrderItem` becomes `user-order-item`
pub fn camel_to_hyphen(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply prefix stripping and then the naming strategy
pub fn process_name<S: AsRef<str>>(name: &str, strategy: NamingStrategy, prefixes: &[S]) -> String {
    let stripped = strip_prefix(name, prefixes);
    match strategy {
        NamingStrategy::UnderlineToCamel => snake_to_camel(&stripped),
        NamingStrategy::NoChange => stripped,
    }
}

/// Every letter upper-case, with at least one letter present
fn is_capital_mode(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_digit() || c == '_' || c == '/' || c.is_uppercase())
}

/// Contains an upper-case letter and an underscore (or slash)
fn is_mixed_mode(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && name.chars().any(|c| c == '_' || c == '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("user_name"), "userName");
        assert_eq!(snake_to_camel("USER_NAME"), "userName");
        assert_eq!(snake_to_camel("User_Name"), "userName");
        assert_eq!(snake_to_camel("_leading__double_"), "leadingDouble");
        assert_eq!(snake_to_camel("ID"), "id");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_snake_to_camel_keeps_camel_input() {
        assert_eq!(snake_to_camel("userName"), "userName");
        assert_eq!(snake_to_camel("name"), "name");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("t_user_name", &["t_"]), "user_name");
        assert_eq!(strip_prefix("sys_user", &["t_", "sys_"]), "user");
        // case-sensitive
        assert_eq!(strip_prefix("T_user", &["t_"]), "T_user");
        assert_eq!(strip_prefix("t_user", &NONE), "t_user");
        assert_eq!(strip_prefix("t_user", &[""]), "t_user");
    }

    #[test]
    fn test_process_name() {
        assert_eq!(
            process_name("t_user_name", NamingStrategy::UnderlineToCamel, &["t_"]),
            "userName"
        );
        assert_eq!(
            process_name("t_user_name", NamingStrategy::NoChange, &["t_"]),
            "user_name"
        );
        assert_eq!(
            process_name("user_name", NamingStrategy::NoChange, &NONE),
            "user_name"
        );
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize_first("user"), "User");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(lower_first("UserOrder"), "userOrder");
        assert_eq!(camel_to_hyphen("userOrderItem"), "user-order-item");
        assert_eq!(camel_to_hyphen("user"), "user");
        assert!(has_prefix("f_name", &["f_"]));
        assert!(!has_prefix("name", &["f_"]));
    }
}
