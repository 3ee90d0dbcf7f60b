//! Dotted path helpers for configuration access.
//!
//! Configuration stores address values with dot-delimited paths such as
//! `storage.mysql.hostname`. Node names are single components and may not
//! contain the separator.

use super::ConfigError;

/// The separator between path components.
pub const SEPARATOR: char = '.';

/// Normalizes a path string by cleaning up dots and empty components.
///
/// - Empty string "" → empty string (refers to the root section)
/// - Leading dots ".user" → "user"
/// - Trailing dots "user." → "user"
/// - Consecutive dots "user..profile" → "user.profile"
///
/// ```rust
/// # use paperkit::config::path::normalize_path;
/// assert_eq!(normalize_path(""), "");
/// assert_eq!(normalize_path(".user"), "user");
/// assert_eq!(normalize_path("user..profile"), "user.profile");
/// assert_eq!(normalize_path("..."), "");
/// ```
pub fn normalize_path(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    input
        .split(SEPARATOR)
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Returns an iterator over the non-empty components of a path.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Appends `component` to `base`, inserting a separator only when both are non-empty.
pub fn join(base: &str, component: &str) -> String {
    if base.is_empty() {
        component.to_string()
    } else if component.is_empty() {
        base.to_string()
    } else {
        let mut joined = String::with_capacity(base.len() + component.len() + 1);
        joined.push_str(base);
        joined.push(SEPARATOR);
        joined.push_str(component);
        joined
    }
}

/// Splits a path into its parent path and last component.
///
/// Returns `None` for the empty path.
pub fn split_last(path: &str) -> Option<(&str, &str)> {
    if path.is_empty() {
        None
    } else if let Some(last_dot) = path.rfind(SEPARATOR) {
        Some((&path[..last_dot], &path[last_dot + 1..]))
    } else {
        Some(("", path))
    }
}

/// Validates a node name.
///
/// # Errors
/// Returns [`ConfigError::InvalidNodeName`] if the name is blank or contains a dot.
pub fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidNodeName {
            name: name.to_string(),
            reason: "names cannot be blank".to_string(),
        });
    }
    if name.contains(SEPARATOR) {
        return Err(ConfigError::InvalidNodeName {
            name: name.to_string(),
            reason: "names cannot contain dots".to_string(),
        });
    }
    Ok(())
}
