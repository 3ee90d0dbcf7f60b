//! Value types stored in a configuration store.
//!
//! [`ConfigValue`] represents everything a dotted-path configuration file can
//! hold: scalars (booleans, integers, floats, text), ordered lists, and nested
//! maps. Nested maps are how the store represents the "directory" portion of
//! a path, so `a.b.c = 1` is stored as `{"a": {"b": {"c": 1}}}`.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Values that can be stored in a configuration store.
///
/// # Direct Comparisons
///
/// `ConfigValue` implements `PartialEq` with primitive types for ergonomic comparisons:
///
/// ```
/// # use paperkit::config::ConfigValue;
/// let text = ConfigValue::Text("hello".to_string());
/// let number = ConfigValue::Int(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(!(text == 42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Ordered collection of values
    List(Vec<ConfigValue>),
    /// Section containing other values
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns true if this is a scalar value
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ConfigValue::Bool(_) | ConfigValue::Int(_) | ConfigValue::Float(_) | ConfigValue::Text(_)
        )
    }

    /// Returns true if this is a section
    pub fn is_map(&self) -> bool {
        matches!(self, ConfigValue::Map(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::Text(_) => "text",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer.
    ///
    /// Floats with no fractional part are accepted.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(n) => Some(*n),
            ConfigValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Attempts to convert to a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Renders scalars as text, the way a config file would show them.
    ///
    /// Returns `None` for null, lists and maps.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Int(n) => Some(n.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
            ConfigValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Attempts to convert to a list
    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a section
    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable section
    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(n) => write!(f, "{n}"),
            ConfigValue::Float(n) => write!(f, "{n}"),
            ConfigValue::Text(s) => write!(f, "{s}"),
            ConfigValue::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            ConfigValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}={item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(value as i64)
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Int(value as i64)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        ConfigValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ConfigValue>> for ConfigValue {
    fn from(value: BTreeMap<String, ConfigValue>) -> Self {
        ConfigValue::Map(value)
    }
}

/// Conversion out of a stored value, used by typed list codecs.
///
/// Unlike the `as_*` accessors this reports a [`ConfigError::TypeMismatch`]
/// so the caller can log which entry was discarded and why.
pub trait FromConfigValue: Sized {
    /// Converts the stored value, or reports why it could not be converted.
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError>;
}

fn mismatch(expected: &str, value: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

impl FromConfigValue for ConfigValue {
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError> {
        Ok(value.clone())
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromConfigValue for i64 {
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError> {
        value.as_int().ok_or_else(|| mismatch("int", value))
    }
}

impl FromConfigValue for i32 {
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError> {
        value
            .as_int()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| mismatch("int", value))
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError> {
        value.as_float().ok_or_else(|| mismatch("float", value))
    }
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue) -> Result<Self, ConfigError> {
        value.to_text().ok_or_else(|| mismatch("text", value))
    }
}

impl PartialEq<str> for ConfigValue {
    fn eq(&self, other: &str) -> bool {
        matches!(self, ConfigValue::Text(s) if s == other)
    }
}

impl PartialEq<&str> for ConfigValue {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, ConfigValue::Text(s) if s == *other)
    }
}

impl PartialEq<i64> for ConfigValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, ConfigValue::Int(n) if n == other)
    }
}

impl PartialEq<i32> for ConfigValue {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, ConfigValue::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<bool> for ConfigValue {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, ConfigValue::Bool(b) if b == other)
    }
}
