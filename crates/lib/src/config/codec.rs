//! Typed value codecs for configuration nodes.
//!
//! A [`ValueCodec`] is the capability that turns a node into a typed leaf: it
//! knows the node's default, how to read one value out of whatever the store
//! holds at the node's value path, and how to write one back. Reads never
//! fail. Missing values yield the default; present but unreadable values log
//! a warning and yield the default.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::{self, Debug, Display},
    hash::Hash,
    marker::PhantomData,
    str::FromStr,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use tracing::warn;

use super::{ConfigValue, FromConfigValue};
use crate::{constants, util::math};

/// Reads and writes one typed value at one path.
pub trait ValueCodec: 'static {
    /// The typed value this codec produces.
    type Value: Clone + Debug;

    /// The value used when nothing readable is stored.
    fn default_value(&self) -> Self::Value;

    /// Converts the raw stored value at `path` into a typed value.
    ///
    /// `path` is only used for diagnostics.
    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> Self::Value;

    /// Converts a typed value into what should be stored. `None` removes the key.
    fn encode(&self, value: &Self::Value) -> Option<ConfigValue>;

    /// The child name the value moves to once the node has children.
    fn value_node_name(&self) -> &str {
        constants::VALUE_NODE
    }
}

/// Object-safe view of a codec, used by the tree for untyped traversal.
pub(crate) trait ErasedCodec {
    fn value_node_name(&self) -> &str;

    /// What `save` should write at `path` given the currently stored value.
    fn save_value(&self, raw: Option<ConfigValue>, path: &str) -> Option<ConfigValue>;

    fn describe(&self, raw: Option<ConfigValue>, path: &str) -> String;
}

impl<C: ValueCodec> ErasedCodec for C {
    fn value_node_name(&self) -> &str {
        ValueCodec::value_node_name(self)
    }

    fn save_value(&self, raw: Option<ConfigValue>, path: &str) -> Option<ConfigValue> {
        self.encode(&self.decode(raw, path))
    }

    fn describe(&self, raw: Option<ConfigValue>, path: &str) -> String {
        format!("{:?}", self.decode(raw, path))
    }
}

fn unreadable(path: &str, raw: &ConfigValue, expected: &str) {
    warn!(
        path = %path,
        found = raw.type_name(),
        expected,
        "[Configuration] Unreadable value; using the default"
    );
}

/// A boolean flag. Once the node has children its value lives under `enabled`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec {
    default: bool,
}

impl BoolCodec {
    pub fn new(default: bool) -> Self {
        Self { default }
    }
}

impl ValueCodec for BoolCodec {
    type Value = bool;

    fn default_value(&self) -> bool {
        self.default
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> bool {
        match raw {
            None | Some(ConfigValue::Null) => self.default,
            Some(ConfigValue::Bool(b)) => b,
            Some(ConfigValue::Text(ref s)) if s.eq_ignore_ascii_case("true") => true,
            Some(ConfigValue::Text(ref s)) if s.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                unreadable(path, &other, "bool");
                self.default
            }
        }
    }

    fn encode(&self, value: &bool) -> Option<ConfigValue> {
        Some(ConfigValue::Bool(*value))
    }

    fn value_node_name(&self) -> &str {
        constants::ENABLED_NODE
    }
}

/// A 32-bit integer, clamped into `[min, max]` on both read and write.
#[derive(Debug, Clone, Copy)]
pub struct IntCodec {
    default: i32,
    min: i32,
    max: i32,
}

impl Default for IntCodec {
    fn default() -> Self {
        Self::new(0)
    }
}

impl IntCodec {
    /// An unbounded integer with the given default.
    pub fn new(default: i32) -> Self {
        Self {
            default,
            min: i32::MIN,
            max: i32::MAX,
        }
    }

    /// An integer defaulting to zero, clamped into `[min, max]`.
    pub fn bounded(min: i32, max: i32) -> Self {
        Self::new(0).with_bounds(min, max)
    }

    pub fn with_bounds(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    fn clamp(&self, value: i64) -> i32 {
        let narrowed = value.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        math::clamp(narrowed, self.min, self.max)
    }
}

impl ValueCodec for IntCodec {
    type Value = i32;

    fn default_value(&self) -> i32 {
        self.default
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> i32 {
        let value = match raw {
            None | Some(ConfigValue::Null) => self.default as i64,
            Some(ConfigValue::Int(n)) => n,
            Some(ConfigValue::Float(f)) if f.is_finite() => f.trunc() as i64,
            Some(ConfigValue::Text(s)) => match s.trim().parse::<i64>() {
                Ok(n) => n,
                Err(_) => {
                    unreadable(path, &ConfigValue::Text(s), "int");
                    self.default as i64
                }
            },
            Some(other) => {
                unreadable(path, &other, "int");
                self.default as i64
            }
        };
        self.clamp(value)
    }

    fn encode(&self, value: &i32) -> Option<ConfigValue> {
        Some(ConfigValue::Int(self.clamp(*value as i64) as i64))
    }
}

/// A double-precision float, clamped into `[min, max]` on both read and write.
#[derive(Debug, Clone, Copy)]
pub struct DoubleCodec {
    default: f64,
    min: f64,
    max: f64,
}

impl Default for DoubleCodec {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl DoubleCodec {
    pub fn new(default: f64) -> Self {
        Self {
            default,
            min: f64::MIN,
            max: f64::MAX,
        }
    }

    pub fn bounded(min: f64, max: f64) -> Self {
        Self::new(0.0).with_bounds(min, max)
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

impl ValueCodec for DoubleCodec {
    type Value = f64;

    fn default_value(&self) -> f64 {
        self.default
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> f64 {
        let value = match raw {
            None | Some(ConfigValue::Null) => self.default,
            Some(ConfigValue::Float(f)) if f.is_finite() => f,
            Some(ConfigValue::Int(n)) => n as f64,
            Some(ConfigValue::Text(s)) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => f,
                _ => {
                    unreadable(path, &ConfigValue::Text(s), "float");
                    self.default
                }
            },
            Some(other) => {
                unreadable(path, &other, "float");
                self.default
            }
        };
        math::clamp_f64(value, self.min, self.max)
    }

    fn encode(&self, value: &f64) -> Option<ConfigValue> {
        let value = if value.is_finite() { *value } else { self.default };
        Some(ConfigValue::Float(math::clamp_f64(value, self.min, self.max)))
    }
}

/// A string. Other scalars are read as their text form.
#[derive(Debug, Clone, Default)]
pub struct StringCodec {
    default: String,
}

impl StringCodec {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

impl ValueCodec for StringCodec {
    type Value = String;

    fn default_value(&self) -> String {
        self.default.clone()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> String {
        match raw {
            None | Some(ConfigValue::Null) => self.default.clone(),
            Some(ConfigValue::Text(s)) => s,
            Some(other) => match other.to_text() {
                Some(text) => text,
                None => {
                    unreadable(path, &other, "text");
                    self.default.clone()
                }
            },
        }
    }

    fn encode(&self, value: &String) -> Option<ConfigValue> {
        Some(ConfigValue::Text(value.clone()))
    }
}

/// An arbitrary-precision integer, stored as text.
#[derive(Debug, Clone, Default)]
pub struct BigIntegerCodec {
    default: BigInt,
}

impl BigIntegerCodec {
    pub fn new(default: BigInt) -> Self {
        Self { default }
    }
}

impl ValueCodec for BigIntegerCodec {
    type Value = BigInt;

    fn default_value(&self) -> BigInt {
        self.default.clone()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> BigInt {
        match raw {
            None | Some(ConfigValue::Null) => self.default.clone(),
            Some(ConfigValue::Int(n)) => BigInt::from(n),
            Some(other) => match other.to_text().and_then(|s| BigInt::from_str(s.trim()).ok()) {
                Some(value) => value,
                None => {
                    unreadable(path, &other, "big integer");
                    self.default.clone()
                }
            },
        }
    }

    fn encode(&self, value: &BigInt) -> Option<ConfigValue> {
        Some(ConfigValue::Text(value.to_string()))
    }
}

/// An arbitrary-precision decimal, stored as text.
#[derive(Debug, Clone, Default)]
pub struct BigDecimalCodec {
    default: BigDecimal,
}

impl BigDecimalCodec {
    pub fn new(default: BigDecimal) -> Self {
        Self { default }
    }
}

impl ValueCodec for BigDecimalCodec {
    type Value = BigDecimal;

    fn default_value(&self) -> BigDecimal {
        self.default.clone()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> BigDecimal {
        match raw {
            None | Some(ConfigValue::Null) => self.default.clone(),
            Some(other) => match other
                .to_text()
                .and_then(|s| BigDecimal::from_str(s.trim()).ok())
            {
                Some(value) => value,
                None => {
                    unreadable(path, &other, "big decimal");
                    self.default.clone()
                }
            },
        }
    }

    fn encode(&self, value: &BigDecimal) -> Option<ConfigValue> {
        Some(ConfigValue::Text(value.to_string()))
    }
}

/// An enum stored by name.
///
/// ```
/// # use paperkit::config::{EnumCodec, ValueCodec, ConfigValue};
/// # use paperkit::storage::StorageType;
/// let codec = EnumCodec::new(StorageType::FlatFile);
/// assert_eq!(codec.decode(Some("MYSQL".into()), "type"), StorageType::MySql);
/// assert_eq!(codec.decode(Some("bogus".into()), "type"), StorageType::FlatFile);
/// ```
pub struct EnumCodec<E> {
    default: E,
}

impl<E: Clone> Clone for EnumCodec<E> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
        }
    }
}

impl<E: Debug> Debug for EnumCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumCodec")
            .field("default", &self.default)
            .finish()
    }
}

impl<E> EnumCodec<E> {
    pub fn new(default: E) -> Self {
        Self { default }
    }
}

impl<E: Default> Default for EnumCodec<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E> ValueCodec for EnumCodec<E>
where
    E: FromStr + Display + Clone + Debug + 'static,
{
    type Value = E;

    fn default_value(&self) -> E {
        self.default.clone()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> E {
        let Some(raw) = raw else {
            return self.default.clone();
        };
        match raw.to_text() {
            Some(name) if !name.is_empty() => match E::from_str(&name) {
                Ok(value) => value,
                Err(_) => {
                    warn!(
                        path = %path,
                        value = %name,
                        "[Configuration] Unknown enum value; using the default"
                    );
                    self.default.clone()
                }
            },
            Some(_) => self.default.clone(),
            None => {
                if !raw.is_null() {
                    unreadable(path, &raw, "enum name");
                }
                self.default.clone()
            }
        }
    }

    fn encode(&self, value: &E) -> Option<ConfigValue> {
        Some(ConfigValue::Text(value.to_string()))
    }
}

/// A list of enums stored by name. Unknown names are dropped from the list.
pub struct EnumListCodec<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> EnumListCodec<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for EnumListCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EnumListCodec<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> Debug for EnumListCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnumListCodec")
    }
}

impl<E> ValueCodec for EnumListCodec<E>
where
    E: FromStr + Display + Clone + Debug + 'static,
{
    type Value = Vec<E>;

    fn default_value(&self) -> Vec<E> {
        Vec::new()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> Vec<E> {
        let items = match raw {
            None | Some(ConfigValue::Null) => return Vec::new(),
            Some(ConfigValue::List(items)) => items,
            Some(other) => {
                unreadable(path, &other, "list");
                return Vec::new();
            }
        };
        items
            .iter()
            .filter_map(ConfigValue::to_text)
            .filter(|name| !name.is_empty())
            .filter_map(|name| match E::from_str(&name) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(
                        path = %path,
                        value = %name,
                        "[Configuration] The list contains an invalid value; this entry has been discarded"
                    );
                    None
                }
            })
            .collect()
    }

    fn encode(&self, value: &Vec<E>) -> Option<ConfigValue> {
        Some(ConfigValue::List(
            value
                .iter()
                .map(|item| ConfigValue::Text(item.to_string()))
                .collect(),
        ))
    }
}

/// A list of strings.
#[derive(Debug, Clone, Default)]
pub struct StringListCodec {
    default: Vec<String>,
}

impl StringListCodec {
    pub fn new(default: Vec<String>) -> Self {
        Self { default }
    }
}

impl ValueCodec for StringListCodec {
    type Value = Vec<String>;

    fn default_value(&self) -> Vec<String> {
        self.default.clone()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> Vec<String> {
        match raw {
            None | Some(ConfigValue::Null) => self.default.clone(),
            Some(ConfigValue::List(items)) => items.iter().filter_map(ConfigValue::to_text).collect(),
            Some(other) => {
                unreadable(path, &other, "list");
                self.default.clone()
            }
        }
    }

    fn encode(&self, value: &Vec<String>) -> Option<ConfigValue> {
        Some(ConfigValue::List(
            value.iter().cloned().map(ConfigValue::Text).collect(),
        ))
    }
}

/// A list of untyped sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapListCodec;

impl ValueCodec for MapListCodec {
    type Value = Vec<BTreeMap<String, ConfigValue>>;

    fn default_value(&self) -> Self::Value {
        Vec::new()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> Self::Value {
        match raw {
            None | Some(ConfigValue::Null) => Vec::new(),
            Some(ConfigValue::List(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    ConfigValue::Map(map) => Some(map),
                    other => {
                        unreadable(path, &other, "map");
                        None
                    }
                })
                .collect(),
            Some(other) => {
                unreadable(path, &other, "list");
                Vec::new()
            }
        }
    }

    fn encode(&self, value: &Self::Value) -> Option<ConfigValue> {
        Some(ConfigValue::List(
            value.iter().cloned().map(ConfigValue::Map).collect(),
        ))
    }
}

/// A list of sections whose keys and values are converted to `K` and `V`.
///
/// Entries whose key or value cannot be converted are discarded with a
/// warning; the rest of the section is kept.
pub struct TypedMapListCodec<K, V> {
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> TypedMapListCodec<K, V> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for TypedMapListCodec<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for TypedMapListCodec<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypedMapListCodec")
    }
}

impl<K, V> ValueCodec for TypedMapListCodec<K, V>
where
    K: FromStr + Display + Eq + Hash + Clone + Debug + 'static,
    V: FromConfigValue + Into<ConfigValue> + Clone + Debug + 'static,
{
    type Value = Vec<HashMap<K, V>>;

    fn default_value(&self) -> Self::Value {
        Vec::new()
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> Self::Value {
        MapListCodec
            .decode(raw, path)
            .into_iter()
            .map(|section| {
                section
                    .into_iter()
                    .filter_map(|(key, value)| {
                        let Ok(typed_key) = K::from_str(&key) else {
                            warn!(
                                path = %path,
                                key = %key,
                                "[Configuration] Unable to read key; this entry has been discarded"
                            );
                            return None;
                        };
                        match V::from_config_value(&value) {
                            Ok(typed_value) => Some((typed_key, typed_value)),
                            Err(err) => {
                                warn!(
                                    path = %path,
                                    key = %key,
                                    error = %err,
                                    "[Configuration] Unable to read value; this entry has been discarded"
                                );
                                None
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn encode(&self, value: &Self::Value) -> Option<ConfigValue> {
        Some(ConfigValue::List(
            value
                .iter()
                .map(|section| {
                    ConfigValue::Map(
                        section
                            .iter()
                            .map(|(k, v)| (k.to_string(), v.clone().into()))
                            .collect(),
                    )
                })
                .collect(),
        ))
    }
}

/// Wraps another codec so that a missing value reads as `None` instead of
/// the inner default, and saving `None` removes the key.
#[derive(Debug, Clone, Default)]
pub struct OptionalCodec<C> {
    inner: C,
}

impl<C: ValueCodec> OptionalCodec<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: ValueCodec> ValueCodec for OptionalCodec<C> {
    type Value = Option<C::Value>;

    fn default_value(&self) -> Self::Value {
        None
    }

    fn decode(&self, raw: Option<ConfigValue>, path: &str) -> Self::Value {
        match raw {
            None | Some(ConfigValue::Null) => None,
            Some(raw) => Some(self.inner.decode(Some(raw), path)),
        }
    }

    fn encode(&self, value: &Self::Value) -> Option<ConfigValue> {
        value.as_ref().and_then(|v| self.inner.encode(v))
    }

    fn value_node_name(&self) -> &str {
        ValueCodec::value_node_name(&self.inner)
    }
}
