//! Dotted-path configuration stores.
//!
//! [`ConfigStore`] is the contract the node tree is written against: get/set
//! of values keyed by dot-delimited paths, plus block and inline comments
//! attached to those paths. [`MemoryStore`] is the in-crate implementation,
//! a nested map that can be persisted to and loaded from a JSON file.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, ConfigValue, path as config_path};
use crate::Result;

/// A key/value store addressed by dotted paths.
///
/// Implementations only store and retrieve; path composition and typing are
/// done by the node tree.
pub trait ConfigStore {
    /// Returns the value at `path`, or `None` if nothing is stored there.
    fn get(&self, path: &str) -> Option<ConfigValue>;

    /// Stores `value` at `path`. `None` removes the value and its comments.
    fn set(&mut self, path: &str, value: Option<ConfigValue>);

    /// Returns the block comment lines attached to `path`.
    ///
    /// An empty string is an empty comment line.
    fn comments(&self, path: &str) -> Vec<String>;

    /// Replaces the block comments at `path`. An empty list removes them.
    ///
    /// Comments are only attached to paths that exist.
    fn set_comments(&mut self, path: &str, comments: Vec<String>);

    /// Returns the inline comment lines attached to `path`.
    fn inline_comments(&self, path: &str) -> Vec<String>;

    /// Replaces the inline comments at `path`. An empty list removes them.
    fn set_inline_comments(&mut self, path: &str, comments: Vec<String>);

    /// Whether a value is stored at `path`.
    fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Returns the list at `path` with every scalar entry rendered as text.
    ///
    /// Missing paths, non-lists and non-scalar entries yield nothing.
    fn get_string_list(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(ConfigValue::List(items)) => items.iter().filter_map(ConfigValue::to_text).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the map entries of the list at `path`, skipping other entries.
    fn get_map_list(&self, path: &str) -> Vec<BTreeMap<String, ConfigValue>> {
        match self.get(path) {
            Some(ConfigValue::List(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    ConfigValue::Map(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn is_empty_map<K, V>(map: &BTreeMap<K, V>) -> bool {
    map.is_empty()
}

/// On-disk layout of a [`MemoryStore`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    values: BTreeMap<String, ConfigValue>,
    #[serde(default, skip_serializing_if = "is_empty_map")]
    comments: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "is_empty_map")]
    inline_comments: BTreeMap<String, Vec<String>>,
}

/// An in-memory [`ConfigStore`] backed by nested maps.
///
/// ```
/// # use paperkit::config::{ConfigStore, MemoryStore, ConfigValue};
/// let mut store = MemoryStore::new();
/// store.set("storage.mysql.port", Some(3306.into()));
///
/// assert_eq!(store.get("storage.mysql.port"), Some(ConfigValue::Int(3306)));
/// assert!(store.get("storage.mysql").unwrap().is_map());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, ConfigValue>,
    comments: BTreeMap<String, Vec<String>>,
    inline_comments: BTreeMap<String, Vec<String>>,
    file: Option<PathBuf>,
}

impl MemoryStore {
    /// Creates an empty store that is not bound to a file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a JSON file, binding it to that file.
    ///
    /// A missing file yields an empty store bound to the path, so the first
    /// [`save`](Self::save) creates it.
    pub fn load(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        let mut store = if file.exists() {
            let contents = fs::read_to_string(file)?;
            Self::from_json_str(&contents).map_err(|err| match err {
                crate::Error::Serialize(e) => ConfigError::ParseFailed {
                    file: file.display().to_string(),
                    reason: e.to_string(),
                }
                .into(),
                other => other,
            })?
        } else {
            debug!(file = %file.display(), "Config file does not exist; starting empty");
            Self::new()
        };
        store.file = Some(file.to_path_buf());
        Ok(store)
    }

    /// Parses a store from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let parsed: StoreFile = serde_json::from_str(json)?;
        Ok(Self {
            values: parsed.values,
            comments: parsed.comments,
            inline_comments: parsed.inline_comments,
            file: None,
        })
    }

    /// Serializes the store as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let file = StoreFile {
            values: self.values.clone(),
            comments: self.comments.clone(),
            inline_comments: self.inline_comments.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// The file this store was loaded from, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Writes the store back to the file it was loaded from.
    ///
    /// Stores created with [`new`](Self::new) have no file; saving them is a no-op.
    pub fn save(&self) -> Result<()> {
        match &self.file {
            Some(file) => self.save_to(file),
            None => {
                debug!("Config store has no backing file; skipping save");
                Ok(())
            }
        }
    }

    /// Writes the store to `file`, creating parent directories as needed.
    pub fn save_to(&self, file: impl AsRef<Path>) -> Result<()> {
        let file = file.as_ref();
        match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
            _ => {}
        }
        fs::write(file, self.to_json_string()?)?;
        debug!(file = %file.display(), "Saved config store");
        Ok(())
    }

    /// Discards every value and comment.
    pub fn clear(&mut self) {
        self.values.clear();
        self.comments.clear();
        self.inline_comments.clear();
    }

    /// Returns the top-level section keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    fn lookup(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = config_path::components(path);
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    fn insert(&mut self, path: &str, value: ConfigValue) {
        let segments: Vec<_> = config_path::components(path).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.values;
        // Navigate to the parent, creating intermediate sections as needed
        for segment in parents {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| ConfigValue::Map(BTreeMap::new()));
            if !entry.is_map() {
                // Replace scalar value with a section to allow navigation
                *entry = ConfigValue::Map(BTreeMap::new());
            }
            current = match entry.as_map_mut() {
                Some(map) => map,
                None => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    fn remove(&mut self, path: &str) {
        let Some((parent, last)) = config_path::split_last(path) else {
            return;
        };
        let section = if parent.is_empty() {
            Some(&mut self.values)
        } else {
            let mut segments = config_path::components(parent);
            let mut current = segments.next().and_then(|first| self.values.get_mut(first));
            for segment in segments {
                current = current
                    .and_then(ConfigValue::as_map_mut)
                    .and_then(|map| map.get_mut(segment));
            }
            current.and_then(ConfigValue::as_map_mut)
        };
        if let Some(section) = section {
            section.remove(last);
        }
        // Comments under the removed section go with it
        let prefix = format!("{path}.");
        self.comments
            .retain(|key, _| key != path && !key.starts_with(&prefix));
        self.inline_comments
            .retain(|key, _| key != path && !key.starts_with(&prefix));
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, path: &str) -> Option<ConfigValue> {
        let path = config_path::normalize_path(path);
        if path.is_empty() {
            return Some(ConfigValue::Map(self.values.clone()));
        }
        self.lookup(&path).cloned()
    }

    fn set(&mut self, path: &str, value: Option<ConfigValue>) {
        let path = config_path::normalize_path(path);
        if path.is_empty() {
            debug!("Ignoring write to the root section");
            return;
        }
        match value {
            Some(value) => self.insert(&path, value),
            None => self.remove(&path),
        }
    }

    fn comments(&self, path: &str) -> Vec<String> {
        self.comments
            .get(&config_path::normalize_path(path))
            .cloned()
            .unwrap_or_default()
    }

    fn set_comments(&mut self, path: &str, comments: Vec<String>) {
        let path = config_path::normalize_path(path);
        if comments.is_empty() {
            self.comments.remove(&path);
        } else if self.lookup(&path).is_some() {
            self.comments.insert(path, comments);
        } else {
            debug!(path = %path, "Not attaching comments to a missing path");
        }
    }

    fn inline_comments(&self, path: &str) -> Vec<String> {
        self.inline_comments
            .get(&config_path::normalize_path(path))
            .cloned()
            .unwrap_or_default()
    }

    fn set_inline_comments(&mut self, path: &str, comments: Vec<String>) {
        let path = config_path::normalize_path(path);
        if comments.is_empty() {
            self.inline_comments.remove(&path);
        } else if self.lookup(&path).is_some() {
            self.inline_comments.insert(path, comments);
        } else {
            debug!(path = %path, "Not attaching inline comments to a missing path");
        }
    }
}
