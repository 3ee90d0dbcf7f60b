//! Translation bundles and where they are loaded from.
//!
//! A bundle for a locale is the chain of properties files found for that
//! locale's candidate names, most specific first. A key missing from
//! `messages.de_de.lang` is looked up in `messages.de.lang` and then in
//! `messages.lang`.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::debug;

use super::{LangError, Locale, Properties};
use crate::{Result, constants};

/// Somewhere bundle files can be read from.
pub trait BundleSource {
    /// Returns the contents of `file_name` (such as `messages.en_us.lang`),
    /// or `None` if this source does not have it.
    fn read(&self, file_name: &str) -> Result<Option<String>>;
}

impl<T: BundleSource + ?Sized> BundleSource for Rc<T> {
    fn read(&self, file_name: &str) -> Result<Option<String>> {
        (**self).read(file_name)
    }
}

/// Reads bundle files from a directory, such as a plugin's data folder.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BundleSource for DirectorySource {
    fn read(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| {
                LangError::BundleUnreadable {
                    name: path.display().to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

/// Bundle files compiled into the plugin, keyed by file name.
///
/// ```
/// # use paperkit::lang::{BundleSource, EmbeddedSource};
/// let source = EmbeddedSource::new().with("messages.lang", "hello = Hello");
/// assert_eq!(source.read("messages.lang")?.as_deref(), Some("hello = Hello"));
/// assert!(source.read("messages.de.lang")?.is_none());
/// # Ok::<(), paperkit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    files: HashMap<String, String>,
}

impl EmbeddedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(file_name, contents);
        self
    }

    pub fn insert(&mut self, file_name: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(file_name.into(), contents.into());
    }
}

impl BundleSource for EmbeddedSource {
    fn read(&self, file_name: &str) -> Result<Option<String>> {
        Ok(self.files.get(file_name).cloned())
    }
}

/// Reads from `primary`, falling back to `fallback` per file.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSource<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: BundleSource, F: BundleSource> BundleSource for FallbackSource<P, F> {
    fn read(&self, file_name: &str) -> Result<Option<String>> {
        match self.primary.read(file_name)? {
            Some(contents) => Ok(Some(contents)),
            None => self.fallback.read(file_name),
        }
    }
}

/// The properties files found for one locale.
#[derive(Debug, Clone)]
pub struct Bundle {
    locale: Locale,
    /// `(file name, properties)`, most specific first.
    chain: Vec<(String, Properties)>,
}

impl Bundle {
    /// Loads every candidate file for `locale` that `source` has.
    ///
    /// Returns `None` when no candidate exists at all.
    pub fn load(source: &dyn BundleSource, base_name: &str, locale: &Locale) -> Result<Option<Self>> {
        let mut chain = Vec::new();
        for name in locale.bundle_names(base_name) {
            let file_name = format!("{name}.{}", constants::LANG_EXTENSION);
            if let Some(contents) = source.read(&file_name)? {
                debug!(file = %file_name, "[I18n] Loaded translation file");
                chain.push((file_name, Properties::parse(&contents)));
            }
        }
        if chain.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            locale: locale.clone(),
            chain,
        }))
    }

    /// A bundle from already-parsed properties.
    pub fn from_properties(locale: Locale, name: impl Into<String>, properties: Properties) -> Self {
        Self {
            locale,
            chain: vec![(name.into(), properties)],
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The most specific file this bundle was loaded from.
    pub fn file_name(&self) -> &str {
        self.chain.first().map(|(name, _)| name.as_str()).unwrap_or_default()
    }

    /// Looks `key` up through the chain.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.chain.iter().find_map(|(_, props)| props.get(key))
    }
}
