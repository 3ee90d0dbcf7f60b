//! Translation lookup for one plugin.

use std::{cell::RefCell, collections::HashMap, path::PathBuf, rc::Rc};

use tracing::{debug, error, warn};

use super::{
    Bundle, BundleSource, DirectorySource, FallbackSource, FormatArg, LangError, Locale,
    MessageFormat, format::escape_named_arguments,
};
use crate::Result;

/// Translates keys using the plugin's bundled and on-disk translation files.
///
/// Lookups try, in order: the override bundle read from the data directory
/// (falling back to the bundled file of the same name), the bundled file for
/// the current locale, and the bundled `en_US` default. A key found nowhere
/// is returned as-is.
///
/// An `I18n` starts disabled; [`tr`](Self::tr) returns keys unchanged until
/// [`enable`](Self::enable) is called.
///
/// ```
/// use paperkit::lang::{EmbeddedSource, I18n};
///
/// let bundled = EmbeddedSource::new()
///     .with("messages.en_us.lang", "greeting = Hello, {0}!\nquote = It''s here")
///     .with("messages.de.lang", "greeting = Hallo, {0}!");
/// let mut i18n = I18n::new("messages", bundled)?;
/// i18n.enable();
///
/// assert_eq!(i18n.tr("greeting", &["Alex".into()]), "Hello, Alex!");
/// assert_eq!(i18n.tr("quote", &[]), "It's here");
///
/// i18n.set_locale(Some("de_DE"));
/// assert_eq!(i18n.tr("greeting", &["Alex".into()]), "Hallo, Alex!");
/// assert_eq!(i18n.tr("missing.key", &[]), "missing.key");
/// # Ok::<(), paperkit::Error>(())
/// ```
pub struct I18n {
    base_name: String,
    bundled: Rc<dyn BundleSource>,
    data_dir: Option<PathBuf>,
    default_bundle: Bundle,
    locale_bundle: Option<Bundle>,
    file_bundle: Option<Bundle>,
    current_locale: Locale,
    formats: RefCell<HashMap<String, MessageFormat>>,
    enabled: bool,
}

impl I18n {
    /// Loads the default `en_US` bundle named `base_name` from `bundled`.
    ///
    /// # Errors
    /// [`LangError::MissingDefaultBundle`] if no candidate file exists for
    /// the default locale, or an I/O error if one cannot be read.
    pub fn new(base_name: impl Into<String>, bundled: impl BundleSource + 'static) -> Result<Self> {
        let base_name = base_name.into();
        let bundled: Rc<dyn BundleSource> = Rc::new(bundled);
        let locale = Locale::default();
        let default_bundle = Bundle::load(bundled.as_ref(), &base_name, &locale)?.ok_or_else(|| {
            LangError::MissingDefaultBundle {
                base_name: base_name.clone(),
                locale: locale.to_string(),
            }
        })?;
        Ok(Self {
            base_name,
            bundled,
            data_dir: None,
            default_bundle,
            locale_bundle: None,
            file_bundle: None,
            current_locale: locale,
            formats: RefCell::new(HashMap::new()),
            enabled: false,
        })
    }

    /// Sets the directory override files are read from.
    ///
    /// Takes effect at the next [`set_locale`](Self::set_locale).
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn current_locale(&self) -> &Locale {
        &self.current_locale
    }

    /// Switches to `locale` (`lang` or `lang_COUNTRY`) and reloads bundles.
    ///
    /// `None` or a blank tag keeps the current locale but still reloads, so
    /// edited override files are picked up. Missing bundles are not errors.
    pub fn set_locale(&mut self, locale: Option<&str>) {
        if let Some(parsed) = locale.and_then(Locale::parse) {
            self.current_locale = parsed;
        }

        self.locale_bundle = self.load_bundle(self.bundled.as_ref(), "internal");
        self.file_bundle = match &self.data_dir {
            Some(dir) => {
                let source = FallbackSource::new(DirectorySource::new(dir), self.bundled.clone());
                self.load_bundle(&source, "custom")
            }
            None => None,
        };
        // Cached formats may belong to translations that just changed
        self.formats.borrow_mut().clear();
    }

    fn load_bundle(&self, source: &dyn BundleSource, kind: &str) -> Option<Bundle> {
        match Bundle::load(source, &self.base_name, &self.current_locale) {
            Ok(Some(bundle)) => Some(bundle),
            Ok(None) => {
                debug!(
                    locale = %self.current_locale,
                    kind,
                    "[Localization] Failed to load locale bundle for current locale"
                );
                None
            }
            Err(err) => {
                warn!(
                    locale = %self.current_locale,
                    kind,
                    error = %err,
                    "[Localization] Failed to read locale bundle for current locale"
                );
                None
            }
        }
    }

    /// Translates `key`, formatting `args` into the translation.
    ///
    /// Without arguments the translation is returned with `''` collapsed to
    /// `'`. With arguments it is compiled as a [`MessageFormat`]; compiled
    /// formats are cached by translation text.
    pub fn tr(&self, key: &str, args: &[FormatArg]) -> String {
        if !self.enabled {
            return key.to_string();
        }
        if args.is_empty() {
            self.lookup(key).replace("''", "'")
        } else {
            self.format(key, args)
        }
    }

    /// Number of compiled formats currently cached.
    pub fn cached_formats(&self) -> usize {
        self.formats.borrow().len()
    }

    fn lookup(&self, key: &str) -> String {
        if let Some(bundle) = &self.file_bundle {
            match bundle.get(key) {
                Some(value) => return value.to_string(),
                None => debug!(
                    key,
                    file = %bundle.file_name(),
                    "[I18n] Missing translation key in custom resource file; falling back to internal locale"
                ),
            }
        }
        if let Some(bundle) = &self.locale_bundle {
            match bundle.get(key) {
                Some(value) => return value.to_string(),
                None => debug!(
                    key,
                    file = %bundle.file_name(),
                    "[I18n] Missing translation key in resource file; falling back to default"
                ),
            }
        }
        match self.default_bundle.get(key) {
            Some(value) => value.to_string(),
            None => {
                warn!(
                    key,
                    file = %self.default_bundle.file_name(),
                    "[I18n] Missing default translation key"
                );
                key.to_string()
            }
        }
    }

    fn format(&self, key: &str, args: &[FormatArg]) -> String {
        let translated = self.lookup(key);
        if let Some(format) = self.formats.borrow().get(&translated) {
            return format.format(args);
        }

        let compiled = match MessageFormat::parse(&translated) {
            Ok(format) => format,
            Err(err) => {
                warn!(key, error = %err, "[I18n] Invalid translation key");
                match MessageFormat::parse(&escape_named_arguments(&translated)) {
                    Ok(format) => format,
                    Err(err) => {
                        error!(key, error = %err, "[I18n] Invalid translation key");
                        return key.to_string();
                    }
                }
            }
        };

        let formatted = compiled.format(args);
        self.formats.borrow_mut().insert(translated, compiled);
        formatted
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("base_name", &self.base_name)
            .field("current_locale", &self.current_locale)
            .field("data_dir", &self.data_dir)
            .field("enabled", &self.enabled)
            .finish()
    }
}
