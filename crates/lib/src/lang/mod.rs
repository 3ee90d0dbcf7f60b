//! Translated messages.
//!
//! Translations live in UTF-8 properties files named
//! `<base>.<language>_<country>.lang`, with the country lower-cased. A plugin
//! ships its files as an [`EmbeddedSource`] and may let server owners
//! override them with files in its data directory. [`I18n`] is the context a
//! plugin creates at startup and passes to whatever needs translations.

pub mod bundle;
pub mod errors;
pub mod format;
pub mod i18n;
pub mod locale;
pub mod properties;

pub use bundle::{Bundle, BundleSource, DirectorySource, EmbeddedSource, FallbackSource};
pub use errors::LangError;
pub use format::{FormatArg, MessageFormat};
pub use i18n::I18n;
pub use locale::Locale;
pub use properties::Properties;

/// Translates a key with any number of arguments convertible to [`FormatArg`].
///
/// ```
/// # use paperkit::{lang::{EmbeddedSource, I18n}, tr};
/// let mut i18n = I18n::new("m", EmbeddedSource::new().with("m.lang", "hi = Hi {0}, {1}"))?;
/// i18n.enable();
/// assert_eq!(tr!(i18n, "hi", "Alex", 3), "Hi Alex, 3");
/// # Ok::<(), paperkit::Error>(())
/// ```
#[macro_export]
macro_rules! tr {
    ($i18n:expr, $key:expr $(,)?) => {
        $i18n.tr($key, &[])
    };
    ($i18n:expr, $key:expr, $($arg:expr),+ $(,)?) => {
        $i18n.tr($key, &[$($crate::lang::FormatArg::from($arg)),+])
    };
}
