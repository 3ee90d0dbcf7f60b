//! Error types for translation bundles and message formats.

use thiserror::Error;

/// Errors raised while loading bundles or compiling message templates.
///
/// Translation lookups themselves never fail; they fall back to the key.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LangError {
    /// No bundle exists for the locale that every lookup falls back to
    #[error("Missing default bundle '{base_name}' for locale {locale}")]
    MissingDefaultBundle { base_name: String, locale: String },

    /// A bundle file exists but could not be read
    #[error("Failed to read bundle '{name}': {reason}")]
    BundleUnreadable { name: String, reason: String },

    /// A message template has invalid syntax
    #[error("Invalid message template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },
}

impl LangError {
    /// Check if this error is a template syntax error
    pub fn is_template_error(&self) -> bool {
        matches!(self, LangError::InvalidTemplate { .. })
    }

    /// Check if this error is about a missing or unreadable bundle
    pub fn is_bundle_error(&self) -> bool {
        matches!(
            self,
            LangError::MissingDefaultBundle { .. } | LangError::BundleUnreadable { .. }
        )
    }
}

impl From<LangError> for crate::Error {
    fn from(err: LangError) -> Self {
        crate::Error::Lang(err)
    }
}
