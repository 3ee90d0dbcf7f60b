//! Language and country codes.

use std::fmt;

use crate::constants;

/// A language with an optional country, such as `en_US` or `de`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    /// Builds a locale, lower-casing the language and upper-casing the country.
    pub fn new(language: &str, country: Option<&str>) -> Self {
        Self {
            language: language.trim().to_ascii_lowercase(),
            country: country
                .map(|c| c.trim().to_ascii_uppercase())
                .filter(|c| !c.is_empty()),
        }
    }

    /// Parses `lang` or `lang_COUNTRY`.
    ///
    /// The first `_`-separated part is the language and the last is the
    /// country; anything between is ignored. Blank input yields `None`.
    ///
    /// ```
    /// # use paperkit::lang::Locale;
    /// let locale = Locale::parse("de_DE").unwrap();
    /// assert_eq!(locale.language(), "de");
    /// assert_eq!(locale.country(), Some("DE"));
    /// assert_eq!(Locale::parse("pt_x_BR").unwrap().to_string(), "pt_BR");
    /// assert!(Locale::parse("").is_none());
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        let parts: Vec<&str> = tag.split('_').collect();
        match parts.as_slice() {
            [language] => Some(Self::new(language, None)),
            [language, .., country] => Some(Self::new(language, Some(country))),
            [] => None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Bundle names to try for `base_name`, most specific first.
    ///
    /// The country is lower-cased in bundle names: `messages.en_us`,
    /// `messages.en`, `messages`.
    pub fn bundle_names(&self, base_name: &str) -> Vec<String> {
        let mut names = Vec::with_capacity(3);
        if !self.language.is_empty() {
            if let Some(country) = &self.country {
                names.push(format!(
                    "{base_name}.{}_{}",
                    self.language,
                    country.to_ascii_lowercase()
                ));
            }
            names.push(format!("{base_name}.{}", self.language));
        }
        names.push(base_name.to_string());
        names
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::parse(constants::DEFAULT_LOCALE).unwrap_or_else(|| Self::new("en", Some("US")))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => f.write_str(&self.language),
        }
    }
}
