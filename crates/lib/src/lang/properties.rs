//! Properties file parsing.
//!
//! Translation bundles use the classic properties syntax, read as UTF-8:
//!
//! ```text
//! # comment
//! ! also a comment
//! greeting = Hello, {0}!
//! farewell: Goodbye
//! multi = first \
//!         second
//! escaped\ key = tab\there \u00e9
//! ```
//!
//! Keys end at the first unescaped `=`, `:` or whitespace. A line ending in
//! an odd number of backslashes continues on the next line, whose leading
//! whitespace is dropped.

use std::collections::HashMap;

/// Key/value pairs parsed from one properties file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties text. Parsing is lenient and never fails; malformed
    /// escapes are kept literally.
    ///
    /// ```
    /// # use paperkit::lang::Properties;
    /// let props = Properties::parse("a = 1\nb:2\nc 3\n# d = 4");
    /// assert_eq!(props.get("a"), Some("1"));
    /// assert_eq!(props.get("b"), Some("2"));
    /// assert_eq!(props.get("c"), Some("3"));
    /// assert_eq!(props.get("d"), None);
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            entries.insert(unescape(key), unescape(value));
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn is_separator_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Joins continued lines and drops comments and blank lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let trimmed = raw.trim_start_matches(is_separator_space);
        let line = match current.take() {
            Some(mut pending) => {
                pending.push_str(trimmed);
                pending
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            let mut pending = line;
            pending.pop();
            current = Some(pending);
        } else {
            lines.push(line);
        }
    }
    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Splits a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_separator_space(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches(is_separator_space);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches(is_separator_space))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
