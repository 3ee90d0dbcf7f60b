//! Message templates with numbered arguments.
//!
//! A template is literal text with `{index}` placeholders, optionally typed:
//! `{0}`, `{1,number}`, `{1,number,integer}`, `{1,number,percent}` and
//! `{2,choice,0#no items|1#one item|1<{2,number,integer} items}`. A single
//! quote starts a quoted literal section and `''` is a literal quote, so
//! `'{0}'` prints `{0}` verbatim and `it''s` prints `it's`.
//!
//! Placeholders referring to arguments that were not supplied are printed
//! back as `{index}`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::LangError;

/// One argument for [`MessageFormat::format`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FormatArg {
    fn as_number(&self) -> Option<f64> {
        match self {
            FormatArg::Int(n) => Some(*n as f64),
            FormatArg::Float(f) => Some(*f),
            FormatArg::Text(_) => None,
        }
    }
}

impl fmt::Display for FormatArg {
    /// Numbers are grouped by thousands with at most three fraction digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Text(s) => f.write_str(s),
            FormatArg::Int(n) => f.write_str(&format_int(*n)),
            FormatArg::Float(x) => f.write_str(&format_decimal(*x, 3)),
        }
    }
}

macro_rules! format_arg_from {
    ($variant:ident: $($ty:ty),* => $conv:expr) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    FormatArg::$variant($conv(value))
                }
            }
        )*
    };
}

format_arg_from!(Int: i8, i16, i32, i64, u8, u16, u32 => i64::from);
format_arg_from!(Int: usize => |v: usize| i64::try_from(v).unwrap_or(i64::MAX));
format_arg_from!(Float: f32, f64 => f64::from);
format_arg_from!(Text: String => |v| v);
format_arg_from!(Text: &str, &String, char, bool => |v: _| ToString::to_string(&v));

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberStyle {
    Default,
    Integer,
    Percent,
}

#[derive(Debug, Clone, PartialEq)]
struct Choice {
    limit: f64,
    /// `<` limits match values strictly greater than the limit.
    strict: bool,
    text: String,
}

#[derive(Debug, Clone, PartialEq)]
enum ArgKind {
    Plain,
    Number(NumberStyle),
    Choice(Vec<Choice>),
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Arg { index: usize, kind: ArgKind },
}

/// A compiled message template.
///
/// ```
/// # use paperkit::lang::{FormatArg, MessageFormat};
/// let format = MessageFormat::parse("{0} has {1,number} coins, it''s '{'rich'}'")?;
/// assert_eq!(
///     format.format(&["Alex".into(), 12345.into()]),
///     "Alex has 12,345 coins, it's {rich}"
/// );
/// assert!(MessageFormat::parse("{player}").is_err());
/// # Ok::<(), paperkit::lang::LangError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFormat {
    parts: Vec<Part>,
}

fn invalid(template: &str, reason: impl Into<String>) -> LangError {
    LangError::InvalidTemplate {
        template: template.to_string(),
        reason: reason.into(),
    }
}

impl MessageFormat {
    /// Compiles `template`.
    ///
    /// # Errors
    /// [`LangError::InvalidTemplate`] for unmatched braces, non-numeric
    /// argument indexes, unknown format types and malformed choices.
    pub fn parse(template: &str) -> Result<Self, LangError> {
        // 0 = literal text, 1 = index, 2 = type, 3 = style
        let mut segments: [String; 4] = Default::default();
        let mut part = 0;
        let mut in_quote = false;
        let mut brace_depth = 0usize;
        let mut parts = Vec::new();

        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if part == 0 {
                match c {
                    '\'' if chars.peek() == Some(&'\'') => {
                        chars.next();
                        segments[0].push('\'');
                    }
                    '\'' => in_quote = !in_quote,
                    '{' if !in_quote => {
                        if !segments[0].is_empty() {
                            parts.push(Part::Literal(std::mem::take(&mut segments[0])));
                        }
                        part = 1;
                    }
                    _ => segments[0].push(c),
                }
                continue;
            }

            if in_quote {
                segments[part].push(c);
                if c == '\'' {
                    in_quote = false;
                }
                continue;
            }

            match c {
                ',' if part < 3 => part += 1,
                '{' => {
                    brace_depth += 1;
                    segments[part].push(c);
                }
                '}' if brace_depth == 0 => {
                    let [_, index, kind, style] = &mut segments;
                    parts.push(Self::element(
                        template,
                        &std::mem::take(index),
                        &std::mem::take(kind),
                        &std::mem::take(style),
                    )?);
                    part = 0;
                }
                '}' => {
                    brace_depth -= 1;
                    segments[part].push(c);
                }
                ' ' if part == 2 && segments[2].is_empty() => {}
                '\'' => {
                    in_quote = true;
                    segments[part].push(c);
                }
                _ => segments[part].push(c),
            }
        }

        if part != 0 {
            return Err(invalid(template, "Unmatched braces in the pattern"));
        }
        if !segments[0].is_empty() {
            parts.push(Part::Literal(std::mem::take(&mut segments[0])));
        }
        Ok(Self { parts })
    }

    fn element(template: &str, index: &str, kind: &str, style: &str) -> Result<Part, LangError> {
        let index: usize = index
            .parse()
            .map_err(|_| invalid(template, format!("can't parse argument number: {index}")))?;
        let kind = match kind.trim().to_ascii_lowercase().as_str() {
            "" => ArgKind::Plain,
            "number" => ArgKind::Number(match style.trim().to_ascii_lowercase().as_str() {
                "integer" => NumberStyle::Integer,
                "percent" => NumberStyle::Percent,
                _ => NumberStyle::Default,
            }),
            "choice" => ArgKind::Choice(Self::choices(template, style)?),
            // Temporal arguments are rendered as given
            "date" | "time" => ArgKind::Plain,
            other => return Err(invalid(template, format!("unknown format type: {other}"))),
        };
        Ok(Part::Arg { index, kind })
    }

    fn choices(template: &str, style: &str) -> Result<Vec<Choice>, LangError> {
        let mut choices = Vec::new();
        for option in style.split('|').filter(|o| !o.trim().is_empty()) {
            let Some(split) = option.find(['#', '<', '\u{2264}']) else {
                return Err(invalid(template, format!("Choice pattern incorrect: {style}")));
            };
            let (limit, rest) = option.split_at(split);
            let mut rest_chars = rest.chars();
            let strict = rest_chars.next() == Some('<');
            let limit = match limit.trim() {
                "\u{221E}" => f64::INFINITY,
                "-\u{221E}" => f64::NEG_INFINITY,
                other => other
                    .parse::<f64>()
                    .map_err(|_| invalid(template, format!("Choice pattern incorrect: {style}")))?,
            };
            choices.push(Choice {
                limit,
                strict,
                text: rest_chars.as_str().to_string(),
            });
        }
        if choices.is_empty() {
            return Err(invalid(template, "Choice pattern is empty"));
        }
        Ok(choices)
    }

    /// Renders the template with `args`.
    pub fn format(&self, args: &[FormatArg]) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Arg { index, kind } => match args.get(*index) {
                    None => {
                        out.push('{');
                        out.push_str(&index.to_string());
                        out.push('}');
                    }
                    Some(arg) => out.push_str(&Self::format_arg(arg, kind, args)),
                },
            }
        }
        out
    }

    fn format_arg(arg: &FormatArg, kind: &ArgKind, args: &[FormatArg]) -> String {
        match (kind, arg.as_number()) {
            (ArgKind::Plain, _) | (_, None) => arg.to_string(),
            (ArgKind::Number(NumberStyle::Default), Some(n)) => match arg {
                FormatArg::Int(i) => format_int(*i),
                _ => format_decimal(n, 3),
            },
            (ArgKind::Number(NumberStyle::Integer), Some(n)) => format_decimal(n.round_ties_even(), 0),
            (ArgKind::Number(NumberStyle::Percent), Some(n)) => {
                format!("{}%", format_decimal((n * 100.0).round_ties_even(), 0))
            }
            (ArgKind::Choice(choices), Some(n)) => {
                let text = Self::choose(choices, n);
                if text.contains('{') {
                    match MessageFormat::parse(text) {
                        Ok(nested) => nested.format(args),
                        Err(_) => text.to_string(),
                    }
                } else {
                    text.to_string()
                }
            }
        }
    }

    fn choose(choices: &[Choice], n: f64) -> &str {
        let matched = choices
            .iter()
            .take_while(|c| if c.strict { n > c.limit } else { n >= c.limit })
            .count();
        &choices[matched.saturating_sub(1)].text
    }
}

static NAMED_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\D*?)\}").unwrap());

/// Rewrites `{name}` placeholders that contain no digits as `[name]`.
///
/// Used to rescue translations that use named placeholders, which the
/// template syntax rejects.
pub(crate) fn escape_named_arguments(template: &str) -> String {
    NAMED_ARGUMENT.replace_all(template, "[$1]").into_owned()
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_int(n: i64) -> String {
    let grouped = group_digits(&n.unsigned_abs().to_string());
    if n < 0 { format!("-{grouped}") } else { grouped }
}

fn format_decimal(x: f64, max_fraction_digits: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "\u{221E}" } else { "-\u{221E}" }.to_string();
    }
    let fixed = format!("{:.*}", max_fraction_digits, x.abs());
    let (int_part, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let negative = x < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
