//! Message formatting and localization.
//!
//! Templates use positional placeholders:
//!
//! - `{0}` inserts argument 0, translated through the keyword table
//! - `{0*}` inserts argument 0 verbatim
//! - `{0:c}` inserts argument 0 as an embedded clause (first letter lowered)
//!
//! A template is itself looked up in the sentence table before expansion, and
//! the expanded result starts with an upper-case letter. Nested calls are the
//! normal way to build a message:
//!
//! ```
//! use markup_lint_core::i18n::Translator;
//!
//! let t = Translator::english();
//! let msg = t.translate(
//!     "{0} should be {1:c}",
//!     &[&t.translate("the \"{0*}\" attribute", &["rowspan"]), &t.translate("an integer", &[])],
//! );
//! assert_eq!(msg, "The \"rowspan\" attribute should be an integer");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const JA_JSON: &str = include_str!("../data/locales/ja.json");

const LIST_PAIR: &str = "{0*} or {1*}";
const LIST_TAIL: &str = "{0*}, or {1*}";
const LIST_MIDDLE: &str = "{0*}, {1*}";

/// Keyword and sentence dictionaries for one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleSet {
    /// Locale tag such as `en` or `ja`.
    pub locale: String,
    /// Single-word translations used by `{n}` placeholders.
    #[serde(default)]
    pub keywords: HashMap<String, String>,
    /// Template translations keyed by the English template.
    #[serde(default)]
    pub sentences: HashMap<String, String>,
}

impl LocaleSet {
    /// English: templates are used as written.
    #[must_use]
    pub fn english() -> Self {
        Self {
            locale: "en".to_string(),
            ..Self::default()
        }
    }

    /// Parses a locale set from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a locale set.
    pub fn from_json(content: &str) -> Result<Self, LocaleError> {
        serde_json::from_str(content).map_err(|e| LocaleError::Parse {
            message: e.to_string(),
        })
    }

    /// Returns a bundled locale by tag.
    ///
    /// # Errors
    ///
    /// Returns an error for tags with no bundled dictionary.
    pub fn builtin(tag: &str) -> Result<Self, LocaleError> {
        match tag.split(['-', '_']).next().unwrap_or(tag) {
            "en" => Ok(Self::english()),
            "ja" => Self::from_json(JA_JSON),
            _ => Err(LocaleError::Unsupported(tag.to_string())),
        }
    }
}

/// Formats messages against a [`LocaleSet`].
#[derive(Debug, Clone)]
pub struct Translator {
    locale: LocaleSet,
}

impl Default for Translator {
    fn default() -> Self {
        Self::english()
    }
}

impl Translator {
    /// Creates a translator for the given locale set.
    #[must_use]
    pub fn new(locale: LocaleSet) -> Self {
        Self { locale }
    }

    /// Creates an English translator.
    #[must_use]
    pub fn english() -> Self {
        Self::new(LocaleSet::english())
    }

    /// Returns the locale tag.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale.locale
    }

    /// Expands `template` with `args`.
    ///
    /// Placeholders whose index has no argument are left as written.
    #[must_use]
    pub fn translate(&self, template: &str, args: &[&str]) -> String {
        let template = self
            .locale
            .sentences
            .get(template)
            .map_or(template, String::as_str);

        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            match parse_placeholder(tail).and_then(|p| args.get(p.index).map(|a| (p, *a))) {
                Some((placeholder, arg)) => {
                    match placeholder.flag {
                        Flag::Keyword => out.push_str(self.keyword(arg)),
                        Flag::Verbatim => out.push_str(arg),
                        Flag::Clause => out.push_str(&decapitalize(self.keyword(arg))),
                    }
                    rest = &tail[placeholder.len..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);

        capitalize(&out)
    }

    /// Formats a disjunctive list of quoted items: `"a", "b", or "c"`.
    #[must_use]
    pub fn list<S: AsRef<str>>(&self, items: &[S]) -> String {
        let quoted: Vec<String> = items
            .iter()
            .map(|item| format!("\"{}\"", item.as_ref()))
            .collect();

        match quoted.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => self.translate(LIST_PAIR, &[first.as_str(), second.as_str()]),
            [first, middle @ .., last] => {
                let head = middle.iter().fold(first.clone(), |acc, item| {
                    self.translate(LIST_MIDDLE, &[acc.as_str(), item.as_str()])
                });
                self.translate(LIST_TAIL, &[head.as_str(), last.as_str()])
            }
        }
    }

    fn keyword<'a>(&'a self, word: &'a str) -> &'a str {
        self.locale
            .keywords
            .get(word)
            .or_else(|| self.locale.keywords.get(&word.to_lowercase()))
            .map_or(word, String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Keyword,
    Verbatim,
    Clause,
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    index: usize,
    flag: Flag,
    /// Byte length including braces.
    len: usize,
}

/// Parses `{n}`, `{n*}` or `{n:c}` at the start of `s`.
fn parse_placeholder(s: &str) -> Option<Placeholder> {
    let close = s.find('}')?;
    let inner = &s[1..close];
    let (digits, flag) = if let Some(d) = inner.strip_suffix('*') {
        (d, Flag::Verbatim)
    } else if let Some(d) = inner.strip_suffix(":c") {
        (d, Flag::Clause)
    } else {
        (inner, Flag::Keyword)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(Placeholder {
        index: digits.parse().ok()?,
        flag,
        len: close + 1,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}

/// Lowers the first letter unless the word is an acronym (`URL`).
fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(first), second)
            if first.is_uppercase() && !second.is_some_and(char::is_uppercase) =>
        {
            first.to_lowercase().chain(s.chars().skip(1)).collect()
        }
        _ => s.to_string(),
    }
}

/// Errors loading locale data.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    /// No bundled dictionary for the tag.
    #[error("Unsupported locale: {0}")]
    Unsupported(String),

    /// The locale JSON is malformed.
    #[error("Failed to parse locale set: {message}")]
    Parse {
        /// Decoder message.
        message: String,
    },
}
