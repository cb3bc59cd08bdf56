use std::{borrow::Borrow, fmt, ops::Deref};
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::{
    error::TagError,
    settings::SnbtWriteOptions,
    snbt::{numeric, write::SnbtWriter},
};


/// Whether `ch` may appear in an unquoted string or key.
#[inline]
pub fn allowed_unquoted(ch: char) -> bool {
    matches!(ch, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_' | '-' | '.' | '+')
}

/// Whether `text` must be quoted to be read back as the same string.
///
/// That is the case if it is empty, contains any character outside `[A-Za-z0-9._+-]`,
/// or, for values only, looks like a numeric or boolean literal. Keys are never
/// classified as numbers, so `1b` is a valid unquoted key.
pub fn needs_quotes(text: &str, is_key: bool) -> bool {
    if text.is_empty() || !text.chars().all(allowed_unquoted) {
        return true;
    }

    !is_key && numeric::is_numeric_literal(text)
}

/// A String tag, or a compound key.
///
/// Whether the text must be quoted when written is computed once, on construction.
/// A string produced by the parser's numeric fallback (such as `300b`, which looks like
/// a Byte but is out of range) carries the error which prevented it from being a number;
/// see [`SnbtString::diagnostic`].
///
/// Compound keys are stored as keys (see [`SnbtString::key`]), and everything else as values;
/// the role decides which quoting rules apply. Equality and hashing only consider the text,
/// so a key can be looked up with a `&str`.
///
/// `Display` writes the string as SNBT with the default options, quoted as its role requires.
#[derive(Clone)]
pub struct SnbtString {
    value:        String,
    is_key:       bool,
    needs_quotes: bool,
    diagnostic:   Option<Box<TagError>>,
}

impl SnbtString {
    /// Creates a string value.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self::with_role(value.into(), false)
    }

    /// Creates a compound key.
    pub fn key<S: Into<String>>(value: S) -> Self {
        Self::with_role(value.into(), true)
    }

    fn with_role(value: String, is_key: bool) -> Self {
        let needs_quotes = needs_quotes(&value, is_key);
        Self {
            value,
            is_key,
            needs_quotes,
            diagnostic: None,
        }
    }

    pub(crate) fn with_diagnostic<S: Into<String>>(value: S, diagnostic: TagError) -> Self {
        Self {
            diagnostic: Some(Box::new(diagnostic)),
            ..Self::new(value)
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.value
    }

    #[inline]
    pub fn is_key(&self) -> bool {
        self.is_key
    }

    /// Whether this string must be quoted to be read back as the same string, in its role.
    #[inline]
    pub fn needs_quotes(&self) -> bool {
        self.needs_quotes
    }

    /// Whether this string must be quoted to be read back as the same string when written
    /// as a value. Unlike keys, values which look like numbers must be quoted.
    #[inline]
    pub fn needs_quotes_as_value(&self) -> bool {
        self.needs_quotes || (self.is_key && numeric::is_numeric_literal(&self.value))
    }

    /// The reason this string, read from an unquoted numeric-looking literal,
    /// is not a number.
    #[inline]
    pub fn diagnostic(&self) -> Option<&TagError> {
        self.diagnostic.as_deref()
    }
}

impl PartialEq for SnbtString {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SnbtString {}

/// Hashes like the `str` it holds, for lookups through [`Borrow`].
impl Hash for SnbtString {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Borrow<str> for SnbtString {
    #[inline]
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl Deref for SnbtString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl AsRef<str> for SnbtString {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<String> for SnbtString {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SnbtString {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Display for SnbtString {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        SnbtWriter::new(&SnbtWriteOptions::default()).write_snbt_string(f, self)
    }
}

impl Debug for SnbtString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("SnbtString");
        debug
            .field("value", &self.value)
            .field("is_key", &self.is_key)
            .field("needs_quotes", &self.needs_quotes);
        if let Some(diagnostic) = &self.diagnostic {
            debug.field("diagnostic", diagnostic);
        }
        debug.finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_rules() {
        assert!(needs_quotes("", false));
        assert!(needs_quotes("", true));
        assert!(needs_quotes("hello world", false));
        assert!(needs_quotes("caf\u{e9}", true));
        assert!(!needs_quotes("minecraft.stone_1", false));
        assert!(!needs_quotes("a-b+c", true));
    }

    #[test]
    fn numeric_values_need_quotes() {
        for literal in ["12", "1b", "1.5", "1e5", "true", "FALSE", "3L", ".5d"] {
            assert!(needs_quotes(literal, false), "{literal} looks like a number");
            assert!(!needs_quotes(literal, true), "{literal} is a valid key");
        }
        // Out of range, but still shaped like a Byte
        assert!(needs_quotes("300b", false));
        assert!(!needs_quotes("1x", false));
    }

    #[test]
    fn equality_only_compares_text() {
        let diagnostic = TagError::duplicate_key("x");
        assert_eq!(SnbtString::with_diagnostic("300b", diagnostic), SnbtString::new("300b"));
        assert_eq!(SnbtString::key("a"), SnbtString::new("a"));
        assert_ne!(SnbtString::key("a"), SnbtString::key("A"));
    }

    #[test]
    fn quoting_depends_on_role() {
        let key = SnbtString::key("1b");
        assert!(!key.needs_quotes());
        assert!(key.needs_quotes_as_value());

        let value = SnbtString::new("1b");
        assert!(value.needs_quotes());
        assert!(value.needs_quotes_as_value());

        assert!(!SnbtString::key("stone").needs_quotes_as_value());
    }

    #[test]
    fn display_writes_snbt() {
        assert_eq!(SnbtString::new("stone").to_string(), "\"stone\"");
        assert_eq!(SnbtString::new("say \"hi\"").to_string(), r#""say \"hi\"""#);
        assert_eq!(SnbtString::key("stone").to_string(), "stone");
        assert_eq!(SnbtString::key("a b").to_string(), "\"a b\"");
        assert_eq!(SnbtString::key("1b").to_string(), "1b");
    }
}
