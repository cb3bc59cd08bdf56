use std::borrow::Cow;

use crate::tag::ordering::EntryComparator;


// ================================
//      Limits
// ================================

/// Compounds and lists can be nested up to 512 levels deep in Minecraft.
/// Note that the parser is recursive; if the limit is too high and unreasonably nested
/// input is received, the nested function calls could exceed the maximum stack size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepthLimit(pub(crate) u32);

impl Default for DepthLimit {
    /// The maximum depth that compounds and lists can be nested in Minecraft.
    fn default() -> Self {
        Self(512)
    }
}

impl DepthLimit {
    /// A limit on how deeply compounds and lists may be nested.
    #[inline]
    pub fn new(limit: u32) -> Self {
        Self(limit)
    }

    #[inline]
    pub fn limit(self) -> u32 {
        self.0
    }
}


// ================================
//      SNBT Settings
// ================================

/// Options for parsing SNBT.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SnbtParseOptions {
    /// The maximum depth that compounds and lists may be nested.
    ///
    /// Default: 512, the limit used by Minecraft.
    pub depth_limit: DepthLimit,
}

/// Options for writing SNBT.
///
/// With the exception of `deflate` and `unquote_strings`, no combination of options
/// changes the tree read back from the output.
#[derive(Debug, Clone)]
pub struct SnbtWriteOptions {
    /// The string repeated once per level of nesting at the start of each line.
    ///
    /// Default: a single tab.
    pub indent: Cow<'static, str>,
    /// Whether bracketed values in a compound start on the line after their key,
    /// at the indentation of the key.
    ///
    /// Default: false.
    pub bracket_on_new_line: bool,
    /// Whether the brackets of non-primitive list elements share a line with the list's
    /// brackets, as in `[{` and `}, {`.
    ///
    /// Default: false.
    pub collapse_brackets: bool,
    /// Whether lists and arrays of primitives are written one element per line,
    /// instead of on a single line.
    ///
    /// Default: false.
    pub expand_primitives: bool,
    /// Whether a comma is written after the last element of multi-line compounds and lists.
    ///
    /// Default: false.
    pub trailing_comma: bool,
    /// The order in which compound entries are written. `None` keeps insertion order.
    /// See [`ordering`](crate::ordering) for presets.
    ///
    /// Default: `None`.
    pub sort: Option<EntryComparator>,
    /// Whether every key is quoted, even those that could be written unquoted.
    ///
    /// Default: false.
    pub quote_keys: bool,
    /// Whether string values are written without quotes when they can be read back unquoted.
    /// Note that an unquoted string may be read back as a different string, if it was produced
    /// from a numeric-looking token.
    ///
    /// Default: false.
    pub unquote_strings: bool,
    /// Whether all non-essential whitespace is removed. Overrides the indentation, newline,
    /// and trailing comma options.
    ///
    /// Default: false.
    pub deflate: bool,
    /// The case of numeric type suffixes.
    ///
    /// Default: all lowercase.
    pub suffix_case: SuffixCase,
}

impl SnbtWriteOptions {
    /// Options that write SNBT without any non-essential whitespace,
    /// like `{a:1b,b:[I;1,2]}`.
    #[inline]
    pub fn deflated() -> Self {
        Self {
            deflate: true,
            ..Self::default()
        }
    }

    /// The default options, indented with `indent` instead of a tab.
    #[inline]
    pub fn with_indent<S: Into<Cow<'static, str>>>(indent: S) -> Self {
        Self {
            indent: indent.into(),
            ..Self::default()
        }
    }
}

impl Default for SnbtWriteOptions {
    fn default() -> Self {
        Self {
            indent:              Cow::Borrowed("\t"),
            bracket_on_new_line: false,
            collapse_brackets:   false,
            expand_primitives:   false,
            trailing_comma:      false,
            sort:                None,
            quote_keys:          false,
            unquote_strings:     false,
            deflate:             false,
            suffix_case:         SuffixCase::default(),
        }
    }
}

/// The case of a letter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterCase {
    #[default]
    Lower,
    Upper,
}

/// The type suffixes written after numeric values. Int has no suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericSuffix {
    Byte,
    Short,
    Long,
    Float,
    Double,
}

impl NumericSuffix {
    #[inline]
    pub fn lowercase(self) -> char {
        match self {
            Self::Byte   => 'b',
            Self::Short  => 's',
            Self::Long   => 'l',
            Self::Float  => 'f',
            Self::Double => 'd',
        }
    }
}

/// The case of each numeric type suffix. A suffix without its own setting
/// uses `default`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuffixCase {
    pub byte:    Option<LetterCase>,
    pub short:   Option<LetterCase>,
    pub long:    Option<LetterCase>,
    pub float:   Option<LetterCase>,
    pub double:  Option<LetterCase>,
    pub default: LetterCase,
}

impl SuffixCase {
    /// Uses `case` for every suffix.
    #[inline]
    pub fn all(case: LetterCase) -> Self {
        Self {
            default: case,
            ..Self::default()
        }
    }

    /// Overrides the case of one suffix.
    #[must_use]
    pub fn with(mut self, suffix: NumericSuffix, case: LetterCase) -> Self {
        let slot = match suffix {
            NumericSuffix::Byte   => &mut self.byte,
            NumericSuffix::Short  => &mut self.short,
            NumericSuffix::Long   => &mut self.long,
            NumericSuffix::Float  => &mut self.float,
            NumericSuffix::Double => &mut self.double,
        };
        *slot = Some(case);
        self
    }

    pub fn case_of(self, suffix: NumericSuffix) -> LetterCase {
        let case = match suffix {
            NumericSuffix::Byte   => self.byte,
            NumericSuffix::Short  => self.short,
            NumericSuffix::Long   => self.long,
            NumericSuffix::Float  => self.float,
            NumericSuffix::Double => self.double,
        };
        case.unwrap_or(self.default)
    }

    /// The letter written for `suffix`.
    #[inline]
    pub fn letter(self, suffix: NumericSuffix) -> char {
        match self.case_of(suffix) {
            LetterCase::Lower => suffix.lowercase(),
            LetterCase::Upper => suffix.lowercase().to_ascii_uppercase(),
        }
    }
}
