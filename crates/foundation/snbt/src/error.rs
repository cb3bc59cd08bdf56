use std::{borrow::Cow, error, fmt};
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::tag::TagType;


/// The number of characters of input shown before the cursor in an [`ErrorContext`].
pub const CONTEXT_CHARS: usize = 35;


/// Which end of a numeric range a value fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    Min,
    Max,
}

impl Display for RangeBound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => f.write_str("at least"),
            Self::Max => f.write_str("at most"),
        }
    }
}

/// An error produced while constructing or mutating values of the tag model,
/// independent of any SNBT text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// A numeric value does not fit in the bounds of its tag type.
    #[error("value out of range for {tag_type}: must be {bound} {limit}")]
    ValueOutOfRange {
        tag_type: TagType,
        bound:    RangeBound,
        /// The bound which was exceeded.
        limit:    i64,
    },
    /// A decimal integer literal is malformed, e.g. `01` or `+`.
    #[error("malformed {tag_type} literal '{literal}'")]
    InvalidFormat {
        tag_type: TagType,
        literal:  Box<str>,
    },
    /// A key was added to a compound which already contained that key.
    #[error("duplicate compound key \"{key}\"")]
    DuplicateKey {
        key: Box<str>,
    },
    /// A value was pushed to a list (or typed array) holding a different tag type.
    #[error("cannot insert {found} into a list of {expected}")]
    InvalidElementType {
        found:    TagType,
        expected: TagType,
    },
    /// A list element was replaced at an index past the end of the list.
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        index: usize,
        len:   usize,
    },
    /// A list's elements do not all share the element type pinned by the list.
    #[error("list element {index} is {found}, but the list holds {expected}")]
    InconsistentState {
        index:    usize,
        found:    TagType,
        expected: TagType,
    },
}

impl TagError {
    pub(crate) fn out_of_range(tag_type: TagType, bound: RangeBound, limit: i64) -> Self {
        Self::ValueOutOfRange { tag_type, bound, limit }
    }

    pub(crate) fn invalid_format(tag_type: TagType, literal: &str) -> Self {
        Self::InvalidFormat {
            tag_type,
            literal: literal.into(),
        }
    }

    pub(crate) fn duplicate_key(key: &str) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    pub(crate) fn invalid_element_type(found: TagType, expected: TagType) -> Self {
        Self::InvalidElementType { found, expected }
    }
}

/// The kind of an [`SnbtError`], along with any data specific to that kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnbtErrorKind {
    /// The input does not follow SNBT syntax at the error position.
    #[error("{message}")]
    Parsing {
        message:    Cow<'static, str>,
        /// A short hint on how the input might be fixed.
        suggestion: Option<&'static str>,
    },
    /// A complete root value was read, but non-whitespace input remained.
    #[error("trailing data after the root value")]
    TrailingData,
    /// The input was syntactically valid, but the value it describes is not.
    #[error(transparent)]
    Tag(#[from] TagError),
}

/// An error that occurs while parsing SNBT. Parsing halts at the first error; no partial
/// tree is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnbtError {
    kind:          SnbtErrorKind,
    position:      usize,
    char_position: usize,
    context:       ErrorContext,
}

impl SnbtError {
    pub(crate) fn new(input: &str, position: usize, kind: SnbtErrorKind) -> Self {
        let before = &input[..floor_char_boundary(input, position)];
        Self {
            kind,
            position,
            char_position: before.chars().count(),
            context:       ErrorContext::new(before),
        }
    }

    pub(crate) fn parsing<M>(input: &str, position: usize, message: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Self::new(input, position, SnbtErrorKind::Parsing {
            message:    message.into(),
            suggestion: None,
        })
    }

    pub(crate) fn parsing_with_suggestion<M>(
        input:      &str,
        position:   usize,
        message:    M,
        suggestion: &'static str,
    ) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Self::new(input, position, SnbtErrorKind::Parsing {
            message:    message.into(),
            suggestion: Some(suggestion),
        })
    }

    pub(crate) fn trailing_data(input: &str, position: usize) -> Self {
        Self::new(input, position, SnbtErrorKind::TrailingData)
    }

    pub(crate) fn tag(input: &str, position: usize, error: TagError) -> Self {
        Self::new(input, position, SnbtErrorKind::Tag(error))
    }

    #[inline]
    pub fn kind(&self) -> &SnbtErrorKind {
        &self.kind
    }

    /// The byte offset into the input at which the error was detected.
    /// See [`char_position`](SnbtError::char_position) for the offset in characters.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of characters of input before the error position. This is the position
    /// shown when the error is displayed, and equals [`position`](SnbtError::position)
    /// for ASCII input.
    #[inline]
    pub fn char_position(&self) -> usize {
        self.char_position
    }

    #[inline]
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// The hint attached to a syntax error, if any.
    #[inline]
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            SnbtErrorKind::Parsing { suggestion, .. } => *suggestion,
            _ => None,
        }
    }

    /// Returns the underlying tag model error, if this error was caused by one.
    #[inline]
    pub fn tag_error(&self) -> Option<&TagError> {
        match &self.kind {
            SnbtErrorKind::Tag(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for SnbtError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}: {}", self.kind, self.char_position, self.context)?;
        if let Some(suggestion) = self.suggestion() {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl error::Error for SnbtError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.tag_error().map(|error| error as &(dyn error::Error + 'static))
    }
}

/// The input leading up to the position of an [`SnbtError`], limited to
/// the last [`CONTEXT_CHARS`] characters.
///
/// Displayed as `...<snippet><--[HERE]`, where the `...` is present only
/// if the snippet was truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    snippet:   String,
    truncated: bool,
}

/// The largest character boundary of `input` at or before `position`.
fn floor_char_boundary(input: &str, position: usize) -> usize {
    let mut position = position.min(input.len());
    while !input.is_char_boundary(position) {
        position -= 1;
    }
    position
}

impl ErrorContext {
    /// Keeps the end of `before`, the input preceding the error position.
    fn new(before: &str) -> Self {
        let start = before
            .char_indices()
            .rev()
            .nth(CONTEXT_CHARS - 1)
            .map(|(index, _)| index)
            .unwrap_or(0);

        Self {
            snippet:   before[start..].to_owned(),
            truncated: start > 0,
        }
    }

    /// The input preceding the error position, ending at the error position.
    #[inline]
    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Whether earlier input was cut off from the snippet.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.truncated {
            f.write_str("...")?;
        }
        write!(f, "{}<--[HERE]", self.snippet)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_bounded_and_ends_at_cursor() {
        let input = "{a: 1, b: 2, c: 3, d: 4, e: 5, f: 6, g: 7, h: 8}";
        let error = SnbtError::parsing(input, 44, "test");

        let context = error.context();
        assert_eq!(context.snippet().chars().count(), CONTEXT_CHARS);
        assert!(input[..44].ends_with(context.snippet()), "snippet must end at the cursor");
        assert!(context.is_truncated());
        assert!(context.to_string().starts_with("..."));
        assert!(context.to_string().ends_with("<--[HERE]"));
    }

    #[test]
    fn short_context_is_not_truncated() {
        let error = SnbtError::trailing_data("{} x", 3);
        assert_eq!(error.context().snippet(), "{} ");
        assert!(!error.context().is_truncated());
        assert_eq!(error.context().to_string(), "{} <--[HERE]");
    }

    #[test]
    fn context_respects_char_boundaries() {
        // Each of these characters is multiple bytes long
        let input = "{\u{e9}\u{e9}\u{e9}";
        let error = SnbtError::parsing(input, 2, "test");
        assert_eq!(error.context().snippet(), "{");
    }

    #[test]
    fn displayed_position_counts_characters() {
        // `é` takes two bytes
        let input = "{\u{e9}:1,x}";
        let position = input.find('x').unwrap();
        let error = SnbtError::parsing(input, position, "test");

        assert_eq!(error.position(), 6);
        assert_eq!(error.char_position(), 5);
        assert_eq!(error.to_string(), "test at position 5: {\u{e9}:1,<--[HERE]");
    }

    #[test]
    fn display_includes_suggestion() {
        let error = SnbtError::parsing_with_suggestion("'\\q'", 1, "invalid escape", "hint");
        assert_eq!(error.to_string(), "invalid escape at position 1: '<--[HERE] (hint)");
        assert_eq!(error.suggestion(), Some("hint"));
    }
}
