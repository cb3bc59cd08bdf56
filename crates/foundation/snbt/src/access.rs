use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::tag::TagType;


/// A tag whose type is not the one a conversion out of [`SnbtTag`] requires.
///
/// [`SnbtTag`]: crate::SnbtTag
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: TagType,
    pub found:    TagType,
}

impl TypeMismatch {
    #[inline]
    pub fn new(expected: TagType, found: TagType) -> Self {
        Self { expected, found }
    }
}

/// The place in a compound or list at which a typed accessor looked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Key(Box<str>),
    Index(usize),
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key)     => write!(f, "key \"{key}\""),
            Self::Index(index) => write!(f, "index {index}"),
        }
    }
}

/// An error from the typed accessors of [`SnbtCompound`] and [`SnbtList`], such as
/// `compound.get::<i32>("Count")`.
///
/// [`SnbtCompound`]: crate::SnbtCompound
/// [`SnbtList`]: crate::SnbtList
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("no tag with key \"{key}\"")]
    MissingKey {
        key: Box<str>,
    },
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        index: usize,
        len:   usize,
    },
    /// The tag exists, but has a different type than requested.
    #[error("tag at {location}: {mismatch}")]
    WrongType {
        location: Location,
        mismatch: TypeMismatch,
    },
    /// A `TryFrom<&SnbtTag>` conversion implemented outside this crate failed.
    #[error("tag at {location} could not be converted: {error}")]
    Conversion {
        location: Location,
        error:    anyhow::Error,
    },
}

impl AccessError {
    pub(crate) fn missing_key(key: &str) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Sorts the error of a conversion out of the tag at `location`: this crate's own
    /// conversions fail with a [`TypeMismatch`], anything else is kept as-is.
    pub(crate) fn from_conversion<E: Into<anyhow::Error>>(location: Location, error: E) -> Self {
        match error.into().downcast::<TypeMismatch>() {
            Ok(mismatch) => Self::WrongType { location, mismatch },
            Err(error)   => Self::Conversion { location, error },
        }
    }

    /// The type mismatch behind this error, if any.
    #[inline]
    pub fn type_mismatch(&self) -> Option<TypeMismatch> {
        match self {
            Self::WrongType { mismatch, .. } => Some(*mismatch),
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatches_keep_their_location() {
        let mismatch = TypeMismatch::new(TagType::Int, TagType::String);
        let error = AccessError::from_conversion(Location::Key("Count".into()), mismatch);

        assert_eq!(error.type_mismatch(), Some(mismatch));
        assert_eq!(error.to_string(), "tag at key \"Count\": expected Integer, found String");
    }

    #[test]
    fn foreign_conversion_errors() {
        let error = AccessError::from_conversion(Location::Index(2), anyhow::anyhow!("not a color"));
        assert!(matches!(
            &error,
            AccessError::Conversion { location: Location::Index(2), .. },
        ));
        assert_eq!(error.type_mismatch(), None);
        assert_eq!(error.to_string(), "tag at index 2 could not be converted: not a color");
    }
}
