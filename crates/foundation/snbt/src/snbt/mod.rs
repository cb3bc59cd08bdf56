//! Reading and writing SNBT.
//!
//! The grammar, with whitespace permitted between any two tokens:
//!
//! ```text
//! value    := compound | list | array | quoted | unquoted
//! compound := '{' [ key ':' value { ',' key ':' value } [ ',' ] ] '}'
//! list     := '[' [ value { ',' value } [ ',' ] ] ']'
//! array    := '[' ('B' | 'I' | 'L') ';' [ value { ',' value } [ ',' ] ] ']'
//! key      := quoted | unquoted
//! ```
//!
//! Unquoted tokens are classified as numbers by [`numeric::classify`]; a token which is not
//! a valid number is read as a string.

pub mod numeric;
mod reader;
pub(crate) mod write;


use std::borrow::Cow;

use crate::{
    error::TagError,
    settings::{SnbtParseOptions, SnbtWriteOptions},
    tag::{CompoundWithOptions, SnbtCompound, SnbtList, SnbtString, SnbtTag, TagType, TagWithOptions},
};

use self::reader::Reader;


pub use crate::error::{ErrorContext, SnbtError, SnbtErrorKind};


// ================================
//      Entry points
// ================================

/// Parses SNBT whose root value is a compound.
///
/// Whitespace around the root is ignored, but anything else after it is an error.
/// A root value of another type is reported as an error as well, after it has been read.
#[inline]
pub fn parse(input: &str) -> Result<SnbtCompound, SnbtError> {
    parse_with_options(input, SnbtParseOptions::default())
}

/// Parses SNBT whose root value is a compound. See [`parse`].
pub fn parse_with_options(input: &str, opts: SnbtParseOptions) -> Result<SnbtCompound, SnbtError> {
    let mut reader = Reader::new(input, opts);

    reader.skip_whitespace();
    let start = reader.index();

    match read_root(&mut reader)? {
        SnbtTag::Compound(compound) => Ok(compound),
        other => Err(SnbtError::parsing_with_suggestion(
            input,
            start,
            format!("expected a Compound as the root value, found {}", other.tag_name()),
            "wrap the value in a compound, like {value: ...}",
        )),
    }
}

/// Parses SNBT with a root value of any type.
#[inline]
pub fn parse_any(input: &str) -> Result<SnbtTag, SnbtError> {
    parse_any_with_options(input, SnbtParseOptions::default())
}

/// Parses SNBT with a root value of any type.
pub fn parse_any_with_options(input: &str, opts: SnbtParseOptions) -> Result<SnbtTag, SnbtError> {
    read_root(&mut Reader::new(input, opts))
}

/// Writes a tag as SNBT.
#[inline]
pub fn stringify(tag: &SnbtTag, opts: &SnbtWriteOptions) -> String {
    TagWithOptions::new(tag, opts).to_string()
}

/// Writes a compound as SNBT.
#[inline]
pub fn stringify_compound(compound: &SnbtCompound, opts: &SnbtWriteOptions) -> String {
    CompoundWithOptions::new(compound, opts).to_string()
}


// ================================
//      Parsing
// ================================

fn read_root(reader: &mut Reader<'_>) -> Result<SnbtTag, SnbtError> {
    let root = read_value(reader, 0)?;

    reader.skip_whitespace();
    if reader.at_end() {
        Ok(root)
    } else {
        Err(SnbtError::trailing_data(reader.raw(), reader.index()))
    }
}

/// Reads a value, where `depth` is the number of compounds and lists enclosing it.
fn read_value(reader: &mut Reader<'_>, depth: u32) -> Result<SnbtTag, SnbtError> {
    match reader.peek_significant() {
        Some('{') => read_compound(reader, depth).map(SnbtTag::Compound),
        Some('[') => read_list_or_array(reader, depth),
        Some('"' | '\'') => {
            let string = reader.read_quoted_string()?;
            Ok(SnbtTag::String(SnbtString::new(string)))
        }
        Some(_) => read_unquoted_value(reader),
        None => Err(reader.error("expected a value, found end of input")),
    }
}

fn read_unquoted_value(reader: &mut Reader<'_>) -> Result<SnbtTag, SnbtError> {
    let start = reader.index();
    let token = reader.read_unquoted_string();

    if token.is_empty() {
        return Err(reader.error(format!("expected a value, found {}", reader.describe_next())));
    }

    Ok(match numeric::classify(token) {
        Some(Ok(tag)) => tag,
        Some(Err(error)) => {
            log::debug!("reading `{token}` at position {start} as a string: {error}");
            SnbtTag::String(SnbtString::with_diagnostic(token, error))
        }
        None => SnbtTag::String(SnbtString::new(token)),
    })
}

fn check_depth(reader: &Reader<'_>, depth: u32) -> Result<(), SnbtError> {
    let limit = reader.depth_limit();
    if depth >= limit {
        Err(SnbtError::parsing_with_suggestion(
            reader.raw(),
            reader.index(),
            format!("compounds and lists are nested more than {limit} levels deep"),
            "the depth limit can be raised with `SnbtParseOptions::depth_limit`",
        ))
    } else {
        Ok(())
    }
}

fn read_compound(reader: &mut Reader<'_>, depth: u32) -> Result<SnbtCompound, SnbtError> {
    reader.expect('{')?;
    check_depth(reader, depth)?;

    let mut compound = SnbtCompound::new();
    if reader.peek_significant() == Some('}') {
        reader.next_ch();
        return Ok(compound);
    }

    loop {
        reader.skip_whitespace();
        let key_start = reader.index();
        let key = read_key(reader)?;

        if compound.contains_key(&key) {
            return Err(SnbtError::tag(reader.raw(), key_start, TagError::duplicate_key(&key)));
        }

        if reader.peek_significant() != Some(':') {
            return Err(SnbtError::parsing_with_suggestion(
                reader.raw(),
                reader.index(),
                format!("expected ':' after key \"{key}\", found {}", reader.describe_next()),
                "keys which contain special characters must be quoted",
            ));
        }
        reader.next_ch();

        let value = read_value(reader, depth + 1)?;
        compound.insert(key, value);

        match reader.peek_significant() {
            Some(',') => {
                reader.next_ch();
                // A trailing comma is allowed
                if reader.peek_significant() == Some('}') {
                    reader.next_ch();
                    return Ok(compound);
                }
            }
            Some('}') => {
                reader.next_ch();
                return Ok(compound);
            }
            _ => {
                return Err(reader.error(format!(
                    "expected ',' or '}}' in compound, found {}",
                    reader.describe_next(),
                )));
            }
        }
    }
}

fn read_key(reader: &mut Reader<'_>) -> Result<String, SnbtError> {
    match reader.peek_significant() {
        Some('"' | '\'') => reader.read_quoted_string().map(Cow::into_owned),
        _ => {
            let key = reader.read_unquoted_string();
            if key.is_empty() {
                Err(reader.error(format!(
                    "expected a compound key, found {}",
                    reader.describe_next(),
                )))
            } else {
                Ok(key.to_owned())
            }
        }
    }
}

fn read_list_or_array(reader: &mut Reader<'_>, depth: u32) -> Result<SnbtTag, SnbtError> {
    reader.expect('[')?;
    check_depth(reader, depth)?;
    reader.skip_whitespace();

    let marker = match (reader.peek_ch(), reader.peek_nth_ch(1)) {
        (Some(marker @ ('B' | 'I' | 'L')), Some(';')) => Some(marker),
        _ => None,
    };

    let Some(marker) = marker else {
        let mut list = SnbtList::new();
        read_elements(reader, depth, |element| list.push(element))?;
        return Ok(SnbtTag::List(list));
    };

    reader.next_ch();
    reader.next_ch();

    Ok(match marker {
        'B' => SnbtTag::ByteArray(read_array(reader, depth, TagType::Byte)?),
        'I' => SnbtTag::IntArray(read_array(reader, depth, TagType::Int)?),
        _   => SnbtTag::LongArray(read_array(reader, depth, TagType::Long)?),
    })
}

fn read_array<T>(reader: &mut Reader<'_>, depth: u32, expected: TagType) -> Result<Vec<T>, SnbtError>
where
    T: TryFrom<SnbtTag>,
{
    let mut array = Vec::new();

    read_elements(reader, depth, |element| {
        let found = element.tag_type();
        match T::try_from(element) {
            Ok(value) => {
                array.push(value);
                Ok(())
            }
            Err(_) => Err(TagError::invalid_element_type(found, expected)),
        }
    })?;

    Ok(array)
}

/// Reads comma-separated values up to and including the closing `]`.
/// Errors from `push` are anchored at the start of the offending element.
fn read_elements<F>(reader: &mut Reader<'_>, depth: u32, mut push: F) -> Result<(), SnbtError>
where
    F: FnMut(SnbtTag) -> Result<(), TagError>,
{
    if reader.peek_significant() == Some(']') {
        reader.next_ch();
        return Ok(());
    }

    loop {
        reader.skip_whitespace();
        let element_start = reader.index();

        let element = read_value(reader, depth + 1)?;
        push(element).map_err(|error| SnbtError::tag(reader.raw(), element_start, error))?;

        match reader.peek_significant() {
            Some(',') => {
                reader.next_ch();
                // A trailing comma is allowed
                if reader.peek_significant() == Some(']') {
                    reader.next_ch();
                    return Ok(());
                }
            }
            Some(']') => {
                reader.next_ch();
                return Ok(());
            }
            _ => {
                return Err(reader.error(format!(
                    "expected ',' or ']', found {}",
                    reader.describe_next(),
                )));
            }
        }
    }
}
