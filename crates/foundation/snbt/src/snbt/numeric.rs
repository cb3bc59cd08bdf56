//! Classification of unquoted literals into numeric tags.
//!
//! An unquoted literal is tested against these shapes, in order, with the first match winning.
//! Suffix letters are case-insensitive.
//!
//! | Tag | Shape |
//! |---|---|
//! | Float | `[-+]?([0-9]+\.?\|[0-9]*\.[0-9]+)(e[-+]?[0-9]+)?f` |
//! | Byte | `[-+]?(0\|[1-9][0-9]*)b` |
//! | Long | `[-+]?(0\|[1-9][0-9]*)l` |
//! | Short | `[-+]?(0\|[1-9][0-9]*)s` |
//! | Int | `[-+]?(0\|[1-9][0-9]*)` |
//! | Double | `[-+]?([0-9]+\.?\|[0-9]*\.[0-9]+)(e[-+]?[0-9]+)?d` |
//! | Double | the same, without a suffix, but with a `.` or an exponent |
//! | Byte | `true` or `false`, read as `1` or `0` |

use std::cmp::Ordering;

use crate::{
    error::{RangeBound, TagError},
    tag::{SnbtTag, TagType},
};


/// The magnitude of `i64::MAX`.
const LONG_MAX_DIGITS: &str = "9223372036854775807";
/// The magnitude of `i64::MIN`.
const LONG_MIN_DIGITS: &str = "9223372036854775808";


/// Classifies an unquoted literal.
///
/// Returns `None` if the literal does not have the shape of any numeric or boolean literal,
/// and `Some(Err(_))` if it does, but its value cannot be represented by the matched type.
/// For example, `300b` is shaped like a Byte, but is out of range.
pub fn classify(literal: &str) -> Option<Result<SnbtTag, TagError>> {
    let (body, suffix) = split_suffix(literal);

    let classified = match suffix {
        Some(b'f') if float_shape(body).is_some() => Ok(SnbtTag::Float(body.parse().ok()?)),
        Some(b'b') if integer_shape(body) => parse_decimal(body, TagType::Byte).and_then(SnbtTag::byte),
        Some(b'l') if integer_shape(body) => parse_decimal(body, TagType::Long).map(SnbtTag::Long),
        Some(b's') if integer_shape(body) => parse_decimal(body, TagType::Short).and_then(SnbtTag::short),
        _ if integer_shape(literal) => parse_decimal(literal, TagType::Int).and_then(SnbtTag::int),
        Some(b'd') if float_shape(body).is_some() => Ok(SnbtTag::double(body.parse().ok()?)),
        _ => {
            if let Some(shape) = float_shape(literal) {
                if shape.has_dot || shape.has_exponent {
                    return Some(Ok(SnbtTag::double(literal.parse().ok()?)));
                }
            }

            if literal.eq_ignore_ascii_case("true") {
                Ok(SnbtTag::Byte(1))
            } else if literal.eq_ignore_ascii_case("false") {
                Ok(SnbtTag::Byte(0))
            } else {
                return None;
            }
        }
    };

    Some(classified)
}

/// Whether the literal has the shape of a numeric or boolean literal, even if
/// its value is out of range.
#[inline]
pub fn is_numeric_literal(literal: &str) -> bool {
    classify(literal).is_some()
}

/// Parses a decimal integer literal without a suffix, checking that it matches
/// `[-+]?(0|[1-9][0-9]*)` and that its value lies within the bounds of `tag_type`.
///
/// Magnitudes too large for an `i64` are detected by comparing digits, so the error
/// always reports the bound of `tag_type`.
pub(crate) fn parse_decimal(literal: &str, tag_type: TagType) -> Result<i64, TagError> {
    if !integer_shape(literal) {
        return Err(TagError::invalid_format(tag_type, literal));
    }

    let negative = literal.starts_with('-');
    let digits = strip_sign(literal);
    let limit_digits = if negative { LONG_MIN_DIGITS } else { LONG_MAX_DIGITS };

    let fits_long = match digits.len().cmp(&limit_digits.len()) {
        Ordering::Less    => true,
        Ordering::Greater => false,
        // Equal-length strings of ASCII digits compare like the numbers they represent
        Ordering::Equal   => digits <= limit_digits,
    };

    let out_of_range = || {
        let (min, max) = tag_type.integer_bounds().unwrap_or((i64::MIN, i64::MAX));
        if negative {
            TagError::out_of_range(tag_type, RangeBound::Min, min)
        } else {
            TagError::out_of_range(tag_type, RangeBound::Max, max)
        }
    };

    if !fits_long {
        return Err(out_of_range());
    }

    let value: i64 = literal.parse().map_err(|_err| out_of_range())?;

    match tag_type.integer_bounds() {
        Some((min, _)) if value < min => Err(out_of_range()),
        Some((_, max)) if value > max => Err(out_of_range()),
        _ => Ok(value),
    }
}

/// Splits off a trailing ASCII letter, returned in lowercase.
fn split_suffix(literal: &str) -> (&str, Option<u8>) {
    match literal.as_bytes().last() {
        // The last byte is ASCII, so it is a whole character
        Some(&last) if last.is_ascii_alphabetic() => {
            (&literal[..literal.len() - 1], Some(last.to_ascii_lowercase()))
        }
        _ => (literal, None),
    }
}

#[inline]
fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['-', '+']).unwrap_or(text)
}

#[inline]
fn all_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

/// `[-+]?(0|[1-9][0-9]*)`
fn integer_shape(text: &str) -> bool {
    match strip_sign(text).as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FloatShape {
    has_dot:      bool,
    has_exponent: bool,
}

/// `[-+]?([0-9]+\.?|[0-9]*\.[0-9]+)(e[-+]?[0-9]+)?`, with a case-insensitive `e`
fn float_shape(text: &str) -> Option<FloatShape> {
    let text = strip_sign(text);

    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(strip_sign(exponent))),
        None => (text, None),
    };

    if let Some(exponent) = exponent {
        if exponent.is_empty() || !all_digits(exponent) {
            return None;
        }
    }

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };

    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }

    // Either `[0-9]+\.?` or `[0-9]*\.[0-9]+`
    let has_digits = !whole.is_empty() || fraction.is_some_and(|fraction| !fraction.is_empty());

    has_digits.then_some(FloatShape {
        has_dot:      fraction.is_some(),
        has_exponent: exponent.is_some(),
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tag(literal: &str) -> SnbtTag {
        match classify(literal) {
            Some(Ok(tag)) => tag,
            other => panic!("{literal} should be a valid number, got {other:?}"),
        }
    }

    #[test]
    fn suffixes() {
        assert_eq!(tag("1b"), SnbtTag::Byte(1));
        assert_eq!(tag("-5B"), SnbtTag::Byte(-5));
        assert_eq!(tag("300s"), SnbtTag::Short(300));
        assert_eq!(tag("+7"), SnbtTag::Int(7));
        assert_eq!(tag("10L"), SnbtTag::Long(10));
        assert_eq!(tag("1.5f"), SnbtTag::Float(1.5));
        assert_eq!(tag("2F"), SnbtTag::Float(2.));
        assert_eq!(tag("2d"), SnbtTag::Double(2.));
        assert_eq!(tag(".5D"), SnbtTag::Double(0.5));
    }

    #[test]
    fn unsuffixed_doubles_need_dot_or_exponent() {
        assert_eq!(tag("1.5"), SnbtTag::Double(1.5));
        assert_eq!(tag("3."), SnbtTag::Double(3.));
        assert_eq!(tag("1e3"), SnbtTag::Double(1000.));
        assert_eq!(tag("-2.5E-1"), SnbtTag::Double(-0.25));
        assert_eq!(tag("5"), SnbtTag::Int(5));
    }

    #[test]
    fn booleans() {
        assert_eq!(tag("true"), SnbtTag::Byte(1));
        assert_eq!(tag("FALSE"), SnbtTag::Byte(0));
        assert_eq!(tag("True"), SnbtTag::Byte(1));
    }

    #[test]
    fn not_numbers() {
        for literal in [
            "", "abc", "1x", "01", "00b", "1.5b", "e5", ".", ".e1", "1e", "1e+", "1..2",
            "1.2.3", "--1", "+", "b", "f", "tru", "1_000", "0x10", "Infinity", "NaN",
        ] {
            assert!(classify(literal).is_none(), "{literal:?} should not be a number");
        }
    }

    #[test]
    fn out_of_range_literals() {
        assert_eq!(
            classify("128b"),
            Some(Err(TagError::out_of_range(TagType::Byte, RangeBound::Max, 127))),
        );
        assert_eq!(
            classify("-32769s"),
            Some(Err(TagError::out_of_range(TagType::Short, RangeBound::Min, -32_768))),
        );
        assert_eq!(
            classify("2147483648"),
            Some(Err(TagError::out_of_range(TagType::Int, RangeBound::Max, 2_147_483_647))),
        );
        // Too large even for an i64, but the Byte bound is reported
        assert_eq!(
            classify("99999999999999999999b"),
            Some(Err(TagError::out_of_range(TagType::Byte, RangeBound::Max, 127))),
        );
        assert_eq!(
            classify("9223372036854775808l"),
            Some(Err(TagError::out_of_range(TagType::Long, RangeBound::Max, i64::MAX))),
        );
        assert!(is_numeric_literal("300b"));
    }

    #[test]
    fn float_overflow_is_clamped() {
        assert_eq!(tag("9e99f"), SnbtTag::Float(f32::INFINITY));
        assert_eq!(tag("-9e99f"), SnbtTag::Float(f32::NEG_INFINITY));
        assert_eq!(tag("9e999d"), SnbtTag::Double(f64::INFINITY));
        assert_eq!(tag("-9e999"), SnbtTag::Double(f64::NEG_INFINITY));
    }

    #[test]
    fn long_digit_comparison() {
        assert_eq!(parse_decimal("9223372036854775807", TagType::Long), Ok(i64::MAX));
        assert_eq!(parse_decimal("-9223372036854775808", TagType::Long), Ok(i64::MIN));
        assert!(parse_decimal("9223372036854775808", TagType::Long).is_err());
        assert!(parse_decimal("10000000000000000000", TagType::Long).is_err());
        assert_eq!(
            parse_decimal("1.0", TagType::Long),
            Err(TagError::invalid_format(TagType::Long, "1.0")),
        );
    }
}
