mod compound;
mod list;
pub mod ordering;
mod string;


use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::{
    access::TypeMismatch,
    error::{RangeBound, TagError},
    settings::SnbtWriteOptions,
    snbt::{self, SnbtError, numeric, write::SnbtWriter},
};


pub use self::{
    compound::{Map, SnbtCompound},
    list::SnbtList,
    ordering::EntryComparator,
    string::{SnbtString, allowed_unquoted, needs_quotes},
};


/// The literal printed in place of a [`SnbtTag::Float`] whose magnitude is too large for an `f32`.
/// It is itself too large for an `f32`, so it parses back to the same clamped value.
pub const FLOAT_SENTINEL: &str = "9e99";
/// The literal printed in place of a [`SnbtTag::Double`] whose magnitude is too large for an `f64`.
pub const DOUBLE_SENTINEL: &str = "9e999";


/// A single value of the SNBT tag tree.
///
/// Containers exclusively own their children, so a tree is always acyclic. Values are only
/// mutated through the methods of [`SnbtCompound`] and [`SnbtList`]; the numeric variants
/// can only hold values inside their bounds, and the checked constructors such as
/// [`SnbtTag::byte`] report anything else as a [`TagError::ValueOutOfRange`].
///
/// `Display` writes pretty SNBT with the default [`SnbtWriteOptions`];
/// `Debug` writes deflated SNBT.
#[derive(Clone, PartialEq)]
pub enum SnbtTag {
    /// A UTF-8 string.
    String(SnbtString),
    /// A signed, one-byte integer.
    Byte(i8),
    /// A signed, two-byte integer.
    Short(i16),
    /// A signed, four-byte integer.
    Int(i32),
    /// A signed, eight-byte integer.
    Long(i64),
    /// A 32-bit floating point value. An infinite value is the clamp sentinel
    /// for out-of-range magnitudes, and is printed as [`FLOAT_SENTINEL`].
    Float(f32),
    /// A 64-bit floating point value. An infinite value is the clamp sentinel
    /// for out-of-range magnitudes, and is printed as [`DOUBLE_SENTINEL`].
    Double(f64),
    /// An array of signed bytes, printed as `[B;...]`.
    ByteArray(Vec<i8>),
    /// An array of signed, four-byte integers, printed as `[I;...]`.
    IntArray(Vec<i32>),
    /// An array of signed, eight-byte integers, printed as `[L;...]`.
    LongArray(Vec<i64>),
    /// An insertion-ordered map from unique keys to tags.
    Compound(SnbtCompound),
    /// A homogeneous list of tags.
    List(SnbtList),
}

/// The type of an [`SnbtTag`], without its payload.
///
/// The declaration order is the precedence order used when sorting compound entries by type,
/// see [`ordering::by_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TagType {
    String    = 0,
    Byte      = 1,
    Short     = 2,
    Int       = 3,
    Long      = 4,
    Float     = 5,
    Double    = 6,
    ByteArray = 7,
    IntArray  = 8,
    LongArray = 9,
    Compound  = 10,
    List      = 11,
}

impl TagType {
    /// Every tag type, in precedence order.
    pub const ALL: [Self; 12] = [
        Self::String,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::IntArray,
        Self::LongArray,
        Self::Compound,
        Self::List,
    ];

    /// The position of this type in the precedence order, from `String = 0` to `List = 11`.
    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// The name used for this type in diagnostics.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String    => "String",
            Self::Byte      => "Byte",
            Self::Short     => "Short",
            Self::Int       => "Integer",
            Self::Long      => "Long",
            Self::Float     => "Float",
            Self::Double    => "Double",
            Self::ByteArray => "ByteArray",
            Self::IntArray  => "IntArray",
            Self::LongArray => "LongArray",
            Self::Compound  => "Compound",
            Self::List      => "List",
        }
    }

    /// The ID of this type in binary NBT.
    #[inline]
    pub const fn numeric_id(self) -> u8 {
        match self {
            Self::Byte      => 1,
            Self::Short     => 2,
            Self::Int       => 3,
            Self::Long      => 4,
            Self::Float     => 5,
            Self::Double    => 6,
            Self::ByteArray => 7,
            Self::String    => 8,
            Self::List      => 9,
            Self::Compound  => 10,
            Self::IntArray  => 11,
            Self::LongArray => 12,
        }
    }

    /// The tag type with the given binary NBT ID. `0`, the ID of the End tag,
    /// has no counterpart in SNBT.
    pub const fn from_numeric_id(id: u8) -> Option<Self> {
        Some(match id {
            1  => Self::Byte,
            2  => Self::Short,
            3  => Self::Int,
            4  => Self::Long,
            5  => Self::Float,
            6  => Self::Double,
            7  => Self::ByteArray,
            8  => Self::String,
            9  => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _  => return None,
        })
    }

    /// Whether tags of this type are written without brackets.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        !matches!(
            self,
            Self::ByteArray | Self::IntArray | Self::LongArray | Self::Compound | Self::List,
        )
    }

    /// The marker written after the opening bracket of a typed array, e.g. `I` in `[I;1,2]`.
    #[inline]
    pub const fn array_prefix(self) -> Option<char> {
        match self {
            Self::ByteArray => Some('B'),
            Self::IntArray  => Some('I'),
            Self::LongArray => Some('L'),
            _ => None,
        }
    }

    /// The type pinned as the element type of a typed array.
    #[inline]
    pub const fn array_element_type(self) -> Option<Self> {
        match self {
            Self::ByteArray => Some(Self::Byte),
            Self::IntArray  => Some(Self::Int),
            Self::LongArray => Some(Self::Long),
            _ => None,
        }
    }

    /// The inclusive bounds of the integer types.
    #[inline]
    pub const fn integer_bounds(self) -> Option<(i64, i64)> {
        match self {
            Self::Byte  => Some((i8::MIN as i64, i8::MAX as i64)),
            Self::Short => Some((i16::MIN as i64, i16::MAX as i64)),
            Self::Int   => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::Long  => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl Display for TagType {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! checked_integer {
    ($($(#[$attr:meta])* $fn_name:ident, $int:ty, $tag:ident);* $(;)?) => {
        $(
            $(#[$attr])*
            pub fn $fn_name(value: i64) -> Result<Self, TagError> {
                match <$int>::try_from(value) {
                    Ok(value) => Ok(Self::$tag(value)),
                    Err(_) if value < 0 => Err(TagError::out_of_range(
                        TagType::$tag,
                        RangeBound::Min,
                        <$int>::MIN.into(),
                    )),
                    Err(_) => Err(TagError::out_of_range(
                        TagType::$tag,
                        RangeBound::Max,
                        <$int>::MAX.into(),
                    )),
                }
            }
        )*
    };
}

impl SnbtTag {
    checked_integer!(
        /// Creates a Byte tag, failing with [`TagError::ValueOutOfRange`] outside `-128..=127`.
        byte,  i8,  Byte;
        /// Creates a Short tag, failing with [`TagError::ValueOutOfRange`] outside the `i16` range.
        short, i16, Short;
        /// Creates an Int tag, failing with [`TagError::ValueOutOfRange`] outside the `i32` range.
        int,   i32, Int;
    );

    /// Creates a Long tag from a decimal literal like `-42`, without a type suffix.
    ///
    /// The literal must match `[-+]?(0|[1-9][0-9]*)`; anything else, such as `01` or `00`,
    /// is a [`TagError::InvalidFormat`]. Magnitudes outside the `i64` range are a
    /// [`TagError::ValueOutOfRange`].
    pub fn long_from_decimal(literal: &str) -> Result<Self, TagError> {
        numeric::parse_decimal(literal, TagType::Long).map(Self::Long)
    }

    /// Creates a Float tag. Magnitudes too large for an `f32` are clamped to the
    /// sentinel value (see [`FLOAT_SENTINEL`]), and NaN is replaced with `0`.
    pub fn float(value: f64) -> Self {
        let value = if value.is_nan() {
            0.
        } else if value.abs() > f64::from(f32::MAX) {
            f64::INFINITY.copysign(value)
        } else {
            value
        };

        // The value is in range of an f32, so this only rounds
        Self::Float(value as f32)
    }

    /// Creates a Double tag. Infinite values are kept as the sentinel value
    /// (see [`DOUBLE_SENTINEL`]), and NaN is replaced with `0`.
    pub fn double(value: f64) -> Self {
        if value.is_nan() {
            Self::Double(0.)
        } else {
            Self::Double(value)
        }
    }

    /// Creates a String tag.
    #[inline]
    pub fn string<S: Into<String>>(value: S) -> Self {
        Self::String(SnbtString::new(value))
    }

    /// Returns this tag's type.
    #[inline]
    pub fn tag_type(&self) -> TagType {
        match self {
            Self::String(_)    => TagType::String,
            Self::Byte(_)      => TagType::Byte,
            Self::Short(_)     => TagType::Short,
            Self::Int(_)       => TagType::Int,
            Self::Long(_)      => TagType::Long,
            Self::Float(_)     => TagType::Float,
            Self::Double(_)    => TagType::Double,
            Self::ByteArray(_) => TagType::ByteArray,
            Self::IntArray(_)  => TagType::IntArray,
            Self::LongArray(_) => TagType::LongArray,
            Self::Compound(_)  => TagType::Compound,
            Self::List(_)      => TagType::List,
        }
    }

    /// Returns the name of this tag's type, as used in diagnostics.
    #[inline]
    pub fn tag_name(&self) -> &'static str {
        self.tag_type().name()
    }

    /// Returns this tag's numeric ID in binary NBT.
    #[inline]
    pub fn numeric_tag_id(&self) -> u8 {
        self.tag_type().numeric_id()
    }

    /// Whether this tag is written without brackets.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.tag_type().is_primitive()
    }

    /// Parses any SNBT value, not only a compound. See [`snbt::parse_any`].
    #[inline]
    pub fn from_snbt(input: &str) -> Result<Self, SnbtError> {
        snbt::parse_any(input)
    }

    /// Converts this tag into SNBT with the default options, which is equivalent
    /// to `tag.to_string()`.
    #[inline]
    pub fn to_snbt(&self) -> String {
        self.to_string()
    }

    /// Converts this tag into SNBT.
    #[inline]
    pub fn to_snbt_with_options(&self, opts: &SnbtWriteOptions) -> String {
        TagWithOptions::new(self, opts).to_string()
    }
}

// Implement the from trait for all the tag's internal types
macro_rules! tag_from {
    ($($type:ty, $tag:ident);* $(;)?) => {
        $(
            impl From<$type> for SnbtTag {
                #[inline]
                fn from(value: $type) -> Self {
                    Self::$tag(value)
                }
            }
        )*
    };
}

tag_from!(
    i8,  Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    SnbtString,   String;
    Vec<i8>,      ByteArray;
    Vec<i32>,     IntArray;
    Vec<i64>,     LongArray;
    SnbtCompound, Compound;
    SnbtList,     List;
);

impl From<f32> for SnbtTag {
    #[inline]
    fn from(value: f32) -> Self {
        Self::float(f64::from(value))
    }
}

impl From<f64> for SnbtTag {
    #[inline]
    fn from(value: f64) -> Self {
        Self::double(value)
    }
}

impl From<bool> for SnbtTag {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Byte(i8::from(value))
    }
}

impl From<String> for SnbtTag {
    #[inline]
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<&str> for SnbtTag {
    #[inline]
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

macro_rules! prim_from_tag {
    ($($type:ty, $tag:ident);* $(;)?) => {
        $(
            impl TryFrom<&SnbtTag> for $type {
                type Error = TypeMismatch;

                #[inline]
                fn try_from(tag: &SnbtTag) -> Result<Self, Self::Error> {
                    if let SnbtTag::$tag(value) = tag {
                        Ok(*value)
                    } else {
                        Err(TypeMismatch::new(TagType::$tag, tag.tag_type()))
                    }
                }
            }

            impl TryFrom<SnbtTag> for $type {
                type Error = TypeMismatch;

                #[inline]
                fn try_from(tag: SnbtTag) -> Result<Self, Self::Error> {
                    Self::try_from(&tag)
                }
            }
        )*
    };
}

prim_from_tag!(
    i8,  Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double;
);

/// Booleans are stored as Bytes, where any nonzero value is `true`.
impl TryFrom<&SnbtTag> for bool {
    type Error = TypeMismatch;

    #[inline]
    fn try_from(tag: &SnbtTag) -> Result<Self, Self::Error> {
        i8::try_from(tag).map(|value| value != 0)
    }
}

macro_rules! ref_from_tag {
    ($($type:ty, $tag:ident);* $(;)?) => {
        $(
            impl<'a> TryFrom<&'a SnbtTag> for &'a $type {
                type Error = TypeMismatch;

                #[inline]
                fn try_from(tag: &'a SnbtTag) -> Result<Self, Self::Error> {
                    if let SnbtTag::$tag(value) = tag {
                        Ok(value)
                    } else {
                        Err(TypeMismatch::new(TagType::$tag, tag.tag_type()))
                    }
                }
            }

            impl<'a> TryFrom<&'a mut SnbtTag> for &'a mut $type {
                type Error = TypeMismatch;

                #[inline]
                fn try_from(tag: &'a mut SnbtTag) -> Result<Self, Self::Error> {
                    if let SnbtTag::$tag(value) = tag {
                        Ok(value)
                    } else {
                        Err(TypeMismatch::new(TagType::$tag, tag.tag_type()))
                    }
                }
            }
        )*
    };
}

ref_from_tag!(
    SnbtString,   String;
    Vec<i8>,      ByteArray;
    Vec<i32>,     IntArray;
    Vec<i64>,     LongArray;
    SnbtCompound, Compound;
    SnbtList,     List;
);

impl<'a> TryFrom<&'a SnbtTag> for &'a str {
    type Error = TypeMismatch;

    #[inline]
    fn try_from(tag: &'a SnbtTag) -> Result<Self, Self::Error> {
        if let SnbtTag::String(value) = tag {
            Ok(value.as_str())
        } else {
            Err(TypeMismatch::new(TagType::String, tag.tag_type()))
        }
    }
}

macro_rules! from_tag {
    ($($type:ty, $tag:ident);* $(;)?) => {
        $(
            impl TryFrom<SnbtTag> for $type {
                type Error = TypeMismatch;

                #[inline]
                fn try_from(tag: SnbtTag) -> Result<Self, Self::Error> {
                    if let SnbtTag::$tag(value) = tag {
                        Ok(value)
                    } else {
                        Err(TypeMismatch::new(TagType::$tag, tag.tag_type()))
                    }
                }
            }
        )*
    };
}

from_tag!(
    SnbtString,   String;
    Vec<i8>,      ByteArray;
    Vec<i32>,     IntArray;
    Vec<i64>,     LongArray;
    SnbtCompound, Compound;
    SnbtList,     List;
);

impl TryFrom<SnbtTag> for String {
    type Error = TypeMismatch;

    #[inline]
    fn try_from(tag: SnbtTag) -> Result<Self, Self::Error> {
        SnbtString::try_from(tag).map(SnbtString::into_string)
    }
}

macro_rules! display_and_debug {
    ($tag:ty, $name:ident, $write:ident) => {
        impl Display for $tag {
            #[inline]
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                SnbtWriter::new(&SnbtWriteOptions::default()).$write(f, self, 0)
            }
        }

        impl Debug for $tag {
            #[inline]
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                SnbtWriter::new(&SnbtWriteOptions::deflated()).$write(f, self, 0)
            }
        }

        /// Writes the wrapped value as SNBT with the given options through `Display`.
        #[derive(Debug)]
        pub struct $name<'a> {
            tag:  &'a $tag,
            opts: &'a SnbtWriteOptions,
        }

        impl<'a> $name<'a> {
            #[inline]
            pub fn new(tag: &'a $tag, opts: &'a SnbtWriteOptions) -> Self {
                Self { tag, opts }
            }
        }

        impl Display for $name<'_> {
            #[inline]
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                SnbtWriter::new(self.opts).$write(f, self.tag, 0)
            }
        }
    };
}

display_and_debug!(SnbtTag,      TagWithOptions,      write_tag);
display_and_debug!(SnbtList,     ListWithOptions,     write_list);
display_and_debug!(SnbtCompound, CompoundWithOptions, write_compound);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bounds() {
        assert_eq!(SnbtTag::byte(127), Ok(SnbtTag::Byte(127)));
        assert_eq!(SnbtTag::byte(-128), Ok(SnbtTag::Byte(-128)));
        assert_eq!(
            SnbtTag::byte(128),
            Err(TagError::out_of_range(TagType::Byte, RangeBound::Max, 127)),
        );
        assert_eq!(
            SnbtTag::byte(-129),
            Err(TagError::out_of_range(TagType::Byte, RangeBound::Min, -128)),
        );

        assert_eq!(SnbtTag::short(32_767), Ok(SnbtTag::Short(i16::MAX)));
        assert!(SnbtTag::short(32_768).is_err());
        assert!(SnbtTag::short(-32_769).is_err());

        assert_eq!(SnbtTag::int(i64::from(i32::MIN)), Ok(SnbtTag::Int(i32::MIN)));
        assert!(matches!(
            SnbtTag::int(i64::from(i32::MAX) + 1),
            Err(TagError::ValueOutOfRange { bound: RangeBound::Max, .. }),
        ));
        assert!(matches!(
            SnbtTag::int(i64::from(i32::MIN) - 1),
            Err(TagError::ValueOutOfRange { bound: RangeBound::Min, .. }),
        ));
    }

    #[test]
    fn long_literals() {
        assert_eq!(
            SnbtTag::long_from_decimal("9223372036854775807"),
            Ok(SnbtTag::Long(i64::MAX)),
        );
        assert_eq!(
            SnbtTag::long_from_decimal("-9223372036854775808"),
            Ok(SnbtTag::Long(i64::MIN)),
        );
        assert_eq!(
            SnbtTag::long_from_decimal("9223372036854775808"),
            Err(TagError::out_of_range(TagType::Long, RangeBound::Max, i64::MAX)),
        );
        assert_eq!(
            SnbtTag::long_from_decimal("-9223372036854775809"),
            Err(TagError::out_of_range(TagType::Long, RangeBound::Min, i64::MIN)),
        );
        assert_eq!(SnbtTag::long_from_decimal("+0"), Ok(SnbtTag::Long(0)));

        for malformed in ["00", "01", "", "-", "1.0", "1l", " 1"] {
            assert!(
                matches!(
                    SnbtTag::long_from_decimal(malformed),
                    Err(TagError::InvalidFormat { .. }),
                ),
                "{malformed:?} should be rejected as malformed",
            );
        }
    }

    #[test]
    fn float_clamping() {
        assert_eq!(SnbtTag::float(1.5), SnbtTag::Float(1.5));
        assert_eq!(SnbtTag::float(1e300), SnbtTag::Float(f32::INFINITY));
        assert_eq!(SnbtTag::float(-1e300), SnbtTag::Float(f32::NEG_INFINITY));
        assert_eq!(SnbtTag::float(f64::NAN), SnbtTag::Float(0.));
        assert_eq!(SnbtTag::double(f64::NAN), SnbtTag::Double(0.));
        assert_eq!(SnbtTag::double(f64::INFINITY), SnbtTag::Double(f64::INFINITY));
    }

    #[test]
    fn type_tables() {
        assert_eq!(TagType::String.ordinal(), 0);
        assert_eq!(TagType::List.ordinal(), 11);
        for tag_type in TagType::ALL {
            assert_eq!(TagType::from_numeric_id(tag_type.numeric_id()), Some(tag_type));
        }
        assert_eq!(TagType::from_numeric_id(0), None);
        assert_eq!(SnbtTag::Int(3).tag_name(), "Integer");
        assert_eq!(SnbtTag::IntArray(vec![]).numeric_tag_id(), 11);
        assert_eq!(TagType::LongArray.array_prefix(), Some('L'));
    }

    #[test]
    fn conversions() {
        let tag = SnbtTag::from(true);
        assert_eq!(i8::try_from(&tag), Ok(1));
        assert_eq!(bool::try_from(&tag), Ok(true));
        assert_eq!(i32::try_from(&tag), Err(TypeMismatch::new(TagType::Int, TagType::Byte)));
        assert_eq!(
            bool::try_from(&SnbtTag::Int(1)),
            Err(TypeMismatch::new(TagType::Byte, TagType::Int)),
        );

        let tag = SnbtTag::from("hello");
        assert_eq!(<&str>::try_from(&tag), Ok("hello"));
        assert_eq!(String::try_from(tag), Ok("hello".to_owned()));
    }
}
