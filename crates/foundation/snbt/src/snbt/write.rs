use std::fmt::{self, Display, Formatter, Write as _};

use crate::{
    settings::{NumericSuffix, SnbtWriteOptions},
    tag::{DOUBLE_SENTINEL, FLOAT_SENTINEL, SnbtCompound, SnbtList, SnbtString, SnbtTag},
};


/// How the elements of a bracketed value are laid out.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// On the line of the brackets, joined by the given separator.
    Inline(&'static str),
    /// One element per line, indented one level deeper than the brackets.
    Expanded,
}

/// Writes tags as SNBT, according to a set of [`SnbtWriteOptions`].
///
/// `depth` is the indentation level of the line on which a value starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SnbtWriter<'o> {
    opts: &'o SnbtWriteOptions,
}

impl<'o> SnbtWriter<'o> {
    #[inline]
    pub(crate) fn new(opts: &'o SnbtWriteOptions) -> Self {
        Self { opts }
    }

    pub(crate) fn write_tag(self, f: &mut Formatter<'_>, tag: &SnbtTag, depth: usize) -> fmt::Result {
        match tag {
            SnbtTag::String(string) => {
                self.write_string(f, string.as_str(), string.needs_quotes_as_value(), false)
            }
            SnbtTag::Byte(value)  => self.write_integer(f, value, Some(NumericSuffix::Byte)),
            SnbtTag::Short(value) => self.write_integer(f, value, Some(NumericSuffix::Short)),
            SnbtTag::Int(value)   => self.write_integer(f, value, None),
            SnbtTag::Long(value)  => self.write_integer(f, value, Some(NumericSuffix::Long)),
            SnbtTag::Float(value) => {
                if value.is_finite() {
                    write!(f, "{value:?}")?;
                } else {
                    write_non_finite(f, f64::from(*value), FLOAT_SENTINEL)?;
                }
                self.write_suffix(f, NumericSuffix::Float)
            }
            SnbtTag::Double(value) => {
                if value.is_finite() {
                    write!(f, "{value:?}")?;
                } else {
                    write_non_finite(f, *value, DOUBLE_SENTINEL)?;
                }
                self.write_suffix(f, NumericSuffix::Double)
            }
            SnbtTag::ByteArray(values) => {
                self.write_array(f, 'B', values, Some(NumericSuffix::Byte), depth)
            }
            SnbtTag::IntArray(values)  => self.write_array(f, 'I', values, None, depth),
            SnbtTag::LongArray(values) => {
                self.write_array(f, 'L', values, Some(NumericSuffix::Long), depth)
            }
            SnbtTag::Compound(compound) => self.write_compound(f, compound, depth),
            SnbtTag::List(list)         => self.write_list(f, list, depth),
        }
    }

    pub(crate) fn write_compound(
        self,
        f:        &mut Formatter<'_>,
        compound: &SnbtCompound,
        depth:    usize,
    ) -> fmt::Result {
        let mut entries: Vec<(&SnbtString, &SnbtTag)> = compound.iter().collect();

        if let Some(comparator) = self.opts.sort {
            // `sort_by` is stable, so equal entries keep their insertion order
            entries.sort_by(|lhs, rhs| comparator((lhs.0.as_str(), lhs.1), (rhs.0.as_str(), rhs.1)));
        }

        let layout = if self.opts.deflate {
            Layout::Inline(",")
        } else {
            Layout::Expanded
        };

        self.write_elements(f, "{", '}', &entries, depth, layout, |f, &(key, value), depth| {
            self.write_snbt_string(f, key)?;
            f.write_char(':')?;

            if !self.opts.deflate {
                if self.opts.bracket_on_new_line && !value.is_primitive() {
                    self.write_newline(f, depth)?;
                } else {
                    f.write_char(' ')?;
                }
            }

            self.write_tag(f, value, depth)
        })
    }

    pub(crate) fn write_list(self, f: &mut Formatter<'_>, list: &SnbtList, depth: usize) -> fmt::Result {
        if let Err(error) = list.check_homogeneous() {
            log::warn!("writing a list in an inconsistent state: {error}");
        }

        let layout = if self.opts.deflate {
            Layout::Inline(",")
        } else if list.is_primitive_only() {
            if self.opts.expand_primitives {
                Layout::Expanded
            } else {
                Layout::Inline(", ")
            }
        } else if self.opts.collapse_brackets {
            Layout::Inline(", ")
        } else {
            Layout::Expanded
        };

        self.write_elements(f, "[", ']', list.as_slice(), depth, layout, |f, element, depth| {
            self.write_tag(f, element, depth)
        })
    }

    fn write_array<T: Display>(
        self,
        f:      &mut Formatter<'_>,
        marker: char,
        values: &[T],
        suffix: Option<NumericSuffix>,
        depth:  usize,
    ) -> fmt::Result {
        let layout = if self.opts.expand_primitives && !self.opts.deflate {
            Layout::Expanded
        } else {
            Layout::Inline(",")
        };

        let open = format!("[{marker};");
        self.write_elements(f, &open, ']', values, depth, layout, |f, value, _| {
            self.write_integer(f, value, suffix)
        })
    }

    /// Writes `open`, the elements, and `close`. Each element is written by `write_element`,
    /// which is given the depth of the line the element starts on.
    #[expect(clippy::too_many_arguments, reason = "the layout is fully described by the arguments")]
    fn write_elements<T, F>(
        self,
        f:             &mut Formatter<'_>,
        open:          &str,
        close:         char,
        elements:      &[T],
        depth:         usize,
        layout:        Layout,
        mut write_element: F,
    ) -> fmt::Result
    where
        F: FnMut(&mut Formatter<'_>, &T, usize) -> fmt::Result,
    {
        f.write_str(open)?;

        match layout {
            Layout::Inline(separator) => {
                for (index, element) in elements.iter().enumerate() {
                    if index != 0 {
                        f.write_str(separator)?;
                    }
                    write_element(f, element, depth)?;
                }
            }
            Layout::Expanded if elements.is_empty() => {}
            Layout::Expanded => {
                let last_index = elements.len() - 1;
                for (index, element) in elements.iter().enumerate() {
                    self.write_newline(f, depth + 1)?;
                    write_element(f, element, depth + 1)?;
                    if index != last_index || self.opts.trailing_comma {
                        f.write_char(',')?;
                    }
                }
                self.write_newline(f, depth)?;
            }
        }

        f.write_char(close)
    }

    /// Writes a string with the quoting rules of its role, as a key or as a value.
    pub(crate) fn write_snbt_string(self, f: &mut Formatter<'_>, string: &SnbtString) -> fmt::Result {
        self.write_string(f, string.as_str(), string.needs_quotes(), string.is_key())
    }

    /// Writes a string, quoted if it must be or if the options ask for it.
    fn write_string(
        self,
        f:            &mut Formatter<'_>,
        value:        &str,
        needs_quotes: bool,
        is_key:       bool,
    ) -> fmt::Result {
        let quoted = needs_quotes || if is_key {
            self.opts.quote_keys
        } else {
            !self.opts.unquote_strings
        };

        if !quoted {
            return f.write_str(value);
        }

        f.write_char('"')?;
        let mut flushed = 0;
        for (index, ch) in value.char_indices() {
            if ch == '"' || ch == '\\' {
                f.write_str(&value[flushed..index])?;
                f.write_char('\\')?;
                // The escaped character is written with the next run
                flushed = index;
            }
        }
        f.write_str(&value[flushed..])?;
        f.write_char('"')
    }

    fn write_integer<T: Display>(
        self,
        f:      &mut Formatter<'_>,
        value:  T,
        suffix: Option<NumericSuffix>,
    ) -> fmt::Result {
        write!(f, "{value}")?;
        match suffix {
            Some(suffix) => self.write_suffix(f, suffix),
            None => Ok(()),
        }
    }

    #[inline]
    fn write_suffix(self, f: &mut Formatter<'_>, suffix: NumericSuffix) -> fmt::Result {
        f.write_char(self.opts.suffix_case.letter(suffix))
    }

    /// Starts a new line at the given depth. Does nothing when deflating.
    fn write_newline(self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        if self.opts.deflate {
            return Ok(());
        }

        f.write_char('\n')?;
        for _ in 0..depth {
            f.write_str(&self.opts.indent)?;
        }
        Ok(())
    }
}

/// Writes the clamp sentinel for an infinite value. NaN can only be produced by
/// constructing a tag directly, and is written as zero.
fn write_non_finite(f: &mut Formatter<'_>, value: f64, sentinel: &str) -> fmt::Result {
    if value.is_nan() {
        log::warn!("writing a NaN floating point value as 0");
        f.write_char('0')
    } else if value.is_sign_negative() {
        write!(f, "-{sentinel}")
    } else {
        f.write_str(sentinel)
    }
}
