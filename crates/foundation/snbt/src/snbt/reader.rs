use std::borrow::Cow;

use crate::{error::SnbtError, settings::SnbtParseOptions, tag::allowed_unquoted};


/// A cursor over SNBT input, owned by a single parse.
///
/// The index is always a byte offset on a character boundary of `raw`.
#[derive(Debug)]
pub(super) struct Reader<'a> {
    raw:   &'a str,
    index: usize,
    opts:  SnbtParseOptions,
}

impl<'a> Reader<'a> {
    pub(super) fn new(raw: &'a str, opts: SnbtParseOptions) -> Self {
        Self { raw, index: 0, opts }
    }

    #[inline]
    pub(super) fn raw(&self) -> &'a str {
        self.raw
    }

    #[inline]
    pub(super) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(super) fn at_end(&self) -> bool {
        self.index >= self.raw.len()
    }

    #[inline]
    pub(super) fn peek_ch(&self) -> Option<char> {
        self.raw[self.index..].chars().next()
    }

    /// Peeks `n` characters past the next character.
    #[inline]
    pub(super) fn peek_nth_ch(&self, n: usize) -> Option<char> {
        self.raw[self.index..].chars().nth(n)
    }

    #[inline]
    pub(super) fn next_ch(&mut self) -> Option<char> {
        let ch = self.peek_ch()?;
        self.index += ch.len_utf8();
        Some(ch)
    }

    /// Skips any characters with the Unicode `White_Space` property.
    pub(super) fn skip_whitespace(&mut self) {
        while self.peek_ch().is_some_and(char::is_whitespace) {
            self.next_ch();
        }
    }

    /// Skips whitespace, then peeks the next character.
    #[inline]
    pub(super) fn peek_significant(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek_ch()
    }

    /// Skips whitespace, then consumes `expected`, returning its position.
    pub(super) fn expect(&mut self, expected: char) -> Result<usize, SnbtError> {
        if self.peek_significant() == Some(expected) {
            let position = self.index;
            self.next_ch();
            Ok(position)
        } else {
            Err(self.error(format!("expected '{expected}', found {}", self.describe_next())))
        }
    }

    /// A description of the next character for error messages.
    pub(super) fn describe_next(&self) -> String {
        match self.peek_ch() {
            Some(ch) => format!("'{ch}'"),
            None => "end of input".to_owned(),
        }
    }

    /// A parsing error at the current position.
    #[inline]
    pub(super) fn error<M: Into<Cow<'static, str>>>(&self, message: M) -> SnbtError {
        SnbtError::parsing(self.raw, self.index, message)
    }

    /// Reads the longest run of characters allowed in unquoted strings.
    /// The result is empty if the next character is not allowed.
    pub(super) fn read_unquoted_string(&mut self) -> &'a str {
        let start = self.index;
        while self.peek_ch().is_some_and(allowed_unquoted) {
            self.next_ch();
        }
        &self.raw[start..self.index]
    }

    /// Reads a string enclosed in `"` or `'`, starting at the opening quote.
    ///
    /// Inside the string, a backslash may only escape another backslash or the enclosing quote.
    pub(super) fn read_quoted_string(&mut self) -> Result<Cow<'a, str>, SnbtError> {
        let open = self.index;
        let quote = match self.next_ch() {
            Some(quote @ ('"' | '\'')) => quote,
            _ => {
                self.index = open;
                return Err(self.error(format!(
                    "expected a quoted string, found {}",
                    self.describe_next(),
                )));
            }
        };

        #[inline]
        fn flush<'r>(raw: &'r str, buffer: &mut Cow<'r, str>, start: usize, end: usize) {
            if start == end {
                return;
            }
            if buffer.is_empty() {
                *buffer = Cow::Borrowed(&raw[start..end]);
            } else {
                buffer.to_mut().push_str(&raw[start..end]);
            }
        }

        // Unescaped runs of the input are borrowed until an escape forces an allocation
        let mut buffer = Cow::Borrowed("");
        let mut flush_start = self.index;

        loop {
            let before = self.index;
            match self.next_ch() {
                Some(ch) if ch == quote => {
                    flush(self.raw, &mut buffer, flush_start, before);
                    return Ok(buffer);
                }
                Some('\\') => {
                    flush(self.raw, &mut buffer, flush_start, before);

                    match self.next_ch() {
                        Some(escaped) if escaped == '\\' || escaped == quote => {
                            buffer.to_mut().push(escaped);
                            flush_start = self.index;
                        }
                        Some(escaped) => {
                            return Err(SnbtError::parsing_with_suggestion(
                                self.raw,
                                self.index,
                                format!("invalid escape sequence '\\{escaped}'"),
                                "only '\\\\' and the enclosing quote may be escaped",
                            ));
                        }
                        None => {
                            return Err(self.error("unterminated escape sequence at end of input"));
                        }
                    }
                }
                Some(_) => {}
                None => {
                    return Err(SnbtError::parsing_with_suggestion(
                        self.raw,
                        self.index,
                        format!("unterminated quoted string, expected a closing {quote}"),
                        "check that every quote is closed, and that inner quotes are escaped",
                    ));
                }
            }
        }
    }

    /// The number of levels compounds and lists may be nested.
    #[inline]
    pub(super) fn depth_limit(&self) -> u32 {
        self.opts.depth_limit.limit()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(input: &str) -> Result<Cow<'_, str>, SnbtError> {
        Reader::new(input, SnbtParseOptions::default()).read_quoted_string()
    }

    #[test]
    fn quoted_strings_borrow_when_possible() {
        assert!(matches!(quoted("\"plain\""), Ok(Cow::Borrowed("plain"))));
        assert!(matches!(quoted("''"), Ok(Cow::Borrowed(""))));
    }

    #[test]
    fn escapes() {
        assert_eq!(quoted(r#""a\"b""#).unwrap(), "a\"b");
        assert_eq!(quoted(r"'a\'b\\c'").unwrap(), "a'b\\c");
        assert_eq!(quoted(r#"'say "hi"'"#).unwrap(), "say \"hi\"");
        assert_eq!(quoted(r#""\\""#).unwrap(), "\\");
    }

    #[test]
    fn invalid_escapes() {
        let error = quoted(r#""a\nb""#).unwrap_err();
        assert_eq!(error.position(), 4);
        assert!(error.suggestion().is_some(), "escape errors should carry a suggestion");

        // The other quote cannot be escaped
        assert!(quoted(r#""\'""#).is_err());
    }

    #[test]
    fn unterminated() {
        assert!(quoted("\"abc").is_err());
        assert!(quoted("'abc\\").is_err());
        assert!(quoted("abc").is_err());
    }

    #[test]
    fn unquoted_runs() {
        let mut reader = Reader::new("minecraft.stone_1+a-b:c", SnbtParseOptions::default());
        assert_eq!(reader.read_unquoted_string(), "minecraft.stone_1+a-b");
        assert_eq!(reader.next_ch(), Some(':'));
        assert_eq!(reader.read_unquoted_string(), "c");
        assert!(reader.at_end());
        assert_eq!(reader.read_unquoted_string(), "");
    }

    #[test]
    fn unicode_whitespace_is_skipped() {
        let mut reader = Reader::new("\u{a0}\u{0b}\u{3000}\r\n x", SnbtParseOptions::default());
        assert_eq!(reader.peek_significant(), Some('x'));
        assert_eq!(reader.index(), "\u{a0}\u{0b}\u{3000}\r\n ".len());
    }

    #[test]
    fn expect_skips_whitespace() {
        let mut reader = Reader::new("  \n{", SnbtParseOptions::default());
        assert_eq!(reader.expect('{').unwrap(), 3);
        assert!(reader.expect('}').is_err());
    }
}
