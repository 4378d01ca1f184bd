use crate::scanner::char_utils::{
    is_alpha, is_blank, is_blank_or_break, is_blank_or_breakz, is_break, is_breakz, is_digit,
    is_flow, is_printable,
};
use yamp_common::Encoding;

///
/// A source of characters for the [`Scanner`](crate::scanner::Scanner).
///
/// Past the end of input every peek returns `'\0'`; use `is_eof()` to tell it apart from a
/// NUL in the input.
///
/// # Methods
/// ## Peeking
/// - `peek_nth(n)`: Returns the character `n` positions ahead without consuming it.
/// - `peek()`: Returns the next character.
///
/// ## Consuming
/// - `skip()`: Consumes one character.
/// - `skip_while_non_breakz()`: Consumes the rest of the line, returning the number of characters.
///
/// ## Bookkeeping
/// - `is_eof()`: Whether the input is exhausted.
/// - `offset()`: Byte offset of the next character in the original source.
/// - `encoding()`: Encoding the source was decoded with.
/// - `take_error()`: A read or decode failure hit while filling the lookahead, if any.
pub trait Source {
    #[must_use]
    fn peek_nth(&mut self, n: usize) -> char;

    fn skip(&mut self);

    fn is_eof(&mut self) -> bool;

    #[must_use]
    fn offset(&self) -> usize;

    #[must_use]
    fn encoding(&self) -> Encoding;

    /// Once a failure is taken the source behaves as if it reached the end of input.
    fn take_error(&mut self) -> Option<String>;

    #[must_use]
    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn peek(&mut self) -> char {
        self.peek_nth(0)
    }

    fn skip_n(&mut self, count: usize) {
        for _ in 0..count {
            self.skip();
        }
    }

    /// Stops early in front of a non-printable character, which the scanner reports.
    fn skip_while_non_breakz(&mut self) -> usize {
        let mut count = 0;
        while !is_breakz(self.peek()) && is_printable(self.peek()) {
            self.skip();
            count += 1;
        }
        count
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_char_is(&mut self, c: char) -> bool {
        self.peek() == c
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn nth_char_is(&mut self, n: usize, c: char) -> bool {
        self.peek_nth(n) == c
    }

    fn next_is_three(&mut self, c: char) -> bool {
        self.peek() == c && self.peek_nth(1) == c && self.peek_nth(2) == c
    }

    fn next_is_document_start(&mut self) -> bool {
        self.next_is_three('-') && is_blank_or_breakz(self.peek_nth(3))
    }

    fn next_is_document_end(&mut self) -> bool {
        self.next_is_three('.') && is_blank_or_breakz(self.peek_nth(3))
    }

    fn next_is_document_indicator(&mut self) -> bool {
        (self.next_is_three('-') || self.next_is_three('.')) && is_blank_or_breakz(self.peek_nth(3))
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_is_z(&mut self) -> bool {
        self.is_eof()
    }

    /// True for a character that may not appear in a YAML stream. False at the end of input.
    fn next_is_non_printable(&mut self) -> bool {
        !is_printable(self.peek()) && !self.is_eof()
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_is_break(&mut self) -> bool {
        is_break(self.peek())
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_is_breakz(&mut self) -> bool {
        is_breakz(self.peek())
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_is_blank(&mut self) -> bool {
        is_blank(self.peek())
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_is_blank_or_break(&mut self) -> bool {
        is_blank_or_break(self.peek())
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn next_is_blank_or_breakz(&mut self) -> bool {
        is_blank_or_breakz(self.peek())
    }

    fn next_is_flow(&mut self) -> bool {
        is_flow(self.peek())
    }

    fn next_is_alpha(&mut self) -> bool {
        is_alpha(self.peek())
    }

    fn next_is_digit(&mut self) -> bool {
        is_digit(self.peek())
    }

    /// Whether the next character may continue a plain scalar.
    fn next_can_be_plain_scalar(&mut self, in_flow: bool) -> bool {
        let c = self.peek();
        let nc = self.peek_nth(1);
        match c {
            // indicators can end a plain scalar, see 7.3.3. Plain Style
            ':' if is_blank_or_breakz(nc) || (in_flow && is_flow(nc)) => false,
            c if in_flow && is_flow(c) => false,
            _ => true,
        }
    }
}

/// In-memory UTF-8 source.
pub struct StrSource<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> StrSource<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> StrSource<'input> {
        StrSource { input, pos: 0 }
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn rest(&self) -> &'input str {
        self.input.get(self.pos..).unwrap_or_default()
    }
}

impl Source for StrSource<'_> {
    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn peek_nth(&mut self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or('\0')
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn skip(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    #[cfg_attr(not(feature = "no-inline"), inline)]
    fn is_eof(&mut self) -> bool {
        self.pos >= self.input.len()
    }

    fn offset(&self) -> usize {
        self.pos
    }

    fn encoding(&self) -> Encoding {
        Encoding::Utf8
    }

    fn take_error(&mut self) -> Option<String> {
        None
    }

    fn skip_while_non_breakz(&mut self) -> usize {
        let rest = self.rest();
        let line_len = memchr::memchr2(b'\r', b'\n', rest.as_bytes()).unwrap_or(rest.len());
        let len = rest[..line_len]
            .find(|c: char| !is_printable(c))
            .unwrap_or(line_len);
        let count = rest[..len].chars().count();
        self.pos += len;
        count
    }
}

#[cfg(test)]
mod test {
    use super::{Source, StrSource};

    #[test]
    fn test_str_source_peek() {
        let mut src = StrSource::new("aé-");
        assert_eq!(src.peek(), 'a');
        assert_eq!(src.peek_nth(1), 'é');
        assert_eq!(src.peek_nth(2), '-');
        assert_eq!(src.peek_nth(3), '\0');
        src.skip();
        src.skip();
        assert_eq!(src.offset(), 3);
        assert_eq!(src.peek(), '-');
    }

    #[test]
    fn test_skip_to_break() {
        let mut src = StrSource::new("# comment ü\nnext");
        assert_eq!(src.skip_while_non_breakz(), 11);
        assert_eq!(src.offset(), 12);
        assert!(src.next_is_break());
        src.skip();
        assert_eq!(src.peek(), 'n');
        assert_eq!(src.skip_while_non_breakz(), 4);
        assert!(src.next_is_z());
    }

    #[test]
    fn test_nul_is_not_eof() {
        let mut src = StrSource::new("# a\0b\n");
        assert_eq!(src.skip_while_non_breakz(), 3);
        assert_eq!(src.peek(), '\0');
        assert!(!src.next_is_z());
        assert!(src.next_is_non_printable());
        src.skip_n(4);
        assert!(src.next_is_z());
        assert!(!src.next_is_non_printable());
    }

    #[test]
    fn test_document_indicators() {
        assert!(StrSource::new("---").next_is_document_start());
        assert!(StrSource::new("--- a").next_is_document_indicator());
        assert!(StrSource::new("...\n").next_is_document_end());
        assert!(!StrSource::new("---a").next_is_document_start());
    }
}
