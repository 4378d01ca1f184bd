use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::scanner::source::Source;
use yamp_common::{Encoding, YamlResult};

const CHUNK_LEN: usize = 8 * 1024;
const BOM_UTF8: &[u8] = b"\xEF\xBB\xBF";
const BOM_UTF16LE: &[u8] = b"\xFF\xFE";
const BOM_UTF16BE: &[u8] = b"\xFE\xFF";

/// Byte stream source decoding UTF-8 or UTF-16 on demand.
///
/// Characters are decoded lazily into a small lookahead buffer, each paired with its width in
/// the original stream so [`Source::offset`] stays a byte offset of the input.
pub struct ReaderSource<R> {
    reader: R,
    raw: Vec<u8>,
    raw_pos: usize,
    eof: bool,
    encoding: Encoding,
    lookahead: VecDeque<(char, usize)>,
    offset: usize,
    error: Option<String>,
}

impl<R: Read> ReaderSource<R> {
    /// Wraps `reader`, detecting the encoding from a byte-order mark unless `hint` names one.
    ///
    /// # Errors
    /// Returns [`YamlError::Resource`](yamp_common::YamlError::Resource) when the read buffer
    /// can't be allocated.
    pub fn new(reader: R, hint: Option<Encoding>) -> YamlResult<ReaderSource<R>> {
        let mut raw = Vec::new();
        raw.try_reserve(CHUNK_LEN)?;
        let mut lookahead = VecDeque::new();
        lookahead.try_reserve(16)?;

        let mut src = ReaderSource {
            reader,
            raw,
            raw_pos: 0,
            eof: false,
            encoding: Encoding::Utf8,
            lookahead,
            offset: 0,
            error: None,
        };
        src.determine_encoding(hint);
        Ok(src)
    }

    fn determine_encoding(&mut self, hint: Option<Encoding>) {
        self.fill_raw(3);
        let head = &self.raw[self.raw_pos..];
        let detected = if head.starts_with(BOM_UTF8) {
            Some((Encoding::Utf8, BOM_UTF8.len()))
        } else if head.starts_with(BOM_UTF16LE) {
            Some((Encoding::Utf16le, BOM_UTF16LE.len()))
        } else if head.starts_with(BOM_UTF16BE) {
            Some((Encoding::Utf16be, BOM_UTF16BE.len()))
        } else {
            None
        };

        self.encoding = match (hint, detected) {
            (Some(Encoding::Any) | None, Some((enc, _))) => enc,
            (Some(Encoding::Any) | None, None) => Encoding::Utf8,
            (Some(hint), _) => hint,
        };
        // a byte-order mark that agrees with the encoding in use is not content
        if let Some((enc, len)) = detected {
            if enc == self.encoding {
                self.raw_pos += len;
                self.offset += len;
            }
        }
    }

    /// Ensures at least `needed` undecoded bytes are buffered, unless the stream ends first.
    fn fill_raw(&mut self, needed: usize) {
        while !self.eof && self.raw.len() - self.raw_pos < needed {
            if self.raw_pos > 0 {
                self.raw.drain(..self.raw_pos);
                self.raw_pos = 0;
            }
            let start = self.raw.len();
            self.raw.resize(start + CHUNK_LEN, 0);
            match self.reader.read(&mut self.raw[start..]) {
                Ok(0) => {
                    self.raw.truncate(start);
                    self.eof = true;
                }
                Ok(n) => self.raw.truncate(start + n),
                Err(e) if e.kind() == ErrorKind::Interrupted => self.raw.truncate(start),
                Err(e) => {
                    self.raw.truncate(start);
                    self.fail(format!("input error: {e}"));
                }
            }
        }
    }

    fn fail(&mut self, info: String) {
        if self.error.is_none() {
            self.error = Some(info);
        }
        self.eof = true;
        self.raw.clear();
        self.raw_pos = 0;
    }

    fn decode_next(&mut self) -> Option<(char, usize)> {
        match self.encoding {
            Encoding::Utf16le | Encoding::Utf16be => self.decode_utf16(),
            Encoding::Utf8 | Encoding::Any => self.decode_utf8(),
        }
    }

    fn decode_utf8(&mut self) -> Option<(char, usize)> {
        self.fill_raw(4);
        let first = *self.raw.get(self.raw_pos)?;
        let width = match first {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => {
                self.fail("invalid leading UTF-8 octet".to_string());
                return None;
            }
        };
        let Some(bytes) = self.raw.get(self.raw_pos..self.raw_pos + width) else {
            self.fail("incomplete UTF-8 octet sequence".to_string());
            return None;
        };
        match std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next()) {
            Some(c) => {
                self.raw_pos += width;
                Some((c, width))
            }
            None => {
                self.fail("invalid trailing UTF-8 octet".to_string());
                None
            }
        }
    }

    fn read_unit(&self, at: usize) -> Option<u16> {
        let bytes = self.raw.get(self.raw_pos + at..self.raw_pos + at + 2)?;
        let pair = [bytes[0], bytes[1]];
        Some(match self.encoding {
            Encoding::Utf16be => u16::from_be_bytes(pair),
            _ => u16::from_le_bytes(pair),
        })
    }

    fn decode_utf16(&mut self) -> Option<(char, usize)> {
        self.fill_raw(4);
        if self.raw_pos == self.raw.len() {
            return None;
        }
        let Some(lead) = self.read_unit(0) else {
            self.fail("incomplete UTF-16 character".to_string());
            return None;
        };
        let (width, decoded) = if (0xD800..0xDC00).contains(&lead) {
            match self.read_unit(2) {
                Some(trail) => (4, char::decode_utf16([lead, trail]).next()),
                None => {
                    self.fail("incomplete UTF-16 surrogate pair".to_string());
                    return None;
                }
            }
        } else {
            (2, char::decode_utf16([lead]).next())
        };
        match decoded {
            Some(Ok(c)) => {
                self.raw_pos += width;
                Some((c, width))
            }
            _ => {
                self.fail("invalid UTF-16 surrogate".to_string());
                None
            }
        }
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn peek_nth(&mut self, n: usize) -> char {
        while self.lookahead.len() <= n {
            match self.decode_next() {
                Some(pair) => self.lookahead.push_back(pair),
                None => return '\0',
            }
        }
        self.lookahead[n].0
    }

    fn skip(&mut self) {
        if self.lookahead.is_empty() {
            if let Some(pair) = self.decode_next() {
                self.lookahead.push_back(pair);
            }
        }
        if let Some((_, width)) = self.lookahead.pop_front() {
            self.offset += width;
        }
    }

    fn is_eof(&mut self) -> bool {
        if self.lookahead.is_empty() {
            if let Some(pair) = self.decode_next() {
                self.lookahead.push_back(pair);
            }
        }
        self.lookahead.is_empty()
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}
