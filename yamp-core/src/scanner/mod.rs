mod char_utils;
mod reader;
mod source;

pub use reader::ReaderSource;
pub use source::{Source, StrSource};

use std::borrow::Cow;
use std::collections::VecDeque;

use char_utils::{
    as_hex, is_anchor_char, is_blank_or_breakz, is_break, is_digit, is_flow, is_hex, is_tag_char,
    is_uri_char, is_word_char,
};
use yamp_common::{
    ChompIndicator, Encoding, Mark, Position, ScalarType, Token, TokenType, YamlError,
    YamlResult,
};

type ScanResult = Result<(), YamlError>;

/// Simple keys farther than this from their `:` are no longer keys.
const MAX_SIMPLE_KEY_LENGTH: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
struct SimpleKey {
    possible: bool,
    required: bool,
    token_number: usize,
    mark: Mark,
}

impl SimpleKey {
    fn new(mark: Mark) -> SimpleKey {
        SimpleKey {
            possible: false,
            required: false,
            token_number: 0,
            mark,
        }
    }
}

/// Turns characters from a [`Source`] into YAML tokens.
///
/// Block structure is made explicit: indentation changes are reported as
/// `BlockSequenceStart`/`BlockMappingStart`/`BlockEnd` tokens and implicit keys get a `Key`
/// token inserted in front of them once their `:` is found.
pub struct Scanner<S> {
    src: S,
    mark: Mark,
    tokens: VecDeque<Token>,
    error: Option<YamlError>,

    simple_keys: Vec<SimpleKey>,
    indents: Vec<isize>,
    indent: isize,
    flow_level: u8,
    tokens_parsed: usize,
    token_available: bool,
    stream_start_produced: bool,
    stream_end_produced: bool,
    simple_key_allowed: bool,
    /// No token has been seen on the current line yet.
    leading_whitespace: bool,
    /// Where a `:` directly after a JSON-like key still starts a value.
    adjacent_value_allowed_at: Option<usize>,
}

impl<S: Source> Scanner<S> {
    pub fn new(src: S) -> Scanner<S> {
        let index = src.offset();
        Scanner {
            src,
            mark: Mark::new(index, 0, 0),
            tokens: VecDeque::new(),
            error: None,

            simple_keys: Vec::new(),
            indents: Vec::new(),
            indent: -1,
            flow_level: 0,
            tokens_parsed: 0,
            token_available: false,
            stream_start_produced: false,
            stream_end_produced: false,
            simple_key_allowed: true,
            leading_whitespace: true,
            adjacent_value_allowed_at: None,
        }
    }

    #[must_use]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.src.encoding()
    }

    /// Returns the next token, `None` once the stream end token was handed out.
    ///
    /// # Errors
    /// Returns the scan or reader error for malformed input. The same error is returned by
    /// every later call.
    pub fn next_token(&mut self) -> YamlResult<Option<Token>> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.stream_end_produced {
            return Ok(None);
        }

        if !self.token_available {
            let fetched = self.fetch_more_tokens();
            if let Some(info) = self.src.take_error() {
                return Err(self.fail(YamlError::reader(self.mark, info)));
            }
            if let Err(err) = fetched {
                return Err(self.fail(err));
            }
        }

        let Some(tok) = self.tokens.pop_front() else {
            return Err(self.fail(YamlError::new_str(self.mark, "unexpected end of token queue")));
        };
        self.token_available = false;
        self.tokens_parsed += 1;

        if tok.token_type == TokenType::StreamEnd {
            self.stream_end_produced = true;
        }
        Ok(Some(tok))
    }

    fn fail(&mut self, err: YamlError) -> YamlError {
        self.error = Some(err.clone());
        err
    }

    fn fetch_more_tokens(&mut self) -> ScanResult {
        let mut need_more;
        loop {
            if self.tokens.is_empty() {
                need_more = true;
            } else {
                need_more = false;
                self.stale_simple_keys()?;
                for sk in &self.simple_keys {
                    if sk.possible && sk.token_number == self.tokens_parsed {
                        need_more = true;
                        break;
                    }
                }
            }

            if !need_more {
                break;
            }
            self.fetch_next_token()?;
        }
        self.token_available = true;

        Ok(())
    }

    fn fetch_next_token(&mut self) -> ScanResult {
        if !self.stream_start_produced {
            self.fetch_stream_start();
            return Ok(());
        }

        self.skip_to_next_token()?;
        self.check_printable()?;
        self.stale_simple_keys()?;

        let mark = self.mark;
        self.unroll_indent(mark.column as isize);

        if self.src.next_is_z() {
            return self.fetch_stream_end();
        }

        if self.mark.column == 0 {
            if self.src.next_char_is('%') {
                return self.fetch_directive();
            } else if self.src.next_is_document_start() {
                return self.fetch_document_indicator(TokenType::DocumentStart);
            } else if self.src.next_is_document_end() {
                self.fetch_document_indicator(TokenType::DocumentEnd)?;
                self.skip_ws_to_eol();
                if !self.src.next_is_breakz() {
                    return Err(YamlError::new_str(
                        self.mark,
                        "invalid content after document end marker",
                    ));
                }
                return Ok(());
            }
        }

        if (self.mark.column as isize) < self.indent {
            return Err(YamlError::new_str(self.mark, "invalid indentation"));
        }

        let c = self.src.peek();
        let nc = self.src.peek_nth(1);
        match c {
            '[' => self.fetch_flow_collection_start(TokenType::FlowSequenceStart),
            '{' => self.fetch_flow_collection_start(TokenType::FlowMappingStart),
            ']' => self.fetch_flow_collection_end(TokenType::FlowSequenceEnd),
            '}' => self.fetch_flow_collection_end(TokenType::FlowMappingEnd),
            ',' => self.fetch_flow_entry(),
            '-' if is_blank_or_breakz(nc) => self.fetch_block_entry(),
            '?' if is_blank_or_breakz(nc) => self.fetch_key(),
            ':' if is_blank_or_breakz(nc) => self.fetch_value(),
            ':' if self.flow_level > 0
                && (is_flow(nc) || self.adjacent_value_allowed_at == Some(self.mark.index)) =>
            {
                self.fetch_value()
            }
            '*' => self.fetch_anchor(true),
            '&' => self.fetch_anchor(false),
            '!' => self.fetch_tag(),
            '|' if self.flow_level == 0 => self.fetch_block_scalar(true),
            '>' if self.flow_level == 0 => self.fetch_block_scalar(false),
            '\'' => self.fetch_flow_scalar(true),
            '"' => self.fetch_flow_scalar(false),
            '%' | '@' | '`' => Err(YamlError::new_str(
                self.mark,
                &format!("found character `{c}` that cannot start any token"),
            )),
            _ => self.fetch_plain_scalar(),
        }
    }

    fn stale_simple_keys(&mut self) -> ScanResult {
        for sk in &mut self.simple_keys {
            if sk.possible
                && (sk.mark.line < self.mark.line
                    || sk.mark.index + MAX_SIMPLE_KEY_LENGTH < self.mark.index)
            {
                if sk.required {
                    return Err(YamlError::new_str(self.mark, "could not find expected ':'"));
                }
                sk.possible = false;
            }
        }
        Ok(())
    }

    fn save_simple_key(&mut self) -> ScanResult {
        if self.simple_key_allowed {
            let required = self.flow_level == 0 && self.indent == self.mark.column as isize;
            let sk = SimpleKey {
                possible: true,
                required,
                token_number: self.tokens_parsed + self.tokens.len(),
                mark: self.mark,
            };
            self.remove_simple_key()?;
            if let Some(last) = self.simple_keys.last_mut() {
                *last = sk;
            }
        }
        Ok(())
    }

    fn remove_simple_key(&mut self) -> ScanResult {
        if let Some(last) = self.simple_keys.last_mut() {
            if last.possible && last.required {
                return Err(YamlError::new_str(self.mark, "could not find expected ':'"));
            }
            last.possible = false;
        }
        Ok(())
    }

    fn increase_flow_level(&mut self) -> ScanResult {
        self.simple_keys.push(SimpleKey::new(Mark::default()));
        self.flow_level = self
            .flow_level
            .checked_add(1)
            .ok_or_else(|| YamlError::new_str(self.mark, "recursion limit exceeded"))?;
        Ok(())
    }

    fn decrease_flow_level(&mut self) {
        if self.flow_level > 0 {
            self.flow_level -= 1;
            self.simple_keys.pop();
        }
    }

    fn insert_token(&mut self, pos: usize, tok: Token) {
        let pos = pos.min(self.tokens.len());
        self.tokens.insert(pos, tok);
    }

    fn roll_indent(&mut self, col: usize, number: Option<usize>, tok: TokenType, mark: Mark) {
        if self.flow_level > 0 {
            return;
        }

        if self.indent < col as isize {
            self.indents.push(self.indent);
            self.indent = col as isize;
            let token = Token::new(Position::empty(mark), tok);
            match number {
                Some(n) => self.insert_token(n.saturating_sub(self.tokens_parsed), token),
                None => self.tokens.push_back(token),
            }
        }
    }

    fn unroll_indent(&mut self, col: isize) {
        if self.flow_level > 0 {
            return;
        }
        while self.indent > col {
            self.tokens
                .push_back(Token::new(Position::empty(self.mark), TokenType::BlockEnd));
            self.indent = self.indents.pop().unwrap_or(-1);
        }
    }

    fn fetch_stream_start(&mut self) {
        let mark = self.mark;
        self.indent = -1;
        self.stream_start_produced = true;
        self.simple_key_allowed = true;
        self.tokens.push_back(Token::new(
            Position::empty(mark),
            TokenType::StreamStart(self.src.encoding()),
        ));
        self.simple_keys.push(SimpleKey::new(Mark::default()));
    }

    fn fetch_stream_end(&mut self) -> ScanResult {
        // force new line
        if self.mark.column != 0 {
            self.mark.column = 0;
            self.mark.line += 1;
        }

        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.simple_key_allowed = false;

        self.tokens
            .push_back(Token::new(Position::empty(self.mark), TokenType::StreamEnd));
        Ok(())
    }

    fn fetch_directive(&mut self) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.simple_key_allowed = false;

        if let Some(tok) = self.scan_directive()? {
            self.tokens.push_back(tok);
        }
        Ok(())
    }

    fn fetch_document_indicator(&mut self, token_type: TokenType) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.simple_key_allowed = false;

        let mark = self.mark;
        self.skip_n_non_blank(3);

        self.tokens
            .push_back(Token::new(Position::new(mark, self.mark), token_type));
        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, token_type: TokenType) -> ScanResult {
        self.save_simple_key()?;
        self.increase_flow_level()?;
        self.simple_key_allowed = true;

        let start_mark = self.mark;
        self.skip_non_blank();

        self.tokens
            .push_back(Token::new(Position::new(start_mark, self.mark), token_type));
        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, token_type: TokenType) -> ScanResult {
        self.remove_simple_key()?;
        self.decrease_flow_level();
        self.simple_key_allowed = false;

        let start_mark = self.mark;
        self.skip_non_blank();
        if self.flow_level > 0 {
            self.adjacent_value_allowed_at = Some(self.mark.index);
        }

        self.tokens
            .push_back(Token::new(Position::new(start_mark, self.mark), token_type));
        Ok(())
    }

    fn fetch_flow_entry(&mut self) -> ScanResult {
        self.remove_simple_key()?;
        self.simple_key_allowed = true;

        let start_mark = self.mark;
        self.skip_non_blank();

        self.tokens.push_back(Token::new(
            Position::new(start_mark, self.mark),
            TokenType::FlowEntry,
        ));
        Ok(())
    }

    fn fetch_block_entry(&mut self) -> ScanResult {
        if self.flow_level > 0 {
            return Err(YamlError::new_str(
                self.mark,
                r#""-" is only valid inside a block"#,
            ));
        }
        // Check if we are allowed to start a new entry.
        if !self.simple_key_allowed {
            return Err(YamlError::new_str(
                self.mark,
                "block sequence entries are not allowed in this context",
            ));
        }

        let mark = self.mark;
        // generate BLOCK-SEQUENCE-START if indented
        self.roll_indent(mark.column, None, TokenType::BlockSequenceStart, mark);
        self.remove_simple_key()?;
        self.simple_key_allowed = true;

        self.skip_non_blank();
        self.tokens.push_back(Token::new(
            Position::new(mark, self.mark),
            TokenType::BlockEntry,
        ));
        Ok(())
    }

    fn fetch_key(&mut self) -> ScanResult {
        let start_mark = self.mark;
        if self.flow_level == 0 {
            // Check if we are allowed to start a new key (not necessarily simple).
            if !self.simple_key_allowed {
                return Err(YamlError::new_str(
                    self.mark,
                    "mapping keys are not allowed in this context",
                ));
            }
            self.roll_indent(
                start_mark.column,
                None,
                TokenType::BlockMappingStart,
                start_mark,
            );
        }

        self.remove_simple_key()?;
        self.simple_key_allowed = self.flow_level == 0;

        self.skip_non_blank();
        self.tokens.push_back(Token::new(
            Position::new(start_mark, self.mark),
            TokenType::Key,
        ));
        Ok(())
    }

    fn fetch_value(&mut self) -> ScanResult {
        let Some(sk) = self.simple_keys.last().cloned() else {
            return Err(YamlError::new_str(self.mark, "simple key stack is empty"));
        };
        let start_mark = self.mark;

        if sk.possible {
            // insert simple key
            let tok = Token::new(Position::empty(sk.mark), TokenType::Key);
            self.insert_token(sk.token_number.saturating_sub(self.tokens_parsed), tok);

            // Add the BLOCK-MAPPING-START token if needed.
            self.roll_indent(
                sk.mark.column,
                Some(sk.token_number),
                TokenType::BlockMappingStart,
                sk.mark,
            );
            if let Some(last) = self.simple_keys.last_mut() {
                last.possible = false;
            }
            self.simple_key_allowed = false;
        } else {
            // The ':' indicator follows a complex key.
            if self.flow_level == 0 {
                if !self.simple_key_allowed {
                    return Err(YamlError::new_str(
                        start_mark,
                        "mapping values are not allowed in this context",
                    ));
                }
                self.roll_indent(
                    start_mark.column,
                    None,
                    TokenType::BlockMappingStart,
                    start_mark,
                );
            }
            self.simple_key_allowed = self.flow_level == 0;
        }

        self.skip_non_blank();
        self.tokens.push_back(Token::new(
            Position::new(start_mark, self.mark),
            TokenType::Value,
        ));
        Ok(())
    }

    fn fetch_anchor(&mut self, is_alias: bool) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_anchor(is_alias)?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn fetch_tag(&mut self) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_tag()?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn fetch_block_scalar(&mut self, literal: bool) -> ScanResult {
        // A simple key may follow a block scalar.
        self.remove_simple_key()?;
        self.simple_key_allowed = true;

        let tok = self.scan_block_scalar(literal)?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn fetch_flow_scalar(&mut self, single: bool) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_flow_scalar(single)?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn fetch_plain_scalar(&mut self) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_plain_scalar()?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn skip_blank(&mut self) {
        self.src.skip();
        self.mark.index = self.src.offset();
        self.mark.column += 1;
    }

    fn skip_non_blank(&mut self) {
        self.skip_blank();
        self.leading_whitespace = false;
    }

    fn skip_n_non_blank(&mut self, count: usize) {
        for _ in 0..count {
            self.skip_non_blank();
        }
    }

    fn skip_linebreak(&mut self) {
        if self.src.next_char_is('\r') && self.src.nth_char_is(1, '\n') {
            self.src.skip_n(2);
        } else if self.src.next_is_break() {
            self.src.skip();
        } else {
            return;
        }
        self.mark.index = self.src.offset();
        self.mark.line += 1;
        self.mark.column = 0;
        self.leading_whitespace = true;
    }

    fn check_printable(&mut self) -> ScanResult {
        if self.src.next_is_non_printable() {
            return Err(YamlError::new_str(
                self.mark,
                "control characters are not allowed",
            ));
        }
        Ok(())
    }

    fn skip_comment(&mut self) {
        let comment_length = self.src.skip_while_non_breakz();
        self.mark.column += comment_length;
        self.mark.index = self.src.offset();
    }

    fn skip_ws_to_eol(&mut self) {
        while self.src.next_is_blank() {
            self.skip_blank();
        }
        if self.src.next_char_is('#') {
            self.skip_comment();
        }
    }

    fn skip_to_next_token(&mut self) -> ScanResult {
        loop {
            match self.src.peek() {
                // byte order mark
                '\u{feff}' if self.mark.column == 0 => {
                    self.src.skip();
                    self.mark.index = self.src.offset();
                }
                ' ' => self.skip_blank(),
                // Tabs may not be used as block indentation, unless the line is otherwise empty.
                '\t' if self.flow_level == 0 && self.leading_whitespace => {
                    self.skip_ws_to_eol();
                    if !self.src.next_is_breakz() {
                        return Err(YamlError::new_str(
                            self.mark,
                            "tabs disallowed within this context (block indentation)",
                        ));
                    }
                }
                '\t' => self.skip_blank(),
                '\n' | '\r' => {
                    self.skip_linebreak();
                    if self.flow_level == 0 {
                        self.simple_key_allowed = true;
                    }
                }
                '#' => self.skip_comment(),
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_directive(&mut self) -> YamlResult<Option<Token>> {
        let start_mark = self.mark;
        self.skip_non_blank();

        let name = self.scan_directive_name()?;
        let tok = match name.as_str() {
            "YAML" => Some(self.scan_version_directive_value(start_mark)?),
            "TAG" => Some(self.scan_tag_directive_value(start_mark)?),
            _ => {
                tracing::warn!(
                    directive = %name,
                    line = start_mark.line + 1,
                    "ignoring reserved directive"
                );
                self.skip_comment();
                None
            }
        };

        self.skip_ws_to_eol();

        if self.src.next_is_breakz() {
            self.skip_linebreak();
            Ok(tok)
        } else {
            Err(YamlError::new_str(
                start_mark,
                "while scanning a directive, did not find expected comment or line break",
            ))
        }
    }

    fn scan_directive_name(&mut self) -> YamlResult<String> {
        let start_mark = self.mark;
        let mut string = String::new();
        while self.src.next_is_alpha() {
            string.push(self.src.peek());
            self.skip_non_blank();
        }

        if string.is_empty() {
            return Err(YamlError::new_str(
                start_mark,
                "while scanning a directive, could not find expected directive name",
            ));
        }

        if !is_blank_or_breakz(self.src.peek()) {
            return Err(YamlError::new_str(
                start_mark,
                "while scanning a directive, found unexpected non-alphabetical character",
            ));
        }

        Ok(string)
    }

    fn scan_version_directive_value(&mut self, mark: Mark) -> YamlResult<Token> {
        while self.src.next_is_blank() {
            self.skip_blank();
        }

        let major = self.scan_version_directive_number(mark)?;

        if !self.src.next_char_is('.') {
            return Err(YamlError::new_str(
                mark,
                "while scanning a %YAML directive, did not find expected digit or '.' character",
            ));
        }
        self.skip_non_blank();

        let minor = self.scan_version_directive_number(mark)?;

        Ok(Token::new(
            Position::new(mark, self.mark),
            TokenType::VersionDirective { major, minor },
        ))
    }

    fn scan_version_directive_number(&mut self, mark: Mark) -> YamlResult<u32> {
        let mut val = 0u32;
        let mut length = 0usize;
        while let Some(digit) = self.src.peek().to_digit(10) {
            if length + 1 > 9 {
                return Err(YamlError::new_str(
                    mark,
                    "while scanning a %YAML directive, found extremely long version number",
                ));
            }
            length += 1;
            val = val * 10 + digit;
            self.skip_non_blank();
        }

        if length == 0 {
            return Err(YamlError::new_str(
                mark,
                "while scanning a %YAML directive, did not find expected version number",
            ));
        }

        Ok(val)
    }

    fn scan_tag_directive_value(&mut self, mark: Mark) -> YamlResult<Token> {
        while self.src.next_is_blank() {
            self.skip_blank();
        }
        let handle = self.scan_tag_handle(true, mark)?;

        if !self.src.next_is_blank() {
            return Err(YamlError::new_str(
                mark,
                "while scanning a %TAG directive, did not find expected whitespace",
            ));
        }
        while self.src.next_is_blank() {
            self.skip_blank();
        }

        let prefix = self.scan_tag_uri(true, "", mark)?;

        if !self.src.next_is_blank_or_breakz() {
            return Err(YamlError::new_str(
                mark,
                "while scanning a %TAG directive, did not find expected whitespace or line break",
            ));
        }

        Ok(Token::new(
            Position::new(mark, self.mark),
            TokenType::TagDirective { handle, prefix },
        ))
    }

    fn scan_tag(&mut self) -> YamlResult<Token> {
        let start_mark = self.mark;

        let (handle, suffix) = if self.src.nth_char_is(1, '<') {
            // verbatim tag `!<...>`
            self.skip_n_non_blank(2);
            let suffix = self.scan_tag_uri(true, "", start_mark)?;
            if !self.src.next_char_is('>') {
                return Err(YamlError::new_str(
                    start_mark,
                    "while scanning a tag, did not find the expected '>'",
                ));
            }
            self.skip_non_blank();
            (String::new(), suffix)
        } else {
            let handle = self.scan_tag_handle(false, start_mark)?;
            if handle.len() > 1 && handle.ends_with('!') {
                // named handle like `!!` or `!e!`
                let suffix = self.scan_tag_uri(false, "", start_mark)?;
                (handle, suffix)
            } else {
                // It wasn't a handle after all, scan the rest of the tag.
                let suffix = self.scan_tag_uri(false, &handle, start_mark)?;
                if suffix.is_empty() {
                    // the non-specific tag `!`
                    (String::new(), "!".to_string())
                } else {
                    ("!".to_string(), suffix)
                }
            }
        };

        if self.src.next_is_blank_or_breakz() || (self.flow_level > 0 && self.src.next_is_flow())
        {
            Ok(Token::new(
                Position::new(start_mark, self.mark),
                TokenType::Tag { handle, suffix },
            ))
        } else {
            Err(YamlError::new_str(
                start_mark,
                "while scanning a tag, did not find expected whitespace or line break",
            ))
        }
    }

    fn scan_tag_handle(&mut self, directive: bool, mark: Mark) -> YamlResult<String> {
        if !self.src.next_char_is('!') {
            let info = if directive {
                "while scanning a %TAG directive, did not find expected '!'"
            } else {
                "while scanning a tag, did not find expected '!'"
            };
            return Err(YamlError::new_str(mark, info));
        }

        let mut string = String::from('!');
        self.skip_non_blank();

        while is_word_char(self.src.peek()) {
            string.push(self.src.peek());
            self.skip_non_blank();
        }

        if self.src.next_char_is('!') {
            string.push('!');
            self.skip_non_blank();
        } else if directive && string != "!" {
            // It's either the '!' tag or not really a tag handle. If it's a %TAG
            // directive, it's an error.
            return Err(YamlError::new_str(
                mark,
                "while parsing a tag directive, did not find expected '!'",
            ));
        }
        Ok(string)
    }

    /// Scans a tag URI. `head` is a partially scanned handle whose leading `!` is dropped.
    fn scan_tag_uri(&mut self, uri_chars: bool, head: &str, mark: Mark) -> YamlResult<String> {
        let mut length = head.len();
        let mut string = String::new();
        if length > 1 {
            string.push_str(&head[1..]);
        }
        let mut escaped = false;

        loop {
            let c = self.src.peek();
            let accepted = if uri_chars {
                is_uri_char(c)
            } else {
                is_tag_char(c)
            };
            if !accepted {
                break;
            }
            if c == '%' {
                if !is_hex(self.src.peek_nth(1)) || !is_hex(self.src.peek_nth(2)) {
                    return Err(YamlError::new_str(
                        mark,
                        "while parsing a tag, did not find URI escaped octet",
                    ));
                }
                for _ in 0..3 {
                    string.push(self.src.peek());
                    self.skip_non_blank();
                }
                escaped = true;
            } else {
                string.push(c);
                self.skip_non_blank();
            }
            length += 1;
        }

        if length == 0 {
            return Err(YamlError::new_str(
                mark,
                "while parsing a tag, did not find expected tag URI",
            ));
        }

        if escaped {
            return urlencoding::decode(&string)
                .map(Cow::into_owned)
                .map_err(|_| {
                    YamlError::new_str(mark, "while parsing a tag, found an invalid UTF-8 sequence")
                });
        }
        Ok(string)
    }

    fn scan_anchor(&mut self, alias: bool) -> YamlResult<Token> {
        let start_mark = self.mark;
        self.skip_non_blank();

        let mut string = String::new();
        while is_anchor_char(self.src.peek()) {
            string.push(self.src.peek());
            self.skip_non_blank();
        }

        if string.is_empty() {
            return Err(YamlError::new_str(
                start_mark,
                "while scanning an anchor or alias, did not find expected alphabetic or numeric character",
            ));
        }

        let token_type = if alias {
            TokenType::Alias(string)
        } else {
            TokenType::Anchor(string)
        };
        Ok(Token::new(Position::new(start_mark, self.mark), token_type))
    }

    fn scan_block_scalar(&mut self, literal: bool) -> YamlResult<Token> {
        let start_mark = self.mark;
        let mut chomping = ChompIndicator::Clip;
        let mut increment = 0usize;
        let mut indent = 0usize;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();

        // skip '|' or '>'
        self.skip_non_blank();

        let c = self.src.peek();
        if c == '+' || c == '-' {
            chomping = if c == '+' {
                ChompIndicator::Keep
            } else {
                ChompIndicator::Strip
            };
            self.skip_non_blank();
            if self.src.next_is_digit() {
                increment = self.scan_indentation_indicator(start_mark)?;
            }
        } else if is_digit(c) {
            increment = self.scan_indentation_indicator(start_mark)?;
            let c = self.src.peek();
            if c == '+' || c == '-' {
                chomping = if c == '+' {
                    ChompIndicator::Keep
                } else {
                    ChompIndicator::Strip
                };
                self.skip_non_blank();
            }
        }

        self.skip_ws_to_eol();
        if !self.src.next_is_breakz() {
            return Err(YamlError::new_str(
                start_mark,
                "while scanning a block scalar, did not find expected comment or line break",
            ));
        }
        self.skip_linebreak();

        let mut end_mark = self.mark;
        if increment > 0 {
            indent = if self.indent >= 0 {
                self.indent as usize + increment
            } else {
                increment
            };
        }

        // Scan the leading line breaks and determine the indentation level if needed.
        self.block_scalar_breaks(&mut indent, &mut trailing_breaks, start_mark, &mut end_mark)?;

        let mut leading_blank = false;
        while self.mark.column == indent && !self.src.next_is_z() {
            let trailing_blank = self.src.next_is_blank();
            if !literal && leading_break.starts_with('\n') && !leading_blank && !trailing_blank {
                // folded line break
                if trailing_breaks.is_empty() {
                    string.push(' ');
                }
                leading_break.clear();
            } else {
                string.push_str(&leading_break);
                leading_break.clear();
            }
            string.push_str(&trailing_breaks);
            trailing_breaks.clear();

            leading_blank = self.src.next_is_blank();

            while !self.src.next_is_breakz() {
                self.check_printable()?;
                string.push(self.src.peek());
                self.skip_non_blank();
            }
            self.check_printable()?;
            if self.src.next_is_z() {
                break;
            }

            leading_break.push('\n');
            self.skip_linebreak();

            self.block_scalar_breaks(&mut indent, &mut trailing_breaks, start_mark, &mut end_mark)?;
        }

        if chomping != ChompIndicator::Strip {
            string.push_str(&leading_break);
        }
        if chomping == ChompIndicator::Keep {
            string.push_str(&trailing_breaks);
        }

        let scalar_type = if literal {
            ScalarType::Literal
        } else {
            ScalarType::Folded
        };
        Ok(Token::new(
            Position::new(start_mark, end_mark),
            TokenType::Scalar {
                scalar_type,
                value: string,
            },
        ))
    }

    fn scan_indentation_indicator(&mut self, start_mark: Mark) -> YamlResult<usize> {
        let c = self.src.peek();
        if c == '0' {
            return Err(YamlError::new_str(
                start_mark,
                "while scanning a block scalar, found an indentation indicator equal to 0",
            ));
        }
        self.skip_non_blank();
        Ok(c.to_digit(10).unwrap_or(1) as usize)
    }

    fn block_scalar_breaks(
        &mut self,
        indent: &mut usize,
        breaks: &mut String,
        start_mark: Mark,
        end_mark: &mut Mark,
    ) -> ScanResult {
        let mut max_indent = 0;
        *end_mark = self.mark;

        loop {
            while (*indent == 0 || self.mark.column < *indent) && self.src.next_char_is(' ') {
                self.skip_blank();
            }

            if self.mark.column > max_indent {
                max_indent = self.mark.column;
            }

            if (*indent == 0 || self.mark.column < *indent) && self.src.next_char_is('\t') {
                return Err(YamlError::new_str(
                    start_mark,
                    "while scanning a block scalar, found a tab character where an indentation space is expected",
                ));
            }

            if !self.src.next_is_break() {
                break;
            }

            breaks.push('\n');
            self.skip_linebreak();
            *end_mark = self.mark;
        }

        if *indent == 0 {
            let min_indent = usize::try_from(self.indent + 1).unwrap_or(0);
            *indent = max_indent.max(min_indent).max(1);
        }
        Ok(())
    }

    fn scan_flow_scalar(&mut self, single: bool) -> YamlResult<Token> {
        let start_mark = self.mark;
        let quote = if single { '\'' } else { '"' };

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();

        // Eat the left quote.
        self.skip_non_blank();

        loop {
            if self.mark.column == 0 && self.src.next_is_document_indicator() {
                return Err(YamlError::new_str(
                    start_mark,
                    "while scanning a quoted scalar, found unexpected document indicator",
                ));
            }

            if self.src.next_is_z() {
                return Err(YamlError::new_str(
                    start_mark,
                    "while scanning a quoted scalar, found unexpected end of stream",
                ));
            }
            self.check_printable()?;

            let mut leading_blanks = false;
            self.consume_flow_scalar_non_whitespace_chars(
                single,
                &mut string,
                &mut leading_blanks,
                start_mark,
            )?;

            if self.src.next_char_is(quote) {
                break;
            }

            // Consume blank characters.
            while self.src.next_is_blank() || self.src.next_is_break() {
                if self.src.next_is_blank() {
                    if !leading_blanks {
                        whitespaces.push(self.src.peek());
                    }
                    self.skip_blank();
                } else {
                    if leading_blanks {
                        trailing_breaks.push('\n');
                    } else {
                        whitespaces.clear();
                        leading_break.push('\n');
                        leading_blanks = true;
                    }
                    self.skip_linebreak();
                }
            }

            // Join the whitespaces or fold line breaks.
            if leading_blanks {
                if leading_break.is_empty() {
                    string.push_str(&trailing_breaks);
                } else if trailing_breaks.is_empty() {
                    string.push(' ');
                } else {
                    string.push_str(&trailing_breaks);
                }
                leading_break.clear();
                trailing_breaks.clear();
            } else {
                string.push_str(&whitespaces);
                whitespaces.clear();
            }
        }

        // Eat the right quote.
        self.skip_non_blank();
        // A JSON-like key inside a flow collection may be followed directly by its `:`.
        if self.flow_level > 0 {
            self.adjacent_value_allowed_at = Some(self.mark.index);
        }

        let scalar_type = if single {
            ScalarType::SingleQuote
        } else {
            ScalarType::DoubleQuote
        };
        Ok(Token::new(
            Position::new(start_mark, self.mark),
            TokenType::Scalar {
                scalar_type,
                value: string,
            },
        ))
    }

    fn consume_flow_scalar_non_whitespace_chars(
        &mut self,
        single: bool,
        string: &mut String,
        leading_blanks: &mut bool,
        start_mark: Mark,
    ) -> ScanResult {
        while !self.src.next_is_blank_or_breakz() {
            match self.src.peek() {
                // An escaped single quote.
                '\'' if single && self.src.nth_char_is(1, '\'') => {
                    string.push('\'');
                    self.skip_n_non_blank(2);
                }
                '\'' if single => break,
                '"' if !single => break,
                // An escaped line break.
                '\\' if !single && is_break(self.src.peek_nth(1)) => {
                    self.skip_non_blank();
                    self.skip_linebreak();
                    *leading_blanks = true;
                    break;
                }
                '\\' if !single => {
                    let c = self.resolve_flow_scalar_escape_sequence(start_mark)?;
                    string.push(c);
                }
                c => {
                    self.check_printable()?;
                    string.push(c);
                    self.skip_non_blank();
                }
            }
        }
        Ok(())
    }

    fn resolve_flow_scalar_escape_sequence(&mut self, start_mark: Mark) -> YamlResult<char> {
        let mut code_length = 0usize;
        let ret = match self.src.peek_nth(1) {
            '0' => '\0',
            'a' => '\x07',
            'b' => '\x08',
            't' | '\t' => '\t',
            'n' => '\n',
            'v' => '\x0b',
            'f' => '\x0c',
            'r' => '\r',
            'e' => '\x1b',
            ' ' => ' ',
            '"' => '"',
            '/' => '/',
            '\'' => '\'',
            '\\' => '\\',
            // NEL (#x85)
            'N' => '\u{85}',
            // #xA0
            '_' => '\u{a0}',
            // LS (#x2028)
            'L' => '\u{2028}',
            // PS (#x2029)
            'P' => '\u{2029}',
            'x' => {
                code_length = 2;
                '\0'
            }
            'u' => {
                code_length = 4;
                '\0'
            }
            'U' => {
                code_length = 8;
                '\0'
            }
            _ => {
                return Err(YamlError::new_str(
                    start_mark,
                    "while parsing a quoted scalar, found unknown escape character",
                ))
            }
        };
        self.skip_n_non_blank(2);

        if code_length == 0 {
            return Ok(ret);
        }

        let mut value = 0u32;
        for i in 0..code_length {
            let c = self.src.peek_nth(i);
            if !is_hex(c) {
                return Err(YamlError::new_str(
                    start_mark,
                    "while parsing a quoted scalar, did not find expected hexadecimal number",
                ));
            }
            value = (value << 4) + as_hex(c);
        }
        let Some(ch) = char::from_u32(value) else {
            return Err(YamlError::new_str(
                start_mark,
                "while parsing a quoted scalar, found invalid Unicode character escape code",
            ));
        };
        self.skip_n_non_blank(code_length);
        Ok(ch)
    }

    fn scan_plain_scalar(&mut self) -> YamlResult<Token> {
        let indent = self.indent + 1;
        let start_mark = self.mark;
        let mut end_mark = self.mark;
        let in_flow = self.flow_level > 0;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();
        let mut leading_blanks = false;

        loop {
            if self.mark.column == 0 && self.src.next_is_document_indicator() {
                break;
            }
            if self.src.next_char_is('#') {
                break;
            }

            while !self.src.next_is_blank_or_breakz() {
                if !self.src.next_can_be_plain_scalar(in_flow) {
                    break;
                }

                if leading_blanks {
                    if !leading_break.is_empty() {
                        if trailing_breaks.is_empty() {
                            string.push(' ');
                        } else {
                            string.push_str(&trailing_breaks);
                        }
                    } else {
                        string.push_str(&trailing_breaks);
                    }
                    leading_break.clear();
                    trailing_breaks.clear();
                    leading_blanks = false;
                } else if !whitespaces.is_empty() {
                    string.push_str(&whitespaces);
                    whitespaces.clear();
                }

                self.check_printable()?;
                string.push(self.src.peek());
                self.skip_non_blank();
                end_mark = self.mark;
            }

            // We may reach the end of a plain scalar if:
            //  - We reach eof
            //  - We reach ": "
            //  - We find a flow character in a flow context
            if !(self.src.next_is_blank() || self.src.next_is_break()) {
                break;
            }

            while self.src.next_is_blank() || self.src.next_is_break() {
                if self.src.next_is_blank() {
                    if leading_blanks
                        && (self.mark.column as isize) < indent
                        && self.src.next_char_is('\t')
                    {
                        // Tabs in indentation columns are allowed only on otherwise empty lines.
                        while self.src.next_is_blank() {
                            self.skip_blank();
                        }
                        if !self.src.next_is_breakz() {
                            return Err(YamlError::new_str(
                                start_mark,
                                "while scanning a plain scalar, found a tab character that violates indentation",
                            ));
                        }
                    } else if leading_blanks {
                        self.skip_blank();
                    } else {
                        whitespaces.push(self.src.peek());
                        self.skip_blank();
                    }
                } else {
                    if leading_blanks {
                        trailing_breaks.push('\n');
                    } else {
                        whitespaces.clear();
                        leading_break.push('\n');
                        leading_blanks = true;
                    }
                    self.skip_linebreak();
                }
            }

            // check indentation level
            if !in_flow && (self.mark.column as isize) < indent {
                break;
            }
        }

        if leading_blanks {
            self.simple_key_allowed = true;
        }

        if string.is_empty() {
            // Nothing was consumed, which would make `fetch_next_token` loop forever.
            return Err(YamlError::new_str(
                start_mark,
                "unexpected end of plain scalar",
            ));
        }

        Ok(Token::new(
            Position::new(start_mark, end_mark),
            TokenType::Scalar {
                scalar_type: ScalarType::Plain,
                value: string,
            },
        ))
    }
}

impl<S: Source> Iterator for Scanner<S> {
    type Item = YamlResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() && self.stream_end_produced {
            return None;
        }
        match self.next_token() {
            Ok(Some(tok)) => Some(Ok(tok)),
            Ok(None) => None,
            Err(err) => {
                // report once
                self.stream_end_produced = true;
                Some(Err(err))
            }
        }
    }
}
