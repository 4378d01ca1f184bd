use hashbrown::HashMap;

use crate::raw::{EventSource, RawEvent, RawEventData};
use crate::scanner::{Scanner, Source};
use yamp_common::{Mark, Position, ScalarType, TagDirective, Token, TokenType, YamlError, YamlResult};

const DEFAULT_TAG_HANDLES: [(&str, &str); 2] = [("!", "!"), ("!!", "tag:yaml.org,2002:")];

#[derive(Clone, Copy, PartialEq, Debug, Eq)]
enum State {
    StreamStart,
    ImplicitDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    BlockNode,
    BlockNodeOrIndentlessSequence,
    FlowNode,
    BlockSequenceFirstEntry,
    BlockSequenceEntry,
    IndentlessSequenceEntry,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingValue,
    FlowSequenceFirstEntry,
    FlowSequenceEntry,
    FlowSequenceEntryMappingKey,
    FlowSequenceEntryMappingValue,
    FlowSequenceEntryMappingEnd,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingValue,
    FlowMappingEmptyValue,
    End,
}

/// Groups tokens into raw events following the YAML block and flow productions.
///
/// Tag handles are resolved against the `%TAG` directives of the current document, which
/// are reset at every document start.
pub struct Grammar<S> {
    scanner: Scanner<S>,
    current: Option<Token>,
    state: State,
    states: Vec<State>,
    marks: Vec<Mark>,
    tag_handles: HashMap<String, String>,
}

/// Properties collected in front of a node.
#[derive(Default)]
struct NodeProps {
    anchor: Option<String>,
    tag: Option<String>,
}

impl<S: Source> Grammar<S> {
    pub fn new(src: S) -> Grammar<S> {
        Grammar {
            scanner: Scanner::new(src),
            current: None,
            state: State::StreamStart,
            states: Vec::new(),
            marks: Vec::new(),
            tag_handles: HashMap::new(),
        }
    }

    fn peek_token(&mut self) -> YamlResult<&Token> {
        if self.current.is_none() {
            self.current = self.scanner.next_token()?;
        }
        match &self.current {
            Some(tok) => Ok(tok),
            None => Err(YamlError::parse(
                self.scanner.mark(),
                "unexpected end of token stream",
            )),
        }
    }

    /// Type of the next token together with its span.
    fn peek(&mut self) -> YamlResult<(Position, &TokenType)> {
        let tok = self.peek_token()?;
        Ok((tok.span, &tok.token_type))
    }

    fn take_token(&mut self) -> YamlResult<Token> {
        self.peek_token()?;
        self.current.take().ok_or_else(|| {
            YamlError::parse(self.scanner.mark(), "unexpected end of token stream")
        })
    }

    fn skip(&mut self) {
        self.current = None;
    }

    fn pop_state(&mut self) {
        self.state = self.states.pop().unwrap_or(State::End);
    }

    fn state_machine(&mut self) -> YamlResult<RawEvent> {
        match self.state {
            State::StreamStart => self.stream_start(),
            State::ImplicitDocumentStart => self.document_start(true),
            State::DocumentStart => self.document_start(false),
            State::DocumentContent => self.document_content(),
            State::DocumentEnd => self.document_end(),

            State::BlockNode => self.parse_node(true, false),
            State::BlockNodeOrIndentlessSequence => self.parse_node(true, true),
            State::FlowNode => self.parse_node(false, false),

            State::BlockSequenceFirstEntry => self.block_sequence_entry(true),
            State::BlockSequenceEntry => self.block_sequence_entry(false),
            State::IndentlessSequenceEntry => self.indentless_sequence_entry(),

            State::BlockMappingFirstKey => self.block_mapping_key(true),
            State::BlockMappingKey => self.block_mapping_key(false),
            State::BlockMappingValue => self.block_mapping_value(),

            State::FlowSequenceFirstEntry => self.flow_sequence_entry(true),
            State::FlowSequenceEntry => self.flow_sequence_entry(false),
            State::FlowSequenceEntryMappingKey => self.flow_sequence_entry_mapping_key(),
            State::FlowSequenceEntryMappingValue => self.flow_sequence_entry_mapping_value(),
            State::FlowSequenceEntryMappingEnd => self.flow_sequence_entry_mapping_end(),

            State::FlowMappingFirstKey => self.flow_mapping_key(true),
            State::FlowMappingKey => self.flow_mapping_key(false),
            State::FlowMappingValue => self.flow_mapping_value(false),
            State::FlowMappingEmptyValue => self.flow_mapping_value(true),

            State::End => Ok(RawEvent::new(
                Position::empty(self.scanner.mark()),
                RawEventData::Nothing,
            )),
        }
    }

    fn stream_start(&mut self) -> YamlResult<RawEvent> {
        let tok = self.take_token()?;
        match tok.token_type {
            TokenType::StreamStart(encoding) => {
                self.state = State::ImplicitDocumentStart;
                Ok(RawEvent::new(
                    tok.span,
                    RawEventData::StreamStart { encoding },
                ))
            }
            _ => Err(YamlError::parse(
                tok.span.start_mark,
                "did not find expected <stream-start>",
            )),
        }
    }

    fn document_start(&mut self, implicit: bool) -> YamlResult<RawEvent> {
        // extra document end markers
        while matches!(self.peek()?.1, TokenType::DocumentEnd) {
            self.skip();
        }

        let (span, token_type) = self.peek()?;
        match token_type {
            TokenType::StreamEnd => {
                self.state = State::End;
                self.skip();
                Ok(RawEvent::new(span, RawEventData::StreamEnd))
            }
            TokenType::VersionDirective { .. } | TokenType::TagDirective { .. } if !implicit => {
                Err(YamlError::parse(
                    span.start_mark,
                    "missing explicit document end marker before directive",
                ))
            }
            TokenType::VersionDirective { .. }
            | TokenType::TagDirective { .. }
            | TokenType::DocumentStart => self.explicit_document_start(span.start_mark),
            _ if implicit => {
                // bare document
                self.process_directives()?;
                self.states.push(State::DocumentEnd);
                self.state = State::BlockNode;
                Ok(RawEvent::new(
                    Position::empty(span.start_mark),
                    RawEventData::DocumentStart {
                        version: None,
                        tag_directives: Vec::new(),
                        implicit: true,
                    },
                ))
            }
            _ => Err(YamlError::parse(
                span.start_mark,
                "did not find expected <document start>",
            )),
        }
    }

    fn explicit_document_start(&mut self, start_mark: Mark) -> YamlResult<RawEvent> {
        let (version, tag_directives) = self.process_directives()?;
        let (span, token_type) = self.peek()?;
        if *token_type != TokenType::DocumentStart {
            return Err(YamlError::parse(
                span.start_mark,
                "did not find expected <document start>",
            ));
        }
        self.states.push(State::DocumentEnd);
        self.state = State::DocumentContent;
        self.skip();
        Ok(RawEvent::new(
            Position::new(start_mark, span.end_mark),
            RawEventData::DocumentStart {
                version,
                tag_directives,
                implicit: false,
            },
        ))
    }

    fn process_directives(&mut self) -> YamlResult<(Option<(u32, u32)>, Vec<TagDirective>)> {
        self.tag_handles.clear();
        let mut version = None;
        let mut directives = Vec::new();

        while matches!(
            self.peek()?.1,
            TokenType::VersionDirective { .. } | TokenType::TagDirective { .. }
        ) {
            let tok = self.take_token()?;
            match tok.token_type {
                TokenType::VersionDirective { major, minor } => {
                    if version.is_some() {
                        return Err(YamlError::parse(
                            tok.span.start_mark,
                            "found duplicate %YAML directive",
                        ));
                    }
                    version = Some((major, minor));
                }
                TokenType::TagDirective { handle, prefix } => {
                    if self.tag_handles.contains_key(handle.as_str()) {
                        return Err(YamlError::parse(
                            tok.span.start_mark,
                            "found duplicate %TAG directive",
                        ));
                    }
                    self.tag_handles.insert(handle.clone(), prefix.clone());
                    directives.push(TagDirective::new(handle, prefix));
                }
                _ => {}
            }
        }

        for (handle, prefix) in DEFAULT_TAG_HANDLES {
            self.tag_handles
                .entry(handle.to_string())
                .or_insert_with(|| prefix.to_string());
        }
        Ok((version, directives))
    }

    fn document_content(&mut self) -> YamlResult<RawEvent> {
        let (span, token_type) = self.peek()?;
        match token_type {
            TokenType::VersionDirective { .. }
            | TokenType::TagDirective { .. }
            | TokenType::DocumentStart
            | TokenType::DocumentEnd
            | TokenType::StreamEnd => {
                self.pop_state();
                Ok(empty_scalar(span.start_mark))
            }
            _ => self.parse_node(true, false),
        }
    }

    fn document_end(&mut self) -> YamlResult<RawEvent> {
        let (span, token_type) = self.peek()?;
        let mut pos = Position::empty(span.start_mark);
        let implicit = *token_type != TokenType::DocumentEnd;
        if implicit {
            self.state = State::DocumentStart;
        } else {
            pos.end_mark = span.end_mark;
            self.skip();
            self.state = State::ImplicitDocumentStart;
        }
        self.tag_handles.clear();
        Ok(RawEvent::new(pos, RawEventData::DocumentEnd { implicit }))
    }

    fn resolve_tag(&self, handle: &str, suffix: String, mark: Mark) -> YamlResult<String> {
        if handle.is_empty() {
            return Ok(suffix);
        }
        match self.tag_handles.get(handle) {
            Some(prefix) => Ok(format!("{prefix}{suffix}")),
            None => Err(YamlError::parse(
                mark,
                "while parsing a node, found undefined tag handle",
            )),
        }
    }

    fn parse_node(&mut self, block: bool, indentless_sequence: bool) -> YamlResult<RawEvent> {
        let (span, token_type) = self.peek()?;
        if let TokenType::Alias(_) = token_type {
            self.pop_state();
            let tok = self.take_token()?;
            let anchor = match tok.token_type {
                TokenType::Alias(name) => Some(name),
                _ => None,
            };
            return Ok(RawEvent::new(tok.span, RawEventData::Alias { anchor }));
        }

        let mut start_mark = span.start_mark;
        let mut end_mark = span.start_mark;
        let mut props = NodeProps::default();
        let mut tag_parts = None;

        // properties may come in either order
        for _ in 0..2 {
            let tok = match self.peek()?.1 {
                TokenType::Anchor(_) if props.anchor.is_none() => self.take_token()?,
                TokenType::Tag { .. } if tag_parts.is_none() => self.take_token()?,
                _ => break,
            };
            if props.anchor.is_none() && tag_parts.is_none() {
                start_mark = tok.span.start_mark;
            }
            end_mark = tok.span.end_mark;
            match tok.token_type {
                TokenType::Anchor(name) => props.anchor = Some(name),
                TokenType::Tag { handle, suffix } => {
                    tag_parts = Some((handle, suffix, tok.span.start_mark));
                }
                _ => {}
            }
        }

        if let Some((handle, suffix, tag_mark)) = tag_parts {
            props.tag = Some(self.resolve_tag(&handle, suffix, tag_mark)?);
        }
        let implicit = props.tag.is_none();

        let (span, token_type) = self.peek()?;
        match token_type {
            TokenType::BlockEntry if indentless_sequence => {
                self.state = State::IndentlessSequenceEntry;
                Ok(RawEvent::new(
                    Position::new(start_mark, span.end_mark),
                    RawEventData::SequenceStart {
                        anchor: props.anchor,
                        tag: props.tag,
                        implicit,
                        flow: false,
                    },
                ))
            }
            TokenType::Scalar { .. } => {
                self.pop_state();
                let tok = self.take_token()?;
                let TokenType::Scalar { scalar_type, value } = tok.token_type else {
                    return Err(YamlError::parse(tok.span.start_mark, "expected a scalar"));
                };
                let plain_implicit = (scalar_type == ScalarType::Plain && props.tag.is_none())
                    || props.tag.as_deref() == Some("!");
                let quoted_implicit = !plain_implicit && props.tag.is_none();
                Ok(RawEvent::new(
                    Position::new(start_mark, tok.span.end_mark),
                    RawEventData::Scalar {
                        anchor: props.anchor,
                        tag: props.tag,
                        value,
                        plain_implicit,
                        quoted_implicit,
                        style: scalar_type,
                    },
                ))
            }
            TokenType::FlowSequenceStart => {
                self.state = State::FlowSequenceFirstEntry;
                Ok(RawEvent::new(
                    Position::new(start_mark, span.end_mark),
                    RawEventData::SequenceStart {
                        anchor: props.anchor,
                        tag: props.tag,
                        implicit,
                        flow: true,
                    },
                ))
            }
            TokenType::FlowMappingStart => {
                self.state = State::FlowMappingFirstKey;
                Ok(RawEvent::new(
                    Position::new(start_mark, span.end_mark),
                    RawEventData::MappingStart {
                        anchor: props.anchor,
                        tag: props.tag,
                        implicit,
                        flow: true,
                    },
                ))
            }
            TokenType::BlockSequenceStart if block => {
                self.state = State::BlockSequenceFirstEntry;
                Ok(RawEvent::new(
                    Position::new(start_mark, span.end_mark),
                    RawEventData::SequenceStart {
                        anchor: props.anchor,
                        tag: props.tag,
                        implicit,
                        flow: false,
                    },
                ))
            }
            TokenType::BlockMappingStart if block => {
                self.state = State::BlockMappingFirstKey;
                Ok(RawEvent::new(
                    Position::new(start_mark, span.end_mark),
                    RawEventData::MappingStart {
                        anchor: props.anchor,
                        tag: props.tag,
                        implicit,
                        flow: false,
                    },
                ))
            }
            // properties of an empty node
            _ if props.anchor.is_some() || props.tag.is_some() => {
                self.pop_state();
                let plain_implicit = implicit || props.tag.as_deref() == Some("!");
                Ok(RawEvent::new(
                    Position::new(start_mark, end_mark),
                    RawEventData::Scalar {
                        anchor: props.anchor,
                        tag: props.tag,
                        value: String::new(),
                        plain_implicit,
                        quoted_implicit: false,
                        style: ScalarType::Plain,
                    },
                ))
            }
            _ => {
                let context = if block {
                    "while parsing a block node"
                } else {
                    "while parsing a flow node"
                };
                Err(YamlError::parse(
                    span.start_mark,
                    format!("{context}, did not find expected node content"),
                ))
            }
        }
    }

    fn push_first_mark(&mut self) -> YamlResult<()> {
        let (span, _) = self.peek()?;
        self.marks.push(span.start_mark);
        self.skip();
        Ok(())
    }

    fn collection_error(&mut self, context: &str, problem: &str, mark: Mark) -> YamlError {
        let info = match self.marks.pop() {
            Some(start) => format!("{context} started at {start}, {problem}"),
            None => format!("{context}, {problem}"),
        };
        YamlError::parse(mark, info)
    }

    fn block_sequence_entry(&mut self, first: bool) -> YamlResult<RawEvent> {
        if first {
            self.push_first_mark()?;
        }

        let (span, token_type) = self.peek()?;
        match token_type {
            TokenType::BlockEntry => {
                self.skip();
                let (_, next) = self.peek()?;
                if matches!(next, TokenType::BlockEntry | TokenType::BlockEnd) {
                    self.state = State::BlockSequenceEntry;
                    Ok(empty_scalar(span.end_mark))
                } else {
                    self.states.push(State::BlockSequenceEntry);
                    self.parse_node(true, false)
                }
            }
            TokenType::BlockEnd => {
                self.pop_state();
                self.marks.pop();
                self.skip();
                Ok(RawEvent::new(span, RawEventData::SequenceEnd))
            }
            _ => Err(self.collection_error(
                "while parsing a block collection",
                "did not find expected '-' indicator",
                span.start_mark,
            )),
        }
    }

    fn indentless_sequence_entry(&mut self) -> YamlResult<RawEvent> {
        let (span, token_type) = self.peek()?;
        if *token_type != TokenType::BlockEntry {
            self.pop_state();
            return Ok(RawEvent::new(
                Position::empty(span.start_mark),
                RawEventData::SequenceEnd,
            ));
        }

        self.skip();
        let (_, next) = self.peek()?;
        if matches!(
            next,
            TokenType::BlockEntry | TokenType::Key | TokenType::Value | TokenType::BlockEnd
        ) {
            self.state = State::IndentlessSequenceEntry;
            Ok(empty_scalar(span.end_mark))
        } else {
            self.states.push(State::IndentlessSequenceEntry);
            self.parse_node(true, false)
        }
    }

    fn block_mapping_key(&mut self, first: bool) -> YamlResult<RawEvent> {
        if first {
            self.push_first_mark()?;
        }

        let (span, token_type) = self.peek()?;
        match token_type {
            TokenType::Key => {
                self.skip();
                let (_, next) = self.peek()?;
                if matches!(
                    next,
                    TokenType::Key | TokenType::Value | TokenType::BlockEnd
                ) {
                    self.state = State::BlockMappingValue;
                    Ok(empty_scalar(span.end_mark))
                } else {
                    self.states.push(State::BlockMappingValue);
                    self.parse_node(true, true)
                }
            }
            // a value without a key, e.g. `: x`
            TokenType::Value => {
                self.state = State::BlockMappingValue;
                Ok(empty_scalar(span.start_mark))
            }
            TokenType::BlockEnd => {
                self.pop_state();
                self.marks.pop();
                self.skip();
                Ok(RawEvent::new(span, RawEventData::MappingEnd))
            }
            _ => Err(self.collection_error(
                "while parsing a block mapping",
                "did not find expected key",
                span.start_mark,
            )),
        }
    }

    fn block_mapping_value(&mut self) -> YamlResult<RawEvent> {
        let (span, token_type) = self.peek()?;
        if *token_type != TokenType::Value {
            self.state = State::BlockMappingKey;
            return Ok(empty_scalar(span.start_mark));
        }

        self.skip();
        let (_, next) = self.peek()?;
        if matches!(
            next,
            TokenType::Key | TokenType::Value | TokenType::BlockEnd
        ) {
            self.state = State::BlockMappingKey;
            Ok(empty_scalar(span.end_mark))
        } else {
            self.states.push(State::BlockMappingKey);
            self.parse_node(true, true)
        }
    }

    fn flow_sequence_entry(&mut self, first: bool) -> YamlResult<RawEvent> {
        if first {
            self.push_first_mark()?;
        }

        let (mut span, mut token_type) = self.peek()?;
        if *token_type != TokenType::FlowSequenceEnd {
            if !first {
                if *token_type != TokenType::FlowEntry {
                    return Err(self.collection_error(
                        "while parsing a flow sequence",
                        "did not find expected ',' or ']'",
                        span.start_mark,
                    ));
                }
                self.skip();
                (span, token_type) = self.peek()?;
            }

            match token_type {
                TokenType::Key => {
                    self.state = State::FlowSequenceEntryMappingKey;
                    self.skip();
                    return Ok(RawEvent::new(
                        span,
                        RawEventData::MappingStart {
                            anchor: None,
                            tag: None,
                            implicit: true,
                            flow: true,
                        },
                    ));
                }
                TokenType::FlowSequenceEnd => {}
                _ => {
                    self.states.push(State::FlowSequenceEntry);
                    return self.parse_node(false, false);
                }
            }
        }

        self.pop_state();
        self.marks.pop();
        self.skip();
        Ok(RawEvent::new(span, RawEventData::SequenceEnd))
    }

    fn flow_sequence_entry_mapping_key(&mut self) -> YamlResult<RawEvent> {
        let (span, token_type) = self.peek()?;
        if matches!(
            token_type,
            TokenType::Value | TokenType::FlowEntry | TokenType::FlowSequenceEnd
        ) {
            self.state = State::FlowSequenceEntryMappingValue;
            Ok(empty_scalar(span.start_mark))
        } else {
            self.states.push(State::FlowSequenceEntryMappingValue);
            self.parse_node(false, false)
        }
    }

    fn flow_sequence_entry_mapping_value(&mut self) -> YamlResult<RawEvent> {
        let (mut span, token_type) = self.peek()?;
        if *token_type == TokenType::Value {
            self.skip();
            let (next_span, next) = self.peek()?;
            if !matches!(next, TokenType::FlowEntry | TokenType::FlowSequenceEnd) {
                self.states.push(State::FlowSequenceEntryMappingEnd);
                return self.parse_node(false, false);
            }
            span = next_span;
        }
        self.state = State::FlowSequenceEntryMappingEnd;
        Ok(empty_scalar(span.start_mark))
    }

    fn flow_sequence_entry_mapping_end(&mut self) -> YamlResult<RawEvent> {
        let (span, _) = self.peek()?;
        self.state = State::FlowSequenceEntry;
        Ok(RawEvent::new(
            Position::empty(span.start_mark),
            RawEventData::MappingEnd,
        ))
    }

    fn flow_mapping_key(&mut self, first: bool) -> YamlResult<RawEvent> {
        if first {
            self.push_first_mark()?;
        }

        let (mut span, mut token_type) = self.peek()?;
        if *token_type != TokenType::FlowMappingEnd {
            if !first {
                if *token_type != TokenType::FlowEntry {
                    return Err(self.collection_error(
                        "while parsing a flow mapping",
                        "did not find expected ',' or '}'",
                        span.start_mark,
                    ));
                }
                self.skip();
                (span, token_type) = self.peek()?;
            }

            match token_type {
                TokenType::Key => {
                    self.skip();
                    let (next_span, next) = self.peek()?;
                    if matches!(
                        next,
                        TokenType::Value | TokenType::FlowEntry | TokenType::FlowMappingEnd
                    ) {
                        self.state = State::FlowMappingValue;
                        return Ok(empty_scalar(next_span.start_mark));
                    }
                    self.states.push(State::FlowMappingValue);
                    return self.parse_node(false, false);
                }
                // a value without a key, e.g. `{: x}`
                TokenType::Value => {
                    self.state = State::FlowMappingValue;
                    return Ok(empty_scalar(span.start_mark));
                }
                TokenType::FlowMappingEnd => {}
                _ => {
                    self.states.push(State::FlowMappingEmptyValue);
                    return self.parse_node(false, false);
                }
            }
        }

        self.pop_state();
        self.marks.pop();
        self.skip();
        Ok(RawEvent::new(span, RawEventData::MappingEnd))
    }

    fn flow_mapping_value(&mut self, empty: bool) -> YamlResult<RawEvent> {
        let (mut span, token_type) = self.peek()?;
        if !empty && *token_type == TokenType::Value {
            self.skip();
            let (next_span, next) = self.peek()?;
            if !matches!(next, TokenType::FlowEntry | TokenType::FlowMappingEnd) {
                self.states.push(State::FlowMappingKey);
                return self.parse_node(false, false);
            }
            span = next_span;
        }
        self.state = State::FlowMappingKey;
        Ok(empty_scalar(span.start_mark))
    }
}

impl<S: Source> EventSource for Grammar<S> {
    fn next_raw_event(&mut self) -> YamlResult<RawEvent> {
        self.state_machine()
    }
}

fn empty_scalar(mark: Mark) -> RawEvent {
    RawEvent::new(
        Position::empty(mark),
        RawEventData::Scalar {
            anchor: None,
            tag: None,
            value: String::new(),
            plain_implicit: true,
            quoted_implicit: false,
            style: ScalarType::Plain,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::Grammar;
    use crate::raw::{EventSource, RawEventData};
    use crate::scanner::StrSource;
    use yamp_common::{ErrorKind, ScalarType, YamlError};

    fn collect(input: &str) -> Result<Vec<RawEventData>, YamlError> {
        let mut grammar = Grammar::new(StrSource::new(input));
        let mut events = Vec::new();
        loop {
            let ev = grammar.next_raw_event()?;
            if ev.data == RawEventData::Nothing {
                return Ok(events);
            }
            events.push(ev.data);
        }
    }

    fn codes(input: &str) -> Vec<u32> {
        collect(input)
            .unwrap()
            .iter()
            .map(RawEventData::type_code)
            .collect()
    }

    #[test]
    fn test_nothing_after_stream_end() {
        let mut grammar = Grammar::new(StrSource::new(""));
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(grammar.next_raw_event().unwrap().data.type_code());
        }
        assert_eq!(
            seen,
            [
                RawEventData::STREAM_START,
                RawEventData::STREAM_END,
                RawEventData::NO_EVENT,
                RawEventData::NO_EVENT
            ]
        );
    }

    #[test]
    fn test_block_mapping_with_indentless_seq() {
        assert_eq!(
            codes("a:\n- 1\n- 2\nb: c\n"),
            [1, 3, 9, 6, 7, 6, 6, 8, 6, 6, 10, 4, 2]
        );
    }

    #[test]
    fn test_flow_pair_in_sequence() {
        assert_eq!(codes("[a: b, c]"), [1, 3, 7, 9, 6, 6, 10, 6, 8, 4, 2]);
    }

    #[test]
    fn test_tag_resolution() {
        let events = collect("%TAG !e! tag:example.com,2000:\n--- !e!foo x\n").unwrap();
        let RawEventData::DocumentStart { tag_directives, implicit, .. } = &events[1] else {
            panic!("expected document start, got {:?}", events[1]);
        };
        assert!(!implicit);
        assert_eq!(tag_directives.len(), 1);
        assert_eq!(tag_directives[0].handle, "!e!");
        let RawEventData::Scalar { tag, plain_implicit, quoted_implicit, .. } = &events[2] else {
            panic!("expected scalar, got {:?}", events[2]);
        };
        assert_eq!(tag.as_deref(), Some("tag:example.com,2000:foo"));
        assert!(!plain_implicit);
        assert!(!quoted_implicit);
    }

    #[test]
    fn test_directives_reset_between_documents() {
        let err = collect("%TAG !e! tag:e,2000:\n--- !e!a x\n...\n--- !e!b y\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_duplicate_version_directive() {
        let err = collect("%YAML 1.1\n%YAML 1.1\n--- a\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_anchor_on_empty_node() {
        let events = collect("a: &x\nb: *x\n").unwrap();
        assert_eq!(
            events[4],
            RawEventData::Scalar {
                anchor: Some("x".to_string()),
                tag: None,
                value: String::new(),
                plain_implicit: true,
                quoted_implicit: false,
                style: ScalarType::Plain,
            }
        );
        assert_eq!(
            events[6],
            RawEventData::Alias {
                anchor: Some("x".to_string())
            }
        );
    }

    #[test]
    fn test_bare_document_after_end_marker() {
        assert_eq!(codes("a\n...\nb\n"), [1, 3, 6, 4, 3, 6, 4, 2]);
    }

    #[test]
    fn test_unclosed_flow_sequence() {
        let err = collect("[a, b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
