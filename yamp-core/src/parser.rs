use std::fmt::{Debug, Formatter};
use std::io::Read;

use tracing::{debug, trace};

use crate::event::Event;
use crate::grammar::Grammar;
use crate::raw::{EventSource, RawEventData};
use crate::scanner::{ReaderSource, StrSource};
use yamp_common::{Encoding, Mark, YamlError, YamlResult};

/// Consumer of parser events, e.g. something building a document tree.
pub trait EventReceiver {
    /// # Errors
    /// A rejected event, typically a [`YamlError::Compose`]. It stops [`Parser::load`].
    fn on_event(&mut self, event: Event) -> YamlResult<()>;
}

impl<F: FnMut(Event) -> YamlResult<()>> EventReceiver for F {
    fn on_event(&mut self, event: Event) -> YamlResult<()> {
        self(event)
    }
}

/// Lifecycle stage of a [`Parser`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Unbound,
    Bound,
    /// The stream end event was delivered.
    Ended,
    /// An error was reported, it is reported again on every request.
    Failed,
}

enum ParserState<'input> {
    Unbound,
    Bound(Box<dyn EventSource + 'input>),
    Ended,
    Failed(YamlError),
}

/// Pull parser handing out one [`Event`] per request.
///
/// ```
/// use yamp_core::{Event, Parser};
///
/// let mut parser = Parser::from_str("key: value");
/// let events: Vec<Event> = parser.by_ref().map(Result::unwrap).collect();
/// assert_eq!(events.len(), 8);
/// assert!(matches!(events.last(), Some(Event::StreamEnd { .. })));
/// ```
pub struct Parser<'input> {
    state: ParserState<'input>,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Parser::new()
    }
}

impl Debug for Parser<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("status", &self.status())
            .finish()
    }
}

impl<'input> Parser<'input> {
    /// Creates a parser without input; bind one before asking for events.
    #[must_use]
    pub fn new() -> Parser<'input> {
        Parser {
            state: ParserState::Unbound,
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(input: &'input str) -> Parser<'input> {
        Parser {
            state: ParserState::Bound(Box::new(Grammar::new(StrSource::new(input)))),
        }
    }

    /// Creates a parser reading `reader`, detecting its encoding from a byte-order mark.
    ///
    /// # Errors
    /// A [`YamlError::Resource`] if the input buffers can't be allocated.
    pub fn from_reader<R: Read + 'input>(reader: R) -> YamlResult<Parser<'input>> {
        let mut parser = Parser::new();
        parser.bind_reader(reader, None)?;
        Ok(parser)
    }

    #[must_use]
    pub fn status(&self) -> Status {
        match self.state {
            ParserState::Unbound => Status::Unbound,
            ParserState::Bound(_) => Status::Bound,
            ParserState::Ended => Status::Ended,
            ParserState::Failed(_) => Status::Failed,
        }
    }

    /// Binds an in-memory string. Strings are UTF-8, so `None`, `Any` and `Utf8` are
    /// the only accepted hints.
    ///
    /// # Errors
    /// - [`YamlError::AlreadyBound`] if the parser isn't [`Status::Unbound`].
    /// - [`YamlError::Reader`] for a UTF-16 hint.
    pub fn bind_str(&mut self, input: &'input str, encoding: Option<Encoding>) -> YamlResult<()> {
        self.check_unbound()?;
        if matches!(encoding, Some(Encoding::Utf16le | Encoding::Utf16be)) {
            return Err(YamlError::reader(
                Mark::default(),
                "string input is always UTF-8",
            ));
        }
        debug!(len = input.len(), "bound string input");
        self.state = ParserState::Bound(Box::new(Grammar::new(StrSource::new(input))));
        Ok(())
    }

    /// Binds a byte stream. A given `encoding` other than `Any` overrides the byte-order mark.
    ///
    /// # Errors
    /// - [`YamlError::AlreadyBound`] if the parser isn't [`Status::Unbound`].
    /// - [`YamlError::Resource`] if the input buffers can't be allocated.
    pub fn bind_reader<R: Read + 'input>(
        &mut self,
        reader: R,
        encoding: Option<Encoding>,
    ) -> YamlResult<()> {
        self.check_unbound()?;
        let src = ReaderSource::new(reader, encoding)?;
        debug!(hint = ?encoding, "bound reader input");
        self.state = ParserState::Bound(Box::new(Grammar::new(src)));
        Ok(())
    }

    /// Binds a caller provided event source.
    ///
    /// # Errors
    /// [`YamlError::AlreadyBound`] if the parser isn't [`Status::Unbound`].
    pub fn bind_source<E: EventSource + 'input>(&mut self, source: E) -> YamlResult<()> {
        self.check_unbound()?;
        debug!("bound custom event source");
        self.state = ParserState::Bound(Box::new(source));
        Ok(())
    }

    fn check_unbound(&self) -> YamlResult<()> {
        match self.state {
            ParserState::Unbound => Ok(()),
            _ => Err(YamlError::AlreadyBound),
        }
    }

    fn fail(&mut self, err: YamlError) -> YamlError {
        debug!(error = %err, "parser failed");
        self.state = ParserState::Failed(err.clone());
        err
    }

    /// Produces the next event of the stream.
    ///
    /// # Errors
    /// - [`YamlError::Unbound`] before any input was bound.
    /// - [`YamlError::StreamEnded`] after the stream end event.
    /// - Reader, scanner, parser and decoding errors of the input. Once one occurred it is
    ///   returned for every later request.
    pub fn next_event(&mut self) -> YamlResult<Event> {
        let source = match &mut self.state {
            ParserState::Unbound => return Err(YamlError::Unbound),
            ParserState::Ended => return Err(YamlError::StreamEnded),
            ParserState::Failed(err) => return Err(err.clone()),
            ParserState::Bound(source) => source,
        };

        match source.next_raw_event().and_then(Event::decode) {
            Ok(Event::Nothing { .. }) => Err(self.fail(YamlError::internal(
                RawEventData::NO_EVENT,
                "event source produced no event",
            ))),
            Ok(event) => {
                trace!(%event, "event");
                if let Event::StreamEnd { .. } = event {
                    debug!("stream ended");
                    self.state = ParserState::Ended;
                }
                Ok(event)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Feeds events to `recv` until the stream ends, or until the first document ends if
    /// `multi` is false.
    ///
    /// # Errors
    /// Any error of [`Parser::next_event`], or the error returned by `recv`. Either one
    /// leaves the parser in [`Status::Failed`].
    pub fn load<R: EventReceiver>(&mut self, recv: &mut R, multi: bool) -> YamlResult<()> {
        loop {
            let event = self.next_event()?;
            let done = match event {
                Event::StreamEnd { .. } => true,
                Event::DocumentEnd { .. } => !multi,
                _ => false,
            };
            if let Err(err) = recv.on_event(event) {
                return Err(self.fail(err));
            }
            if done {
                return Ok(());
            }
        }
    }
}

/// Yields events up to and including the stream end. An error is yielded once, after
/// which the iterator is exhausted.
impl Iterator for Parser<'_> {
    type Item = YamlResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            ParserState::Bound(_) => Some(self.next_event()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Parser, Status};
    use crate::event::Event;
    use crate::raw::{EventSource, RawEvent, RawEventData};
    use yamp_common::{Encoding, ErrorKind, Position, YamlError, YamlResult};

    struct Silent;

    impl EventSource for Silent {
        fn next_raw_event(&mut self) -> YamlResult<RawEvent> {
            Ok(RawEvent::new(Position::default(), RawEventData::Nothing))
        }
    }

    #[test]
    fn test_unbound() {
        let mut parser = Parser::new();
        assert_eq!(parser.status(), Status::Unbound);
        assert_eq!(parser.next_event(), Err(YamlError::Unbound));
        assert!(parser.next().is_none());
        // still usable
        parser.bind_str("a", None).unwrap();
        assert_eq!(parser.status(), Status::Bound);
    }

    #[test]
    fn test_rebind_rejected() {
        let mut parser = Parser::from_str("a");
        assert_eq!(parser.bind_str("b", None), Err(YamlError::AlreadyBound));
        assert_eq!(
            parser.bind_reader(&b"b"[..], None),
            Err(YamlError::AlreadyBound)
        );
        assert_eq!(parser.bind_source(Silent), Err(YamlError::AlreadyBound));
    }

    #[test]
    fn test_utf16_hint_for_str() {
        let mut parser = Parser::new();
        let err = parser.bind_str("a", Some(Encoding::Utf16le)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reader);
        assert_eq!(parser.status(), Status::Unbound);
    }

    #[test]
    fn test_ended_is_terminal() {
        let mut parser = Parser::from_str("");
        assert!(matches!(parser.next_event(), Ok(Event::StreamStart { .. })));
        assert!(matches!(parser.next_event(), Ok(Event::StreamEnd { .. })));
        assert_eq!(parser.status(), Status::Ended);
        for _ in 0..3 {
            assert_eq!(parser.next_event(), Err(YamlError::StreamEnded));
        }
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_nothing_is_internal() {
        let mut parser = Parser::new();
        parser.bind_source(Silent).unwrap();
        let err = parser.next_event().unwrap_err();
        assert_eq!(err, YamlError::internal(0, "event source produced no event"));
        assert_eq!(parser.status(), Status::Failed);
        assert_eq!(parser.next_event(), Err(err));
    }

    #[test]
    fn test_iterator_reports_error_once() {
        let results: Vec<_> = Parser::from_str("\"abc").collect();
        assert!(results.last().unwrap().is_err());
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_closure_receiver() {
        let mut parser = Parser::from_str("a\n---\nb\n");
        let mut count = 0;
        parser
            .load(
                &mut |_ev: Event| -> YamlResult<()> {
                    count += 1;
                    Ok(())
                },
                false,
            )
            .unwrap();
        // stream start, document start, scalar, document end
        assert_eq!(count, 4);
        assert_eq!(parser.status(), Status::Bound);
    }
}
