use yamp_common::{Encoding, Position, ScalarType, TagDirective, YamlResult};

/// Anything able to produce [`RawEvent`]s, such as the built-in [`Grammar`](crate::Grammar).
///
/// Implementors must yield `StreamStart` first, report a structurally valid nesting of
/// events afterwards and yield [`RawEventData::Nothing`] once the stream has ended.
pub trait EventSource {
    /// # Errors
    /// Returns the scan, parse or reader error that stopped the stream.
    fn next_raw_event(&mut self) -> YamlResult<RawEvent>;
}

impl<T: EventSource + ?Sized> EventSource for Box<T> {
    fn next_raw_event(&mut self) -> YamlResult<RawEvent> {
        (**self).next_raw_event()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEvent {
    pub pos: Position,
    pub data: RawEventData,
}

impl RawEvent {
    #[must_use]
    pub fn new(pos: Position, data: RawEventData) -> RawEvent {
        RawEvent { pos, data }
    }
}

/// Event record as the substrate reports it, before validation.
///
/// Fields are looser than in [`Event`](crate::Event): an alias may lack its anchor and the
/// version is a bare number pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawEventData {
    /// No event, produced after the stream ended.
    Nothing,
    StreamStart {
        encoding: Encoding,
    },
    StreamEnd,
    DocumentStart {
        version: Option<(u32, u32)>,
        tag_directives: Vec<TagDirective>,
        implicit: bool,
    },
    DocumentEnd {
        implicit: bool,
    },
    Alias {
        anchor: Option<String>,
    },
    Scalar {
        anchor: Option<String>,
        tag: Option<String>,
        value: String,
        plain_implicit: bool,
        quoted_implicit: bool,
        style: ScalarType,
    },
    SequenceStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        flow: bool,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        flow: bool,
    },
    MappingEnd,
}

impl RawEventData {
    pub const NO_EVENT: u32 = 0;
    pub const STREAM_START: u32 = 1;
    pub const STREAM_END: u32 = 2;
    pub const DOCUMENT_START: u32 = 3;
    pub const DOCUMENT_END: u32 = 4;
    pub const ALIAS: u32 = 5;
    pub const SCALAR: u32 = 6;
    pub const SEQUENCE_START: u32 = 7;
    pub const SEQUENCE_END: u32 = 8;
    pub const MAPPING_START: u32 = 9;
    pub const MAPPING_END: u32 = 10;

    /// Numeric kind of this record, used when reporting internal errors.
    #[must_use]
    pub fn type_code(&self) -> u32 {
        match self {
            RawEventData::Nothing => Self::NO_EVENT,
            RawEventData::StreamStart { .. } => Self::STREAM_START,
            RawEventData::StreamEnd => Self::STREAM_END,
            RawEventData::DocumentStart { .. } => Self::DOCUMENT_START,
            RawEventData::DocumentEnd { .. } => Self::DOCUMENT_END,
            RawEventData::Alias { .. } => Self::ALIAS,
            RawEventData::Scalar { .. } => Self::SCALAR,
            RawEventData::SequenceStart { .. } => Self::SEQUENCE_START,
            RawEventData::SequenceEnd => Self::SEQUENCE_END,
            RawEventData::MappingStart { .. } => Self::MAPPING_START,
            RawEventData::MappingEnd => Self::MAPPING_END,
        }
    }
}
