mod error;

pub use error::{ErrorKind, YamlError, YamlResult};

use std::fmt::{Display, Formatter};

/// A single location in the source.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Mark {
    /// Offset in bytes from the start of the source.
    pub index: usize,
    /// Line of the mark. Zero indexed.
    pub line: usize,
    /// Column of the mark, counted in characters. Zero indexed.
    pub column: usize,
}

impl Mark {
    #[must_use]
    pub fn new(index: usize, line: usize, column: usize) -> Mark {
        Mark {
            index,
            line,
            column,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line + 1, self.column + 1)
    }
}

/// Source range covered by a token or an event.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Default, Hash)]
pub struct Position {
    pub start_mark: Mark,
    pub end_mark: Mark,
}

impl Position {
    #[must_use]
    pub fn new(start_mark: Mark, end_mark: Mark) -> Self {
        Position {
            start_mark,
            end_mark,
        }
    }

    /// Zero-width position, used by boundary events.
    #[must_use]
    pub fn empty(mark: Mark) -> Self {
        Position {
            start_mark: mark,
            end_mark: mark,
        }
    }
}

/// Character encoding of the stream, reported once on stream start.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub enum Encoding {
    /// Let the reader pick.
    #[default]
    Any,
    Utf8,
    Utf16le,
    Utf16be,
}

impl Encoding {
    /// Numeric code of the encoding, inverse of `Encoding::try_from(u8)`.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Encoding::Any => 0,
            Encoding::Utf8 => 1,
            Encoding::Utf16le => 2,
            Encoding::Utf16be => 3,
        }
    }
}

impl TryFrom<u8> for Encoding {
    type Error = YamlError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Encoding::Any),
            1 => Ok(Encoding::Utf8),
            2 => Ok(Encoding::Utf16le),
            3 => Ok(Encoding::Utf16be),
            _ => Err(YamlError::internal(
                u32::from(code),
                "unknown stream encoding code",
            )),
        }
    }
}

/// How a scalar was written in the source.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub enum ScalarStyle {
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl ScalarStyle {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            ScalarStyle::Any => 0,
            ScalarStyle::Plain => 1,
            ScalarStyle::SingleQuoted => 2,
            ScalarStyle::DoubleQuoted => 3,
            ScalarStyle::Literal => 4,
            ScalarStyle::Folded => 5,
        }
    }
}

impl TryFrom<u8> for ScalarStyle {
    type Error = YamlError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ScalarStyle::Any),
            1 => Ok(ScalarStyle::Plain),
            2 => Ok(ScalarStyle::SingleQuoted),
            3 => Ok(ScalarStyle::DoubleQuoted),
            4 => Ok(ScalarStyle::Literal),
            5 => Ok(ScalarStyle::Folded),
            _ => Err(YamlError::internal(
                u32::from(code),
                "unknown scalar style code",
            )),
        }
    }
}

impl From<ScalarType> for ScalarStyle {
    fn from(value: ScalarType) -> Self {
        match value {
            ScalarType::Plain => ScalarStyle::Plain,
            ScalarType::SingleQuote => ScalarStyle::SingleQuoted,
            ScalarType::DoubleQuote => ScalarStyle::DoubleQuoted,
            ScalarType::Literal => ScalarStyle::Literal,
            ScalarType::Folded => ScalarStyle::Folded,
        }
    }
}

/// Layout of a mapping or a sequence.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub enum CollectionStyle {
    /// Indentation driven block collection.
    #[default]
    Any,
    /// Bracketed collection like `[a, b]` or `{a: b}`.
    Flow,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ScalarType {
    /// Unquoted string type like:
    /// ```yaml
    ///   multiline
    ///   string
    /// ```
    Plain,
    /// Folded string type like:
    /// ```yaml
    ///   >
    ///     folded
    ///     string
    /// ```
    Folded,
    /// Literal string type like:
    /// ```yaml
    ///   |
    ///     literal
    ///     string
    /// ```
    Literal,
    /// Single quote string which permits any symbol inside
    /// E.g. :
    /// ```yaml
    /// ' This is a quoted string
    ///    with ''quoted'' string within.'
    /// ```
    SingleQuote,
    /// Double quote string with escape sequences
    /// E.g. :
    /// ```yaml
    /// "This is a quoted string
    ///    with \"double quoted\" string within."
    /// ```
    DoubleQuote,
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Plain => write!(f, ":"),
            ScalarType::Folded => write!(f, ">"),
            ScalarType::Literal => write!(f, "|"),
            ScalarType::SingleQuote => write!(f, "'"),
            ScalarType::DoubleQuote => write!(f, "\""),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChompIndicator {
    /// `-` final line break and any trailing empty lines are excluded from the scalar’s content
    Strip,
    ///  ` ` final line break character is preserved in the scalar’s content
    Clip,
    /// `+` final line break and any trailing empty lines are considered to be part of the scalar’s content
    Keep,
}

/// Supported `%YAML` versions.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Version {
    V1_0,
    V1_1,
}

impl Version {
    /// Decodes a `%YAML major.minor` pair found at `mark`.
    ///
    /// # Errors
    /// Returns [`YamlError::UnsupportedVersion`] for anything other than `1.0` and `1.1`.
    pub fn from_directive(major: u32, minor: u32, mark: Mark) -> YamlResult<Version> {
        match (major, minor) {
            (1, 0) => Ok(Version::V1_0),
            (1, 1) => Ok(Version::V1_1),
            _ => Err(YamlError::UnsupportedVersion { mark, major, minor }),
        }
    }

    #[must_use]
    pub fn major(self) -> u32 {
        1
    }

    #[must_use]
    pub fn minor(self) -> u32 {
        match self {
            Version::V1_0 => 0,
            Version::V1_1 => 1,
        }
    }
}

impl TryFrom<(u32, u32)> for Version {
    type Error = YamlError;

    fn try_from((major, minor): (u32, u32)) -> Result<Self, Self::Error> {
        Version::from_directive(major, minor, Mark::default())
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

/// One `%TAG handle prefix` declaration.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

impl TagDirective {
    #[must_use]
    pub fn new(handle: impl Into<String>, prefix: impl Into<String>) -> TagDirective {
        TagDirective {
            handle: handle.into(),
            prefix: prefix.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TokenType {
    StreamStart(Encoding),
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    Alias(String),
    Anchor(String),
    VersionDirective {
        major: u32,
        minor: u32,
    },
    TagDirective {
        handle: String,
        prefix: String,
    },
    /// Handle is empty for verbatim tags and for the lone `!`.
    Tag {
        handle: String,
        suffix: String,
    },
    Scalar {
        scalar_type: ScalarType,
        value: String,
    },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub span: Position,
    pub token_type: TokenType,
}

impl Token {
    #[must_use]
    pub fn new(span: Position, token_type: TokenType) -> Token {
        Token { span, token_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_pairs() {
        assert_eq!(Version::try_from((1, 0)), Ok(Version::V1_0));
        assert_eq!(Version::try_from((1, 1)), Ok(Version::V1_1));
        for pair in [(1, 2), (2, 0), (0, 9), (1, 10)] {
            let err = Version::try_from(pair).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
        }
    }

    #[test]
    fn version_keeps_directive_mark() {
        let mark = Mark::new(5, 0, 5);
        let err = Version::from_directive(2, 0, mark).unwrap_err();
        assert_eq!(
            err,
            YamlError::UnsupportedVersion {
                mark,
                major: 2,
                minor: 0
            }
        );
    }

    #[test]
    fn style_codes() {
        for code in 0..=5u8 {
            let style = ScalarStyle::try_from(code).unwrap();
            assert_eq!(style.code(), code);
        }
        let err = ScalarStyle::try_from(6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains('6'));
    }

    #[test]
    fn encoding_codes() {
        for code in 0..=3u8 {
            assert_eq!(Encoding::try_from(code).unwrap().code(), code);
        }
        assert_eq!(
            Encoding::try_from(42),
            Err(YamlError::Internal {
                code: 42,
                info: "unknown stream encoding code".to_string()
            })
        );
    }
}
