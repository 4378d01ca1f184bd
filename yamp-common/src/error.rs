use crate::Mark;
use std::fmt::{Display, Formatter};

/// A specialized `Result` type where the error is hard-wired to [`YamlError`].
///
/// [`YamlError`]: enum.YamlError.html
pub type YamlResult<T> = Result<T, YamlError>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum YamlError {
    /// Parser buffers could not be allocated.
    Resource(String),
    /// Input could not be read or decoded.
    Reader { mark: Mark, info: String },
    /// Malformed lexical input.
    Scan { mark: Mark, info: String },
    /// Well-formed tokens in an invalid order.
    Parse { mark: Mark, info: String },
    /// Reported by an event receiver, forwarded unchanged.
    Compose { mark: Mark, info: String },
    /// A raw event record breaks the event invariants.
    InvalidEvent { mark: Mark, info: String },
    /// The event source and the decoder disagree on a closed set of codes.
    Internal { code: u32, info: String },
    UnsupportedVersion { mark: Mark, major: u32, minor: u32 },
    /// Events were requested before any input was bound.
    Unbound,
    /// Input was bound to a parser that already had one.
    AlreadyBound,
    /// Events were requested after the stream end was delivered.
    StreamEnded,
}

/// Coarse classification of [`YamlError`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Resource,
    Reader,
    Scan,
    Parse,
    Compose,
    InvalidEvent,
    Internal,
    UnsupportedVersion,
    Usage,
}

impl YamlError {
    pub fn new_str(mark: Mark, info: &str) -> Self {
        YamlError::Scan {
            mark,
            info: info.to_string(),
        }
    }

    pub fn reader(mark: Mark, info: impl Into<String>) -> Self {
        YamlError::Reader {
            mark,
            info: info.into(),
        }
    }

    pub fn parse(mark: Mark, info: impl Into<String>) -> Self {
        YamlError::Parse {
            mark,
            info: info.into(),
        }
    }

    /// Builds the error an event receiver returns when it rejects an event.
    pub fn compose(mark: Mark, info: impl Into<String>) -> Self {
        YamlError::Compose {
            mark,
            info: info.into(),
        }
    }

    pub fn invalid_event(mark: Mark, info: impl Into<String>) -> Self {
        YamlError::InvalidEvent {
            mark,
            info: info.into(),
        }
    }

    pub fn internal(code: u32, info: impl Into<String>) -> Self {
        YamlError::Internal {
            code,
            info: info.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            YamlError::Resource(_) => ErrorKind::Resource,
            YamlError::Reader { .. } => ErrorKind::Reader,
            YamlError::Scan { .. } => ErrorKind::Scan,
            YamlError::Parse { .. } => ErrorKind::Parse,
            YamlError::Compose { .. } => ErrorKind::Compose,
            YamlError::InvalidEvent { .. } => ErrorKind::InvalidEvent,
            YamlError::Internal { .. } => ErrorKind::Internal,
            YamlError::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            YamlError::Unbound | YamlError::AlreadyBound | YamlError::StreamEnded => {
                ErrorKind::Usage
            }
        }
    }

    /// Source location of the error, when it has one.
    #[must_use]
    pub fn mark(&self) -> Option<Mark> {
        match self {
            YamlError::Reader { mark, .. }
            | YamlError::Scan { mark, .. }
            | YamlError::Parse { mark, .. }
            | YamlError::Compose { mark, .. }
            | YamlError::InvalidEvent { mark, .. }
            | YamlError::UnsupportedVersion { mark, .. } => Some(*mark),
            _ => None,
        }
    }
}

impl Display for YamlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YamlError::Resource(info) => write!(f, "cannot allocate parser: {info}"),
            YamlError::Reader { mark, info } => write!(f, "reader error: {info} at {mark}"),
            YamlError::Scan { mark, info } => write!(f, "scanner error: {info} at {mark}"),
            YamlError::Parse { mark, info } => write!(f, "parser error: {info} at {mark}"),
            YamlError::Compose { mark, info } => write!(f, "composer error: {info} at {mark}"),
            YamlError::InvalidEvent { mark, info } => write!(f, "invalid event: {info} at {mark}"),
            YamlError::Internal { code, info } => write!(f, "internal error: {info} (code {code})"),
            YamlError::UnsupportedVersion { mark, major, minor } => {
                write!(f, "unsupported YAML version {major}.{minor} at {mark}")
            }
            YamlError::Unbound => write!(f, "parser has no input bound"),
            YamlError::AlreadyBound => write!(f, "parser is already bound to an input"),
            YamlError::StreamEnded => write!(f, "stream end was already reported"),
        }
    }
}

impl std::error::Error for YamlError {}

impl From<std::collections::TryReserveError> for YamlError {
    #[inline]
    fn from(error: std::collections::TryReserveError) -> YamlError {
        YamlError::Resource(error.to_string())
    }
}
