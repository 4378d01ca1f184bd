pub use event::Event;
pub use grammar::Grammar;
pub use parser::{EventReceiver, Parser, Status};
pub use raw::{EventSource, RawEvent, RawEventData};

pub use yamp_common::{
    CollectionStyle, Encoding, ErrorKind, Mark, Position, ScalarStyle, TagDirective, Version,
    YamlError, YamlResult,
};

mod event;
mod grammar;
mod parser;
mod raw;
pub mod scanner;

const fn parse_number(text: &str) -> u32 {
    let bytes = text.as_bytes();
    let mut value = 0;
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value * 10 + (bytes[i] - b'0') as u32;
        i += 1;
    }
    value
}

const VERSION: (u32, u32, u32) = (
    parse_number(env!("CARGO_PKG_VERSION_MAJOR")),
    parse_number(env!("CARGO_PKG_VERSION_MINOR")),
    parse_number(env!("CARGO_PKG_VERSION_PATCH")),
);

/// Library version as `(major, minor, patch)`.
#[must_use]
pub fn version() -> (u32, u32, u32) {
    VERSION
}

#[must_use]
pub fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_matches_string() {
        let (major, minor, patch) = super::version();
        assert_eq!(
            super::version_string(),
            format!("{major}.{minor}.{patch}")
        );
    }
}
