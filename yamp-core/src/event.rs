use std::fmt::{Display, Formatter, Write};

use crate::raw::{RawEvent, RawEventData};
use yamp_common::{
    CollectionStyle, Encoding, Mark, Position, ScalarStyle, TagDirective, Version, YamlError,
    YamlResult,
};

/// Structural event of a YAML stream, each carrying its source [`Position`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    StreamStart {
        pos: Position,
        encoding: Encoding,
    },
    DocumentStart {
        pos: Position,
        version: Option<Version>,
        tag_directives: Vec<TagDirective>,
        /// No `---` marker was present.
        implicit: bool,
    },
    DocumentEnd {
        pos: Position,
        /// No `...` marker was present.
        implicit: bool,
    },
    MappingStart {
        pos: Position,
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        /// Block mappings report [`CollectionStyle::Any`], `{...}` mappings report
        /// [`CollectionStyle::Flow`]. There is no separate block style.
        style: CollectionStyle,
    },
    MappingEnd {
        pos: Position,
    },
    SequenceStart {
        pos: Position,
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        /// Block sequences report [`CollectionStyle::Any`], `[...]` sequences report
        /// [`CollectionStyle::Flow`].
        style: CollectionStyle,
    },
    SequenceEnd {
        pos: Position,
    },
    Scalar {
        pos: Position,
        anchor: Option<String>,
        tag: Option<String>,
        value: String,
        plain_implicit: bool,
        quoted_implicit: bool,
        style: ScalarStyle,
    },
    Alias {
        pos: Position,
        anchor: String,
    },
    StreamEnd {
        pos: Position,
    },
    /// Decoded from an empty record, never handed out by [`Parser`](crate::Parser).
    Nothing {
        pos: Position,
    },
}

impl Event {
    #[must_use]
    pub fn pos(&self) -> Position {
        match self {
            Event::StreamStart { pos, .. }
            | Event::DocumentStart { pos, .. }
            | Event::DocumentEnd { pos, .. }
            | Event::MappingStart { pos, .. }
            | Event::MappingEnd { pos }
            | Event::SequenceStart { pos, .. }
            | Event::SequenceEnd { pos }
            | Event::Scalar { pos, .. }
            | Event::Alias { pos, .. }
            | Event::StreamEnd { pos }
            | Event::Nothing { pos } => *pos,
        }
    }

    #[must_use]
    pub fn start_mark(&self) -> Mark {
        self.pos().start_mark
    }

    /// Turns a raw record into an event, checking the invariants the record type can't
    /// express.
    ///
    /// # Errors
    /// - [`YamlError::InvalidEvent`] for an alias without anchor, an empty anchor or a tag
    ///   directive whose handle isn't delimited by `!`.
    /// - [`YamlError::UnsupportedVersion`] for a `%YAML` pair other than `1.0` and `1.1`.
    pub fn decode(raw: RawEvent) -> YamlResult<Event> {
        let pos = raw.pos;
        let mark = pos.start_mark;
        let event = match raw.data {
            RawEventData::Nothing => Event::Nothing { pos },
            RawEventData::StreamStart { encoding } => Event::StreamStart { pos, encoding },
            RawEventData::StreamEnd => Event::StreamEnd { pos },
            RawEventData::DocumentStart {
                version,
                tag_directives,
                implicit,
            } => {
                let version = match version {
                    Some((major, minor)) => Some(Version::from_directive(major, minor, mark)?),
                    None => None,
                };
                if let Some(bad) = tag_directives.iter().find(|td| !is_valid_handle(&td.handle)) {
                    return Err(YamlError::invalid_event(
                        mark,
                        format!("tag handle `{}` must start and end with '!'", bad.handle),
                    ));
                }
                Event::DocumentStart {
                    pos,
                    version,
                    tag_directives,
                    implicit,
                }
            }
            RawEventData::DocumentEnd { implicit } => Event::DocumentEnd { pos, implicit },
            RawEventData::Alias { anchor } => match anchor {
                Some(anchor) if !anchor.is_empty() => Event::Alias { pos, anchor },
                _ => {
                    return Err(YamlError::invalid_event(mark, "alias without an anchor"));
                }
            },
            RawEventData::Scalar {
                anchor,
                tag,
                value,
                plain_implicit,
                quoted_implicit,
                style,
            } => Event::Scalar {
                pos,
                anchor: node_anchor(anchor, mark)?,
                tag,
                value,
                plain_implicit,
                quoted_implicit,
                style: style.into(),
            },
            RawEventData::SequenceStart {
                anchor,
                tag,
                implicit,
                flow,
            } => Event::SequenceStart {
                pos,
                anchor: node_anchor(anchor, mark)?,
                tag,
                implicit,
                style: collection_style(flow),
            },
            RawEventData::SequenceEnd => Event::SequenceEnd { pos },
            RawEventData::MappingStart {
                anchor,
                tag,
                implicit,
                flow,
            } => Event::MappingStart {
                pos,
                anchor: node_anchor(anchor, mark)?,
                tag,
                implicit,
                style: collection_style(flow),
            },
            RawEventData::MappingEnd => Event::MappingEnd { pos },
        };
        Ok(event)
    }
}

fn is_valid_handle(handle: &str) -> bool {
    handle.starts_with('!') && handle.ends_with('!')
}

fn node_anchor(anchor: Option<String>, mark: Mark) -> YamlResult<Option<String>> {
    match anchor {
        Some(anchor) if anchor.is_empty() => {
            Err(YamlError::invalid_event(mark, "node anchor is empty"))
        }
        anchor => Ok(anchor),
    }
}

fn collection_style(flow: bool) -> CollectionStyle {
    if flow {
        CollectionStyle::Flow
    } else {
        CollectionStyle::Any
    }
}

fn write_props(
    f: &mut Formatter<'_>,
    anchor: Option<&String>,
    tag: Option<&String>,
) -> std::fmt::Result {
    if let Some(anchor) = anchor {
        write!(f, " &{anchor}")?;
    }
    if let Some(tag) = tag {
        write!(f, " <{tag}>")?;
    }
    Ok(())
}

fn style_indicator(style: ScalarStyle) -> char {
    match style {
        ScalarStyle::Any | ScalarStyle::Plain => ':',
        ScalarStyle::SingleQuoted => '\'',
        ScalarStyle::DoubleQuoted => '"',
        ScalarStyle::Literal => '|',
        ScalarStyle::Folded => '>',
    }
}

/// Writes `value` with `\`, line feed, carriage return, tab and backspace escaped.
fn write_escaped(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
    for c in value.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\x08' => f.write_str("\\b")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Renders events in the yaml-test-suite event notation.
impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::StreamStart { .. } => write!(f, "+STR"),
            Event::StreamEnd { .. } => write!(f, "-STR"),
            Event::DocumentStart { implicit, .. } => {
                write!(f, "+DOC")?;
                if !implicit {
                    write!(f, " ---")?;
                }
                Ok(())
            }
            Event::DocumentEnd { implicit, .. } => {
                write!(f, "-DOC")?;
                if !implicit {
                    write!(f, " ...")?;
                }
                Ok(())
            }
            Event::MappingStart {
                anchor, tag, style, ..
            } => {
                write!(f, "+MAP")?;
                if *style == CollectionStyle::Flow {
                    write!(f, " {{}}")?;
                }
                write_props(f, anchor.as_ref(), tag.as_ref())
            }
            Event::MappingEnd { .. } => write!(f, "-MAP"),
            Event::SequenceStart {
                anchor, tag, style, ..
            } => {
                write!(f, "+SEQ")?;
                if *style == CollectionStyle::Flow {
                    write!(f, " []")?;
                }
                write_props(f, anchor.as_ref(), tag.as_ref())
            }
            Event::SequenceEnd { .. } => write!(f, "-SEQ"),
            Event::Scalar {
                anchor,
                tag,
                value,
                style,
                ..
            } => {
                write!(f, "=VAL")?;
                write_props(f, anchor.as_ref(), tag.as_ref())?;
                write!(f, " {}", style_indicator(*style))?;
                write_escaped(f, value)
            }
            Event::Alias { anchor, .. } => write!(f, "=ALI *{anchor}"),
            Event::Nothing { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use crate::raw::{RawEvent, RawEventData};
    use yamp_common::{
        CollectionStyle, ErrorKind, Mark, Position, ScalarStyle, ScalarType, TagDirective,
        Version, YamlError,
    };

    fn at(index: usize) -> Position {
        Position::empty(Mark::new(index, 0, index))
    }

    fn document_start(version: Option<(u32, u32)>, tag_directives: Vec<TagDirective>) -> RawEvent {
        RawEvent::new(
            at(0),
            RawEventData::DocumentStart {
                version,
                tag_directives,
                implicit: false,
            },
        )
    }

    #[test]
    fn test_alias_anchor() {
        let ev = Event::decode(RawEvent::new(
            at(3),
            RawEventData::Alias {
                anchor: Some("ä&b".to_string()),
            },
        ))
        .unwrap();
        assert_eq!(
            ev,
            Event::Alias {
                pos: at(3),
                anchor: "ä&b".to_string()
            }
        );

        for anchor in [None, Some(String::new())] {
            let err = Event::decode(RawEvent::new(at(3), RawEventData::Alias { anchor }))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidEvent);
            assert_eq!(err.mark(), Some(Mark::new(3, 0, 3)));
        }
    }

    #[test]
    fn test_empty_node_anchor() {
        let err = Event::decode(RawEvent::new(
            at(0),
            RawEventData::SequenceStart {
                anchor: Some(String::new()),
                tag: None,
                implicit: true,
                flow: false,
            },
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEvent);
    }

    #[test]
    fn test_document_versions() {
        let ev = Event::decode(document_start(Some((1, 1)), Vec::new())).unwrap();
        let Event::DocumentStart { version, tag_directives, .. } = ev else {
            panic!("expected a document start");
        };
        assert_eq!(version, Some(Version::V1_1));
        assert!(tag_directives.is_empty());

        let err = Event::decode(document_start(Some((1, 2)), Vec::new())).unwrap_err();
        assert_eq!(
            err,
            YamlError::UnsupportedVersion {
                mark: Mark::new(0, 0, 0),
                major: 1,
                minor: 2
            }
        );
    }

    #[test]
    fn test_tag_directive_handles() {
        let directives = vec![
            TagDirective::new("!", "!foo-"),
            TagDirective::new("!e!", "tag:e.com,2000:"),
        ];
        let ev = Event::decode(document_start(None, directives.clone())).unwrap();
        assert!(matches!(ev, Event::DocumentStart { ref tag_directives, .. } if *tag_directives == directives));

        let err = Event::decode(document_start(None, vec![TagDirective::new("e!", "x")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEvent);
    }

    #[test]
    fn test_nothing_decodes() {
        let ev = Event::decode(RawEvent::new(at(7), RawEventData::Nothing)).unwrap();
        assert_eq!(ev, Event::Nothing { pos: at(7) });
    }

    #[test]
    fn test_display() {
        let scalar = Event::Scalar {
            pos: at(0),
            anchor: Some("a".to_string()),
            tag: Some("tag:yaml.org,2002:str".to_string()),
            value: "x\ty\n".to_string(),
            plain_implicit: false,
            quoted_implicit: false,
            style: ScalarType::DoubleQuote.into(),
        };
        assert_eq!(
            scalar.to_string(),
            r#"=VAL &a <tag:yaml.org,2002:str> "x\ty\n"#
        );

        let map = Event::MappingStart {
            pos: at(0),
            anchor: None,
            tag: None,
            implicit: true,
            style: CollectionStyle::Flow,
        };
        assert_eq!(map.to_string(), "+MAP {}");

        let plain = Event::Scalar {
            pos: at(0),
            anchor: None,
            tag: None,
            value: String::new(),
            plain_implicit: true,
            quoted_implicit: false,
            style: ScalarStyle::Plain,
        };
        assert_eq!(plain.to_string(), "=VAL :");
    }
}
