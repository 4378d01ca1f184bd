pub mod consts;

use std::fmt::Write;
use yamp_core::{Event, Parser};

///
/// Assert that in for given input, the parser generates expected set of events
///
/// # Panics
///
///    Function panics if there is a difference between expected events string and one generated
///    from the input.
pub fn assert_eq_event(input: &str, events: &str) {
    let mut line = String::new();
    let mut parser = Parser::from_str(input);

    write_str_from_event(&mut line, &mut parser, false);
    assert_eq!(line, events, "Error in case: {input}");
}

/// Renders every event of `parser` on its own line, prefixed with a line break.
///
/// A failure is rendered as `ERR`, followed by the error message when `emit_stream_token` is
/// set.
pub fn write_str_from_event(line: &mut String, parser: &mut Parser, emit_stream_token: bool) {
    for res in parser {
        let _ = match res {
            Ok(Event::StreamStart { .. } | Event::StreamEnd { .. }) if !emit_stream_token => Ok(()),
            Ok(ev) => write!(line, "\n{ev}"),
            Err(err) if emit_stream_token => write!(line, "\nERR {err}"),
            Err(_) => write!(line, "\nERR"),
        };
    }
}

/// Events of `input` in the yaml-test-suite `test.event` layout, one per line, together
/// with whether parsing stopped on an error.
#[must_use]
pub fn event_string(input: &str) -> (String, bool) {
    let mut out = String::with_capacity(input.len() * 2);
    let mut is_error = false;
    for res in Parser::from_str(input) {
        match res {
            Ok(ev) => {
                let _ = writeln!(out, "{ev}");
            }
            Err(_) => is_error = true,
        }
    }
    (out, is_error)
}
