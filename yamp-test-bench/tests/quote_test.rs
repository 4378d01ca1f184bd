use yamp_test_bench::assert_eq_event;
use yamp_test_bench::consts::*;

#[test]
fn quote_single() {
    assert_eq_event(SINGLE_QUOTE_INPUT, SINGLE_QUOTE_EVENTS);
}

#[test]
fn quote_double_escapes() {
    assert_eq_event(DOUBLE_ESCAPE_INPUT, DOUBLE_ESCAPE_EVENTS);
    assert_eq_event(DOUBLE_ESCAPED_BREAK_INPUT, DOUBLE_ESCAPED_BREAK_EVENTS);
}

#[test]
fn quote_multiline() {
    assert_eq_event(DOUBLE_MULTILINE_INPUT, DOUBLE_MULTILINE_EVENTS);
}

#[test]
fn quote_err() {
    assert_eq_event(UNTERMINATED_QUOTE_INPUT, UNTERMINATED_QUOTE_EVENTS);
    assert_eq_event(UNKNOWN_ESCAPE_INPUT, UNKNOWN_ESCAPE_EVENTS);
}
