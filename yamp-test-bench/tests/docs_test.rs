use yamp_test_bench::assert_eq_event;
use yamp_test_bench::consts::*;

#[test]
fn doc_markers() {
    assert_eq_event(MULTI_DOC_INPUT, MULTI_DOC_EVENTS);
    assert_eq_event(EMPTY_DOC_INPUT, EMPTY_DOC_EVENTS);
    assert_eq_event(LITERAL_DOC_INPUT, LITERAL_DOC_EVENTS);
    assert_eq_event(BARE_AFTER_END_INPUT, BARE_AFTER_END_EVENTS);
}

#[test]
fn doc_comment_only() {
    assert_eq_event(COMMENT_ONLY_INPUT, "");
}

#[test]
fn doc_directives() {
    assert_eq_event(VERSION_DOC_INPUT, VERSION_DOC_EVENTS);
    assert_eq_event(TAG_DIRECTIVE_INPUT, TAG_DIRECTIVE_EVENTS);
}

#[test]
fn doc_err() {
    assert_eq_event(UNDEFINED_HANDLE_INPUT, UNDEFINED_HANDLE_EVENTS);
    assert_eq_event(DIRECTIVE_NO_END_INPUT, DIRECTIVE_NO_END_EVENTS);
    assert_eq_event(DOC_END_CONTENT_INPUT, DOC_END_CONTENT_EVENTS);
}
