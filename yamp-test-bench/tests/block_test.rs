use yamp_test_bench::assert_eq_event;
use yamp_test_bench::consts::*;

#[test]
fn block_seq() {
    assert_eq_event(BLOCK1_INPUT, BLOCK_EVENTS);
    assert_eq_event(BLOCK2_INPUT, BLOCK_EVENTS);
    assert_eq_event(NESTED_SEQ_INPUT, NESTED_SEQ_EVENTS);
}

#[test]
fn block_seq_plain_continuation() {
    assert_eq_event(SEQ_PLAIN_INPUT, SEQ_PLAIN_EVENTS);
    assert_eq_event(SEQ_PLAIN2_INPUT, SEQ_PLAIN_EVENTS);
}

#[test]
fn block_seq_tagged() {
    assert_eq_event(X1_33X3_INPUT, X1_33X3_EVENTS);
}

#[test]
fn block_seq_err() {
    assert_eq_event(BLOCK_ERR_INPUT, BLOCK_ERR_EVENTS);
    assert_eq_event(WRONG_SEQ_INDENT_INPUT, WRONG_SEQ_INDENT_EVENTS);
    assert_eq_event(SEQ_NO_MINUS_INPUT, SEQ_NO_MINUS_EVENTS);
}

#[test]
fn block_map() {
    assert_eq_event(MAP_SIMPLE_INPUT, MAP_SIMPLE_EVENTS);
    assert_eq_event(MAP_NESTED_INPUT, MAP_NESTED_EVENTS);
    assert_eq_event(MAP_INDENTLESS_SEQ_INPUT, MAP_INDENTLESS_SEQ_EVENTS);
}

#[test]
fn block_map_complex_and_empty() {
    assert_eq_event(COMPLEX_KEY_INPUT, COMPLEX_KEY_EVENTS);
    assert_eq_event(EMPTY_VALUES_INPUT, EMPTY_VALUES_EVENTS);
}

#[test]
fn block_anchors() {
    assert_eq_event(ANCHOR_ALIAS_INPUT, ANCHOR_ALIAS_EVENTS);
    assert_eq_event(ANCHOR_COLLECTION_INPUT, ANCHOR_COLLECTION_EVENTS);
}

#[test]
fn block_map_err() {
    assert_eq_event(MAP_VALUE_ERR_INPUT, MAP_VALUE_ERR_EVENTS);
    assert_eq_event(TAB_INDENT_ERR_INPUT, TAB_INDENT_ERR_EVENTS);
}

#[test]
fn block_scalars() {
    assert_eq_event(LITERAL_INPUT, LITERAL_EVENTS);
    assert_eq_event(KEEP_INPUT, KEEP_EVENTS);
    assert_eq_event(BLOCK_INDICATOR_ERR_INPUT, BLOCK_INDICATOR_ERR_EVENTS);
}
