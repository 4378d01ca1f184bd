use yamp_test_bench::assert_eq_event;
use yamp_test_bench::consts::*;

#[test]
fn flow_seq() {
    assert_eq_event(SEQ_FLOW_INPUT, SEQ_FLOW_EVENTS);
    assert_eq_event(SEQ_FLOW2_INPUT, SEQ_FLOW_EVENTS);
}

#[test]
fn flow_map() {
    assert_eq_event(MAP_FLOW_INPUT, MAP_FLOW_EVENTS);
    assert_eq_event(FLOW_JSON_INPUT, FLOW_JSON_EVENTS);
}

#[test]
fn flow_implicit_map_in_seq() {
    assert_eq_event(FLOW_PAIR_INPUT, FLOW_PAIR_EVENTS);
}

#[test]
fn flow_empty_nodes() {
    assert_eq_event(EMPTY_FLOW_INPUT, EMPTY_FLOW_EVENTS);
    assert_eq_event(FLOW_EMPTY_NODES_INPUT, FLOW_EMPTY_NODES_EVENTS);
}

#[test]
fn flow_err() {
    assert_eq_event(FLOW_UNCLOSED_INPUT, FLOW_UNCLOSED_EVENTS);
    assert_eq_event(FLOW_BLOCK_ENTRY_INPUT, FLOW_BLOCK_ENTRY_EVENTS);
}
