pub const BLOCK1_INPUT: &str = r"
    - x
    - y
";
pub const BLOCK2_INPUT: &str = r"
- x
- y
";
pub const BLOCK_EVENTS: &str = r"
+DOC
+SEQ
=VAL :x
=VAL :y
-SEQ
-DOC";
pub const SEQ_PLAIN_INPUT: &str = r"
  - x
   - y
";
pub const SEQ_PLAIN2_INPUT: &str = r"
- x - y
";
pub const SEQ_PLAIN_EVENTS: &str = r"
+DOC
+SEQ
=VAL :x - y
-SEQ
-DOC";
pub const X1_33X3_INPUT: &str = r"
- !!int 1
- !!int -2
";
pub const X1_33X3_EVENTS: &str = r"
+DOC
+SEQ
=VAL <tag:yaml.org,2002:int> :1
=VAL <tag:yaml.org,2002:int> :-2
-SEQ
-DOC";
pub const NESTED_SEQ_INPUT: &str = r"
- - a
  - b
- c
";
pub const NESTED_SEQ_EVENTS: &str = r"
+DOC
+SEQ
+SEQ
=VAL :a
=VAL :b
-SEQ
=VAL :c
-SEQ
-DOC";
pub const BLOCK_ERR_INPUT: &str = r"
  - x
 - y
";
pub const BLOCK_ERR_EVENTS: &str = r"
+DOC
+SEQ
=VAL :x
-SEQ
-DOC
ERR";
pub const WRONG_SEQ_INDENT_INPUT: &str = r"
a:
  - b
 - c
";
pub const WRONG_SEQ_INDENT_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
+SEQ
=VAL :b
-SEQ
ERR";
pub const SEQ_NO_MINUS_INPUT: &str = r"
map:
 - a
 c
";
pub const SEQ_NO_MINUS_EVENTS: &str = r"
+DOC
+MAP
=VAL :map
+SEQ
=VAL :a
ERR";

pub const MAP_SIMPLE_INPUT: &str = r"
a: b
c: d
";
pub const MAP_SIMPLE_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :b
=VAL :c
=VAL :d
-MAP
-DOC";
pub const MAP_NESTED_INPUT: &str = r"
a:
  b: c
d: e
";
pub const MAP_NESTED_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
+MAP
=VAL :b
=VAL :c
-MAP
=VAL :d
=VAL :e
-MAP
-DOC";
pub const MAP_INDENTLESS_SEQ_INPUT: &str = r"
a:
- 1
- 2
b: c
";
pub const MAP_INDENTLESS_SEQ_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
+SEQ
=VAL :1
=VAL :2
-SEQ
=VAL :b
=VAL :c
-MAP
-DOC";
pub const COMPLEX_KEY_INPUT: &str = r"
? a
: b
";
pub const COMPLEX_KEY_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :b
-MAP
-DOC";
pub const EMPTY_VALUES_INPUT: &str = r"
a:
b:
";
pub const EMPTY_VALUES_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :
=VAL :b
=VAL :
-MAP
-DOC";
pub const ANCHOR_ALIAS_INPUT: &str = r"
a: &x 1
b: *x
";
pub const ANCHOR_ALIAS_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL &x :1
=VAL :b
=ALI *x
-MAP
-DOC";
pub const ANCHOR_COLLECTION_INPUT: &str = r"
&seq
- a
";
pub const ANCHOR_COLLECTION_EVENTS: &str = r"
+DOC
+SEQ &seq
=VAL :a
-SEQ
-DOC";
pub const MAP_VALUE_ERR_INPUT: &str = r"
a: b: c
";
pub const MAP_VALUE_ERR_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :b
ERR";
pub const TAB_INDENT_ERR_INPUT: &str = "a:\n\tb: c\n";
pub const TAB_INDENT_ERR_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
ERR";

pub const LITERAL_INPUT: &str = r"
a: |
  line1
  line2
b: >-
  folded
  text

";
pub const LITERAL_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL |line1\nline2\n
=VAL :b
=VAL >folded text
-MAP
-DOC";
pub const KEEP_INPUT: &str = r"
- |+
  a

- >2
   b
  c
";
pub const KEEP_EVENTS: &str = r"
+DOC
+SEQ
=VAL |a\n\n
=VAL > b\nc\n
-SEQ
-DOC";
pub const BLOCK_INDICATOR_ERR_INPUT: &str = r"
- |0
  a
";
pub const BLOCK_INDICATOR_ERR_EVENTS: &str = r"
+DOC
+SEQ
ERR";

pub const SEQ_FLOW_INPUT: &str = r"[a, b]";
pub const SEQ_FLOW2_INPUT: &str = r"
[a,
 b]
";
pub const SEQ_FLOW_EVENTS: &str = r"
+DOC
+SEQ []
=VAL :a
=VAL :b
-SEQ
-DOC";
pub const MAP_FLOW_INPUT: &str = r"{a: 1, b: [x, y]}";
pub const MAP_FLOW_EVENTS: &str = r"
+DOC
+MAP {}
=VAL :a
=VAL :1
=VAL :b
+SEQ []
=VAL :x
=VAL :y
-SEQ
-MAP
-DOC";
pub const FLOW_PAIR_INPUT: &str = r"[a: b, c]";
pub const FLOW_PAIR_EVENTS: &str = r"
+DOC
+SEQ []
+MAP {}
=VAL :a
=VAL :b
-MAP
=VAL :c
-SEQ
-DOC";
pub const FLOW_JSON_INPUT: &str = r#"{"a":1}"#;
pub const FLOW_JSON_EVENTS: &str = r#"
+DOC
+MAP {}
=VAL "a
=VAL :1
-MAP
-DOC"#;
pub const EMPTY_FLOW_INPUT: &str = r"
- {}
- []
";
pub const EMPTY_FLOW_EVENTS: &str = r"
+DOC
+SEQ
+MAP {}
-MAP
+SEQ []
-SEQ
-SEQ
-DOC";
pub const FLOW_EMPTY_NODES_INPUT: &str = r"{a, b: }";
pub const FLOW_EMPTY_NODES_EVENTS: &str = r"
+DOC
+MAP {}
=VAL :a
=VAL :
=VAL :b
=VAL :
-MAP
-DOC";
pub const FLOW_UNCLOSED_INPUT: &str = r"[a, b";
pub const FLOW_UNCLOSED_EVENTS: &str = r"
+DOC
+SEQ []
=VAL :a
=VAL :b
ERR";
pub const FLOW_BLOCK_ENTRY_INPUT: &str = r"[- a]";
pub const FLOW_BLOCK_ENTRY_EVENTS: &str = r"
ERR";

pub const SINGLE_QUOTE_INPUT: &str = r"'it''s'";
pub const SINGLE_QUOTE_EVENTS: &str = r"
+DOC
=VAL 'it's
-DOC";
pub const DOUBLE_ESCAPE_INPUT: &str = r#""a\tb\u00e9\x41""#;
pub const DOUBLE_ESCAPE_EVENTS: &str = r#"
+DOC
=VAL "a\tbéA
-DOC"#;
pub const DOUBLE_MULTILINE_INPUT: &str = r#""one
  two

  three""#;
pub const DOUBLE_MULTILINE_EVENTS: &str = r#"
+DOC
=VAL "one two\nthree
-DOC"#;
pub const DOUBLE_ESCAPED_BREAK_INPUT: &str = "\"a\\\n  b\"";
pub const DOUBLE_ESCAPED_BREAK_EVENTS: &str = r#"
+DOC
=VAL "ab
-DOC"#;
pub const UNTERMINATED_QUOTE_INPUT: &str = r#""abc"#;
pub const UNTERMINATED_QUOTE_EVENTS: &str = r"
ERR";
pub const UNKNOWN_ESCAPE_INPUT: &str = r#""\q""#;
pub const UNKNOWN_ESCAPE_EVENTS: &str = r"
ERR";

pub const MULTI_DOC_INPUT: &str = r"--- a
--- b
";
pub const MULTI_DOC_EVENTS: &str = r"
+DOC ---
=VAL :a
-DOC
+DOC ---
=VAL :b
-DOC";
pub const VERSION_DOC_INPUT: &str = r"%YAML 1.1
---
a
...
";
pub const VERSION_DOC_EVENTS: &str = r"
+DOC ---
=VAL :a
-DOC ...";
pub const LITERAL_DOC_INPUT: &str = r"--- |
  foo
...
";
pub const LITERAL_DOC_EVENTS: &str = r"
+DOC ---
=VAL |foo\n
-DOC ...";
pub const EMPTY_DOC_INPUT: &str = r"---
...
";
pub const EMPTY_DOC_EVENTS: &str = r"
+DOC ---
=VAL :
-DOC ...";
pub const COMMENT_ONLY_INPUT: &str = r"# nothing here
";
pub const BARE_AFTER_END_INPUT: &str = r"a
...
b
";
pub const BARE_AFTER_END_EVENTS: &str = r"
+DOC
=VAL :a
-DOC ...
+DOC
=VAL :b
-DOC";
pub const TAG_DIRECTIVE_INPUT: &str = r"%TAG !e! tag:e.com,2000:
--- !e!x a
";
pub const TAG_DIRECTIVE_EVENTS: &str = r"
+DOC ---
=VAL <tag:e.com,2000:x> :a
-DOC";
pub const UNDEFINED_HANDLE_INPUT: &str = r"--- !x!y a";
pub const UNDEFINED_HANDLE_EVENTS: &str = r"
+DOC ---
ERR";
pub const DIRECTIVE_NO_END_INPUT: &str = r"a: 1
%YAML 1.1
--- b
";
pub const DIRECTIVE_NO_END_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :1
-MAP
-DOC
ERR";
pub const DOC_END_CONTENT_INPUT: &str = r"a
... b
";
pub const DOC_END_CONTENT_EVENTS: &str = r"
ERR";
