#[inline]
#[must_use]
pub(crate) fn is_z(c: char) -> bool {
    c == '\0'
}

#[inline]
#[must_use]
pub(crate) fn is_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

#[inline]
#[must_use]
pub(crate) fn is_breakz(c: char) -> bool {
    is_break(c) || is_z(c)
}

#[inline]
#[must_use]
pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[inline]
#[must_use]
pub(crate) fn is_blank_or_break(c: char) -> bool {
    is_blank(c) || is_break(c)
}

#[inline]
#[must_use]
pub(crate) fn is_blank_or_breakz(c: char) -> bool {
    is_blank(c) || is_breakz(c)
}

/// Characters YAML allows in a stream. C0 controls other than tab and line breaks, DEL,
/// C1 controls other than NEL, surrogates and the non-characters `U+FFFE`/`U+FFFF` are not.
#[inline]
#[must_use]
pub(crate) fn is_printable(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\x20'..='\x7E'
        | '\u{85}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

#[inline]
#[must_use]
pub(crate) fn is_flow(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

#[inline]
#[must_use]
pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Directive names and `%YAML` numbers.
#[inline]
#[must_use]
pub(crate) fn is_alpha(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | 'A'..='Z' | '_' | '-')
}

/// Characters allowed in a named tag handle like `!e-x!`.
#[inline]
#[must_use]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

#[inline]
#[must_use]
pub(crate) fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
#[must_use]
pub(crate) fn as_hex(c: char) -> u32 {
    c.to_digit(16).unwrap_or(0)
}

pub(crate) fn is_anchor_char(c: char) -> bool {
    !is_blank_or_breakz(c) && !is_flow(c) && c != '\u{feff}'
}

/// Check whether the character is a valid URI character.
#[inline]
#[must_use]
pub(crate) fn is_uri_char(c: char) -> bool {
    is_word_char(c) || "#;/?:@&=+$,_.!~*'()[]%".contains(c)
}

/// Characters allowed in a tag suffix, which excludes `!` and flow indicators.
#[inline]
#[must_use]
pub(crate) fn is_tag_char(c: char) -> bool {
    is_uri_char(c) && !is_flow(c) && c != '!'
}
