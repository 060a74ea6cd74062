//! Small character classification helpers shared by the scanning routines.

pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

pub(crate) fn is_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

pub(crate) fn is_blankz(ch: Option<char>) -> bool {
    matches!(ch, None) || ch.map(|c| is_blank(c) || is_break(c)).unwrap_or(false)
}

pub(crate) fn is_flow_indicator(ch: char) -> bool {
    matches!(ch, ',' | '[' | ']' | '{' | '}')
}
