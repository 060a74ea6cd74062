//! The canonical test-suite text representation of an [`Event`], as used by
//! the teacher's `run-parser-test-suite`/`run-emitter-test-suite` binaries:
//! `+STR`/`-STR`, `+DOC [---]`/`-DOC [...]`, `+MAP`/`+SEQ` (with `&anchor`
//! and `<tag>` attributes), `=VAL` (with a style prefix), `=ALI *target`.
//! One line per event, no trailing attributes when absent. See §6.

use std::fmt::Write as _;

use crate::event::{CollectionStyle, EventData, ScalarStyle};
use crate::Event;

/// Renders `event` as a single line of the canonical test-suite format (no
/// trailing newline).
pub fn display_event(event: &Event) -> String {
    let mut out = String::new();
    match &event.data {
        EventData::StreamStart => out.push_str("+STR"),
        EventData::StreamEnd => out.push_str("-STR"),
        EventData::DocumentStart {
            explicit_directives_end,
            ..
        } => {
            out.push_str("+DOC");
            if *explicit_directives_end {
                out.push_str(" ---");
            }
        }
        EventData::DocumentEnd {
            explicit_document_end,
        } => {
            out.push_str("-DOC");
            if *explicit_document_end {
                out.push_str(" ...");
            }
        }
        EventData::MapStart { style, properties } => {
            out.push_str("+MAP");
            if *style == CollectionStyle::Flow {
                out.push_str(" {}");
            }
            write_properties(&mut out, &properties.anchor, &properties.tag);
        }
        EventData::MapEnd => out.push_str("-MAP"),
        EventData::SeqStart { style, properties } => {
            out.push_str("+SEQ");
            if *style == CollectionStyle::Flow {
                out.push_str(" []");
            }
            write_properties(&mut out, &properties.anchor, &properties.tag);
        }
        EventData::SeqEnd => out.push_str("-SEQ"),
        EventData::Scalar { style, properties, content } => {
            out.push_str("=VAL");
            write_properties(&mut out, &properties.anchor, &properties.tag);
            out.push(' ');
            out.push_str(style_prefix(*style));
            print_escaped(&mut out, content);
        }
        EventData::Alias { target } => {
            let _ = write!(out, "=ALI *{target}");
        }
    }
    out
}

fn write_properties(out: &mut String, anchor: &Option<String>, tag: &Option<String>) {
    if let Some(anchor) = anchor {
        let _ = write!(out, " &{anchor}");
    }
    if let Some(tag) = tag {
        let _ = write!(out, " <{tag}>");
    }
}

fn style_prefix(style: ScalarStyle) -> &'static str {
    match style {
        ScalarStyle::Any | ScalarStyle::Plain => ":",
        ScalarStyle::SingleQuoted => "'",
        ScalarStyle::DoubleQuoted => "\"",
        ScalarStyle::Literal => "|",
        ScalarStyle::Folded => ">",
    }
}

fn print_escaped(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}

/// Renders a whole event stream, one [`display_event`] line per event.
pub fn display(events: impl IntoIterator<Item = Event>) -> String {
    let mut out = String::new();
    for event in events {
        out.push_str(&display_event(&event));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CollectionStyle, Properties};
    use crate::Mark;

    fn m() -> Mark {
        Mark::new(1, 1)
    }

    #[test]
    fn formats_scalar_with_anchor_and_tag() {
        let ev = Event::scalar(
            ScalarStyle::Plain,
            Properties {
                anchor: Some("a1".into()),
                tag: Some("tag:yaml.org,2002:str".into()),
            },
            "hi",
            m(),
            m(),
        );
        assert_eq!(display_event(&ev), "=VAL &a1 <tag:yaml.org,2002:str> :hi");
    }

    #[test]
    fn formats_alias() {
        let ev = Event::alias("a1", m(), m());
        assert_eq!(display_event(&ev), "=ALI *a1");
    }

    #[test]
    fn escapes_control_characters() {
        let ev = Event::scalar(ScalarStyle::DoubleQuoted, Properties::default(), "a\tb\nc", m(), m());
        assert_eq!(display_event(&ev), "=VAL \"a\\tb\\nc");
    }

    #[test]
    fn document_start_marks_explicit_directives_end() {
        let ev = Event::document_start(true, None, Vec::new(), m(), m());
        assert_eq!(display_event(&ev), "+DOC ---");
        let ev = Event::document_start(false, None, Vec::new(), m(), m());
        assert_eq!(display_event(&ev), "+DOC");
    }

    #[test]
    fn map_and_seq_flow_markers() {
        let ev = Event::map_start(CollectionStyle::Flow, Properties::default(), m(), m());
        assert_eq!(display_event(&ev), "+MAP {}");
        let ev = Event::seq_start(CollectionStyle::Flow, Properties::default(), m(), m());
        assert_eq!(display_event(&ev), "+SEQ []");
    }
}
