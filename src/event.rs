use crate::tag::TagDirective;
use crate::Mark;

/// The scalar quoting/block style a node was (or should be) written with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ScalarStyle {
    /// Let the presenter pick a style.
    #[default]
    Any,
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// The layout a mapping or sequence was (or should be) written with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CollectionStyle {
    #[default]
    Block,
    Flow,
    /// A synthetic single-pair mapping produced by flow-sequence `key: value`
    /// sugar (`[a: 1, b: 2]` desugars each pair into its own one-entry map).
    Pair,
}

/// The `(anchor, tag)` attached to a node. "Empty" when both are absent,
/// which is the default for every node that doesn't explicitly declare
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct Properties {
    pub anchor: Option<String>,
    pub tag: Option<String>,
}

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.tag.is_none()
    }
}

/// One event in the parser↔presenter stream.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub struct Event {
    pub data: EventData,
    pub start_mark: Mark,
    pub end_mark: Mark,
}

#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum EventData {
    StreamStart,
    StreamEnd,
    DocumentStart {
        explicit_directives_end: bool,
        version: Option<(i32, i32)>,
        handles: Vec<TagDirective>,
    },
    DocumentEnd {
        explicit_document_end: bool,
    },
    MapStart {
        style: CollectionStyle,
        properties: Properties,
    },
    MapEnd,
    SeqStart {
        style: CollectionStyle,
        properties: Properties,
    },
    SeqEnd,
    Scalar {
        style: ScalarStyle,
        properties: Properties,
        content: String,
    },
    Alias {
        target: String,
    },
}

impl Event {
    pub(crate) fn new(data: EventData, start_mark: Mark, end_mark: Mark) -> Self {
        Self {
            data,
            start_mark,
            end_mark,
        }
    }

    pub fn stream_start(start: Mark, end: Mark) -> Self {
        Self::new(EventData::StreamStart, start, end)
    }

    pub fn stream_end(start: Mark, end: Mark) -> Self {
        Self::new(EventData::StreamEnd, start, end)
    }

    pub fn document_start(
        explicit_directives_end: bool,
        version: Option<(i32, i32)>,
        handles: Vec<TagDirective>,
        start: Mark,
        end: Mark,
    ) -> Self {
        Self::new(
            EventData::DocumentStart {
                explicit_directives_end,
                version,
                handles,
            },
            start,
            end,
        )
    }

    pub fn document_end(explicit_document_end: bool, start: Mark, end: Mark) -> Self {
        Self::new(
            EventData::DocumentEnd {
                explicit_document_end,
            },
            start,
            end,
        )
    }

    pub fn map_start(style: CollectionStyle, properties: Properties, start: Mark, end: Mark) -> Self {
        Self::new(EventData::MapStart { style, properties }, start, end)
    }

    pub fn map_end(start: Mark, end: Mark) -> Self {
        Self::new(EventData::MapEnd, start, end)
    }

    pub fn seq_start(style: CollectionStyle, properties: Properties, start: Mark, end: Mark) -> Self {
        Self::new(EventData::SeqStart { style, properties }, start, end)
    }

    pub fn seq_end(start: Mark, end: Mark) -> Self {
        Self::new(EventData::SeqEnd, start, end)
    }

    pub fn scalar(
        style: ScalarStyle,
        properties: Properties,
        content: impl Into<String>,
        start: Mark,
        end: Mark,
    ) -> Self {
        Self::new(
            EventData::Scalar {
                style,
                properties,
                content: content.into(),
            },
            start,
            end,
        )
    }

    pub fn alias(target: impl Into<String>, start: Mark, end: Mark) -> Self {
        Self::new(
            EventData::Alias {
                target: target.into(),
            },
            start,
            end,
        )
    }

    /// Equality that ignores positions, as required by §3 "testable".
    pub fn semantically_eq(&self, other: &Event) -> bool {
        self.data == other.data
    }
}
