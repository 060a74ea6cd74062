use crate::event::ScalarStyle;
use crate::Mark;

/// The token alphabet produced by the [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TokenData {
    StreamEnd,
    DocumentEnd,
    DirectivesEnd,
    /// Emitted once at the start of each block-context line; `column` is
    /// the count of leading spaces.
    Indentation { column: u64 },
    YamlDirective { major: i32, minor: i32 },
    TagDirective { handle: String, prefix: String },
    UnknownDirective { name: String },
    DirectiveParam { value: String },
    TagHandle { handle: String },
    Suffix { suffix: String },
    VerbatimTag { uri: String },
    Anchor { name: String },
    Alias { name: String },
    Plain { value: String },
    SingleQuoted { value: String },
    DoubleQuoted { value: String },
    Literal { value: String },
    Folded { value: String },
    SeqItemIndicator,
    MapKeyIndicator,
    MapValueIndicator,
    FlowMapStart,
    FlowMapEnd,
    FlowSeqStart,
    FlowSeqEnd,
    FlowSeqSep,
}

impl TokenData {
    pub(crate) fn scalar_style(&self) -> Option<ScalarStyle> {
        match self {
            TokenData::Plain { .. } => Some(ScalarStyle::Plain),
            TokenData::SingleQuoted { .. } => Some(ScalarStyle::SingleQuoted),
            TokenData::DoubleQuoted { .. } => Some(ScalarStyle::DoubleQuoted),
            TokenData::Literal { .. } => Some(ScalarStyle::Literal),
            TokenData::Folded { .. } => Some(ScalarStyle::Folded),
            _ => None,
        }
    }

    pub(crate) fn scalar_value(&self) -> Option<&str> {
        match self {
            TokenData::Plain { value }
            | TokenData::SingleQuoted { value }
            | TokenData::DoubleQuoted { value }
            | TokenData::Literal { value }
            | TokenData::Folded { value } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub data: TokenData,
    pub start_mark: Mark,
    pub end_mark: Mark,
    /// Whether a scalar token spanned more than one line. Multi-line
    /// implicit keys are a parser error (§4.4).
    pub multiline: bool,
}

impl Token {
    pub(crate) fn new(data: TokenData, start_mark: Mark, end_mark: Mark, multiline: bool) -> Self {
        Self {
            data,
            start_mark,
            end_mark,
            multiline,
        }
    }
}
