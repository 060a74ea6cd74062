//! A streaming YAML 1.2 parser and presenter: a context-sensitive lexer, a
//! recursive-descent parser producing a position-tagged event stream, and a
//! presenter that renders an event stream back to text under a configurable
//! preset. See `README.md` for an overview of the three stages.
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::too_many_arguments,
    clippy::too_many_lines,
    clippy::match_wildcard_for_single_variants
)]

mod display;
mod error;
mod event;
mod lexer;
mod mark;
mod parser;
mod presenter;
mod source;
mod tag;
mod transform;

pub use crate::display::{display, display_event};
pub use crate::error::{
    LexerError, ParserError, PresenterError, PresenterJsonError, PresenterOutputError,
    SourceError, StreamError, Warning,
};
pub use crate::event::{CollectionStyle, Event, EventData, Properties, ScalarStyle};
pub use crate::lexer::{Lexer, Token, TokenData};
pub use crate::mark::Mark;
pub use crate::parser::{Parser, ParserOptions};
pub use crate::presenter::{
    present, present_io, present_to_string, Containers, DirectivesEnd, Newlines, OutputVersion,
    PresentationOptions, Quoting,
};
pub use crate::source::{ReadSource, Source, StrSource};
pub use crate::tag::{
    TagDirective, TagRegistry, BINARY_TAG, BOOL_TAG, FLOAT_TAG, INT_TAG, MAP_TAG, MERGE_TAG,
    NULL_TAG, OMAP_TAG, PAIRS_TAG, SEQ_TAG, SET_TAG, STR_TAG, TIMESTAMP_TAG, VALUE_TAG, YAML_TAG,
};
pub use crate::transform::{transform, transform_to_string};
