//! Turns a token stream into [`Event`]s: resolves indentation into block
//! structure, accumulates node properties, desugars flow-sequence
//! `key: value` sugar into one-entry maps, and frames each document with its
//! directives.
//!
//! The grammar in §4.4 names one state per grammatical position (~33 of
//! them). This implementation collapses that into recursive-descent over a
//! single `indent` parameter — each block construct's own indentation is the
//! source column of its first key/item token, not a separately tracked
//! state tag — which is equivalent in behavior and considerably shorter to
//! read; see `DESIGN.md`.

use std::collections::VecDeque;

use crate::error::{ParserError, Warning};
use crate::event::{CollectionStyle, Event, Properties, ScalarStyle};
use crate::lexer::{Lexer, Token, TokenData};
use crate::source::Source;
use crate::tag::{self, TagRegistry};
use crate::Mark;

/// Knobs that change how the parser resolves ambiguity the grammar itself
/// leaves open. See §4.7.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ParserOptions {
    /// When set, plain scalars that carry no explicit tag are annotated
    /// with a guessed `tag:yaml.org,2002:{str,int,float,bool,null}` tag
    /// instead of being left untagged. Quoted and block scalars are never
    /// guessed at, since their style already disambiguates them from the
    /// core schema's implicit typing.
    pub resolve_core_tags: bool,
}

enum FirstKey {
    /// The `?` indicator has already been consumed.
    Explicit,
    /// A scalar has already been consumed and is awaiting its own `:`.
    ImplicitScalar(Token),
    /// The key position was empty; the `:` has not been consumed yet.
    Empty,
}

#[derive(PartialEq)]
enum StreamState {
    NotStarted,
    InStream,
    Done,
}

/// Pulls one [`Event`] at a time out of a [`Source`], buffering only as
/// much lookahead as the grammar requires (one token, plus — per document —
/// the queue of events already decided but not yet returned to the caller).
pub struct Parser<S> {
    lexer: Lexer<S>,
    lookahead: VecDeque<Token>,
    pending: VecDeque<Event>,
    tags: TagRegistry,
    state: StreamState,
    options: ParserOptions,
    warning_sink: Option<Box<dyn FnMut(Warning)>>,
}

impl<S: Source> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: S, options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: VecDeque::new(),
            pending: VecDeque::new(),
            tags: TagRegistry::new(),
            state: StreamState::NotStarted,
            options,
            warning_sink: None,
        }
    }

    /// Installs a callback invoked for every non-fatal [`Warning`], in
    /// addition to the `log::warn!` record each warning site always emits.
    /// Replaces any previously installed callback.
    pub fn set_warning_sink(&mut self, sink: impl FnMut(Warning) + 'static) {
        self.warning_sink = Some(Box::new(sink));
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        if let Some(sink) = &mut self.warning_sink {
            sink(warning);
        }
    }

    /// Returns the next event, or `None` once the stream is exhausted.
    pub fn next(&mut self) -> Result<Option<Event>, ParserError> {
        loop {
            if let Some(ev) = self.pending.pop_front() {
                return Ok(Some(ev));
            }
            match self.state {
                StreamState::Done => return Ok(None),
                StreamState::NotStarted => {
                    self.state = StreamState::InStream;
                    let m = Mark::new(1, 1);
                    self.pending.push_back(Event::stream_start(m, m));
                }
                StreamState::InStream => {
                    if matches!(self.peek_token()?.data, TokenData::StreamEnd) {
                        let m = self.peek_token()?.start_mark;
                        self.pending.push_back(Event::stream_end(m, m));
                        self.state = StreamState::Done;
                    } else {
                        self.parse_document()?;
                    }
                }
            }
        }
    }

    // -- token plumbing ---------------------------------------------------

    fn peek_token(&mut self) -> Result<&Token, ParserError> {
        self.peek_token_at(0)
    }

    /// Looks `n` tokens past the cursor without consuming anything,
    /// pulling as many tokens from the lexer as needed to fill the
    /// lookahead queue.
    fn peek_token_at(&mut self, n: usize) -> Result<&Token, ParserError> {
        while self.lookahead.len() <= n {
            let tok = self.lexer.next_token()?;
            self.lookahead.push_back(tok);
        }
        Ok(&self.lookahead[n])
    }

    fn take_token(&mut self) -> Result<Token, ParserError> {
        self.peek_token()?;
        Ok(self.lookahead.pop_front().unwrap())
    }

    fn peek_indent(&mut self) -> Result<Option<i64>, ParserError> {
        match self.peek_token()?.data {
            TokenData::Indentation { column } => Ok(Some(column as i64)),
            _ => Ok(None),
        }
    }

    /// Whether the token just past the current (unconsumed) `Indentation`
    /// token is a `-` sequence-item indicator — the "compact notation"
    /// exception (§4.4) that allows a block sequence value to sit at the
    /// exact same column as its enclosing mapping key.
    fn indentation_hides_seq_item(&mut self) -> Result<bool, ParserError> {
        if !matches!(self.peek_token()?.data, TokenData::Indentation { .. }) {
            return Ok(false);
        }
        Ok(matches!(self.peek_token_at(1)?.data, TokenData::SeqItemIndicator))
    }

    fn err_here(&mut self, message: impl Into<String>) -> ParserError {
        let mark = self.peek_token().map(|t| t.start_mark).unwrap_or_default();
        let line_text = self.lexer.current_line_text();
        ParserError::problem(message, mark, line_text)
    }

    // -- documents ----------------------------------------------------------

    fn parse_document(&mut self) -> Result<(), ParserError> {
        log::debug!("parse_document: entering document at {}", self.peek_token()?.start_mark);
        self.tags.reset();
        let start = self.peek_token()?.start_mark;
        let mut version = None;

        loop {
            match self.peek_token()?.data.clone() {
                TokenData::YamlDirective { major, minor } => {
                    if version.is_some() {
                        return Err(self.err_here("duplicate %YAML directive"));
                    }
                    version = Some((major, minor));
                    if (major, minor) != (1, 2) {
                        let mark = self.peek_token()?.start_mark;
                        self.warn(Warning::UnsupportedVersion { major, minor, mark });
                    }
                    self.take_token()?;
                }
                TokenData::TagDirective { handle, prefix } => {
                    self.take_token()?;
                    if !self.tags.register(&handle, &prefix) {
                        return Err(self.err_here(format!("duplicate %TAG directive for handle {handle}")));
                    }
                }
                TokenData::UnknownDirective { .. } => {
                    self.take_token()?;
                    if matches!(self.peek_token()?.data, TokenData::DirectiveParam { .. }) {
                        self.take_token()?;
                    }
                }
                _ => break,
            }
        }

        let explicit_start = matches!(self.peek_token()?.data, TokenData::DirectivesEnd);
        if explicit_start {
            self.take_token()?;
        }
        let handles: Vec<_> = self.tags.custom_directives().cloned().collect();
        let doc_start_mark = self.peek_token()?.start_mark;
        self.pending.push_back(Event::document_start(
            explicit_start,
            version,
            handles,
            start,
            doc_start_mark,
        ));

        if matches!(
            self.peek_token()?.data,
            TokenData::DocumentEnd | TokenData::DirectivesEnd | TokenData::StreamEnd
        ) {
            let m = self.peek_token()?.start_mark;
            self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
        } else {
            self.parse_node(-1)?;
        }

        let end_mark = self.peek_token()?.start_mark;
        let explicit_end = matches!(self.peek_token()?.data, TokenData::DocumentEnd);
        if explicit_end {
            self.take_token()?;
        }
        self.pending.push_back(Event::document_end(explicit_end, end_mark, end_mark));
        Ok(())
    }

    // -- node dispatch --------------------------------------------------------

    fn scan_properties(&mut self) -> Result<(Option<String>, Option<String>), ParserError> {
        self.scan_properties_merge(None, None)
    }

    /// Scans any run of `Anchor`/`VerbatimTag`/`TagHandle`+`Suffix` tokens
    /// at the cursor, merging them into properties already scanned earlier
    /// on the same node (still rejecting a second anchor or tag as a
    /// duplicate). Used by `parse_node_with_props` to pick up header
    /// properties that migrated to their own line after a newline — §4.4's
    /// "inline properties migrate to header properties for the upcoming
    /// block node" — in addition to `scan_properties`'s plain
    /// no-properties-yet case.
    fn scan_properties_merge(
        &mut self,
        mut anchor: Option<String>,
        mut tag: Option<String>,
    ) -> Result<(Option<String>, Option<String>), ParserError> {
        loop {
            match self.peek_token()?.data.clone() {
                TokenData::Anchor { name } => {
                    if anchor.is_some() {
                        return Err(self.err_here("a node may only have one anchor"));
                    }
                    anchor = Some(name);
                    self.take_token()?;
                }
                TokenData::VerbatimTag { uri } => {
                    if tag.is_some() {
                        return Err(self.err_here("a node may only have one tag"));
                    }
                    tag = Some(uri);
                    self.take_token()?;
                }
                TokenData::TagHandle { handle } => {
                    if tag.is_some() {
                        return Err(self.err_here("a node may only have one tag"));
                    }
                    self.take_token()?;
                    let suffix = if let TokenData::Suffix { suffix } = self.peek_token()?.data.clone() {
                        self.take_token()?;
                        suffix
                    } else {
                        String::new()
                    };
                    tag = Some(
                        self.tags
                            .resolve(&handle, &suffix)
                            .ok_or_else(|| self.err_here(format!("undefined tag handle {handle}")))?,
                    );
                }
                _ => break,
            }
        }
        Ok((anchor, tag))
    }

    /// Parses a node that is not the value of a block mapping entry — block
    /// sequence items, document roots, flow content. The "compact
    /// notation" exception (a `-` item at the same column as the enclosing
    /// construct) never applies here.
    fn parse_node(&mut self, enclosing_indent: i64) -> Result<(), ParserError> {
        let (anchor, tag) = self.scan_properties()?;
        self.parse_node_with_props(enclosing_indent, false, anchor, tag)
    }

    /// Parses the value of a block mapping entry, where §4.4's compact
    /// notation allows a nested block sequence's `-` items to sit at the
    /// exact same column as the key they belong to.
    fn parse_map_value_node(&mut self, enclosing_indent: i64) -> Result<(), ParserError> {
        let (anchor, tag) = self.scan_properties()?;
        self.parse_node_with_props(enclosing_indent, true, anchor, tag)
    }

    fn parse_node_with_props(
        &mut self,
        enclosing_indent: i64,
        allow_compact_seq: bool,
        mut anchor: Option<String>,
        mut tag: Option<String>,
    ) -> Result<(), ParserError> {
        if let Some(col) = self.peek_indent()? {
            let compact_seq = allow_compact_seq && col == enclosing_indent && self.indentation_hides_seq_item()?;
            if col < enclosing_indent || (col == enclosing_indent && !compact_seq) {
                let m = self.peek_token()?.start_mark;
                self.emit_scalar_str("", ScalarStyle::Plain, Properties { anchor, tag }, m, m);
                return Ok(());
            }
            self.take_token()?;
            // Properties may migrate to their own line after the
            // indicator that opened this node (`key:\n  &anchor\n  value`);
            // pick those up now, merging with anything already scanned
            // inline, per §4.4. They can themselves be followed by another
            // bare line before the actual content, so keep folding
            // indentation + property tokens until the line that holds the
            // node itself.
            (anchor, tag) = self.scan_properties_merge(anchor, tag)?;
            while let Some(col) = self.peek_indent()? {
                if col < enclosing_indent {
                    let m = self.peek_token()?.start_mark;
                    self.emit_scalar_str("", ScalarStyle::Plain, Properties { anchor, tag }, m, m);
                    return Ok(());
                }
                self.take_token()?;
                (anchor, tag) = self.scan_properties_merge(anchor, tag)?;
            }
        }

        let tok = self.peek_token()?.clone();
        log::debug!("parse_node_with_props: dispatching on {:?} at {}", tok.data, tok.start_mark);
        match &tok.data {
            TokenData::Alias { name } => {
                if anchor.is_some() || tag.is_some() {
                    return Err(self.err_here("an alias cannot carry an anchor or tag"));
                }
                self.take_token()?;
                self.pending.push_back(Event::alias(name.clone(), tok.start_mark, tok.end_mark));
            }
            TokenData::FlowSeqStart => {
                self.take_token()?;
                self.parse_flow_seq(Properties { anchor, tag }, tok.start_mark)?;
            }
            TokenData::FlowMapStart => {
                self.take_token()?;
                self.parse_flow_map(Properties { anchor, tag }, tok.start_mark)?;
            }
            TokenData::SeqItemIndicator => {
                let col = (tok.start_mark.column - 1) as i64;
                self.take_token()?;
                self.parse_block_seq(col, Properties { anchor, tag }, tok.start_mark)?;
            }
            TokenData::MapKeyIndicator => {
                let col = (tok.start_mark.column - 1) as i64;
                self.parse_block_map(col, Properties { anchor, tag }, tok.start_mark, FirstKey::Explicit)?;
            }
            TokenData::MapValueIndicator => {
                let col = (tok.start_mark.column - 1) as i64;
                self.parse_block_map(col, Properties { anchor, tag }, tok.start_mark, FirstKey::Empty)?;
            }
            _ if tok.data.scalar_value().is_some() => {
                self.take_token()?;
                if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
                    if tok.multiline {
                        return Err(self.err_here("an implicit mapping key must not span multiple lines"));
                    }
                    let col = (tok.start_mark.column - 1) as i64;
                    self.parse_block_map(
                        col,
                        Properties { anchor, tag },
                        tok.start_mark,
                        FirstKey::ImplicitScalar(tok),
                    )?;
                } else {
                    self.emit_scalar_from_token(tok, Properties { anchor, tag });
                }
            }
            _ => {
                let m = tok.start_mark;
                self.emit_scalar_str("", ScalarStyle::Plain, Properties { anchor, tag }, m, m);
            }
        }
        Ok(())
    }

    // -- block collections ----------------------------------------------------

    fn parse_block_seq(&mut self, indent: i64, props: Properties, start: Mark) -> Result<(), ParserError> {
        log::debug!("parse_block_seq: entering block sequence at indent {indent}");
        self.pending.push_back(Event::seq_start(CollectionStyle::Block, props, start, start));
        self.parse_node(indent)?;
        loop {
            match self.peek_indent()? {
                Some(col) if col == indent => {
                    self.take_token()?;
                }
                _ => break,
            }
            if !matches!(self.peek_token()?.data, TokenData::SeqItemIndicator) {
                break;
            }
            self.take_token()?;
            self.parse_node(indent)?;
        }
        let end = self.peek_token()?.start_mark;
        self.pending.push_back(Event::seq_end(end, end));
        Ok(())
    }

    fn parse_block_map(
        &mut self,
        indent: i64,
        props: Properties,
        start: Mark,
        first: FirstKey,
    ) -> Result<(), ParserError> {
        log::debug!("parse_block_map: entering block mapping at indent {indent}");
        self.pending.push_back(Event::map_start(CollectionStyle::Block, props, start, start));
        self.parse_block_map_entry(indent, Some(first))?;
        loop {
            match self.peek_indent()? {
                Some(col) if col == indent => {
                    self.take_token()?;
                }
                _ => break,
            }
            if !matches!(
                self.peek_token()?.data,
                TokenData::MapKeyIndicator | TokenData::MapValueIndicator
            ) && self.peek_token()?.data.scalar_value().is_none()
            {
                break;
            }
            self.parse_block_map_entry(indent, None)?;
        }
        self.finish_block_map(indent)
    }

    fn finish_block_map(&mut self, _indent: i64) -> Result<(), ParserError> {
        let end = self.peek_token()?.start_mark;
        self.pending.push_back(Event::map_end(end, end));
        Ok(())
    }

    fn parse_block_map_entry(&mut self, indent: i64, first: Option<FirstKey>) -> Result<(), ParserError> {
        match first {
            Some(FirstKey::ImplicitScalar(key_tok)) => {
                self.emit_scalar_key_from_token(key_tok, Properties::default());
                self.take_token()?; // ':'
                self.parse_map_value_node(indent)
            }
            Some(FirstKey::Explicit) => self.parse_explicit_entry(indent),
            Some(FirstKey::Empty) => {
                let m = self.peek_token()?.start_mark;
                self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
                self.take_token()?; // ':'
                self.parse_map_value_node(indent)
            }
            None => {
                if matches!(self.peek_token()?.data, TokenData::MapKeyIndicator) {
                    self.take_token()?;
                    self.parse_explicit_entry(indent)
                } else if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
                    let m = self.peek_token()?.start_mark;
                    self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
                    self.take_token()?;
                    self.parse_map_value_node(indent)
                } else {
                    let key_tok = self.take_token()?;
                    if !matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
                        return Err(self.err_here("expected ':' after mapping key"));
                    }
                    if key_tok.multiline {
                        return Err(self.err_here("an implicit mapping key must not span multiple lines"));
                    }
                    self.emit_scalar_key_from_token(key_tok, Properties::default());
                    self.take_token()?;
                    self.parse_map_value_node(indent)
                }
            }
        }
    }

    fn parse_explicit_entry(&mut self, indent: i64) -> Result<(), ParserError> {
        self.parse_node(indent)?;
        if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
            self.take_token()?;
            self.parse_map_value_node(indent)
        } else {
            let m = self.peek_token()?.start_mark;
            self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
            Ok(())
        }
    }

    // -- flow collections -----------------------------------------------------

    fn parse_flow_seq(&mut self, props: Properties, start: Mark) -> Result<(), ParserError> {
        log::debug!("parse_flow_seq: entering flow sequence at {start}");
        self.pending.push_back(Event::seq_start(CollectionStyle::Flow, props, start, start));
        if matches!(self.peek_token()?.data, TokenData::FlowSeqEnd) {
            let end = self.take_token()?.end_mark;
            self.pending.push_back(Event::seq_end(end, end));
            return Ok(());
        }
        loop {
            self.parse_flow_seq_entry()?;
            match self.peek_token()?.data {
                TokenData::FlowSeqSep => {
                    self.take_token()?;
                    if matches!(self.peek_token()?.data, TokenData::FlowSeqEnd) {
                        break;
                    }
                }
                TokenData::FlowSeqEnd => break,
                _ => return Err(self.err_here("expected ',' or ']' in a flow sequence")),
            }
        }
        let end = self.take_token()?.end_mark;
        self.pending.push_back(Event::seq_end(end, end));
        Ok(())
    }

    fn parse_flow_seq_entry(&mut self) -> Result<(), ParserError> {
        if matches!(self.peek_token()?.data, TokenData::MapKeyIndicator) {
            let start = self.peek_token()?.start_mark;
            self.take_token()?;
            self.pending
                .push_back(Event::map_start(CollectionStyle::Pair, Properties::default(), start, start));
            self.parse_node(-1)?;
            if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
                self.take_token()?;
                self.parse_node(-1)?;
            } else {
                let m = self.peek_token()?.start_mark;
                self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
            }
            let end = self.peek_token()?.start_mark;
            self.pending.push_back(Event::map_end(end, end));
            return Ok(());
        }

        let (anchor, tag) = self.scan_properties()?;
        let tok = self.peek_token()?.clone();
        if tok.data.scalar_value().is_some() {
            let key_tok = self.take_token()?;
            if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
                if key_tok.multiline {
                    return Err(self.err_here("an implicit mapping key must not span multiple lines"));
                }
                let start = key_tok.start_mark;
                self.pending
                    .push_back(Event::map_start(CollectionStyle::Pair, Properties { anchor, tag }, start, start));
                self.emit_scalar_key_from_token(key_tok, Properties::default());
                self.take_token()?;
                if matches!(self.peek_token()?.data, TokenData::FlowSeqSep | TokenData::FlowSeqEnd) {
                    let m = self.peek_token()?.start_mark;
                    self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
                } else {
                    self.parse_node(-1)?;
                }
                let end = self.peek_token()?.start_mark;
                self.pending.push_back(Event::map_end(end, end));
            } else {
                self.emit_scalar_from_token(key_tok, Properties { anchor, tag });
            }
            return Ok(());
        }
        if matches!(tok.data, TokenData::FlowSeqStart | TokenData::FlowMapStart) {
            // The key may be an entire nested flow collection (`[[a, b]: c]`)
            // rather than a scalar. §4.4: "Detecting this requires buffering
            // a whole flow node (until balanced)... If found, the cached
            // events are wrapped in synthetic MapStart{pair} ... MapEnd."
            // `self.pending` already *is* that buffer, so parse the key node
            // normally (its events land at the tail of `pending`) and, if a
            // `:` follows, splice a `MapStart` in just before them instead
            // of re-emitting anything.
            let start = tok.start_mark;
            let insert_at = self.pending.len();
            self.parse_node_with_props(-1, false, anchor, tag)?;
            if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
                self.pending
                    .insert(insert_at, Event::map_start(CollectionStyle::Pair, Properties::default(), start, start));
                self.take_token()?;
                if matches!(self.peek_token()?.data, TokenData::FlowSeqSep | TokenData::FlowSeqEnd) {
                    let m = self.peek_token()?.start_mark;
                    self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
                } else {
                    self.parse_node(-1)?;
                }
                let end = self.peek_token()?.start_mark;
                self.pending.push_back(Event::map_end(end, end));
            }
            return Ok(());
        }
        self.parse_node_with_props(-1, false, anchor, tag)
    }

    fn parse_flow_map(&mut self, props: Properties, start: Mark) -> Result<(), ParserError> {
        log::debug!("parse_flow_map: entering flow mapping at {start}");
        self.pending.push_back(Event::map_start(CollectionStyle::Flow, props, start, start));
        if matches!(self.peek_token()?.data, TokenData::FlowMapEnd) {
            let end = self.take_token()?.end_mark;
            self.pending.push_back(Event::map_end(end, end));
            return Ok(());
        }
        loop {
            self.parse_flow_map_entry()?;
            match self.peek_token()?.data {
                TokenData::FlowSeqSep => {
                    self.take_token()?;
                    if matches!(self.peek_token()?.data, TokenData::FlowMapEnd) {
                        break;
                    }
                }
                TokenData::FlowMapEnd => break,
                _ => return Err(self.err_here("expected ',' or '}' in a flow mapping")),
            }
        }
        let end = self.take_token()?.end_mark;
        self.pending.push_back(Event::map_end(end, end));
        Ok(())
    }

    fn parse_flow_map_entry(&mut self) -> Result<(), ParserError> {
        if matches!(self.peek_token()?.data, TokenData::MapKeyIndicator) {
            self.take_token()?;
            self.parse_node(-1)?;
        } else {
            let (anchor, tag) = self.scan_properties()?;
            let tok = self.peek_token()?.clone();
            if tok.data.scalar_value().is_some() {
                let key_tok = self.take_token()?;
                self.emit_scalar_key_from_token(key_tok, Properties { anchor, tag });
            } else {
                self.parse_node_with_props(-1, false, anchor, tag)?;
            }
        }
        if matches!(self.peek_token()?.data, TokenData::MapValueIndicator) {
            self.take_token()?;
            self.parse_node(-1)
        } else {
            let m = self.peek_token()?.start_mark;
            self.emit_scalar_str("", ScalarStyle::Plain, Properties::default(), m, m);
            Ok(())
        }
    }

    // -- scalar emission --------------------------------------------------------

    fn emit_scalar_from_token(&mut self, tok: Token, props: Properties) {
        self.emit_scalar_from_token_as(tok, props, false);
    }

    /// As `emit_scalar_from_token`, but for a scalar in mapping-key
    /// position. `resolve_core_tags` guesses a core-schema type for
    /// *values*; a key's type is rarely useful to pin down this way; e.g. a
    /// `resolve_core_tags` pass over `a: 1` should tag `1` as `!!int` without
    /// also tagging the key `a` as `!!str`.
    fn emit_scalar_key_from_token(&mut self, tok: Token, props: Properties) {
        self.emit_scalar_from_token_as(tok, props, true);
    }

    fn emit_scalar_from_token_as(&mut self, tok: Token, mut props: Properties, is_key: bool) {
        let style = tok.data.scalar_style().unwrap_or_default();
        let content = tok.data.scalar_value().unwrap_or_default().to_string();
        if props.tag.is_none() && !is_key && self.options.resolve_core_tags && style == ScalarStyle::Plain {
            props.tag = Some(tag::resolve_core_tag(&content).to_string());
        }
        self.pending
            .push_back(Event::scalar(style, props, content, tok.start_mark, tok.end_mark));
    }

    fn emit_scalar_str(&mut self, content: &str, style: ScalarStyle, props: Properties, start: Mark, end: Mark) {
        self.pending.push_back(Event::scalar(style, props, content, start, end));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::display::display;
    use crate::event::EventData;
    use crate::source::StrSource;

    fn events(input: &str) -> Vec<EventData> {
        let mut parser = Parser::new(StrSource::new(input));
        let mut out = Vec::new();
        while let Some(ev) = parser.next().expect("parse ok") {
            out.push(ev.data);
        }
        out
    }

    fn displayed(input: &str) -> String {
        let mut parser = Parser::new(StrSource::new(input));
        let mut out = Vec::new();
        while let Some(ev) = parser.next().expect("parse ok") {
            out.push(ev);
        }
        display(out)
    }

    #[test]
    fn flat_mapping() {
        let evs = events("a: 1\nb: 2\n");
        assert!(matches!(evs[0], EventData::StreamStart));
        assert!(matches!(evs[1], EventData::DocumentStart { .. }));
        assert!(matches!(evs[2], EventData::MapStart { .. }));
        assert!(matches!(&evs[3], EventData::Scalar{content, ..} if content == "a"));
        assert!(matches!(&evs[4], EventData::Scalar{content, ..} if content == "1"));
        assert!(matches!(&evs[5], EventData::Scalar{content, ..} if content == "b"));
        assert!(matches!(&evs[6], EventData::Scalar{content, ..} if content == "2"));
        assert!(matches!(evs[7], EventData::MapEnd));
    }

    #[test]
    fn flat_mapping_matches_canonical_display_form() {
        // §8 scenario 1: the full test-suite-style dump, compared with
        // `pretty_assertions` so a mismatch shows a line-level diff instead
        // of one opaque blob.
        let expected = "+STR\n+DOC\n+MAP\n=VAL :a\n=VAL :1\n=VAL :b\n=VAL :2\n-MAP\n-DOC\n-STR\n";
        assert_eq!(displayed("a: 1\nb: 2\n"), expected);
    }

    #[test]
    fn nested_block_sequence() {
        let evs = events("- a\n- b\n");
        assert!(matches!(evs[2], EventData::SeqStart { .. }));
        assert!(matches!(&evs[3], EventData::Scalar{content, ..} if content == "a"));
        assert!(matches!(&evs[4], EventData::Scalar{content, ..} if content == "b"));
        assert!(matches!(evs[5], EventData::SeqEnd));
    }

    #[test]
    fn flow_collection() {
        let evs = events("[1, 2, 3]\n");
        assert!(matches!(evs[2], EventData::SeqStart { .. }));
        assert!(matches!(&evs[3], EventData::Scalar{content, ..} if content == "1"));
        assert!(matches!(evs.last().unwrap(), EventData::StreamEnd));
    }

    #[test]
    fn anchor_and_alias() {
        let evs = events("- &x foo\n- *x\n");
        let has_alias = evs.iter().any(|e| matches!(e, EventData::Alias { .. }));
        assert!(has_alias);
    }

    #[test]
    fn compact_sequence_under_map_key() {
        // The `-` items may sit at the same column as the key they answer
        // to (§4.4 "compact notation"); this must still be a single
        // document whose value for `key` is a two-item sequence, not a
        // null value followed by a second document.
        let evs = events("key:\n- a\n- b\n");
        let doc_starts = evs.iter().filter(|e| matches!(e, EventData::DocumentStart { .. })).count();
        assert_eq!(doc_starts, 1, "compact sequence must not split into two documents");
        assert!(matches!(evs[2], EventData::MapStart { .. }));
        assert!(matches!(&evs[3], EventData::Scalar{content, ..} if content == "key"));
        assert!(matches!(evs[4], EventData::SeqStart { .. }));
        assert!(matches!(&evs[5], EventData::Scalar{content, ..} if content == "a"));
        assert!(matches!(&evs[6], EventData::Scalar{content, ..} if content == "b"));
        assert!(matches!(evs[7], EventData::SeqEnd));
        assert!(matches!(evs[8], EventData::MapEnd));
    }

    #[test]
    fn sibling_sequence_item_is_not_mistaken_for_compact_value() {
        // Here the second `-` is the *next* item of the same sequence, not
        // a compact-notation value nested under the (empty) first item.
        let evs = events("- \n- b\n");
        assert!(matches!(evs[2], EventData::SeqStart { .. }));
        assert!(matches!(&evs[3], EventData::Scalar{content, ..} if content.is_empty()));
        assert!(matches!(&evs[4], EventData::Scalar{content, ..} if content == "b"));
        assert!(matches!(evs[5], EventData::SeqEnd));
    }

    #[test]
    fn rejects_duplicate_yaml_directive() {
        let mut parser = Parser::new(StrSource::new("%YAML 1.2\n%YAML 1.2\n---\n"));
        let mut err = None;
        while err.is_none() {
            match parser.next() {
                Ok(Some(_)) => continue,
                Ok(None) => break,
                Err(e) => err = Some(e),
            }
        }
        assert!(err.is_some());
    }

    #[test]
    fn anchor_on_its_own_line_still_attaches_to_the_value() {
        // §4.4: "On encountering a newline, inline properties migrate to
        // header properties for the upcoming block node" — this covers the
        // case where the *header* properties themselves sit on a line with
        // nothing else on it, separated from both the map-value indicator
        // above and the scalar below by their own `Indentation` token. This
        // must remain a single document with one mapping entry, not split
        // the stray anchor/value into a bogus second document.
        let evs = events("key:\n  &anchor\n  value\n");
        let doc_starts = evs.iter().filter(|e| matches!(e, EventData::DocumentStart { .. })).count();
        assert_eq!(doc_starts, 1, "properties on their own line must not split the document");
        assert!(matches!(evs[2], EventData::MapStart { .. }));
        assert!(matches!(&evs[3], EventData::Scalar{content, ..} if content == "key"));
        match &evs[4] {
            EventData::Scalar { properties, content, .. } => {
                assert_eq!(properties.anchor.as_deref(), Some("anchor"));
                assert_eq!(content, "value");
            }
            other => panic!("expected an anchored scalar value, got {other:?}"),
        }
        assert!(matches!(evs[5], EventData::MapEnd));
    }

    #[test]
    fn flow_sequence_implicit_pair_with_collection_key() {
        // §4.4: a flow-sequence entry's implicit-pair key may itself be a
        // whole nested collection, not just a scalar.
        let evs = events("[[a, b]: c]\n");
        assert!(matches!(evs[2], EventData::SeqStart { .. }));
        assert!(matches!(
            &evs[3],
            EventData::MapStart { style: CollectionStyle::Pair, .. }
        ));
        assert!(matches!(evs[4], EventData::SeqStart { .. }));
        assert!(matches!(&evs[5], EventData::Scalar{content, ..} if content == "a"));
        assert!(matches!(&evs[6], EventData::Scalar{content, ..} if content == "b"));
        assert!(matches!(evs[7], EventData::SeqEnd));
        assert!(matches!(&evs[8], EventData::Scalar{content, ..} if content == "c"));
        assert!(matches!(evs[9], EventData::MapEnd));
        assert!(matches!(evs[10], EventData::SeqEnd));
    }
}
