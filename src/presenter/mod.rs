//! Turns an [`Event`] stream back into YAML text under a configurable
//! [`PresentationOptions`] preset.
//!
//! The write primitives (`put`/`write_break`/`write_indicator`/`write_indent`)
//! and the scalar-style selection and character-streaming scalar writers
//! below are a direct generalization of the teacher's `emitter.rs`: the same
//! column-tracking, the same "wrap when `column > best_width`" strategy for
//! plain/single/double scalars, and the same block-scalar chomping-hint
//! logic. What's new is per-node style resolution (`containers = mixed`)
//! and JSON-mode scalar rendering, neither of which `libyaml` supports.

pub mod options;

use std::fmt::Write as _;

pub use options::{Containers, DirectivesEnd, Newlines, OutputVersion, PresentationOptions, Quoting};

use crate::error::{PresenterError, PresenterJsonError, PresenterOutputError};
use crate::event::{CollectionStyle, Event, EventData, Properties, ScalarStyle};
use crate::tag::TagRegistry;

/// Serializes `events` to `sink` under `options`. Drives the whole iterator
/// to completion (or to the first error); per §6, "drives a pre-built event
/// iterator to completion."
pub fn present(
    events: impl IntoIterator<Item = Event>,
    sink: &mut impl std::fmt::Write,
    options: &PresentationOptions,
) -> Result<(), PresenterError> {
    let mut writer = Writer::new(options);
    let events: Vec<Event> = events.into_iter().collect();
    writer.run(&events)?;
    sink.write_str(&writer.out)
        .map_err(|e| PresenterOutputError {
            message: "failed writing to sink".to_string(),
            cause: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?;
    Ok(())
}

/// As [`present`], but returns the serialized form directly.
pub fn present_to_string(
    events: impl IntoIterator<Item = Event>,
    options: &PresentationOptions,
) -> Result<String, PresenterError> {
    let mut writer = Writer::new(options);
    let events: Vec<Event> = events.into_iter().collect();
    writer.run(&events)?;
    Ok(writer.out)
}

/// Writes `events` to any [`std::io::Write`] sink, for callers that don't
/// want to build a `String` first.
pub fn present_io(
    events: impl IntoIterator<Item = Event>,
    sink: &mut impl std::io::Write,
    options: &PresentationOptions,
) -> Result<(), PresenterError> {
    let text = present_to_string(events, options)?;
    sink.write_all(text.as_bytes()).map_err(|e| {
        PresenterError::Output(PresenterOutputError {
            message: "failed writing to sink".to_string(),
            cause: e,
        })
    })
}

struct ScalarAnalysis {
    multiline: bool,
    flow_plain_allowed: bool,
    block_plain_allowed: bool,
    single_quoted_allowed: bool,
    block_allowed: bool,
    folded_allowed: bool,
}

/// Mirrors the teacher's `yaml_emitter_analyze_scalar`: a single pass over
/// the content classifying which styles remain legal, rather than separate
/// validity checks per style.
fn analyze_scalar(value: &str) -> ScalarAnalysis {
    if value.is_empty() {
        return ScalarAnalysis {
            multiline: false,
            flow_plain_allowed: false,
            block_plain_allowed: true,
            single_quoted_allowed: true,
            block_allowed: false,
            folded_allowed: false,
        };
    }

    let mut block_indicators = value.starts_with("---") || value.starts_with("...");
    let mut flow_indicators = block_indicators;
    let mut line_breaks = false;
    let mut special_characters = false;
    let mut leading_space = false;
    let mut leading_break = false;
    let mut trailing_space = false;
    let mut trailing_break = false;
    let mut break_space = false;
    let mut space_break = false;
    let mut leading_space_line = false;
    let mut previous_space = false;
    let mut previous_break = false;

    let mut at_line_start = true;
    let chars: Vec<char> = value.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied();
        let first = i == 0;
        let followed_by_whitespace = next.map(|c| c == ' ' || c == '\t' || c == '\n' || c == '\r').unwrap_or(true);
        if first {
            match ch {
                '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`' => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                '?' | ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '-' if followed_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        } else {
            match ch {
                ',' | '?' | '[' | ']' | '{' | '}' => flow_indicators = true,
                ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '#' if previous_space || previous_break || at_line_start => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        }

        if !is_printable(ch) {
            special_characters = true;
        }
        if ch == '\n' || ch == '\r' {
            line_breaks = true;
        }

        if ch == ' ' {
            if first {
                leading_space = true;
            }
            if at_line_start {
                leading_space_line = true;
            }
            if next.is_none() {
                trailing_space = true;
            }
            if previous_break {
                break_space = true;
            }
            previous_space = true;
            previous_break = false;
        } else if ch == '\n' || ch == '\r' {
            if first {
                leading_break = true;
            }
            if next.is_none() {
                trailing_break = true;
            }
            if previous_space {
                space_break = true;
            }
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        at_line_start = ch == '\n' || ch == '\r';
    }

    let mut analysis = ScalarAnalysis {
        multiline: line_breaks,
        flow_plain_allowed: true,
        block_plain_allowed: true,
        single_quoted_allowed: true,
        block_allowed: true,
        folded_allowed: !leading_space_line,
    };
    if leading_space || leading_break || trailing_space || trailing_break {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if trailing_space {
        analysis.block_allowed = false;
    }
    if break_space {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
    }
    if space_break || special_characters {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
        analysis.block_allowed = false;
    }
    if line_breaks {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if flow_indicators {
        analysis.flow_plain_allowed = false;
    }
    if block_indicators {
        analysis.block_plain_allowed = false;
    }
    analysis.folded_allowed = analysis.folded_allowed && analysis.block_allowed;
    analysis
}

fn is_printable(ch: char) -> bool {
    matches!(ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{7E}' | '\u{85}' | '\u{A0}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}'
    ) || ('\u{10000}'..='\u{10FFFF}').contains(&ch)
}

struct Ctx {
    in_flow: bool,
    is_key: bool,
    indent: u32,
}

fn choose_style(value: &str, requested: ScalarStyle, analysis: &ScalarAnalysis, opts: &PresentationOptions, ctx: &Ctx) -> ScalarStyle {
    let can_plain = || {
        let allowed = if ctx.in_flow {
            analysis.flow_plain_allowed
        } else {
            analysis.block_plain_allowed
        };
        allowed && !(value.is_empty() && (ctx.in_flow || ctx.is_key))
    };
    let block_ok = !ctx.in_flow && !ctx.is_key;

    let mut style = requested;
    if style == ScalarStyle::Any {
        let short = match opts.max_line_length {
            0 => true,
            limit => (ctx.indent + value.len() as u32) <= limit,
        };
        style = if short && can_plain() {
            ScalarStyle::Plain
        } else if short {
            ScalarStyle::DoubleQuoted
        } else if block_ok && analysis.block_allowed {
            ScalarStyle::Literal
        } else if block_ok && analysis.folded_allowed {
            ScalarStyle::Folded
        } else if can_plain() {
            ScalarStyle::Plain
        } else {
            ScalarStyle::DoubleQuoted
        };
    }

    if style == ScalarStyle::Plain && !can_plain() {
        style = ScalarStyle::SingleQuoted;
    }
    if style == ScalarStyle::SingleQuoted && !analysis.single_quoted_allowed {
        style = ScalarStyle::DoubleQuoted;
    }
    if matches!(style, ScalarStyle::Literal | ScalarStyle::Folded) && !block_ok {
        style = ScalarStyle::DoubleQuoted;
    }
    if style == ScalarStyle::Literal && !analysis.block_allowed {
        style = if analysis.folded_allowed {
            ScalarStyle::Folded
        } else {
            ScalarStyle::DoubleQuoted
        };
    }
    if style == ScalarStyle::Folded && !analysis.folded_allowed {
        style = if analysis.block_allowed {
            ScalarStyle::Literal
        } else {
            ScalarStyle::DoubleQuoted
        };
    }
    style
}

/// Per-open-container bookkeeping. Mirrors §4.5's "dumper level", collapsed
/// (like the parser's state set) into fields on a plain stack frame rather
/// than a full enum-of-states, since this writer processes events
/// recursively instead of incrementally.
struct Level {
    style: CollectionStyle,
    is_map: bool,
    indent: u32,
    wrote_anything: bool,
}

struct Writer<'a> {
    options: &'a PresentationOptions,
    out: String,
    column: u32,
    whitespace: bool,
    line_ending: &'static str,
    levels: Vec<Level>,
    tags: TagRegistry,
}

impl<'a> Writer<'a> {
    fn new(options: &'a PresentationOptions) -> Self {
        Self {
            options,
            out: String::new(),
            column: 0,
            whitespace: true,
            line_ending: options.newlines.as_str(),
            levels: Vec::new(),
            tags: TagRegistry::new(),
        }
    }

    fn indent(&self) -> u32 {
        self.levels.last().map(|l| l.indent).unwrap_or(0)
    }

    fn in_flow(&self) -> bool {
        self.levels.iter().any(|l| l.style == CollectionStyle::Flow)
    }

    fn put(&mut self, ch: char) {
        self.out.push(ch);
        self.column += 1;
        self.whitespace = ch == ' ';
    }

    fn write_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.put(ch);
        }
    }

    fn newline(&mut self) {
        if matches!(self.options.newlines, Newlines::None) {
            self.put(' ');
            return;
        }
        self.out.push_str(self.line_ending);
        self.column = 0;
        self.whitespace = true;
    }

    fn write_indent(&mut self, indent: u32) {
        if self.column > indent || (self.column == indent && !self.whitespace) {
            self.newline();
        }
        while self.column < indent {
            self.put(' ');
        }
    }

    /// Writes a structural indicator (`-`, `:`, `{`, `,`, a quote, ...).
    /// `is_whitespace` records whether the indicator itself counts as the
    /// whitespace a following scalar's leading-space guard looks for — true
    /// for `[`/`{`/`-` and a block mapping's explicit-key `?`, false for
    /// everything else, mirroring the teacher's `yaml_emitter_write_indicator`.
    fn write_indicator(&mut self, text: &str, need_whitespace: bool, is_whitespace: bool) {
        if need_whitespace && !self.whitespace {
            self.put(' ');
        }
        self.write_str(text);
        self.whitespace = is_whitespace;
    }

    fn run(&mut self, events: &[Event]) -> Result<(), PresenterError> {
        let mut pos = 0usize;
        let mut doc_index = 0usize;
        let mut open_ended = false;
        while pos < events.len() {
            match &events[pos].data {
                EventData::StreamStart => pos += 1,
                EventData::StreamEnd => {
                    pos += 1;
                }
                EventData::DocumentStart { .. } => {
                    pos = self.write_document(events, pos, doc_index == 0, &mut open_ended)?;
                    doc_index += 1;
                }
                other => return Err(internal(format!("unexpected top-level event {other:?}"))),
            }
        }
        Ok(())
    }

    fn write_document(
        &mut self,
        events: &[Event],
        pos: usize,
        first: bool,
        open_ended: &mut bool,
    ) -> Result<usize, PresenterError> {
        let EventData::DocumentStart {
            explicit_directives_end,
            version,
            handles,
        } = &events[pos].data
        else {
            return Err(internal("write_document called on non-DocumentStart"));
        };
        self.tags = TagRegistry::new();
        for h in handles {
            self.tags.register(&h.handle, &h.prefix);
        }

        let json = matches!(self.options.quoting, Quoting::Json);
        let mut wrote_directive = false;

        if *open_ended {
            self.write_indicator("...", true, false);
            self.newline();
            *open_ended = false;
        }

        if !json {
            match self.options.output_version {
                OutputVersion::None => {}
                OutputVersion::V1_2 if version.is_none() => {}
                _ => {
                    let v = match self.options.output_version {
                        OutputVersion::V1_1 => "1.1",
                        _ => "1.2",
                    };
                    self.write_indicator("%YAML", true, false);
                    self.write_str(" ");
                    self.write_str(v);
                    self.newline();
                    wrote_directive = true;
                }
            }
            for h in self.tags.custom_directives().cloned().collect::<Vec<_>>() {
                self.write_indicator("%TAG", true, false);
                self.write_str(" ");
                self.write_str(&h.handle);
                self.write_str(" ");
                self.write_str(&h.prefix);
                self.newline();
                wrote_directive = true;
            }
        }

        let root_has_tag = matches!(
            &events[pos + 1].data,
            EventData::MapStart { properties, .. }
                | EventData::SeqStart { properties, .. }
                | EventData::Scalar { properties, .. }
                if properties.tag.is_some()
        );
        let explicit = match self.options.directives_end {
            DirectivesEnd::Always => true,
            DirectivesEnd::Never => false,
            DirectivesEnd::IfNecessary => wrote_directive || *explicit_directives_end || root_has_tag,
        };
        if explicit && !json {
            self.write_indicator("---", true, false);
        }

        let mut pos = pos + 1;
        pos = self.write_node(events, pos, json)?;

        let EventData::DocumentEnd { explicit_document_end } = &events[pos].data else {
            return Err(internal("expected DocumentEnd"));
        };
        if *explicit_document_end && !json {
            self.write_indicator("...", true, false);
            self.newline();
        } else {
            self.newline();
            *open_ended = true;
        }
        let _ = first;
        Ok(pos + 1)
    }

    /// Consumes one complete node (scalar, alias, or balanced
    /// collection) starting at `pos` and returns the index just past it.
    fn write_node(&mut self, events: &[Event], pos: usize, json: bool) -> Result<usize, PresenterError> {
        match &events[pos].data {
            EventData::Scalar { style, properties, content } => {
                self.write_properties(properties, json);
                self.write_scalar(content, *style, json)?;
                Ok(pos + 1)
            }
            EventData::Alias { target } => {
                if json {
                    return Err(PresenterError::Json(PresenterJsonError {
                        message: "JSON mode cannot represent aliases".to_string(),
                    }));
                }
                self.write_indicator("*", true, false);
                self.write_str(target);
                Ok(pos + 1)
            }
            EventData::SeqStart { style, properties } => self.write_seq(events, pos, *style, properties.clone(), json),
            EventData::MapStart { style, properties } => self.write_map(events, pos, *style, properties.clone(), json),
            other => Err(internal(format!("expected a node, found {other:?}"))),
        }
    }

    fn write_properties(&mut self, props: &Properties, json: bool) {
        if json || self.options.suppress_attrs {
            return;
        }
        if let Some(tag) = &props.tag {
            self.write_tag(tag);
        }
        if let Some(anchor) = &props.anchor {
            self.write_indicator("&", true, false);
            self.write_str(anchor);
        }
    }

    fn write_tag(&mut self, tag: &str) {
        if tag == crate::tag::NON_SPECIFIC_UNKNOWN || tag == crate::tag::NON_SPECIFIC_NON_PLAIN {
            return;
        }
        for d in self.tags.directives() {
            if tag.len() > d.prefix.len() && tag.starts_with(d.prefix.as_str()) {
                self.write_indicator(&d.handle, true, false);
                self.write_str(&tag[d.prefix.len()..]);
                return;
            }
            if tag == d.prefix {
                self.write_indicator(&d.handle, true, false);
                return;
            }
        }
        self.write_indicator("!<", true, false);
        self.write_str(tag);
        self.write_str(">");
    }

    /// The indentation of a block collection's children, one level deeper
    /// than whatever's currently open. The outermost collection in a
    /// document has no enclosing level to step in from, so it starts at
    /// column 0 rather than one `indentation_step` in; only nested levels
    /// add a step to their parent's.
    fn container_indent(&self) -> u32 {
        if self.levels.is_empty() {
            0
        } else {
            self.indent() + self.options.indentation_step
        }
    }

    fn write_seq(
        &mut self,
        events: &[Event],
        pos: usize,
        mut style: CollectionStyle,
        props: Properties,
        json: bool,
    ) -> Result<usize, PresenterError> {
        if json {
            style = CollectionStyle::Flow;
        } else if style == CollectionStyle::Block {
            style = self.resolve_mixed_style(events, pos);
        }
        self.write_properties(&props, json);

        let flow = json || style == CollectionStyle::Flow || matches!(self.options.newlines, Newlines::None);
        let indent = self.container_indent();
        self.levels.push(Level {
            style: if flow { CollectionStyle::Flow } else { CollectionStyle::Block },
            is_map: false,
            indent,
            wrote_anything: false,
        });

        if flow {
            self.write_indicator("[", false, true);
        }

        let mut pos = pos + 1;
        loop {
            if matches!(events[pos].data, EventData::SeqEnd) {
                break;
            }
            self.start_item(flow);
            pos = self.write_node(events, pos, json)?;
        }

        self.levels.pop();
        if flow {
            self.write_indicator("]", false, false);
        }
        Ok(pos + 1)
    }

    fn write_map(
        &mut self,
        events: &[Event],
        pos: usize,
        mut style: CollectionStyle,
        props: Properties,
        json: bool,
    ) -> Result<usize, PresenterError> {
        if json {
            style = CollectionStyle::Flow;
        } else if style == CollectionStyle::Block {
            style = self.resolve_mixed_style(events, pos);
        }
        self.write_properties(&props, json);

        let flow = json
            || style == CollectionStyle::Flow
            || style == CollectionStyle::Pair
            || matches!(self.options.newlines, Newlines::None);
        let indent = self.container_indent();
        self.levels.push(Level {
            style: if flow { CollectionStyle::Flow } else { CollectionStyle::Block },
            is_map: true,
            indent,
            wrote_anything: false,
        });

        if flow {
            self.write_indicator("{", false, true);
        }

        let mut pos = pos + 1;
        loop {
            if matches!(events[pos].data, EventData::MapEnd) {
                break;
            }
            self.start_item(flow);
            if json {
                if !matches!(events[pos].data, EventData::Scalar { .. }) {
                    return Err(PresenterError::Json(PresenterJsonError {
                        message: "JSON mapping keys must be scalars".to_string(),
                    }));
                }
            }
            let use_explicit = self.options.explicit_keys && !flow;
            if use_explicit {
                self.write_indicator("?", true, true);
            }
            pos = self.write_node(events, pos, json)?;
            self.write_indicator(":", false, false);
            self.put(' ');
            pos = self.write_node(events, pos, json)?;
        }

        self.levels.pop();
        if flow {
            self.write_indicator("}", false, false);
        }
        Ok(pos + 1)
    }

    fn start_item(&mut self, flow: bool) {
        let level = self.levels.last_mut().unwrap();
        let first = !level.wrote_anything;
        level.wrote_anything = true;
        let indent = level.indent;
        let is_map = level.is_map;

        if flow {
            if !first {
                self.write_indicator(",", false, false);
            }
            if self.options.condense_flow {
                if !first {
                    self.put(' ');
                }
            } else if self.max_line_exceeded() {
                self.write_indent(indent);
            } else if !first {
                self.put(' ');
            }
        } else {
            self.write_indent(indent);
            if !is_map {
                self.write_indicator("-", true, true);
            }
        }
    }

    fn resolve_mixed_style(&self, events: &[Event], pos: usize) -> CollectionStyle {
        if self.options.containers == Containers::Flow {
            return CollectionStyle::Flow;
        }
        if self.options.containers == Containers::Block {
            return CollectionStyle::Block;
        }
        // A document's root collection is always written block under
        // `Mixed`, regardless of its estimated width (§8 scenario 6: the
        // one-pair map `{a: b}` still presents as `a: b`, not `{a: b}`,
        // at the top level). The width heuristic only chooses flow for
        // collections nested under some other collection.
        if self.levels.is_empty() {
            return CollectionStyle::Block;
        }
        match estimate_width(events, pos) {
            Some(width) if width <= 60 => CollectionStyle::Flow,
            _ => CollectionStyle::Block,
        }
    }

    fn write_scalar(&mut self, content: &str, requested: ScalarStyle, json: bool) -> Result<(), PresenterError> {
        if json {
            return self.write_json_scalar(content);
        }
        let analysis = analyze_scalar(content);
        let ctx = Ctx {
            in_flow: self.in_flow(),
            is_key: false,
            indent: self.indent(),
        };
        // `Quoting::Double` forces every scalar that isn't already pinned to
        // a block style (literal/folded, which still carry information
        // plain/double-quoted can't) through double-quoting.
        let requested = if self.options.quoting == Quoting::Double
            && !matches!(requested, ScalarStyle::Literal | ScalarStyle::Folded)
        {
            ScalarStyle::DoubleQuoted
        } else {
            requested
        };
        let style = choose_style(content, requested, &analysis, self.options, &ctx);
        log::trace!("scalar style {:?} for {:?}", style, content);
        match style {
            ScalarStyle::Any => unreachable!("style resolved above"),
            ScalarStyle::Plain => self.write_plain(content),
            ScalarStyle::SingleQuoted => self.write_single_quoted(content),
            ScalarStyle::DoubleQuoted => self.write_double_quoted(content, false),
            ScalarStyle::Literal => self.write_literal(content),
            ScalarStyle::Folded => self.write_folded(content),
        }
        Ok(())
    }

    fn write_json_scalar(&mut self, content: &str) -> Result<(), PresenterError> {
        if is_non_finite(content) {
            return Err(PresenterError::Json(PresenterJsonError {
                message: format!("JSON mode cannot represent non-finite value {content:?}"),
            }));
        }
        if matches!(content, "null" | "~" | "" | "true" | "false") || is_json_number(content) {
            self.write_str(content);
        } else {
            self.write_double_quoted(content, true);
        }
        Ok(())
    }

    fn write_plain(&mut self, value: &str) {
        if !self.whitespace && !value.is_empty() {
            self.put(' ');
        }
        let mut spaces = false;
        let mut chars = value.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == ' ' {
                if !spaces && self.max_line_exceeded() && !matches!(chars.peek(), Some(' ')) {
                    self.write_indent(self.indent());
                } else {
                    self.put(' ');
                }
                spaces = true;
            } else if ch == '\n' {
                self.newline();
                spaces = false;
            } else {
                self.put(ch);
                spaces = false;
            }
        }
    }

    fn write_single_quoted(&mut self, value: &str) {
        self.write_indicator("'", true, false);
        let mut spaces = false;
        let mut chars = value.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == ' ' {
                if !spaces && self.max_line_exceeded() && !matches!(chars.peek(), Some(' ')) {
                    self.write_indent(self.indent());
                } else {
                    self.put(' ');
                }
                spaces = true;
            } else if ch == '\n' {
                self.newline();
                spaces = false;
            } else if ch == '\'' {
                self.put('\'');
                self.put('\'');
                spaces = false;
            } else {
                self.put(ch);
                spaces = false;
            }
        }
        self.write_indicator("'", false, false);
    }

    fn write_double_quoted(&mut self, value: &str, json: bool) {
        self.write_indicator("\"", true, false);
        let mut chars = value.chars().peekable();
        while let Some(ch) = chars.next() {
            let needs_escape = !is_printable(ch) || ch == '"' || ch == '\\';
            if needs_escape {
                self.put('\\');
                match ch {
                    '\0' => self.put('0'),
                    '\u{7}' => self.put('a'),
                    '\u{8}' => self.put('b'),
                    '\t' => self.put('t'),
                    '\n' => self.put('n'),
                    '\u{B}' => self.put('v'),
                    '\u{C}' => self.put('f'),
                    '\r' => self.put('r'),
                    '\u{1B}' => self.put('e'),
                    '"' => self.put('"'),
                    '\\' => self.put('\\'),
                    '\u{85}' if !json => self.put('N'),
                    '\u{A0}' if !json => self.put('_'),
                    '\u{2028}' if !json => self.put('L'),
                    '\u{2029}' if !json => self.put('P'),
                    _ => {
                        let code = ch as u32;
                        if json || code > 0xFF {
                            let mut buf = String::new();
                            if code > 0xFFFF {
                                let _ = write!(buf, "U{code:08X}");
                            } else {
                                let _ = write!(buf, "u{code:04X}");
                            }
                            self.write_str(&buf);
                        } else {
                            let mut buf = String::new();
                            let _ = write!(buf, "x{code:02X}");
                            self.write_str(&buf);
                        }
                    }
                }
            } else if ch == ' ' {
                if !json && !matches!(chars.peek(), Some(' ')) && self.max_line_exceeded() && chars.peek().is_some() {
                    self.write_indent(self.indent());
                    if matches!(chars.peek(), Some(' ')) {
                        self.put('\\');
                    }
                } else {
                    self.put(' ');
                }
            } else {
                self.put(ch);
            }
        }
        self.write_indicator("\"", false, false);
    }

    fn max_line_exceeded(&self) -> bool {
        self.options.max_line_length != 0 && self.column > self.options.max_line_length
    }

    fn write_block_scalar_hints(&mut self, value: &str) {
        let indent = self.indent();
        if value.starts_with(' ') || value.starts_with('\n') {
            if let Some(d) = char::from_digit(self.options.indentation_step.clamp(1, 9), 10) {
                self.write_indicator(&d.to_string(), false, false);
            }
            let _ = indent;
        }
        if value.is_empty() {
            self.write_indicator("-", false, false);
        } else if !value.ends_with('\n') {
            self.write_indicator("-", false, false);
        } else if value.ends_with("\n\n") || value == "\n" {
            self.write_indicator("+", false, false);
        }
    }

    fn write_literal(&mut self, value: &str) {
        self.write_indicator("|", true, false);
        self.write_block_scalar_hints(value);
        self.newline();
        let indent = self.indent();
        let mut breaks = true;
        for ch in value.chars() {
            if ch == '\n' {
                self.newline();
                breaks = true;
            } else {
                if breaks {
                    self.write_indent(indent);
                }
                self.put(ch);
                breaks = false;
            }
        }
    }

    /// A run of `k` consecutive line breaks in the content must become `k + 1`
    /// raw breaks in folded encoding: the first is consumed by folding, the
    /// remaining `k` survive as literal breaks on reparse. A single break we
    /// insert ourselves to wrap a long line (`k = 0` conceptually) is written
    /// as exactly one raw break, which folds back to the space it replaced.
    fn write_folded(&mut self, value: &str) {
        self.write_indicator(">", true, false);
        self.write_block_scalar_hints(value);
        self.newline();
        let indent = self.indent();
        let mut chars = value.chars().peekable();
        let mut breaks = true;
        while let Some(ch) = chars.next() {
            if ch == '\n' {
                let mut run = 1u32;
                while matches!(chars.peek(), Some('\n')) {
                    chars.next();
                    run += 1;
                }
                for _ in 0..run {
                    self.newline();
                }
                breaks = true;
            } else {
                if breaks {
                    self.write_indent(indent);
                }
                if !breaks && ch == ' ' && !matches!(chars.peek(), Some(' ')) && self.max_line_exceeded() {
                    self.write_indent(indent);
                } else {
                    self.put(ch);
                }
                breaks = false;
            }
        }
    }
}

fn internal(message: impl Into<String>) -> PresenterError {
    PresenterError::Output(PresenterOutputError {
        message: message.into(),
        cause: std::io::Error::new(std::io::ErrorKind::InvalidData, "presenter invariant violated"),
    })
}

fn is_non_finite(content: &str) -> bool {
    matches!(
        content,
        ".nan" | ".NaN" | ".NAN" | ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" | "-.inf" | "-.Inf" | "-.INF"
    )
}

fn is_json_number(content: &str) -> bool {
    if content.is_empty() {
        return false;
    }
    let rest = content.strip_prefix('-').unwrap_or(content);
    if rest.is_empty() || !rest.chars().next().unwrap().is_ascii_digit() {
        return false;
    }
    let mut seen_dot = false;
    let mut seen_exp = false;
    for ch in rest.chars() {
        match ch {
            '0'..='9' => {}
            '.' if !seen_dot && !seen_exp => seen_dot = true,
            'e' | 'E' if !seen_exp => seen_exp = true,
            '+' | '-' => {}
            _ => return false,
        }
    }
    true
}

/// Implements §4.5's mixed-mode length estimation: `2 + len(content)` per
/// scalar, `6` per alias, terminating at the matching close. `None` if a
/// nested non-scalar appears (forces block).
fn estimate_width(events: &[Event], pos: usize) -> Option<u32> {
    let mut level = 0i32;
    let mut total = 0u32;
    let mut i = pos;
    loop {
        match &events[i].data {
            EventData::SeqStart { .. } | EventData::MapStart { .. } => {
                if i != pos {
                    return None;
                }
                level += 1;
            }
            EventData::SeqEnd | EventData::MapEnd => {
                level -= 1;
                if level == 0 {
                    return Some(total);
                }
            }
            EventData::Scalar { content, .. } => {
                total += 2 + content.len() as u32;
            }
            EventData::Alias { .. } => {
                total += 6;
            }
            _ => return None,
        }
        i += 1;
        if i >= events.len() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::Mark;

    fn m() -> Mark {
        Mark::default()
    }

    #[test]
    fn presents_flat_mapping_mixed() {
        let m = m();
        let events = vec![
            Event::stream_start(m, m),
            Event::document_start(false, None, vec![], m, m),
            Event::map_start(CollectionStyle::Block, Properties::default(), m, m),
            Event::scalar(ScalarStyle::Plain, Properties::default(), "a", m, m),
            Event::scalar(ScalarStyle::Plain, Properties::default(), "b", m, m),
            Event::map_end(m, m),
            Event::document_end(false, m, m),
            Event::stream_end(m, m),
        ];
        let mut opts = PresentationOptions::default();
        opts.containers = Containers::Mixed;
        let out = present_to_string(events, &opts).unwrap();
        assert_eq!(out, "a: b\n");
    }

    #[test]
    fn presents_flat_mapping_flow() {
        let m = m();
        let events = vec![
            Event::stream_start(m, m),
            Event::document_start(false, None, vec![], m, m),
            Event::map_start(CollectionStyle::Block, Properties::default(), m, m),
            Event::scalar(ScalarStyle::Plain, Properties::default(), "a", m, m),
            Event::scalar(ScalarStyle::Plain, Properties::default(), "b", m, m),
            Event::map_end(m, m),
            Event::document_end(false, m, m),
            Event::stream_end(m, m),
        ];
        let mut opts = PresentationOptions::default();
        opts.containers = Containers::Flow;
        let out = present_to_string(events, &opts).unwrap();
        assert_eq!(out, "{a: b}\n");
    }

    #[test]
    fn json_mode_rejects_alias() {
        let m = m();
        let events = vec![
            Event::stream_start(m, m),
            Event::document_start(false, None, vec![], m, m),
            Event::alias("x", m, m),
            Event::document_end(false, m, m),
            Event::stream_end(m, m),
        ];
        let mut opts = PresentationOptions::default();
        opts.quoting = Quoting::Json;
        let err = present_to_string(events, &opts);
        assert!(err.is_err());
    }
}
