//! A context-sensitive tokenizer: segments input into the token alphabet of
//! §4.1, tracking indentation, block-scalar headers, and flow-vs-block
//! context. Consumed exclusively by [`crate::Parser`].

mod chars;
pub mod token;

use smallvec::SmallVec;

use chars::{is_blank, is_blankz, is_break, is_flow_indicator};
pub use token::{Token, TokenData};

use crate::error::LexerError;
use crate::source::Source;
use crate::Mark;

/// Lexer lookahead is never more than a couple of tokens (a `Suffix` after
/// a `TagHandle`, a `DirectiveParam` after an unknown directive, or a
/// pushed-back `Indentation` after a block scalar) so a small inline vector
/// avoids a heap allocation for the common case.
type TokenQueue = SmallVec<[Token; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Strip,
    Clip,
    Keep,
}

/// Tokenizes a [`Source`] one token at a time. The parser drives the
/// block/flow toggle via [`Lexer::enter_flow`]/[`Lexer::exit_flow`] before
/// requesting the next token, per the design note: this is a directed
/// toggle, not two distinct lexer types.
pub struct Lexer<S> {
    source: S,
    flow_level: u32,
    queued: TokenQueue,
    pending_indentation: bool,
    last_indentation: u64,
}

impl<S: Source> Lexer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            flow_level: 0,
            queued: TokenQueue::new(),
            pending_indentation: true,
            last_indentation: 0,
        }
    }

    /// The indentation column of the line the most recently returned token
    /// started on.
    pub fn last_indentation(&self) -> u64 {
        self.last_indentation
    }

    /// Whether the lexer currently thinks it is inside flow content.
    pub fn in_flow(&self) -> bool {
        self.flow_level > 0
    }

    pub(crate) fn current_line_text(&mut self) -> String {
        self.source.current_line_text().unwrap_or_default()
    }

    pub fn enter_flow(&mut self) {
        self.flow_level += 1;
    }

    pub fn exit_flow(&mut self) {
        self.flow_level = self.flow_level.saturating_sub(1);
    }

    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        let tok = self.next_token_inner()?;
        log::trace!("{:?} at {}", tok.data, tok.start_mark);
        Ok(tok)
    }

    fn next_token_inner(&mut self) -> Result<Token, LexerError> {
        if !self.queued.is_empty() {
            return Ok(self.queued.remove(0));
        }

        self.skip_to_next_token()?;
        let start = self.source.mark();

        if self.source.peek()?.is_none() {
            return Ok(Token::new(TokenData::StreamEnd, start, start, false));
        }

        if self.pending_indentation && self.flow_level == 0 {
            self.pending_indentation = false;
            let column = start.column - 1;
            self.last_indentation = column;
            return Ok(Token::new(TokenData::Indentation { column }, start, start, false));
        }
        self.pending_indentation = false;

        if self.flow_level == 0 && start.column == 1 {
            if self.looking_at("---") && self.follows_with_blank_or_eof(3)? {
                self.advance_n(3)?;
                let end = self.source.mark();
                return Ok(Token::new(TokenData::DirectivesEnd, start, end, false));
            }
            if self.looking_at("...") && self.follows_with_blank_or_eof(3)? {
                self.advance_n(3)?;
                let end = self.source.mark();
                return Ok(Token::new(TokenData::DocumentEnd, start, end, false));
            }
        }

        let ch = self.source.peek()?.unwrap();
        match ch {
            '%' if start.column == 1 => self.scan_directive(),
            '-' if self.flow_level == 0 && self.is_seq_indicator()? => {
                self.source.advance()?;
                Ok(Token::new(TokenData::SeqItemIndicator, start, self.source.mark(), false))
            }
            '?' if self.is_key_indicator()? => {
                self.source.advance()?;
                Ok(Token::new(TokenData::MapKeyIndicator, start, self.source.mark(), false))
            }
            ':' if self.is_value_indicator()? => {
                self.source.advance()?;
                Ok(Token::new(TokenData::MapValueIndicator, start, self.source.mark(), false))
            }
            '{' => {
                self.source.advance()?;
                self.enter_flow();
                Ok(Token::new(TokenData::FlowMapStart, start, self.source.mark(), false))
            }
            '}' => {
                self.source.advance()?;
                self.exit_flow();
                Ok(Token::new(TokenData::FlowMapEnd, start, self.source.mark(), false))
            }
            '[' => {
                self.source.advance()?;
                self.enter_flow();
                Ok(Token::new(TokenData::FlowSeqStart, start, self.source.mark(), false))
            }
            ']' => {
                self.source.advance()?;
                self.exit_flow();
                Ok(Token::new(TokenData::FlowSeqEnd, start, self.source.mark(), false))
            }
            ',' if self.flow_level > 0 => {
                self.source.advance()?;
                Ok(Token::new(TokenData::FlowSeqSep, start, self.source.mark(), false))
            }
            '&' => self.scan_anchor_or_alias(false),
            '*' => self.scan_anchor_or_alias(true),
            '!' => self.scan_tag(),
            '\'' => self.scan_single_quoted(),
            '"' => self.scan_double_quoted(),
            '|' => self.scan_block_scalar(false),
            '>' => self.scan_block_scalar(true),
            _ => self.scan_plain(),
        }
    }

    // -- whitespace / comments -------------------------------------------------

    fn skip_to_next_token(&mut self) -> Result<(), LexerError> {
        loop {
            match self.source.peek()? {
                Some(' ') => {
                    self.source.advance()?;
                }
                Some('\t') => {
                    if self.pending_indentation && self.flow_level == 0 {
                        return Err(self.error("tab character used for indentation"));
                    }
                    self.source.advance()?;
                }
                Some('\r') => {
                    self.source.advance()?;
                }
                Some('\n') => {
                    self.source.advance()?;
                    self.pending_indentation = true;
                }
                Some('#') => {
                    while !matches!(self.source.peek()?, None | Some('\n')) {
                        self.source.advance()?;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_inline_blanks(&mut self) -> Result<(), LexerError> {
        while matches!(self.source.peek()?, Some(c) if is_blank(c)) {
            self.source.advance()?;
        }
        Ok(())
    }

    // -- indicators -------------------------------------------------------------

    fn is_seq_indicator(&mut self) -> Result<bool, LexerError> {
        Ok(is_blankz(self.source.peek_at(1)?))
    }

    fn is_key_indicator(&mut self) -> Result<bool, LexerError> {
        Ok(is_blankz(self.source.peek_at(1)?))
    }

    fn is_value_indicator(&mut self) -> Result<bool, LexerError> {
        let next = self.source.peek_at(1)?;
        if is_blankz(next) {
            return Ok(true);
        }
        if self.flow_level > 0 {
            if let Some(c) = next {
                if is_flow_indicator(c) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn looking_at(&mut self, s: &str) -> bool {
        for (i, expected) in s.chars().enumerate() {
            match self.source.peek_at(i) {
                Ok(Some(c)) if c == expected => continue,
                _ => return false,
            }
        }
        true
    }

    fn follows_with_blank_or_eof(&mut self, offset: usize) -> Result<bool, LexerError> {
        Ok(is_blankz(self.source.peek_at(offset)?))
    }

    fn advance_n(&mut self, n: usize) -> Result<(), LexerError> {
        for _ in 0..n {
            self.source.advance()?;
        }
        Ok(())
    }

    fn expect_char(&mut self, expected: char) -> Result<(), LexerError> {
        match self.source.advance()? {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error("unexpected character")),
        }
    }

    // -- directives ---------------------------------------------------------

    fn scan_directive(&mut self) -> Result<Token, LexerError> {
        let start = self.source.mark();
        self.source.advance()?; // '%'
        let name = self.scan_directive_name()?;
        match name.as_str() {
            "YAML" => {
                self.skip_inline_blanks()?;
                let major = self.scan_directive_number()?;
                self.expect_char('.')?;
                let minor = self.scan_directive_number()?;
                let end = self.source.mark();
                self.finish_directive_line()?;
                Ok(Token::new(TokenData::YamlDirective { major, minor }, start, end, false))
            }
            "TAG" => {
                self.skip_inline_blanks()?;
                let handle = self.scan_tag_handle_directive()?;
                self.skip_inline_blanks()?;
                let prefix = self.scan_tag_prefix()?;
                let end = self.source.mark();
                self.finish_directive_line()?;
                Ok(Token::new(TokenData::TagDirective { handle, prefix }, start, end, false))
            }
            _ => {
                self.skip_inline_blanks()?;
                let value = self.scan_directive_param()?;
                let end = self.source.mark();
                self.finish_directive_line()?;
                if !value.is_empty() {
                    self.queued
                        .push(Token::new(TokenData::DirectiveParam { value }, end, end, false));
                }
                Ok(Token::new(TokenData::UnknownDirective { name }, start, end, false))
            }
        }
    }

    fn scan_directive_name(&mut self) -> Result<String, LexerError> {
        let mut s = String::new();
        while matches!(self.source.peek()?, Some(c) if c.is_ascii_alphabetic()) {
            s.push(self.source.advance()?.unwrap());
        }
        if s.is_empty() {
            return Err(self.error("expected a directive name"));
        }
        Ok(s)
    }

    fn scan_directive_number(&mut self) -> Result<i32, LexerError> {
        let mut s = String::new();
        while matches!(self.source.peek()?, Some(c) if c.is_ascii_digit()) {
            s.push(self.source.advance()?.unwrap());
        }
        s.parse().map_err(|_| self.error("expected a decimal number"))
    }

    fn scan_directive_param(&mut self) -> Result<String, LexerError> {
        let mut s = String::new();
        while !matches!(self.source.peek()?, None | Some('\n')) {
            s.push(self.source.advance()?.unwrap());
        }
        Ok(s.trim().to_string())
    }

    fn finish_directive_line(&mut self) -> Result<(), LexerError> {
        self.skip_inline_blanks()?;
        if self.source.peek()? == Some('#') {
            while !matches!(self.source.peek()?, None | Some('\n')) {
                self.source.advance()?;
            }
        }
        match self.source.peek()? {
            None => Ok(()),
            Some(c) if is_break(c) => {
                self.source.advance()?;
                Ok(())
            }
            _ => Err(self.error("unexpected character in directive")),
        }
    }

    fn scan_tag_handle_directive(&mut self) -> Result<String, LexerError> {
        self.expect_char('!')?;
        let mut s = String::from("!");
        loop {
            match self.source.peek()? {
                Some(c) if c.is_ascii_alphanumeric() || c == '-' => {
                    s.push(c);
                    self.source.advance()?;
                }
                Some('!') => {
                    s.push('!');
                    self.source.advance()?;
                    break;
                }
                _ => break,
            }
        }
        Ok(s)
    }

    fn scan_tag_prefix(&mut self) -> Result<String, LexerError> {
        if self.source.peek()? == Some('!') {
            let mut s = String::new();
            while matches!(self.source.peek()?, Some(c) if !is_blankz(Some(c))) {
                s.push(self.source.advance()?.unwrap());
            }
            Ok(s)
        } else {
            self.scan_uri()
        }
    }

    fn scan_uri(&mut self) -> Result<String, LexerError> {
        let mut s = String::new();
        loop {
            match self.source.peek()? {
                Some(c) if is_uri_char(c) => {
                    s.push(c);
                    self.source.advance()?;
                }
                Some('%') => {
                    s.push('%');
                    self.source.advance()?;
                    for _ in 0..2 {
                        match self.source.peek()? {
                            Some(c) if c.is_ascii_hexdigit() => {
                                s.push(c);
                                self.source.advance()?;
                            }
                            _ => return Err(self.error("invalid %-escape in URI")),
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(s)
    }

    // -- anchors, aliases, tags -----------------------------------------------

    fn scan_anchor_or_alias(&mut self, is_alias: bool) -> Result<Token, LexerError> {
        let start = self.source.mark();
        self.source.advance()?; // '&' or '*'
        let mut name = String::new();
        loop {
            match self.source.peek()? {
                Some(c) if !is_blankz(Some(c)) && !is_flow_indicator(c) && c != ':' => {
                    name.push(c);
                    self.source.advance()?;
                }
                _ => break,
            }
        }
        if name.is_empty() {
            return Err(self.error_at(start, "expected an anchor or alias name"));
        }
        let end = self.source.mark();
        let data = if is_alias {
            TokenData::Alias { name }
        } else {
            TokenData::Anchor { name }
        };
        Ok(Token::new(data, start, end, false))
    }

    fn scan_tag(&mut self) -> Result<Token, LexerError> {
        let start = self.source.mark();
        self.source.advance()?; // '!'

        if self.source.peek()? == Some('<') {
            self.source.advance()?;
            let uri = self.scan_uri()?;
            self.expect_char('>')?;
            let end = self.source.mark();
            return Ok(Token::new(TokenData::VerbatimTag { uri }, start, end, false));
        }

        let mut handle_len = 0usize;
        let mut has_closing_bang = false;
        loop {
            match self.source.peek_at(handle_len)? {
                Some(c) if c.is_ascii_alphanumeric() || c == '-' => handle_len += 1,
                Some('!') => {
                    handle_len += 1;
                    has_closing_bang = true;
                    break;
                }
                _ => break,
            }
        }

        let mut handle = String::from("!");
        if has_closing_bang {
            for _ in 0..handle_len {
                handle.push(self.source.advance()?.unwrap());
            }
        }
        let handle_end = self.source.mark();
        let suffix = self.scan_uri()?;
        let end = self.source.mark();

        if suffix.is_empty() {
            return Ok(Token::new(TokenData::TagHandle { handle }, start, handle_end, false));
        }
        self.queued
            .push(Token::new(TokenData::Suffix { suffix }, handle_end, end, false));
        Ok(Token::new(TokenData::TagHandle { handle }, start, handle_end, false))
    }

    // -- scalars --------------------------------------------------------------

    fn scan_plain(&mut self) -> Result<Token, LexerError> {
        let start = self.source.mark();
        let start_indent = self.last_indentation;
        let in_flow = self.flow_level > 0;
        let mut value = String::new();
        let mut multiline = false;
        let mut first = true;

        loop {
            let mut line = String::new();
            loop {
                match self.source.peek()? {
                    None => break,
                    Some(c) if is_break(c) => break,
                    Some('#') if line.ends_with(' ') || line.is_empty() => break,
                    Some(':') => {
                        let next = self.source.peek_at(1)?;
                        if is_blankz(next) {
                            break;
                        }
                        if in_flow && next.map(is_flow_indicator).unwrap_or(false) {
                            break;
                        }
                        line.push(':');
                        self.source.advance()?;
                    }
                    Some(c) if in_flow && is_flow_indicator(c) => break,
                    Some(c) => {
                        line.push(c);
                        self.source.advance()?;
                    }
                }
            }
            let trimmed = line.trim_end_matches(' ');
            if !first && !value.is_empty() {
                // separator already inserted below before appending
            }
            value.push_str(trimmed);
            first = false;

            match self.source.peek()? {
                None => break,
                Some(c) if !is_break(c) => break,
                _ => {}
            }

            let mut newlines = 0u32;
            loop {
                match self.source.peek()? {
                    Some(c) if is_break(c) => {
                        self.source.advance()?;
                        newlines += 1;
                    }
                    Some(' ') | Some('\t') => {
                        self.source.advance()?;
                    }
                    _ => break,
                }
            }
            match self.source.peek()? {
                None => break,
                Some(_) if !in_flow && (self.source.mark().column as i64 - 1) <= start_indent as i64 => {
                    break;
                }
                _ => {}
            }
            if newlines == 0 {
                break;
            }
            multiline = true;
            if newlines == 1 {
                value.push(' ');
            } else {
                for _ in 0..(newlines - 1) {
                    value.push('\n');
                }
            }
        }

        let end = self.source.mark();
        Ok(Token::new(TokenData::Plain { value }, start, end, multiline))
    }

    fn fold_line_break_into(&mut self, value: &mut String) -> Result<(), LexerError> {
        let mut breaks = 0u32;
        loop {
            match self.source.peek()? {
                Some(c) if is_break(c) => {
                    self.source.advance()?;
                    breaks += 1;
                }
                Some(' ') | Some('\t') => {
                    self.source.advance()?;
                }
                _ => break,
            }
        }
        if breaks == 1 {
            value.push(' ');
        } else {
            for _ in 0..breaks.saturating_sub(1) {
                value.push('\n');
            }
        }
        Ok(())
    }

    fn scan_single_quoted(&mut self) -> Result<Token, LexerError> {
        let start = self.source.mark();
        self.source.advance()?; // opening '
        let mut value = String::new();
        let mut multiline = false;
        loop {
            match self.source.peek()? {
                None => return Err(self.error_at(start, "unterminated single-quoted scalar")),
                Some('\'') => {
                    self.source.advance()?;
                    if self.source.peek()? == Some('\'') {
                        value.push('\'');
                        self.source.advance()?;
                    } else {
                        break;
                    }
                }
                Some(c) if is_break(c) => {
                    multiline = true;
                    self.fold_line_break_into(&mut value)?;
                }
                Some(c) if is_blank(c) => {
                    let mut run = String::new();
                    while matches!(self.source.peek()?, Some(ch) if is_blank(ch)) {
                        run.push(self.source.advance()?.unwrap());
                    }
                    if matches!(self.source.peek()?, Some(ch) if is_break(ch)) {
                        multiline = true;
                        self.fold_line_break_into(&mut value)?;
                    } else {
                        value.push_str(&run);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.source.advance()?;
                }
            }
        }
        let end = self.source.mark();
        Ok(Token::new(TokenData::SingleQuoted { value }, start, end, multiline))
    }

    fn scan_double_quoted(&mut self) -> Result<Token, LexerError> {
        let start = self.source.mark();
        self.source.advance()?; // opening "
        let mut value = String::new();
        let mut multiline = false;
        loop {
            match self.source.peek()? {
                None => return Err(self.error_at(start, "unterminated double-quoted scalar")),
                Some('"') => {
                    self.source.advance()?;
                    break;
                }
                Some('\\') => {
                    self.source.advance()?;
                    match self.source.peek()? {
                        Some(c) if is_break(c) => {
                            self.source.advance()?;
                            while matches!(self.source.peek()?, Some(ch) if is_blank(ch)) {
                                self.source.advance()?;
                            }
                            multiline = true;
                        }
                        Some(esc) => {
                            value.push(self.decode_escape(esc)?);
                        }
                        None => return Err(self.error_at(start, "unterminated escape sequence")),
                    }
                }
                Some(c) if is_break(c) => {
                    multiline = true;
                    self.fold_line_break_into(&mut value)?;
                }
                Some(c) if is_blank(c) => {
                    let mut run = String::new();
                    while matches!(self.source.peek()?, Some(ch) if is_blank(ch)) {
                        run.push(self.source.advance()?.unwrap());
                    }
                    if matches!(self.source.peek()?, Some(ch) if is_break(ch)) {
                        multiline = true;
                        self.fold_line_break_into(&mut value)?;
                    } else {
                        value.push_str(&run);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.source.advance()?;
                }
            }
        }
        let end = self.source.mark();
        Ok(Token::new(TokenData::DoubleQuoted { value }, start, end, multiline))
    }

    fn decode_escape(&mut self, esc: char) -> Result<char, LexerError> {
        self.source.advance()?; // consume the escape character itself
        Ok(match esc {
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            't' | '\t' => '\t',
            'n' => '\n',
            'v' => '\u{B}',
            'f' => '\u{C}',
            'r' => '\r',
            'e' => '\u{1B}',
            ' ' => ' ',
            '"' => '"',
            '/' => '/',
            '\\' => '\\',
            'N' => '\u{85}',
            '_' => '\u{A0}',
            'L' => '\u{2028}',
            'P' => '\u{2029}',
            'x' => return self.scan_hex_escape(2),
            'u' => return self.scan_hex_escape(4),
            'U' => return self.scan_hex_escape(8),
            _ => return Err(self.error("unknown escape character")),
        })
    }

    fn scan_hex_escape(&mut self, n: usize) -> Result<char, LexerError> {
        let mut code: u32 = 0;
        for _ in 0..n {
            let c = self
                .source
                .advance()?
                .ok_or_else(|| self.error_static("truncated hex escape"))?;
            let d = c
                .to_digit(16)
                .ok_or_else(|| self.error_static("invalid hex digit in escape"))?;
            code = code * 16 + d;
        }
        char::from_u32(code).ok_or_else(|| self.error_static("escape does not encode a valid unicode scalar value"))
    }

    fn scan_block_scalar(&mut self, folded: bool) -> Result<Token, LexerError> {
        let start = self.source.mark();
        self.source.advance()?; // '|' or '>'

        let mut chomping = Chomping::Clip;
        let mut explicit_indent: Option<u64> = None;
        for _ in 0..2 {
            match self.source.peek()? {
                Some('+') if chomping == Chomping::Clip => {
                    chomping = Chomping::Keep;
                    self.source.advance()?;
                }
                Some('-') if chomping == Chomping::Clip => {
                    chomping = Chomping::Strip;
                    self.source.advance()?;
                }
                Some(c) if c.is_ascii_digit() && c != '0' && explicit_indent.is_none() => {
                    explicit_indent = c.to_digit(10).map(u64::from);
                    self.source.advance()?;
                }
                _ => break,
            }
        }

        self.skip_inline_blanks()?;
        if self.source.peek()? == Some('#') {
            while !matches!(self.source.peek()?, None | Some('\n')) {
                self.source.advance()?;
            }
        }
        match self.source.peek()? {
            None => {}
            Some(c) if is_break(c) => {
                self.source.advance()?;
            }
            _ => return Err(self.error_at(start, "invalid block scalar header")),
        }

        let parent_indent = self.last_indentation;
        let mut required_indent: Option<u64> = explicit_indent.map(|d| parent_indent + d);
        let mut lines: Vec<(u64, String)> = Vec::new();
        let mut ended_indent: Option<u64> = None;

        loop {
            if self.source.peek()?.is_none() {
                break;
            }
            let mut indent = 0u64;
            loop {
                if self.source.peek()? != Some(' ') {
                    break;
                }
                if let Some(r) = required_indent {
                    if indent >= r {
                        break;
                    }
                }
                indent += 1;
                self.source.advance()?;
            }
            match self.source.peek()? {
                None => {
                    lines.push((indent, String::new()));
                    break;
                }
                Some(c) if is_break(c) => {
                    self.source.advance()?;
                    lines.push((indent, String::new()));
                    continue;
                }
                _ => {}
            }
            if required_indent.is_none() {
                required_indent = Some(indent.max(parent_indent + 1));
            }
            let req = required_indent.unwrap();
            if indent < req {
                ended_indent = Some(indent);
                break;
            }
            let mut content = String::new();
            for _ in 0..(indent - req) {
                content.push(' ');
            }
            loop {
                match self.source.peek()? {
                    None => break,
                    Some(c) if is_break(c) => break,
                    Some(c) => {
                        content.push(c);
                        self.source.advance()?;
                    }
                }
            }
            let had_break = matches!(self.source.peek()?, Some(c) if is_break(c));
            if had_break {
                self.source.advance()?;
            }
            lines.push((req, content));
            if !had_break {
                break;
            }
        }

        if let Some(indent) = ended_indent {
            self.last_indentation = indent;
            let here = self.source.mark();
            self.queued
                .insert(0, Token::new(TokenData::Indentation { column: indent }, here, here, false));
        } else {
            self.pending_indentation = true;
        }

        let mut trailing_blanks = 0usize;
        for (_, content) in lines.iter().rev() {
            if content.is_empty() {
                trailing_blanks += 1;
            } else {
                break;
            }
        }
        let content_lines = &lines[..lines.len() - trailing_blanks];
        let req = required_indent.unwrap_or(parent_indent + 1);

        let mut value = String::new();
        if folded {
            let mut prev_blank = true;
            let mut prev_indented = false;
            for (i, (indent, content)) in content_lines.iter().enumerate() {
                let is_blank_line = content.is_empty();
                let is_indented = *indent > req;
                if i > 0 {
                    if is_blank_line || prev_blank || is_indented || prev_indented {
                        value.push('\n');
                    } else {
                        value.push(' ');
                    }
                }
                value.push_str(content);
                prev_blank = is_blank_line;
                prev_indented = is_indented;
            }
        } else {
            for (i, (_, content)) in content_lines.iter().enumerate() {
                if i > 0 {
                    value.push('\n');
                }
                value.push_str(content);
            }
        }

        match chomping {
            Chomping::Strip => {}
            Chomping::Clip => {
                if !content_lines.is_empty() {
                    value.push('\n');
                }
            }
            Chomping::Keep => {
                if !content_lines.is_empty() {
                    value.push('\n');
                }
                for _ in 0..trailing_blanks {
                    value.push('\n');
                }
            }
        }

        let end = self.source.mark();
        let data = if folded {
            TokenData::Folded { value }
        } else {
            TokenData::Literal { value }
        };
        Ok(Token::new(data, start, end, true))
    }

    // -- error helpers --------------------------------------------------------

    fn error(&mut self, problem: &'static str) -> LexerError {
        let mark = self.source.mark();
        self.error_at(mark, problem)
    }

    fn error_static(&mut self, problem: &'static str) -> LexerError {
        self.error(problem)
    }

    fn error_at(&mut self, mark: Mark, problem: &'static str) -> LexerError {
        let line_text = self.source.current_line_text().unwrap_or_default();
        LexerError::Problem {
            problem,
            mark,
            line_text,
        }
    }
}

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-;/?:@&=+$,_.!~*'()[]".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn tokens(input: &str) -> Vec<TokenData> {
        let mut lexer = Lexer::new(StrSource::new(input));
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().expect("lex ok");
            let is_end = matches!(tok.data, TokenData::StreamEnd);
            out.push(tok.data);
            if is_end {
                break;
            }
        }
        out
    }

    #[test]
    fn scans_simple_mapping() {
        let toks = tokens("a: 1\n");
        assert!(matches!(toks[0], TokenData::Indentation { column: 0 }));
        assert!(matches!(&toks[1], TokenData::Plain { value } if value == "a"));
        assert!(matches!(toks[2], TokenData::MapValueIndicator));
        assert!(matches!(&toks[3], TokenData::Plain { value } if value == "1"));
    }

    #[test]
    fn scans_flow_collection() {
        let toks = tokens("[1, 2]\n");
        assert!(matches!(toks[1], TokenData::FlowSeqStart));
        assert!(matches!(&toks[2], TokenData::Plain { value } if value == "1"));
        assert!(matches!(toks[3], TokenData::FlowSeqSep));
    }

    #[test]
    fn literal_block_scalar_preserves_breaks() {
        let toks = tokens(indoc::indoc! {"
            a: |
              one
              two
        "});
        let lit = toks.iter().find_map(|t| match t {
            TokenData::Literal { value } => Some(value.clone()),
            _ => None,
        });
        assert_eq!(lit.as_deref(), Some("one\ntwo\n"));
    }

    #[test]
    fn folded_block_scalar_joins_lines() {
        let toks = tokens("a: >\n  one\n  two\n");
        let folded = toks.iter().find_map(|t| match t {
            TokenData::Folded { value } => Some(value.clone()),
            _ => None,
        });
        assert_eq!(folded.as_deref(), Some("one two\n"));
    }

    #[test]
    fn tab_in_indentation_is_an_error() {
        let mut lexer = Lexer::new(StrSource::new("\tfoo: bar\n"));
        assert!(lexer.next_token().is_err());
    }
}
