//! Abstract character sources with one-character lookahead and line/column
//! tracking, consumed exclusively by the [`Lexer`](crate::Lexer).

mod read;
mod str_source;

pub use read::ReadSource;
pub use str_source::StrSource;

use crate::error::SourceError;
use crate::Mark;

/// A character source providing one-character lookahead and a running
/// `Mark`. The lexer is the sole owner of a `Source` for the lifetime of a
/// parse.
pub trait Source {
    /// Peek the character at the cursor without consuming it, or `None` at
    /// end of input.
    fn peek(&mut self) -> Result<Option<char>, SourceError>;

    /// Peek `n` characters ahead of the cursor (0 = same as `peek`).
    fn peek_at(&mut self, n: usize) -> Result<Option<char>, SourceError>;

    /// Consume and return the character at the cursor, advancing `mark`.
    fn advance(&mut self) -> Result<Option<char>, SourceError>;

    /// The position of the cursor.
    fn mark(&self) -> Mark;

    /// The full text of the current line, for error reporting. May be
    /// partial for an incremental source that has not buffered the whole
    /// line yet.
    fn current_line_text(&mut self) -> Result<String, SourceError>;
}
