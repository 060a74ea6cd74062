use crate::Mark;

/// Error produced by a [`Source`](crate::Source) while reading characters.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("input stream produced an invalid byte order marker")]
    InvalidBom,
    #[error("invalid UTF-8 near offset {offset}")]
    InvalidUtf8 { offset: u64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error produced by the [`Lexer`](crate::Lexer).
#[derive(Debug, thiserror::Error)]
pub enum LexerError {
    #[error("{}:{}: {problem}", mark.line, mark.column)]
    Problem {
        problem: &'static str,
        mark: Mark,
        line_text: String,
    },
    #[error("{}:{}: {problem}", mark.line, mark.column)]
    ProblemOwned {
        problem: String,
        mark: Mark,
        line_text: String,
    },
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl LexerError {
    pub(crate) fn mark(&self) -> Mark {
        match self {
            LexerError::Problem { mark, .. } | LexerError::ProblemOwned { mark, .. } => *mark,
            LexerError::Source(_) => Mark::default(),
        }
    }

    pub(crate) fn line_text(&self) -> &str {
        match self {
            LexerError::Problem { line_text, .. } | LexerError::ProblemOwned { line_text, .. } => {
                line_text
            }
            LexerError::Source(_) => "",
        }
    }
}

/// Error raised by the [`Parser`](crate::Parser).
///
/// The parser is fail-fast: once an error is raised, any events already
/// returned for the current document must be treated as invalid by the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("{}:{}: {message}", mark.line, mark.column)]
    Problem { message: String, mark: Mark, line_text: String },
    #[error("internal parser error: {0}")]
    Internal(&'static str),
    #[error(transparent)]
    Lexer(#[from] LexerError),
}

impl ParserError {
    pub(crate) fn problem(message: impl Into<String>, mark: Mark, line_text: impl Into<String>) -> Self {
        ParserError::Problem {
            message: message.into(),
            mark,
            line_text: line_text.into(),
        }
    }

    /// The position at which parsing failed, if known.
    pub fn mark(&self) -> Option<Mark> {
        match self {
            ParserError::Problem { mark, .. } => Some(*mark),
            ParserError::Internal(_) => None,
            ParserError::Lexer(e) => Some(e.mark()),
        }
    }

    /// The text of the source line at which parsing failed, if known.
    pub fn line_text(&self) -> &str {
        match self {
            ParserError::Problem { line_text, .. } => line_text,
            ParserError::Internal(_) => "",
            ParserError::Lexer(e) => e.line_text(),
        }
    }
}

/// Error raised when the presenter cannot represent an event stream under
/// `Quoting::Json`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PresenterJsonError {
    pub message: String,
}

/// Error raised when the presenter's sink fails.
#[derive(Debug, thiserror::Error)]
#[error("presenter output failed: {message}")]
pub struct PresenterOutputError {
    pub message: String,
    #[source]
    pub cause: std::io::Error,
}

/// Union of everything that can go wrong while presenting an event stream.
#[derive(Debug, thiserror::Error)]
pub enum PresenterError {
    #[error(transparent)]
    Json(#[from] PresenterJsonError),
    #[error(transparent)]
    Output(#[from] PresenterOutputError),
}

/// Error surfaced by the lazy parser/presenter iterators, wrapping whichever
/// underlying error occurred.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Presenter(#[from] PresenterError),
}

/// A non-fatal condition reported through the optional warning callback (and
/// always logged via `log::warn!` regardless of whether a callback is
/// installed).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Warning {
    /// A `%YAML` directive named a version other than `1.2`.
    UnsupportedVersion { major: i32, minor: i32, mark: Mark },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnsupportedVersion { major, minor, mark } => write!(
                f,
                "{}:{}: unsupported %YAML version {}.{}, continuing as 1.2",
                mark.line, mark.column, major, minor
            ),
        }
    }
}
