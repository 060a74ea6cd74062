//! Knobs controlling how an event stream is rendered back to text. See §4.5.

/// Whether collections are written in block form, flow form, or a mix
/// chosen per-collection based on an estimated rendered width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Containers {
    #[default]
    Block,
    Flow,
    /// Collections under roughly 60 estimated characters are written flow;
    /// everything else is written block.
    Mixed,
}

/// Line-ending style for emitted line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Newlines {
    #[default]
    Lf,
    CrLf,
    /// `\r\n` on Windows, `\n` everywhere else.
    OsDefault,
    /// Never break lines (only meaningful with a single scalar document).
    None,
}

impl Newlines {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Newlines::Lf => "\n",
            Newlines::CrLf => "\r\n",
            Newlines::OsDefault => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Newlines::None => " ",
        }
    }
}

/// The `%YAML` directive a presented document declares, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputVersion {
    #[default]
    V1_2,
    V1_1,
    /// Omit the `%YAML` directive entirely.
    None,
}

/// When to write the `---` directives-end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DirectivesEnd {
    Always,
    #[default]
    IfNecessary,
    Never,
}

/// Forces a particular quoting style for scalars that would otherwise be
/// written plain, overriding the style-selection heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Quoting {
    #[default]
    Unset,
    /// Always double-quote non-plain-safe scalars.
    Double,
    /// Render compatible with JSON: double-quoted strings, bare
    /// `true`/`false`/`null`/numbers, flow-only containers. Aliases and
    /// non-finite floats are rejected with `PresenterJsonError`.
    Json,
}

/// Rendering configuration for [`crate::Presenter`]. `Default` matches this
/// crate's canonical preset: block containers, two-space indentation, `\n`
/// line endings, a `%YAML 1.2` directive only when the source requested a
/// non-default version, and `---` only where required to disambiguate.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PresentationOptions {
    pub containers: Containers,
    pub indentation_step: u32,
    pub newlines: Newlines,
    pub output_version: OutputVersion,
    /// Soft wrap width for plain/folded/double-quoted scalars. `0` disables
    /// wrapping.
    pub max_line_length: u32,
    pub directives_end: DirectivesEnd,
    /// Suppress anchor and tag rendering entirely (useful for diffing
    /// content without worrying about anchor-name churn).
    pub suppress_attrs: bool,
    pub quoting: Quoting,
    /// Collapse flow collections onto the narrowest line that fits, rather
    /// than the one-space-after-separator default.
    pub condense_flow: bool,
    /// Always write explicit `?`/`:` mapping-key indicators, even when a
    /// key would fit as a plain implicit key.
    pub explicit_keys: bool,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            containers: Containers::Block,
            indentation_step: 2,
            newlines: Newlines::Lf,
            output_version: OutputVersion::V1_2,
            max_line_length: 80,
            directives_end: DirectivesEnd::IfNecessary,
            suppress_attrs: false,
            quoting: Quoting::Unset,
            condense_flow: false,
            explicit_keys: false,
        }
    }
}
