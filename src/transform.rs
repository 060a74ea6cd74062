//! Parses a complete YAML string and re-emits it, wiring a [`Parser`]
//! straight into a [`Presenter`](crate::presenter) preset without the
//! caller handling events individually. See §6.

use crate::error::StreamError;
use crate::parser::{Parser, ParserOptions};
use crate::presenter::{self, PresentationOptions};
use crate::source::StrSource;

/// Parses `input` and writes the re-presented form to `sink` under
/// `options`. When `resolve_to_core_tags` is set, untagged plain scalars are
/// annotated with their inferred core-schema tag before presentation, so the
/// output carries explicit `!!str`/`!!int`/`!!float`/`!!bool`/`!!null` tags
/// the input left implicit.
pub fn transform(
    input: &str,
    sink: &mut impl std::fmt::Write,
    options: &PresentationOptions,
    resolve_to_core_tags: bool,
) -> Result<(), StreamError> {
    let events = collect_events(input, resolve_to_core_tags)?;
    presenter::present(events, sink, options)?;
    Ok(())
}

/// As [`transform`], but returns the re-presented form directly.
pub fn transform_to_string(
    input: &str,
    options: &PresentationOptions,
    resolve_to_core_tags: bool,
) -> Result<String, StreamError> {
    let events = collect_events(input, resolve_to_core_tags)?;
    Ok(presenter::present_to_string(events, options)?)
}

fn collect_events(
    input: &str,
    resolve_to_core_tags: bool,
) -> Result<Vec<crate::Event>, StreamError> {
    let mut parser = Parser::with_options(
        StrSource::new(input),
        ParserOptions {
            resolve_core_tags: resolve_to_core_tags,
        },
    );
    let mut events = Vec::new();
    while let Some(event) = parser.next()? {
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::Containers;

    #[test]
    fn round_trips_a_flat_mapping() {
        // `transform` runs both the lexer's per-token trace and the
        // presenter's per-scalar style trace; init the test logger so
        // `cargo test -- --nocapture` surfaces them for debugging.
        let _ = env_logger::try_init();
        let out = transform_to_string("a: 1\nb: 2\n", &PresentationOptions::default(), false).unwrap();
        assert_eq!(out, "a: 1\nb: 2\n");
    }

    #[test]
    fn resolves_core_tags_when_requested() {
        let mut options = PresentationOptions::default();
        options.containers = Containers::Flow;
        let out = transform_to_string("a: 1\n", &options, true).unwrap();
        assert_eq!(out, "{a: !!int 1}\n");
    }
}
