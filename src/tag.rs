//! Well-known tag URIs and the per-document `%TAG` handle registry.

/// The non-specific "unknown" tag (`?`): assigned to nodes whose resolution
/// is left to a later binding step.
pub const NON_SPECIFIC_UNKNOWN: &str = "?";
/// The non-specific "non-plain" tag (`!`): assigned to nodes written with an
/// explicit non-plain style but no explicit tag.
pub const NON_SPECIFIC_NON_PLAIN: &str = "!";

pub const STR_TAG: &str = "tag:yaml.org,2002:str";
pub const SEQ_TAG: &str = "tag:yaml.org,2002:seq";
pub const MAP_TAG: &str = "tag:yaml.org,2002:map";
pub const NULL_TAG: &str = "tag:yaml.org,2002:null";
pub const BOOL_TAG: &str = "tag:yaml.org,2002:bool";
pub const INT_TAG: &str = "tag:yaml.org,2002:int";
pub const FLOAT_TAG: &str = "tag:yaml.org,2002:float";
pub const TIMESTAMP_TAG: &str = "tag:yaml.org,2002:timestamp";
pub const BINARY_TAG: &str = "tag:yaml.org,2002:binary";
pub const OMAP_TAG: &str = "tag:yaml.org,2002:omap";
pub const PAIRS_TAG: &str = "tag:yaml.org,2002:pairs";
pub const SET_TAG: &str = "tag:yaml.org,2002:set";
pub const MERGE_TAG: &str = "tag:yaml.org,2002:merge";
pub const VALUE_TAG: &str = "tag:yaml.org,2002:value";
pub const YAML_TAG: &str = "tag:yaml.org,2002:yaml";

/// This library's own tag namespace, used by [`crate::transform`] to mark
/// nodes it could not resolve to a core tag.
pub const LIBRARY_TAG_PREFIX: &str = "tag:yaml-stream.rs,2024:";

/// Guesses the core-schema tag a plain scalar would resolve to, for
/// [`crate::parser::ParserOptions::resolve_core_tags`]. Only ever applied to
/// plain-style scalars that carry no explicit tag of their own.
pub fn resolve_core_tag(content: &str) -> &'static str {
    match content {
        "" | "~" | "null" | "Null" | "NULL" => NULL_TAG,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => BOOL_TAG,
        _ if is_core_int(content) => INT_TAG,
        _ if is_core_float(content) => FLOAT_TAG,
        _ => STR_TAG,
    }
}

fn is_core_int(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_core_float(s: &str) -> bool {
    if matches!(s, ".nan" | ".NaN" | ".NAN") {
        return true;
    }
    let rest = s.strip_prefix(['+', '-']).unwrap_or(s);
    if matches!(rest, ".inf" | ".Inf" | ".INF") {
        return true;
    }
    if !rest.contains('.') || rest.is_empty() {
        return false;
    }
    let digits_only: String = rest.chars().filter(|c| *c != '.').collect();
    !digits_only.is_empty() && digits_only.bytes().all(|b| b.is_ascii_digit())
}

/// A `%TAG` directive: `handle` (e.g. `"!!"`, `"!e!"`) maps to `prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

/// Resolves tag handles (`!`, `!!`, `!foo!`) to URI prefixes for a single
/// document. Reset at every document boundary; never shared across
/// documents or threads.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    directives: Vec<TagDirective>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            directives: vec![
                TagDirective {
                    handle: "!".to_string(),
                    prefix: "!".to_string(),
                },
                TagDirective {
                    handle: "!!".to_string(),
                    prefix: "tag:yaml.org,2002:".to_string(),
                },
            ],
        }
    }

    /// Reset to the two default handles, discarding any `%TAG` directives
    /// registered for the previous document.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Register a `%TAG` directive. Returns `false` if `handle` was already
    /// registered for this document (the caller should raise a parser
    /// error: "duplicate %TAG directive").
    pub fn register(&mut self, handle: &str, prefix: &str) -> bool {
        if self.directives.iter().any(|d| d.handle == handle) {
            return false;
        }
        self.directives.push(TagDirective {
            handle: handle.to_string(),
            prefix: prefix.to_string(),
        });
        true
    }

    /// Resolve a `handle` + `suffix` pair (e.g. `!!` + `str`) to a full tag
    /// URI. Returns `None` if `handle` is not registered.
    pub fn resolve(&self, handle: &str, suffix: &str) -> Option<String> {
        self.directives
            .iter()
            .find(|d| d.handle == handle)
            .map(|d| format!("{}{}", d.prefix, suffix))
    }

    /// All directives currently registered, in registration order (including
    /// the two defaults), for emission in `DocStart.handles`.
    pub fn directives(&self) -> &[TagDirective] {
        &self.directives
    }

    /// Directives beyond the two always-present defaults — what a presenter
    /// actually needs to (re-)emit as `%TAG` lines.
    pub fn custom_directives(&self) -> impl Iterator<Item = &TagDirective> {
        self.directives.iter().skip(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_handles_resolve() {
        let reg = TagRegistry::new();
        assert_eq!(reg.resolve("!!", "str").as_deref(), Some(STR_TAG));
        assert_eq!(reg.resolve("!", "foo").as_deref(), Some("!foo"));
        assert_eq!(reg.resolve("!x!", "foo"), None);
    }

    #[test]
    fn duplicate_handle_rejected() {
        let mut reg = TagRegistry::new();
        assert!(reg.register("!e!", "tag:example.com,2000:"));
        assert!(!reg.register("!e!", "tag:example.com,2001:"));
    }

    #[test]
    fn reset_drops_custom_handles() {
        let mut reg = TagRegistry::new();
        reg.register("!e!", "tag:example.com,2000:");
        reg.reset();
        assert_eq!(reg.resolve("!e!", "foo"), None);
    }
}
