//! Reference parser.
//!
//! Recognizes:
//! - `{{source:name}}`, `{{user:name}}`, `{{workspace:name}}`, `{{stack:name}}`
//! - `{{source:name[2]}}` (array index)
//! - `{{source:name.a.b}}` (property path)
//!
//! Anything else between braces is not a reference and stays literal text.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::sources::Scope;

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{\{(source|user|workspace|stack):([A-Za-z_][A-Za-z0-9_-]*)(?:\[([0-9]+)\]|((?:\.[A-Za-z_][A-Za-z0-9_]*)+))?\}\}",
    )
    .expect("valid regex")
});

/// One parsed `{{scope:name...}}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub scope: Scope,
    pub name: String,
    pub index: Option<usize>,
    pub path: Vec<String>,
}

impl Reference {
    pub fn new(scope: Scope, name: impl Into<String>) -> Self {
        Self { scope, name: name.into(), index: None, path: Vec::new() }
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{{{}:{}", self.scope.token(), self.name)?;
        if let Some(i) = self.index {
            write!(f, "[{i}]")?;
        }
        for seg in &self.path {
            write!(f, ".{seg}")?;
        }
        f.write_str("}}")
    }
}

/// A reference together with where it sits in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub reference: Reference,
    /// Byte range of the whole `{{...}}` occurrence.
    pub span: Range<usize>,
}

/// Extract every reference in `text`, in order, duplicates included.
///
/// Single pass and non-recursive. The first `}}` after an opening `{{`
/// closes the occurrence. Malformed occurrences are skipped, never an error.
pub fn parse(text: &str) -> Vec<Located> {
    REFERENCE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let scope = Scope::from_token(&caps[1])?;
            let mut reference = Reference::new(scope, &caps[2]);

            if let Some(idx) = caps.get(3) {
                // Indices too large for usize are treated as malformed.
                reference.index = Some(idx.as_str().parse().ok()?);
            }
            if let Some(path) = caps.get(4) {
                reference.path =
                    path.as_str().split('.').skip(1).map(str::to_owned).collect();
            }

            Some(Located { reference, span: whole.range() })
        })
        .collect()
}

/// Unique `(scope, name)` pairs in first-occurrence order.
pub fn referenced_sources(text: &str) -> Vec<(Scope, String)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for located in parse(text) {
        let key = (located.reference.scope, located.reference.name);
        if seen.insert(key.clone()) {
            out.push(key);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn refs(text: &str) -> Vec<Reference> {
        parse(text).into_iter().map(|l| l.reference).collect()
    }

    #[test]
    fn test_parse_all_scopes() {
        let text = "{{source:a}} {{user:b}} {{workspace:c}} {{stack:d}}";
        assert_eq!(
            refs(text),
            vec![
                Reference::new(Scope::Ambient, "a"),
                Reference::new(Scope::User, "b"),
                Reference::new(Scope::Workspace, "c"),
                Reference::new(Scope::Stack, "d"),
            ]
        );
    }

    #[test]
    fn test_parse_index_and_path() {
        assert_eq!(
            refs("{{source:list[10]}}"),
            vec![Reference::new(Scope::Ambient, "list").with_index(10)]
        );
        assert_eq!(
            refs("{{stack:cfg.model.name}}"),
            vec![Reference::new(Scope::Stack, "cfg").with_path(["model", "name"])]
        );
    }

    #[test]
    fn test_spans_cover_occurrence() {
        let text = "Hi {{source:name}}!";
        let parsed = parse(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(&text[parsed[0].span.clone()], "{{source:name}}");
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let parsed = refs("{{source:a}}{{source:b}}{{source:a}}");
        let names: Vec<_> = parsed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[rstest]
    #[case::unknown_scope("{{global:a}}")]
    #[case::empty_name("{{source:}}")]
    #[case::unterminated("{{source:a")]
    #[case::single_close("{{source:a}")]
    #[case::spaces("{{ source:a }}")]
    #[case::bad_index("{{source:a[-1]}}")]
    #[case::empty_index("{{source:a[]}}")]
    #[case::trailing_dot("{{source:a.}}")]
    #[case::index_overflow("{{source:a[99999999999999999999999]}}")]
    #[case::plain_var("{{title}}")]
    fn test_malformed_is_not_a_reference(#[case] text: &str) {
        assert!(parse(text).is_empty(), "{text}");
    }

    #[test]
    fn test_first_close_wins() {
        let parsed = parse("{{source:a}}}}");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].span, 0..12);
    }

    #[test]
    fn test_extra_opening_braces_are_literal() {
        let text = "{{{{source:a}}";
        let parsed = parse(text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].span, 2..14);
    }

    #[test]
    fn test_display_round_trips_text() {
        for text in ["{{source:a}}", "{{stack:b[3]}}", "{{user:c.d.e}}"] {
            assert_eq!(refs(text)[0].to_string(), text);
        }
    }

    #[test]
    fn test_referenced_sources_unique() {
        let text = "{{source:a}} {{stack:a}} {{source:a[1]}} {{source:b.x}}";
        assert_eq!(
            referenced_sources(text),
            vec![
                (Scope::Ambient, "a".to_string()),
                (Scope::Stack, "a".to_string()),
                (Scope::Ambient, "b".to_string()),
            ]
        );
    }
}
