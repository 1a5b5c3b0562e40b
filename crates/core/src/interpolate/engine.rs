//! Interpolation engine.
//!
//! Each reference renders to an explicit [`RenderOutcome`]. Only
//! [`interpolate_with`] turns those into text, and every outcome other than
//! `Resolved` keeps the original `{{...}}` occurrence in place. The output
//! is never re-scanned, so resolved values containing `{{...}}` stay as-is.

use serde_json::Value;

use crate::items::{enabled_labels, normalize};
use crate::references::{Reference, parse};
use crate::sources::SourceLookup;

/// Separator used when an array is referenced without an index.
pub const DEFAULT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolateOptions {
    pub separator: String,
}

impl Default for InterpolateOptions {
    fn default() -> Self {
        Self { separator: DEFAULT_SEPARATOR.to_string() }
    }
}

impl InterpolateOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self { separator: separator.into() }
    }
}

/// Result of rendering one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Resolved(String),
    /// No source with that name at the requested scope.
    NotFound,
    IndexOutOfRange { index: usize, len: usize },
    /// A path segment that does not exist.
    MissingPath(String),
    /// A string value that had to be decoded as JSON and was not valid JSON.
    ParseFailed,
    /// The value's shape does not fit the reference (index into an object,
    /// path into an array, bare object, null).
    Unrenderable,
}

impl RenderOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, RenderOutcome::Resolved(_))
    }

    /// Text to substitute, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            RenderOutcome::Resolved(s) => Some(s),
            _ => None,
        }
    }
}

/// Substitute every reference in `text` with the default separator.
pub fn interpolate<L: SourceLookup + ?Sized>(text: &str, lookup: &L) -> String {
    interpolate_with(text, lookup, &InterpolateOptions::default())
}

/// Substitute every reference in `text`.
///
/// Pure and total: unresolved or unrenderable references are left literal.
pub fn interpolate_with<L: SourceLookup + ?Sized>(
    text: &str,
    lookup: &L,
    opts: &InterpolateOptions,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for located in parse(text) {
        out.push_str(&text[last..located.span.start]);
        let literal = &text[located.span.clone()];

        match render_reference(&located.reference, lookup, opts) {
            RenderOutcome::Resolved(s) => out.push_str(&s),
            other => {
                tracing::trace!(reference = literal, outcome = ?other, "left literal");
                out.push_str(literal);
            }
        }
        last = located.span.end;
    }

    out.push_str(&text[last..]);
    out
}

/// Resolve and render a single reference.
pub fn render_reference<L: SourceLookup + ?Sized>(
    reference: &Reference,
    lookup: &L,
    opts: &InterpolateOptions,
) -> RenderOutcome {
    match lookup.lookup_reference(reference) {
        Some(value) => render_value(value, reference, opts),
        None => RenderOutcome::NotFound,
    }
}

/// Render a resolved value according to the reference's suffix.
pub fn render_value(
    value: &Value,
    reference: &Reference,
    opts: &InterpolateOptions,
) -> RenderOutcome {
    let has_suffix = reference.index.is_some() || !reference.path.is_empty();

    if let Value::String(s) = value {
        if !has_suffix {
            return RenderOutcome::Resolved(s.clone());
        }
        // Legacy storage keeps structured values JSON-encoded in a string.
        return match serde_json::from_str::<Value>(s) {
            Ok(decoded) if !decoded.is_string() => render_structured(&decoded, reference, opts),
            Ok(_) => RenderOutcome::Unrenderable,
            Err(_) => RenderOutcome::ParseFailed,
        };
    }

    render_structured(value, reference, opts)
}

fn render_structured(
    value: &Value,
    reference: &Reference,
    opts: &InterpolateOptions,
) -> RenderOutcome {
    if let Some(index) = reference.index {
        return match value {
            Value::Array(elements) => match elements.get(index) {
                Some(element) => render_element(element),
                None => RenderOutcome::IndexOutOfRange { index, len: elements.len() },
            },
            _ => RenderOutcome::Unrenderable,
        };
    }

    if !reference.path.is_empty() {
        if !value.is_object() {
            return RenderOutcome::Unrenderable;
        }
        let mut current = value;
        for segment in &reference.path {
            match current.get(segment) {
                Some(next) => current = next,
                None => return RenderOutcome::MissingPath(segment.clone()),
            }
        }
        return render_leaf(current, opts);
    }

    match value {
        Value::Object(_) => RenderOutcome::Unrenderable,
        other => render_leaf(other, opts),
    }
}

/// Text for a value reached by a path, or referenced bare.
fn render_leaf(value: &Value, opts: &InterpolateOptions) -> RenderOutcome {
    match value {
        Value::String(s) => RenderOutcome::Resolved(s.clone()),
        Value::Number(n) => RenderOutcome::Resolved(n.to_string()),
        Value::Bool(b) => RenderOutcome::Resolved(b.to_string()),
        Value::Array(_) => {
            let labels = enabled_labels(&normalize(value));
            RenderOutcome::Resolved(labels.join(opts.separator.as_str()))
        }
        Value::Object(_) => RenderOutcome::Resolved(value.to_string()),
        Value::Null => RenderOutcome::Unrenderable,
    }
}

/// Text for one array element picked by index. Enable flags are ignored.
fn render_element(element: &Value) -> RenderOutcome {
    match element {
        Value::String(s) => RenderOutcome::Resolved(s.clone()),
        Value::Number(n) => RenderOutcome::Resolved(n.to_string()),
        Value::Bool(b) => RenderOutcome::Resolved(b.to_string()),
        Value::Object(obj) => match obj.get("label").and_then(Value::as_str) {
            Some(label) => RenderOutcome::Resolved(label.to_string()),
            None => RenderOutcome::Unrenderable,
        },
        _ => RenderOutcome::Unrenderable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{Scope, SourceMap};
    use rstest::rstest;
    use serde_json::json;

    fn map() -> SourceMap {
        SourceMap::new()
            .with(Scope::Stack, "name", json!("World"))
            .with(Scope::Stack, "tones", json!(["calm", "bold"]))
            .with(
                Scope::Stack,
                "items",
                json!([
                    {"label": "one", "enable": true},
                    {"label": "two", "enable": false},
                    {"label": "three", "enable": true}
                ]),
            )
            .with(Scope::Workspace, "cfg", json!({"model": {"name": "big", "size": 7}}))
            .with(Scope::User, "legacy", json!(r#"["x","y"]"#))
            .with(Scope::User, "count", json!(3))
            .with(Scope::User, "nothing", Value::Null)
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(interpolate("Hello {{source:name}}!", &map()), "Hello World!");
    }

    #[test]
    fn test_missing_is_left_literal() {
        let text = "Hi {{source:missing}} and {{user:name}}";
        assert_eq!(interpolate(text, &map()), text);
    }

    #[rstest]
    #[case::list_join("{{source:tones}}", "calm, bold")]
    #[case::item_join("{{source:items}}", "one, three")]
    #[case::index("{{source:tones[1]}}", "bold")]
    #[case::index_ignores_enable("{{source:items[1]}}", "two")]
    #[case::path("{{workspace:cfg.model.name}}", "big")]
    #[case::path_number("{{source:cfg.model.size}}", "7")]
    #[case::path_object("{{source:cfg.model}}", r#"{"name":"big","size":7}"#)]
    #[case::legacy_join("{{source:legacy}}", r#"["x","y"]"#)]
    #[case::legacy_index("{{source:legacy[0]}}", "x")]
    #[case::number("{{source:count}}", "3")]
    fn test_render_shapes(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(interpolate(text, &map()), expected);
    }

    #[rstest]
    #[case::index_out_of_range("{{source:tones[2]}}")]
    #[case::missing_segment("{{source:cfg.model.colour}}")]
    #[case::path_on_array("{{source:tones.first}}")]
    #[case::index_on_object("{{source:cfg[0]}}")]
    #[case::bare_object("{{source:cfg}}")]
    #[case::null_value("{{source:nothing}}")]
    #[case::path_on_plain_string("{{source:name.first}}")]
    #[case::index_on_number("{{source:count[0]}}")]
    fn test_failures_leave_literal(#[case] text: &str) {
        let input = format!("before {text} after");
        assert_eq!(interpolate(&input, &map()), input);
    }

    #[test]
    fn test_outcomes_are_explicit() {
        let opts = InterpolateOptions::default();
        let m = map();
        let r = |t: &str| parse(t).remove(0).reference;

        assert_eq!(render_reference(&r("{{source:nope}}"), &m, &opts), RenderOutcome::NotFound);
        assert_eq!(
            render_reference(&r("{{source:tones[5]}}"), &m, &opts),
            RenderOutcome::IndexOutOfRange { index: 5, len: 2 }
        );
        assert_eq!(
            render_reference(&r("{{source:cfg.model.colour}}"), &m, &opts),
            RenderOutcome::MissingPath("colour".into())
        );
        assert_eq!(
            render_reference(&r("{{source:name[0]}}"), &m, &opts),
            RenderOutcome::ParseFailed
        );
    }

    #[test]
    fn test_no_references_is_identity() {
        for text in ["", "plain", "{{ not a ref }}", "{{source:}}", "{single}", "日本語 {{"] {
            assert_eq!(interpolate(text, &map()), text);
        }
    }

    #[test]
    fn test_single_pass() {
        let m = SourceMap::new()
            .with(Scope::Stack, "a", json!("{{source:b}}"))
            .with(Scope::Stack, "b", json!("deep"));
        assert_eq!(interpolate("{{source:a}}", &m), "{{source:b}}");
    }

    #[test]
    fn test_custom_separator() {
        let opts = InterpolateOptions::with_separator(" | ");
        assert_eq!(interpolate_with("{{source:tones}}", &map(), &opts), "calm | bold");
    }

    #[test]
    fn test_repeated_references_all_substituted() {
        assert_eq!(
            interpolate("{{source:name}}-{{stack:name}}-{{source:name}}", &map()),
            "World-World-World"
        );
    }

    #[test]
    fn test_multibyte_surroundings() {
        assert_eq!(interpolate("¡Hola {{source:name}}! ✨", &map()), "¡Hola World! ✨");
    }
}
