//! Normalization of stored source values.
//!
//! Stored values come in several shapes accumulated over time:
//! - a JSON-encoded array inside a string (`"[\"a\",\"b\"]"`)
//! - a plain array of strings (legacy, every entry enabled)
//! - an array of `{label, enable}` objects (current)
//!
//! Normalization never fails; anything unusable becomes an empty sequence
//! or is dropped element by element.

use serde_json::Value;

use super::types::{SourceValue, VariableItem};

/// Convert a raw stored value into an ordered item sequence.
///
/// A string is decoded as JSON first. A non-array root, or a string that is
/// not valid JSON, yields an empty sequence.
pub fn normalize(raw: &Value) -> Vec<VariableItem> {
    match raw {
        Value::String(s) => normalize_str(s),
        Value::Array(elements) => normalize_elements(elements),
        _ => Vec::new(),
    }
}

/// Normalize a JSON-encoded array string.
pub fn normalize_str(raw: &str) -> Vec<VariableItem> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(elements)) => normalize_elements(&elements),
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::trace!(error = %e, "stored value is not a JSON array");
            Vec::new()
        }
    }
}

fn normalize_elements(elements: &[Value]) -> Vec<VariableItem> {
    elements.iter().filter_map(normalize_element).collect()
}

fn normalize_element(element: &Value) -> Option<VariableItem> {
    match element {
        Value::String(s) => Some(VariableItem::enabled(s.clone())),
        Value::Object(obj) => {
            let label = obj.get("label")?.as_str()?;
            let enable = obj.get("enable")?.as_bool()?;
            Some(VariableItem::new(label, enable))
        }
        _ => None,
    }
}

/// Labels of enabled items, in their original order.
pub fn enabled_labels(items: &[VariableItem]) -> Vec<String> {
    items.iter().filter(|i| i.enable).map(|i| i.label.clone()).collect()
}

/// Decide whether a stored value can take part in combinatorial expansion.
pub fn classify_for_expansion(value: &Value) -> SourceValue {
    match value {
        Value::String(s) => SourceValue::String(s.clone()),
        Value::Array(elements) => {
            if !elements.is_empty() && elements.iter().all(Value::is_string) {
                let list = elements
                    .iter()
                    .filter_map(|e| e.as_str().map(str::to_owned))
                    .collect();
                return SourceValue::StringList(list);
            }
            let items = normalize_elements(elements);
            if items.iter().any(|i| i.enable) {
                SourceValue::ItemList(items)
            } else {
                SourceValue::Ineligible
            }
        }
        _ => SourceValue::Ineligible,
    }
}

/// Number of values `classify_for_expansion` would yield, without copying
/// any of them. `None` when the value is not eligible.
pub fn expansion_len_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(_) => Some(1),
        Value::Array(elements) => {
            if !elements.is_empty() && elements.iter().all(Value::is_string) {
                return Some(elements.len());
            }
            let enabled = elements.iter().filter(|e| is_enabled_element(e)).count();
            (enabled > 0).then_some(enabled)
        }
        _ => None,
    }
}

fn is_enabled_element(element: &Value) -> bool {
    match element {
        Value::String(_) => true,
        Value::Object(obj) => {
            obj.get("label").is_some_and(Value::is_string)
                && obj.get("enable").and_then(Value::as_bool) == Some(true)
        }
        _ => false,
    }
}
