//! Variable item types.

use serde::{Deserialize, Serialize};

/// A labelled value with an enable flag.
///
/// Sequences of items keep their stored order; labels need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableItem {
    pub label: String,
    pub enable: bool,
}

impl VariableItem {
    pub fn new(label: impl Into<String>, enable: bool) -> Self {
        Self { label: label.into(), enable }
    }

    /// An enabled item, the shape legacy plain-string entries map to.
    pub fn enabled(label: impl Into<String>) -> Self {
        Self::new(label, true)
    }
}

/// A stored source value, classified once by shape.
///
/// Every consumer switches on this instead of probing raw JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceValue {
    /// A bare string; expands as a single value.
    String(String),
    /// A non-empty array made only of strings.
    StringList(Vec<String>),
    /// Any other array that normalized to at least one enabled item.
    ItemList(Vec<VariableItem>),
    /// Numbers, objects, empty arrays and anything without enabled items.
    Ineligible,
}

impl SourceValue {
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !matches!(self, SourceValue::Ineligible)
    }

    /// The ordered values this source contributes to a cartesian product.
    ///
    /// Returns `None` for [`SourceValue::Ineligible`].
    #[must_use]
    pub fn expansion_values(&self) -> Option<Vec<String>> {
        match self {
            SourceValue::String(s) => Some(vec![s.clone()]),
            SourceValue::StringList(list) => Some(list.clone()),
            SourceValue::ItemList(items) => Some(super::enabled_labels(items)),
            SourceValue::Ineligible => None,
        }
    }

    /// Number of values contributed, without building them.
    #[must_use]
    pub fn expansion_len(&self) -> usize {
        match self {
            SourceValue::String(_) => 1,
            SourceValue::StringList(list) => list.len(),
            SourceValue::ItemList(items) => items.iter().filter(|i| i.enable).count(),
            SourceValue::Ineligible => 0,
        }
    }
}
