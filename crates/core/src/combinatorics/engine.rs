//! Cartesian expansion over named sources.
//!
//! Sources are classified once; ineligible ones are dropped entirely and
//! never appear as a key in any assignment. With no eligible source the
//! result is empty, not a single empty assignment.
//!
//! Output order: sources are folded in input order with existing
//! assignments as the outer loop, so the last source varies fastest.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::items::{classify_for_expansion, expansion_len_of};

/// A named source with its raw stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSource {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl NamedSource {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self { name: name.into(), value }
    }
}

/// One full assignment: exactly one chosen value per participating source,
/// kept in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinatoricResult(Vec<(String, String)>);

impl CombinatoricResult {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Set `name`, replacing an earlier value for the same name.
    fn with(&self, name: &str, value: &str) -> Self {
        let mut next: Vec<(String, String)> =
            self.0.iter().filter(|(n, _)| n != name).cloned().collect();
        next.push((name.to_string(), value.to_string()));
        Self(next)
    }
}

impl Serialize for CombinatoricResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<S: Into<String>, V: Into<String>> FromIterator<(S, V)> for CombinatoricResult {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut out = Self::default();
        for (n, v) in iter {
            let (n, v): (String, String) = (n.into(), v.into());
            out = out.with(&n, &v);
        }
        out
    }
}

/// Number of combinations `generate` would produce, without building any.
///
/// Only lengths are inspected, nothing is copied. Saturates at `usize::MAX`.
pub fn count(sources: &[NamedSource]) -> usize {
    let mut any = false;
    let mut total: usize = 1;
    for len in sources.iter().filter_map(|s| expansion_len_of(&s.value)) {
        any = true;
        total = total.saturating_mul(len);
    }
    if any { total } else { 0 }
}

/// Every combination across the eligible sources.
///
/// Callers must check [`count`] against their own ceiling first; there is
/// no upper bound here.
pub fn generate(sources: &[NamedSource]) -> Vec<CombinatoricResult> {
    let eligible: Vec<(&str, Vec<String>)> = sources
        .iter()
        .filter_map(|s| {
            classify_for_expansion(&s.value)
                .expansion_values()
                .map(|values| (s.name.as_str(), values))
        })
        .collect();

    if eligible.is_empty() {
        return Vec::new();
    }

    let mut working = vec![CombinatoricResult::default()];
    for (name, values) in &eligible {
        let mut next = Vec::with_capacity(working.len() * values.len());
        for existing in &working {
            for value in values {
                next.push(existing.with(name, value));
            }
        }
        working = next;
    }
    working
}
