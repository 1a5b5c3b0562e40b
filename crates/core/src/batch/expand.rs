//! Batch prompt generation.
//!
//! One template, a set of named multi-valued sources, and a ceiling. The
//! combination count is checked before anything is generated; exceeding the
//! ceiling is the only failure this module reports.

use serde::Serialize;
use thiserror::Error;

use crate::combinatorics::{CombinatoricResult, NamedSource, count, generate};
use crate::interpolate::{InterpolateOptions, interpolate_with};
use crate::sources::{Layered, SourceLookup};

/// Default ceiling on combinations per batch.
pub const DEFAULT_MAX_COMBINATIONS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("batch would generate {count} prompts, above the limit of {limit}")]
    TooManyCombinations { count: usize, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub max_combinations: usize,
    pub interpolate: InterpolateOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            interpolate: InterpolateOptions::default(),
        }
    }
}

/// A fully substituted prompt and the assignment that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPrompt {
    pub prompt: String,
    pub assignment: CombinatoricResult,
}

/// Check a source set against a ceiling without generating anything.
///
/// Returns the combination count when it fits.
pub fn check_ceiling(sources: &[NamedSource], limit: usize) -> Result<usize, BatchError> {
    let count = count(sources);
    if count > limit {
        tracing::warn!(count, limit, "batch rejected: too many combinations");
        return Err(BatchError::TooManyCombinations { count, limit });
    }
    tracing::debug!(count, limit, "batch size accepted");
    Ok(count)
}

/// Expand `template` once per combination of `sources`.
///
/// Each combination is pinned as the top layer of the ambient (`source:`)
/// chain over `base` for bare references. Explicit bucket references and
/// references with an index or path resolve against `base` only. No
/// eligible source means no prompts.
pub fn expand<L: SourceLookup + ?Sized>(
    template: &str,
    sources: &[NamedSource],
    base: &L,
    opts: &BatchOptions,
) -> Result<Vec<GeneratedPrompt>, BatchError> {
    check_ceiling(sources, opts.max_combinations)?;

    let prompts = generate(sources)
        .into_iter()
        .map(|assignment| {
            let layer = Layered::new(
                assignment.iter().map(|(n, v)| (n.to_string(), v.to_string())),
                base,
            );
            let prompt = interpolate_with(template, &layer, &opts.interpolate);
            GeneratedPrompt { prompt, assignment }
        })
        .collect();

    Ok(prompts)
}
