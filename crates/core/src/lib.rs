//! Scoped source resolution, template interpolation and combinatorial
//! expansion for batch prompt generation.
//!
//! Everything here is pure and synchronous over an in-memory snapshot.
//! Interpolation never fails; the only reported failure is a batch whose
//! combination count exceeds the caller's ceiling.

pub mod batch;
pub mod combinatorics;
pub mod config;
pub mod interpolate;
pub mod items;
pub mod references;
pub mod sources;

pub use batch::{BatchError, BatchOptions, GeneratedPrompt, expand};
pub use combinatorics::{CombinatoricResult, NamedSource, count, generate};
pub use interpolate::{InterpolateOptions, interpolate, interpolate_with};
pub use items::{SourceValue, VariableItem, classify_for_expansion, enabled_labels, normalize};
pub use references::{Reference, parse};
pub use sources::{Scope, Source, SourceContext, SourceLookup, SourceMap, resolve};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
