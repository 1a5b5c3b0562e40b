//! Combinatorial expansion of multi-valued sources.

pub mod engine;

pub use engine::{CombinatoricResult, NamedSource, count, generate};
