//! Batch expansion of one template into every source combination.

pub mod expand;

pub use expand::{
    BatchError, BatchOptions, DEFAULT_MAX_COMBINATIONS, GeneratedPrompt, check_ceiling, expand,
};
