//! Variable items: the unit of combinatorial participation.

pub mod normalize;
pub mod types;

pub use normalize::{
    classify_for_expansion, enabled_labels, expansion_len_of, normalize, normalize_str,
};
pub use types::{SourceValue, VariableItem};
