//! Substitution of scoped references in template text.

pub mod engine;

pub use engine::{
    DEFAULT_SEPARATOR, InterpolateOptions, RenderOutcome, interpolate, interpolate_with,
    render_reference, render_value,
};
