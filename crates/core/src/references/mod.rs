//! Scoped `{{...}}` references inside free-form template text.

pub mod parser;

pub use parser::{Located, Reference, parse, referenced_sources};
