//! Sources: named, scoped values that templates can reference.
//!
//! - [`types`]: the record shapes handed over by the persistence layer
//! - [`resolver`]: bucket partitioning and scope-aware lookup
//! - [`snapshot`]: reading snapshot files

pub mod resolver;
pub mod snapshot;
pub mod types;

pub use resolver::{Layered, SourceLookup, SourceMap, resolve};
pub use snapshot::{SnapshotError, load_list, load_sources};
pub use types::{Scope, Source, SourceContext};
