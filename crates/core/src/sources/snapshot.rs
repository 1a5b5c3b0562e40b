//! Loading source snapshots from disk.
//!
//! The persistence layer is not part of this crate; snapshot files stand in
//! for it in the CLI and in tests. Both JSON and YAML are accepted, picked
//! by extension.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::Source;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse JSON in {0}: {1}")]
    JsonError(String, #[source] serde_json::Error),

    #[error("failed to parse YAML in {0}: {1}")]
    YamlError(String, #[source] serde_yaml::Error),
}

/// Load a list of [`Source`] records.
pub fn load_sources(path: &Path) -> Result<Vec<Source>, SnapshotError> {
    load_list(path)
}

/// Load any list-shaped snapshot file (sources, or `{name, value}` pairs).
pub fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SnapshotError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| SnapshotError::ReadError(display.clone(), e))?;

    let items: Vec<T> = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| SnapshotError::YamlError(display, e))?
    } else {
        serde_json::from_str(&content).map_err(|e| SnapshotError::JsonError(display, e))?
    };

    tracing::debug!(path = %path.display(), count = items.len(), "loaded snapshot");
    Ok(items)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
