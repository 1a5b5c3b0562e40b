use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::batch::{BatchOptions, DEFAULT_MAX_COMBINATIONS};
use crate::interpolate::{DEFAULT_SEPARATOR, InterpolateOptions};
use crate::sources::SourceContext;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub interpolation: InterpolationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Snapshot file holding the source records (JSON or YAML).
    pub sources: String,
    pub workspace_id: Option<String>,
    pub stack_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatchConfig {
    /// Upper bound on prompts generated by a single expansion.
    #[serde(default = "default_max_combinations")]
    pub max_combinations: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_combinations: default_max_combinations() }
    }
}

fn default_max_combinations() -> usize {
    DEFAULT_MAX_COMBINATIONS
}

#[derive(Debug, Deserialize, Clone)]
pub struct InterpolationConfig {
    /// Joins array values referenced without an index.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self { separator: default_separator() }
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub sources_path: PathBuf,
    pub context: SourceContext,
    pub batch: BatchConfig,
    pub interpolation: InterpolationConfig,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    pub fn interpolate_options(&self) -> InterpolateOptions {
        InterpolateOptions::with_separator(self.interpolation.separator.clone())
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            max_combinations: self.batch.max_combinations,
            interpolate: self.interpolate_options(),
        }
    }
}
