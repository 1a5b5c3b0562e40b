//! Shared setup for commands that resolve against the profile snapshot.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use stackvars_core::combinatorics::NamedSource;
use stackvars_core::config::{ConfigLoader, ResolvedConfig};
use stackvars_core::references::referenced_sources;
use stackvars_core::sources::{Scope, SourceMap, load_list, load_sources};

use crate::TemplateInput;

/// Loaded configuration plus the source map visible from its context.
pub struct Session {
    pub config: ResolvedConfig,
    pub sources: SourceMap,
}

impl Session {
    /// Load config, install logging and read the snapshot.
    pub fn open(config: Option<&Path>, profile: Option<&str>) -> Result<Self> {
        let config =
            ConfigLoader::load(config, profile).wrap_err("failed to load config")?;
        crate::logging::init(&config.logging)?;

        let snapshot = load_sources(&config.sources_path)?;
        let sources = SourceMap::from_snapshot(&config.context, &snapshot);
        tracing::debug!(
            profile = %config.active_profile,
            records = snapshot.len(),
            "session ready"
        );
        Ok(Self { config, sources })
    }

    /// The sources to vary: an explicit list file, or else every ambient
    /// reference in the template that resolves, in first-occurrence order.
    pub fn varying_sources(
        &self,
        template: &str,
        vars: Option<&Path>,
    ) -> Result<Vec<NamedSource>> {
        if let Some(path) = vars {
            return Ok(load_list(path)?);
        }

        Ok(referenced_sources(template)
            .into_iter()
            .filter(|(scope, _)| *scope == Scope::Ambient)
            .filter_map(|(scope, name)| {
                self.sources
                    .resolve(scope, &name)
                    .map(|value| NamedSource::new(name, value.clone()))
            })
            .collect())
    }
}

impl TemplateInput {
    pub fn read(&self) -> Result<String> {
        match (&self.text, &self.template) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read template {}", path.display())),
            (None, None) => Ok(String::new()),
        }
    }
}
