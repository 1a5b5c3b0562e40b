use crate::config::types::{ConfigFile, LoggingConfig, Profile, ResolvedConfig};
use crate::sources::SourceContext;
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("failed to expand path '{0}': {1}")]
    PathExpansion(String, String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        let config_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let resolved = Self::resolve_profile(&active, prof, &cf, &config_dir)?;
        tracing::debug!(
            profile = %resolved.active_profile,
            sources = %resolved.sources_path.display(),
            "config loaded"
        );
        Ok(resolved)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        cf: &ConfigFile,
        config_dir: &Path,
    ) -> Result<ResolvedConfig, ConfigError> {
        let sub = |s: &str| s.replace("{{config_dir}}", &config_dir.to_string_lossy());

        let mut sources_path = expand_path(&sub(&prof.sources))?;
        if sources_path.is_relative() {
            sources_path = config_dir.join(sources_path);
        }

        // Resolve log file path if present
        let log_cfg = &cf.logging;
        let logging = if let Some(ref file) = log_cfg.file {
            let expanded_file = expand_path(&sub(&file.to_string_lossy()))?;
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expanded_file),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            sources_path,
            context: SourceContext {
                workspace_id: prof.workspace_id.clone(),
                stack_id: prof.stack_id.clone(),
                user_id: prof.user_id.clone(),
            },
            batch: cf.batch.clone(),
            interpolation: cf.interpolation.clone(),
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("stackvars").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("stackvars").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input)
        .map_err(|e| ConfigError::PathExpansion(input.to_string(), e.to_string()))?;
    Ok(PathBuf::from(expanded.to_string()))
}
