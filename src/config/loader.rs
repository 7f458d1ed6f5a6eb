//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{LogFormat, RouterConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line that replace file settings.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub static_root: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut RouterConfig) {
        if let Some(bind) = &self.bind_address {
            config.listener.bind_address = bind.clone();
        }
        if let Some(root) = &self.static_root {
            config.static_files.root = Some(root.clone());
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
    }
}

/// Read and parse a TOML file without semantic checks.
pub fn read_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// File (or built-in defaults), then overrides, then one validation pass.
pub fn assemble_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<RouterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => RouterConfig::default(),
    };
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
