//! Project configuration file
//!
//! Optional TOML file read by the CLI. Every section and key has a default, so an
//! empty file is valid.
//!
//! ```toml
//! [emit]
//! import_prefix = "./templates"
//! component_name = "App"
//!
//! [registry]
//! path = "registry.toml"
//! runtime_path = "runtime-registry.toml"
//! strict = false
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::emitter::{EmitConfig, EmitConfigError};
use crate::logging::LoggingConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid [emit] settings: {0}")]
    Emit(#[from] EmitConfigError),
}

/// Where registries come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Replacement for the built-in codegen registry
    pub path: Option<PathBuf>,
    /// Runtime registry to cross-check for drift at startup
    pub runtime_path: Option<PathBuf>,
    /// Treat drift as fatal
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub emit: EmitConfig,
    pub registry: RegistrySettings,
    pub logging: LoggingConfig,
}

impl ProjectConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative registry paths are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.registry.path = config.registry.path.map(|p| base.join(p));
            config.registry.runtime_path = config.registry.runtime_path.map(|p| base.join(p));
        }
        Ok(config)
    }

    /// Load configuration from a TOML string, rejecting unusable `[emit]` settings
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.emit.validate()?;
        Ok(config)
    }
}
