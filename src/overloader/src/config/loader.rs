use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use snafu::prelude::*;
use tracing::debug;

use crate::config::{ConfigError, LoadSnafu, OverloaderConfig};

/// Prefix of the environment variables overriding configuration entries,
/// e.g. `OVERLOADER_ADD_TO=false`.
pub const ENV_PREFIX: &str = "OVERLOADER_";

/// Loads an [`OverloaderConfig`] by merging, in order of increasing
/// precedence, the defaults, a TOML file and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_owned(),
        }
    }

    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// # Errors
    ///
    /// Returns an error if a source can't be parsed into the configuration
    /// or the result is invalid. A missing file is skipped.
    pub fn load(&self) -> Result<OverloaderConfig, ConfigError> {
        let mut figment = Self::defaults();
        if let Some(path) = &self.config_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
                debug!(path = %path.display(), "loaded overloader configuration file");
            } else {
                debug!(path = %path.display(), "overloader configuration file not found");
            }
        }
        figment = figment.merge(Env::prefixed(&self.env_prefix));
        Self::extract(figment)
    }

    /// Loads the defaults overridden by a TOML document, ignoring the file
    /// and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the document can't be parsed into the
    /// configuration or the result is invalid.
    pub fn load_from_str(&self, toml: &str) -> Result<OverloaderConfig, ConfigError> {
        Self::extract(Self::defaults().merge(Toml::string(toml)))
    }

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(OverloaderConfig::default()))
    }

    fn extract(figment: Figment) -> Result<OverloaderConfig, ConfigError> {
        let config: OverloaderConfig = figment.extract().map_err(Box::new).context(LoadSnafu)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
