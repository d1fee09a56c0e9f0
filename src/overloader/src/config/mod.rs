mod factory;
mod loader;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::loader::{LegacyOrder, PrefixPriority};

pub use factory::OverloaderFactory;
pub use loader::ConfigLoader;

/// Prefixes an [`OverloaderFactory`] uses when the configuration names none.
pub const DEFAULT_FACTORY_PATHS: [&str; 5] = ["Zalt", "Laminas", "Mezzio", "Symfony", "Zend"];

/// How an application's overloader is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverloaderConfig {
    /// Namespace prefixes to search.
    pub paths: Vec<String>,
    /// Add `paths` to the built-in prefixes instead of replacing them.
    pub add_to: bool,
    /// Enables legacy class names; legacy targets are injected with this
    /// prefix.
    pub legacy_prefix: Option<String>,
    pub verbose: bool,
    pub verbose_load: bool,
    pub verbose_target: bool,
    pub prefix_priority: PrefixPriority,
    pub legacy_order: LegacyOrder,
}

impl Default for OverloaderConfig {
    fn default() -> Self {
        Self {
            paths: DEFAULT_FACTORY_PATHS.iter().map(|p| (*p).to_owned()).collect(),
            add_to: true,
            legacy_prefix: None,
            verbose: false,
            verbose_load: false,
            verbose_target: false,
            prefix_priority: PrefixPriority::default(),
            legacy_order: LegacyOrder::default(),
        }
    }
}

impl OverloaderConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPaths`] if the built-in prefixes are to be
    /// replaced by an empty list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let usable = self
            .paths
            .iter()
            .any(|path| !path.trim_matches(['\\', '/']).is_empty());
        ensure!(self.add_to || usable, EmptyPathsSnafu);
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConfigError {
    #[snafu(display("could not load the overloader configuration"))]
    #[non_exhaustive]
    Load { source: Box<figment::Error> },
    #[snafu(display("the overloader configuration replaces the prefixes with an empty list"))]
    EmptyPaths,
}
