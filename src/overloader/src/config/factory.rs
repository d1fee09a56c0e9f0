use std::sync::Arc;

use crate::config::OverloaderConfig;
use crate::loader::{LegacyNaming, LoaderRegistry, Overloader};
use crate::lookup::Lookup;
use crate::types::TypeRegistry;

/// Builds the application's overloader from its configuration.
#[derive(Debug, Clone, Default)]
pub struct OverloaderFactory {
    config: OverloaderConfig,
}

impl OverloaderFactory {
    pub fn new(config: OverloaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverloaderConfig {
        &self.config
    }

    pub fn create(&self, lookup: Arc<dyn Lookup>, types: Arc<TypeRegistry>) -> Overloader {
        let config = &self.config;
        let mut builder = Overloader::builder(lookup, types)
            .priority(config.prefix_priority)
            .prefixes(config.paths.iter().cloned(), config.add_to)
            .verbose(config.verbose)
            .verbose_load(config.verbose_load)
            .verbose_target(config.verbose_target);
        if let Some(prefix) = &config.legacy_prefix {
            builder = builder
                .legacy_classes(LegacyNaming::new(prefix.as_str()).with_order(config.legacy_order));
        }
        builder.build()
    }

    /// Creates the overloader and offers it to `registry` as the default.
    pub fn create_in(
        &self,
        registry: &LoaderRegistry,
        lookup: Arc<dyn Lookup>,
        types: Arc<TypeRegistry>,
    ) -> Overloader {
        let loader = self.create(lookup, types);
        registry.register(&loader);
        loader
    }
}
