use std::sync::Arc;

use crate::loader::Overloader;
use crate::loader::core::{OverloaderCore, Settings, Verbosity};
use crate::loader::prefix::{LegacyNaming, PrefixList, PrefixPriority};
use crate::lookup::Lookup;
use crate::resolver::Resolver;
use crate::types::TypeRegistry;

/// Configures an [`Overloader`] before it is shared.
pub struct OverloaderBuilder {
    lookup: Arc<dyn Lookup>,
    types: Arc<TypeRegistry>,
    prefixes: Vec<String>,
    merge: bool,
    priority: PrefixPriority,
    resolver: Option<Arc<dyn Resolver>>,
    legacy: Option<LegacyNaming>,
    verbosity: Verbosity,
}

impl OverloaderBuilder {
    pub(crate) fn new(lookup: Arc<dyn Lookup>, types: Arc<TypeRegistry>) -> Self {
        Self {
            lookup,
            types,
            prefixes: Vec::new(),
            merge: true,
            priority: PrefixPriority::default(),
            resolver: None,
            legacy: None,
            verbosity: Verbosity::default(),
        }
    }

    /// Namespace prefixes to search, either added to the defaults or
    /// replacing them. An empty list keeps the defaults.
    pub fn prefixes<I, S>(mut self, prefixes: I, merge_with_defaults: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self.merge = merge_with_defaults;
        self
    }

    pub fn priority(mut self, priority: PrefixPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn resolver<R: Resolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn legacy_classes(mut self, naming: LegacyNaming) -> Self {
        self.legacy = Some(naming);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbosity.all = verbose;
        self
    }

    pub fn verbose_load(mut self, verbose: bool) -> Self {
        self.verbosity.load = verbose;
        self
    }

    pub fn verbose_target(mut self, verbose: bool) -> Self {
        self.verbosity.target = verbose;
        self
    }

    pub fn build(self) -> Overloader {
        let mut prefixes = PrefixList::new(self.priority);
        if self.merge {
            prefixes.add(&self.prefixes);
        } else {
            prefixes.replace(&self.prefixes);
        }

        let mut settings = Settings::new(prefixes);
        if let Some(resolver) = self.resolver {
            settings.resolver = resolver;
        }
        settings.legacy = self.legacy;
        settings.verbosity = self.verbosity;

        Overloader::from_core(OverloaderCore::new(self.lookup, self.types, settings))
    }
}
