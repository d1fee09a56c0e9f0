use std::sync::Arc;

use parking_lot::RwLock;
use snafu::prelude::*;
use tracing::debug;

use crate::loader::prefix::{normalize_name, LegacyNaming, PrefixList};
use crate::lookup::Lookup;
use crate::loader::{
    ConstructionSnafu, Creation, Instance, InvalidCreateArgumentsSnafu, LoadError, Produced,
    ResolveSnafu,
};
use crate::resolver::{ResolveContext, Resolver, SimpleResolver};
use crate::target::Source;
use crate::types::TypeRegistry;
use crate::value::Arguments;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Verbosity {
    pub(crate) all: bool,
    pub(crate) load: bool,
    pub(crate) target: bool,
}

impl Verbosity {
    pub(crate) fn on_load(self) -> bool {
        self.all || self.load
    }

    pub(crate) fn on_target(self) -> bool {
        self.all || self.target
    }
}

/// Everything about an overloader that can change after construction and
/// is carried over into sub scopes.
#[derive(Clone)]
pub(crate) struct Settings {
    pub(crate) prefixes: PrefixList,
    pub(crate) resolver: Arc<dyn Resolver>,
    pub(crate) legacy: Option<LegacyNaming>,
    pub(crate) legacy_source: Option<Arc<dyn Source>>,
    pub(crate) verbosity: Verbosity,
}

impl Settings {
    pub(crate) fn new(prefixes: PrefixList) -> Self {
        Self {
            prefixes,
            resolver: Arc::new(SimpleResolver),
            legacy: None,
            legacy_source: None,
            verbosity: Verbosity::default(),
        }
    }
}

pub(crate) struct OverloaderCore {
    lookup: Arc<dyn Lookup>,
    types: Arc<TypeRegistry>,
    settings: RwLock<Settings>,
}

impl OverloaderCore {
    pub(crate) fn new(lookup: Arc<dyn Lookup>, types: Arc<TypeRegistry>, settings: Settings) -> Self {
        Self {
            lookup,
            types,
            settings: RwLock::new(settings),
        }
    }

    pub(crate) fn lookup(&self) -> &Arc<dyn Lookup> {
        &self.lookup
    }

    pub(crate) fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// A copy of the current settings, so no lock is held while objects are
    /// constructed and injected.
    pub(crate) fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub(crate) fn update<R>(&self, update: impl FnOnce(&mut Settings) -> R) -> R {
        update(&mut self.settings.write())
    }

    pub(crate) fn find(&self, settings: &Settings, name: &str) -> Result<String, LoadError> {
        let full = name.strip_prefix('\\').unwrap_or(name);
        if self.types.exists(full) {
            return Ok(full.to_owned());
        }

        let verbose = settings.verbosity.on_load();
        let short = normalize_name(name, settings.legacy.is_some());
        for prefix in settings.prefixes.iter() {
            let candidate = format!("{prefix}\\{short}");
            let spellings = match &settings.legacy {
                Some(legacy) => legacy.spellings(&candidate).to_vec(),
                None => vec![candidate],
            };
            for class in spellings {
                if verbose {
                    debug!(class = %class, "load attempt");
                }
                if self.types.exists(&class) {
                    if verbose {
                        debug!(class = %class, "load successful");
                    }
                    return Ok(class);
                }
            }
        }

        Err(LoadError::ClassNotFound {
            name: name.to_owned(),
            prefixes: settings.prefixes.to_vec(),
        })
    }

    /// Turns a creation request into an uninjected instance.
    pub(crate) fn instantiate(
        &self,
        settings: &Settings,
        creation: Creation,
        args: Arguments,
    ) -> Result<Instance, LoadError> {
        let (name, args) = match creation {
            Creation::Name(name) => (name, args),
            Creation::Spec { name, args: spec_args } => {
                ensure!(args.is_empty(), InvalidCreateArgumentsSnafu { name });
                (name, spec_args)
            }
            Creation::Factory(factory) => match factory() {
                Produced::Name(name) => (name, args),
                Produced::Instance(instance) => return Ok(instance),
            },
            Creation::Instance(instance) => return Ok(instance),
        };

        let class_name = self.find(settings, &name)?;
        let found = self
            .types
            .get(&class_name)
            .and_then(|class| Some((class, class.constructor()?)));
        let Some((class, constructor)) = found else {
            return Err(LoadError::ServiceNotCreated { class: class_name });
        };

        let context = ResolveContext::new(class, &self.lookup, &self.types);
        let resolved = settings
            .resolver
            .resolve(&context, args)
            .context(ResolveSnafu {
                class: class_name.as_str(),
            })?;
        let component = constructor(resolved).context(ConstructionSnafu {
            class: class_name.as_str(),
        })?;
        Ok(Instance::from_boxed(class_name, component))
    }
}
