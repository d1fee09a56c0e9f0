use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Arc, Weak};

use snafu::prelude::*;
use tracing::debug;

use crate::loader::builder::OverloaderBuilder;
use crate::loader::core::{OverloaderCore, Settings};
use crate::loader::prefix::LegacyNaming;
use crate::loader::{Creation, EmptyPrefixesSnafu, InjectSnafu, Instance, LoadError};
use crate::lookup::{Lookup, ServiceMap};
use crate::resolver::Resolver;
use crate::target::{Injector, LegacyInjector, LegacyTarget, Source, Target};
use crate::types::TypeRegistry;
use crate::value::{Arguments, Value};

/// Finds and creates classes across a prioritized list of namespace
/// prefixes, resolving constructor arguments and injecting resources into
/// the objects it creates.
///
/// Clones share the same state, so the overloader can hand itself out as
/// the `loader` resource.
#[derive(Clone)]
pub struct Overloader {
    core: Arc<OverloaderCore>,
}

impl Overloader {
    /// An overloader searching the default prefixes.
    pub fn new(lookup: Arc<dyn Lookup>, types: Arc<TypeRegistry>) -> Self {
        Self::builder(lookup, types).build()
    }

    /// An overloader searching `prefixes`, either ahead of the defaults or
    /// instead of them.
    pub fn with_prefixes<I, S>(
        lookup: Arc<dyn Lookup>,
        types: Arc<TypeRegistry>,
        prefixes: I,
        merge_with_defaults: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(lookup, types)
            .prefixes(prefixes, merge_with_defaults)
            .build()
    }

    pub fn builder(lookup: Arc<dyn Lookup>, types: Arc<TypeRegistry>) -> OverloaderBuilder {
        OverloaderBuilder::new(lookup, types)
    }

    pub(crate) fn from_core(core: OverloaderCore) -> Self {
        Self {
            core: Arc::new(core),
        }
    }

    /// Finds the fully-qualified name of the class `name` stands for.
    ///
    /// A registered fully-qualified name is returned as is. Otherwise the
    /// normalized name is tried under every prefix in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ClassNotFound`] listing every prefix tried.
    pub fn find(&self, name: &str) -> Result<String, LoadError> {
        self.core.find(&self.core.settings(), name)
    }

    /// Creates an object and injects its resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the class can't be found, its constructor
    /// arguments can't be resolved, its constructor fails, or a lookup
    /// service fails while answering its resource requests.
    pub fn create(&self, creation: impl Into<Creation>) -> Result<Instance, LoadError> {
        self.create_with(creation, Arguments::new())
    }

    /// Like [`Overloader::create`], with constructor arguments for the
    /// resolver to match. Arguments passed along with an existing instance
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`Overloader::create`], returns
    /// [`LoadError::InvalidCreateArguments`] for a [`Creation::Spec`] with
    /// any further arguments.
    pub fn create_with(
        &self,
        creation: impl Into<Creation>,
        args: Arguments,
    ) -> Result<Instance, LoadError> {
        let settings = self.core.settings();
        let mut instance = self.core.instantiate(&settings, creation.into(), args)?;
        self.inject(&settings, &mut instance)?;
        Ok(instance)
    }

    /// An overloader sharing this one's lookup service, types and settings,
    /// whose prefixes all have `path` appended.
    pub fn create_sub_scope(&self, path: &str) -> Self {
        let mut settings = self.core.settings();
        settings.prefixes = settings.prefixes.scoped(path);
        Self::from_core(OverloaderCore::new(
            Arc::clone(self.core.lookup()),
            Arc::clone(self.core.types()),
            settings,
        ))
    }

    /// A [`ServiceMap`] factory creating `name` through this overloader.
    ///
    /// The class is looked up right away. The factory only keeps a weak
    /// reference to the overloader, so it can be registered with the
    /// overloader's own lookup service. A product that is injected with
    /// `"loader"` does hold the overloader strongly once the map memoizes it;
    /// call [`ServiceMap::clear`] to release such a map.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ClassNotFound`] if `name` can't be found.
    pub fn service_factory(
        &self,
        name: &str,
        args: Arguments,
    ) -> Result<
        impl Fn(&ServiceMap) -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
        LoadError,
    > {
        let class = self.find(name)?;
        let core = Arc::downgrade(&self.core);
        Ok(move |_: &ServiceMap| -> Result<Value, Box<dyn Error + Send + Sync>> {
            let loader = Self::upgrade(&core)?;
            let instance = loader.create_with(Creation::Name(class.clone()), args.clone())?;
            Ok(Value::Object(instance.into_object()))
        })
    }

    fn upgrade(core: &Weak<OverloaderCore>) -> Result<Self, LoadError> {
        core.upgrade()
            .map(|core| Self { core })
            .ok_or(LoadError::LoaderDropped)
    }

    /// Creates a pluggable part. It is injected as a [`Target`] if it is one,
    /// else as a [`LegacyTarget`], whether or not legacy classes are enabled.
    pub(crate) fn create_part(&self, class: &str) -> Result<Instance, LoadError> {
        let settings = self.core.settings();
        let mut instance = self
            .core
            .instantiate(&settings, Creation::name(class), Arguments::new())?;
        let (class, component) = instance.parts_mut();
        let verbose = settings.verbosity.on_target();

        let answered = if let Some(target) = component.as_target() {
            self.inject_target(&settings, target)?
        } else if let Some(target) = component.as_legacy_target() {
            self.inject_legacy_target(&settings, target)?
        } else {
            true
        };
        if !answered && verbose {
            debug!(class = %class, "part requests were not all answered");
        }
        Ok(instance)
    }

    /// Adds prefixes according to the list's priority.
    pub fn add_prefixes<I, S>(&self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.core.update(|settings| settings.prefixes.add(prefixes));
    }

    /// # Errors
    ///
    /// Returns [`LoadError::EmptyPrefixes`], keeping the current prefixes, if
    /// `prefixes` holds no usable prefix.
    pub fn set_prefixes<I, S>(&self, prefixes: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let replaced = self.core.update(|settings| settings.prefixes.replace(prefixes));
        ensure!(replaced, EmptyPrefixesSnafu);
        Ok(())
    }

    /// The prefixes in search order.
    pub fn prefixes(&self) -> Vec<String> {
        self.core.settings().prefixes.to_vec()
    }

    pub fn set_resolver<R: Resolver + 'static>(&self, resolver: R) {
        let resolver: Arc<dyn Resolver> = Arc::new(resolver);
        self.core.update(|settings| settings.resolver = resolver);
    }

    pub fn enable_legacy_classes(&self, naming: LegacyNaming) {
        self.core.update(|settings| settings.legacy = Some(naming));
    }

    pub fn disable_legacy_classes(&self) {
        self.core.update(|settings| settings.legacy = None);
    }

    pub fn legacy_naming(&self) -> Option<LegacyNaming> {
        self.core.settings().legacy
    }

    /// Hands legacy injection over to `source`, or back to the lookup
    /// service with `None`.
    pub fn set_legacy_source(&self, source: Option<Arc<dyn Source>>) {
        self.core.update(|settings| settings.legacy_source = source);
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.core.update(|settings| settings.verbosity.all = verbose);
    }

    pub fn set_verbose_load(&self, verbose: bool) {
        self.core.update(|settings| settings.verbosity.load = verbose);
    }

    pub fn set_verbose_target(&self, verbose: bool) {
        self.core.update(|settings| settings.verbosity.target = verbose);
    }

    /// Answers the target's resource requests and returns its verdict on
    /// completeness.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup service fails to produce a resource
    /// it claims to have.
    pub fn apply_to_target(&self, target: &mut dyn Target) -> Result<bool, LoadError> {
        self.inject_target(&self.core.settings(), target)
    }

    /// Answers a legacy target's registry requests, or hands it to the
    /// configured [`Source`].
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup service fails to produce a resource
    /// it claims to have.
    pub fn apply_to_legacy_target(&self, target: &mut dyn LegacyTarget) -> Result<bool, LoadError> {
        self.inject_legacy_target(&self.core.settings(), target)
    }

    pub fn lookup(&self) -> &Arc<dyn Lookup> {
        self.core.lookup()
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        self.core.types()
    }

    /// Returns true if both handles share the same overloader.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }

    fn inject(&self, settings: &Settings, instance: &mut Instance) -> Result<(), LoadError> {
        let (class, component) = instance.parts_mut();
        let verbose = settings.verbosity.on_target();

        if let Some(target) = component.as_target() {
            let answered = self.inject_target(settings, target)?;
            if !answered && verbose {
                debug!(class = %class, "target requests were not all answered");
            }
        }
        if settings.legacy.is_some() {
            if let Some(target) = component.as_legacy_target() {
                let answered = self.inject_legacy_target(settings, target)?;
                if !answered && verbose {
                    debug!(class = %class, "legacy target requests were not all answered");
                }
            }
        }
        Ok(())
    }

    fn inject_target(&self, settings: &Settings, target: &mut dyn Target) -> Result<bool, LoadError> {
        Injector::new(&**self.core.lookup(), self)
            .verbose(settings.verbosity.on_target())
            .inject(target)
            .context(InjectSnafu)
    }

    fn inject_legacy_target(
        &self,
        settings: &Settings,
        target: &mut dyn LegacyTarget,
    ) -> Result<bool, LoadError> {
        let prefix = settings.legacy.as_ref().map_or("", LegacyNaming::prefix);
        LegacyInjector::new(&**self.core.lookup(), self)
            .prefix(prefix)
            .source(settings.legacy_source.as_deref())
            .verbose(settings.verbosity.on_target())
            .inject(target)
            .context(InjectSnafu)
    }
}

impl Debug for Overloader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let settings = self.core.settings();
        f.debug_struct("Overloader")
            .field("prefixes", &settings.prefixes.to_vec())
            .field("resolver", &settings.resolver)
            .field("legacy", &settings.legacy)
            .finish_non_exhaustive()
    }
}
