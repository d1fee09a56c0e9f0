mod class;
mod class_map;
mod configurer;
mod module;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;

pub use class::{ClassDescriptor, ParamType, Parameter, LOOKUP_TYPE};
pub use module::{class, module_fn, ClassBinding, Configuration, FnModule, Module};

use class_map::ClassMap;
use configurer::ConfigurerImpl;

/// Collects class descriptors while a [`Module`] is being set up.
pub trait Configurer {
    fn register(&mut self, class: ClassDescriptor);

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>);
}

/// The explicit table of every class an overloader may find or construct,
/// keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: ClassMap,
}

impl TypeRegistry {
    /// Builds a registry from everything `module` registers.
    ///
    /// # Errors
    ///
    /// Returns an error if a class name is registered twice or the module
    /// fails to configure itself. Several failures are reported together.
    pub fn init<M: Module>(module: M) -> Result<Self, RegistryError> {
        let mut configurer = ConfigurerImpl::new();
        module.setup(&mut configurer);
        configurer.finish().map(|classes| Self { classes })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.classes.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(name)
    }

    /// Returns true if `class` is `ty` or extends or implements it, directly
    /// or through its ancestors.
    pub fn is_a(&self, class: &str, ty: &str) -> bool {
        self.classes.is_a(class, ty)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.names()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.len() == 0
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("the class {name} is already registered"))]
    #[non_exhaustive]
    ClassDuplicated { name: String },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated registry errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<RegistryError> },
}

struct AggregatedDisplayer<'a> {
    errors: &'a [RegistryError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [RegistryError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}
