use std::any;
use std::error::Error;
use std::sync::Arc;

use crate::target::Component;
use crate::types::class::Constructor;
use crate::types::{ClassDescriptor, Configurer, Parameter};
use crate::value::ResolvedArguments;

/// A unit of class registrations.
pub trait Module: 'static {
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(any::type_name::<Self>(), err);
        }
    }

    fn configure(&self, configurer: &mut dyn Configurer)
        -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// A [`Module`] backed by a closure, see [`module_fn`].
pub struct FnModule<F> {
    configure: F,
}

/// Wraps a closure into a [`Module`].
pub fn module_fn<F>(configure: F) -> FnModule<F>
where
    F: Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    FnModule { configure }
}

impl<F> Module for FnModule<F>
where
    F: Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        (self.configure)(configurer)
    }
}

/// Several modules set up one after another.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }
}

impl Module for Configuration {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.modules
            .iter()
            .for_each(|module| module.setup(configurer));
        Ok(())
    }
}

/// Starts declaring the class `name`.
///
/// Without [`ClassBinding::constructed_by`] the class is abstract.
///
/// ```rust
/// # use std::convert::Infallible;
/// # use overloader::prelude::*;
/// struct Mailer {
///     host: String,
/// }
///
/// impl Component for Mailer {}
///
/// let registry = TypeRegistry::init(module_fn(|configurer| {
///     class("App\\Mailer")
///         .param(Parameter::new("host").typed(ParamType::String).default_value("localhost"))
///         .constructed_by(|mut args: ResolvedArguments| {
///             Ok::<_, ArgumentError>(Mailer { host: args.take(0)? })
///         })
///         .set_on(configurer);
///     Ok(())
/// }))
/// .unwrap();
/// assert!(registry.exists("App\\Mailer"));
/// ```
pub fn class(name: impl Into<String>) -> ClassBinding {
    ClassBinding::new(name.into())
}

pub struct ClassBinding {
    name: String,
    ancestors: Vec<String>,
    parameters: Vec<Parameter>,
    constructor: Option<Constructor>,
}

impl ClassBinding {
    fn new(name: String) -> Self {
        Self {
            name,
            ancestors: Vec::new(),
            parameters: Vec::new(),
            constructor: None,
        }
    }

    /// Declares a parent class or an implemented interface.
    pub fn extends(mut self, ancestor: impl Into<String>) -> Self {
        self.ancestors.push(ancestor.into());
        self
    }

    /// Appends the next constructor parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn constructed_by<F, T, E>(mut self, constructor: F) -> Self
    where
        F: Fn(ResolvedArguments) -> Result<T, E> + Send + Sync + 'static,
        T: Component,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let erased: Constructor = Arc::new(move |args: ResolvedArguments| erase(constructor(args)));
        self.constructor = Some(erased);
        self
    }

    pub fn build(self) -> ClassDescriptor {
        ClassDescriptor::new(self.name, self.ancestors, self.parameters, self.constructor)
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        configurer.register(self.build());
    }
}

fn erase<T, E>(res: Result<T, E>) -> Result<Box<dyn Component>, Box<dyn Error + Send + Sync>>
where
    T: Component,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    res.map(|object| -> Box<dyn Component> { Box::new(object) })
        .map_err(Into::into)
}
