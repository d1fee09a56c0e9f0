#![allow(clippy::new_without_default)]

extern crate self as overloader;

pub mod config;
pub mod listing;
pub mod loader;
pub mod lookup;
pub mod resolver;
pub mod target;
pub mod types;
pub mod value;
mod util;

pub use overloader_derive::Target;

pub mod prelude {
    pub use crate::Target;

    pub use crate::config::{ConfigLoader, OverloaderConfig, OverloaderFactory};
    pub use crate::listing::{ListedObject, ObjectList};
    pub use crate::loader::{
        Creation, Instance, LegacyNaming, LegacyOrder, LoadError, LoaderRegistry, Overloader,
        PrefixPriority, Produced,
    };
    pub use crate::lookup::{Lookup, LookupError, ServiceMap};
    pub use crate::resolver::{
        ContainerResolver, InstanceResolver, OrderedResolver, ParametersResolver, ResolveError,
        Resolver, SimpleResolver,
    };
    pub use crate::target::{Component, LegacyTarget, ResourceSlots, Source, Target};
    pub use crate::types::{
        class, module_fn, Configuration, Configurer, Module, ParamType, Parameter, RegistryError,
        TypeRegistry,
    };
    pub use crate::value::{ArgumentError, Arguments, FromValue, Object, ResolvedArguments, Value};
}
