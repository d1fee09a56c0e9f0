mod builder;
mod core;
mod create;
mod handle;
mod prefix;
mod registry;

use std::error::Error;

use snafu::prelude::*;

use crate::lookup::LookupError;
use crate::resolver::ResolveError;

pub use builder::OverloaderBuilder;
pub use create::{Creation, Instance, Produced};
pub use handle::Overloader;
pub use prefix::{
    legacy_spelling, normalize_name, LegacyNaming, LegacyOrder, PrefixList, PrefixPriority,
    DEFAULT_PREFIXES,
};
pub use registry::LoaderRegistry;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LoadError {
    #[snafu(display(
        "could not load class {name} for any of the parent namespaces: {}",
        prefixes.join(", ")
    ))]
    #[non_exhaustive]
    ClassNotFound { name: String, prefixes: Vec<String> },
    #[snafu(display("class {class} is abstract and can't be created"))]
    #[non_exhaustive]
    ServiceNotCreated { class: String },
    #[snafu(display("could not resolve the constructor arguments of {class}"))]
    #[non_exhaustive]
    Resolve { class: String, source: ResolveError },
    #[snafu(display("the constructor of {class} failed"))]
    #[non_exhaustive]
    Construction {
        class: String,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("creating {name} from a spec can't take any other arguments"))]
    #[non_exhaustive]
    InvalidCreateArguments { name: String },
    #[snafu(display("could not inject the resources of a target"))]
    #[non_exhaustive]
    Inject { source: LookupError },
    #[snafu(display("an overloader needs at least one namespace prefix"))]
    EmptyPrefixes,
    #[snafu(display("the part {name} of type {sub_type} can't be loaded"))]
    #[non_exhaustive]
    NotLoadable { name: String, sub_type: String },
    #[snafu(display("the part {name} of type {sub_type} is not an instance of {class_type}"))]
    #[non_exhaustive]
    NotInstanceOf {
        name: String,
        sub_type: String,
        class_type: String,
    },
    #[snafu(display("the overloader behind a service factory was dropped"))]
    LoaderDropped,
}
