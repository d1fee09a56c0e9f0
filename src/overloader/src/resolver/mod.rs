mod container;
mod context;
mod instance;
mod ordered;
mod parameters;
mod simple;

use std::fmt::Debug;
use std::sync::Arc;

use snafu::prelude::*;

use crate::lookup::LookupError;
use crate::types::{ParamType, Parameter, TypeRegistry};
use crate::value::{Arguments, ResolvedArguments, Value};

pub use container::ContainerResolver;
pub use context::ResolveContext;
pub use instance::InstanceResolver;
pub use ordered::OrderedResolver;
pub use parameters::ParametersResolver;
pub use simple::SimpleResolver;

/// Computes the constructor arguments for a class.
///
/// Every flavor except [`SimpleResolver`] walks the declared parameters in
/// order and settles each one through the same fallback chain: supplied
/// arguments first (how they are matched is what tells the flavors apart),
/// then the lookup service, then the declared default, then null if the
/// parameter accepts it.
pub trait Resolver: Debug + Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the class can't be instantiated or a required
    /// parameter has no resolution.
    fn resolve(
        &self,
        context: &ResolveContext<'_>,
        supplied: Arguments,
    ) -> Result<ResolvedArguments, ResolveError>;
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ResolveError {
    #[snafu(display("target class {class} is not instantiable"))]
    #[non_exhaustive]
    ServiceNotCreated { class: String },
    #[snafu(display("dependency [{parameter}] can't be resolved in class {class}"))]
    #[non_exhaustive]
    DependencyNotFound { parameter: String, class: String },
    #[snafu(display("could not fetch dependency [{parameter}] of class {class}"))]
    #[non_exhaustive]
    Lookup {
        parameter: String,
        class: String,
        source: LookupError,
    },
}

/// Walks the declared parameters, failing early for classes that can't be
/// built.
fn resolve_each<F>(context: &ResolveContext<'_>, mut resolve: F) -> Result<ResolvedArguments, ResolveError>
where
    F: FnMut(&Parameter) -> Result<Value, ResolveError>,
{
    let class = context.class();
    if !class.is_instantiable() {
        return Err(ResolveError::ServiceNotCreated {
            class: class.name().to_owned(),
        });
    }

    class
        .parameters()
        .iter()
        .map(&mut resolve)
        .collect::<Result<Vec<_>, _>>()
        .map(ResolvedArguments::new)
}

/// Consults the lookup service: the service itself for the lookup type, then
/// an entry keyed by the declared type name, then one keyed by the parameter
/// name.
fn from_lookup(
    parameter: &Parameter,
    context: &ResolveContext<'_>,
) -> Result<Option<Value>, ResolveError> {
    if *parameter.ty() == ParamType::Lookup {
        return Ok(Some(Value::Lookup(Arc::clone(context.lookup()))));
    }

    let lookup = context.lookup();
    let keys = parameter.ty().name().into_iter().chain([parameter.name()]);
    for key in keys {
        if lookup.has(key) {
            return lookup
                .get(key)
                .map(Some)
                .map_err(|source| ResolveError::Lookup {
                    parameter: parameter.name().to_owned(),
                    class: context.class().name().to_owned(),
                    source,
                });
        }
    }
    Ok(None)
}

/// The declared default, else null for parameters that accept it.
fn fallback(parameter: &Parameter, context: &ResolveContext<'_>) -> Result<Value, ResolveError> {
    if let Some(default) = parameter.default() {
        Ok(default.clone())
    } else if parameter.allows_null() {
        Ok(Value::Null)
    } else {
        Err(ResolveError::DependencyNotFound {
            parameter: parameter.name().to_owned(),
            class: context.class().name().to_owned(),
        })
    }
}

/// Steps shared by every flavor once supplied arguments had nothing to
/// offer.
fn from_lookup_or_fallback(
    parameter: &Parameter,
    context: &ResolveContext<'_>,
) -> Result<Value, ResolveError> {
    match from_lookup(parameter, context)? {
        Some(value) => Ok(value),
        None => fallback(parameter, context),
    }
}

/// Whether `value` is acceptable for the declared type `ty`.
fn fits(value: &Value, ty: &ParamType, types: &TypeRegistry) -> bool {
    match (ty, value) {
        (ParamType::Mixed, _) => true,
        (ParamType::Union(members), value) => members.iter().any(|m| fits(value, m, types)),
        (ParamType::Class(name), Value::Object(object)) => types.is_a(object.class(), name),
        (ParamType::Array, Value::List(_) | Value::Map(_)) => true,
        (ParamType::Int, Value::Int(_)) => true,
        (ParamType::Float, Value::Float(_)) => true,
        (ParamType::String, Value::Str(_)) => true,
        (ParamType::Bool, Value::Bool(_)) => true,
        (ParamType::Lookup, Value::Lookup(_)) => true,
        _ => false,
    }
}

/// Asks a supplied lookup service for `key`, if `candidate` is one.
fn from_supplied_lookup(
    candidate: &Value,
    key: &str,
    parameter: &Parameter,
    context: &ResolveContext<'_>,
) -> Result<Option<Value>, ResolveError> {
    let Value::Lookup(lookup) = candidate else {
        return Ok(None);
    };
    if !lookup.has(key) {
        return Ok(None);
    }
    lookup
        .get(key)
        .map(Some)
        .map_err(|source| ResolveError::Lookup {
            parameter: parameter.name().to_owned(),
            class: context.class().name().to_owned(),
            source,
        })
}

#[cfg(test)]
mod test_support {
    use std::convert::Infallible;
    use std::sync::Arc;

    use crate::lookup::{Lookup, ServiceMap};
    use crate::target::Component;
    use crate::types::{class, module_fn, ParamType, Parameter, TypeRegistry};
    use crate::value::{Object, ResolvedArguments};

    pub struct Plain;

    impl Component for Plain {}

    pub fn plain(_: ResolvedArguments) -> Result<Plain, Infallible> {
        Ok(Plain)
    }

    /// `App\Service` takes `(App\Db db, int size = 10, ?string label, mixed extra)`,
    /// `App\Handler` takes `(Lookup services, int|string id)`.
    pub fn registry() -> TypeRegistry {
        TypeRegistry::init(module_fn(|configurer| {
            class("App\\Db").constructed_by(plain).set_on(configurer);
            class("App\\SqliteDb")
                .extends("App\\Db")
                .constructed_by(plain)
                .set_on(configurer);
            class("App\\AbstractService").set_on(configurer);
            class("App\\Service")
                .param(Parameter::new("db").typed(ParamType::class("App\\Db")))
                .param(
                    Parameter::new("size")
                        .typed(ParamType::Int)
                        .default_value(10),
                )
                .param(Parameter::new("label").typed(ParamType::String).nullable())
                .param(Parameter::new("extra"))
                .constructed_by(plain)
                .set_on(configurer);
            class("App\\Handler")
                .param(Parameter::new("services").typed(ParamType::Lookup))
                .param(
                    Parameter::new("id")
                        .typed(ParamType::Union(vec![ParamType::Int, ParamType::String])),
                )
                .constructed_by(plain)
                .set_on(configurer);
            class("App\\Strict")
                .param(Parameter::new("token").typed(ParamType::String))
                .constructed_by(plain)
                .set_on(configurer);
            Ok(())
        }))
        .unwrap()
    }

    pub fn db() -> Object {
        Object::new("App\\SqliteDb", Plain)
    }

    pub fn empty_lookup() -> Arc<dyn Lookup> {
        Arc::new(ServiceMap::new())
    }
}
