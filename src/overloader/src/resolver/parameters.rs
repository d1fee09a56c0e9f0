use crate::resolver::{from_lookup_or_fallback, resolve_each, ResolveContext, ResolveError, Resolver};
use crate::types::Parameter;
use crate::value::{Arguments, ResolvedArguments, Value};

/// Matches supplied arguments by key: an entry named after the declared
/// type wins over one named after the parameter. Matched entries are
/// consumed.
///
/// With a left-over parameter name set, the parameter of that name receives
/// every supplied argument not consumed by the parameters before it.
#[derive(Debug, Clone, Default)]
pub struct ParametersResolver {
    leftover: Option<String>,
}

impl ParametersResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leftover(name: impl Into<String>) -> Self {
        Self {
            leftover: Some(name.into()),
        }
    }

    fn take_supplied(parameter: &Parameter, supplied: &mut Arguments) -> Option<Value> {
        parameter
            .ty()
            .name()
            .and_then(|ty| supplied.take_named(ty))
            .or_else(|| supplied.take_named(parameter.name()))
    }
}

impl Resolver for ParametersResolver {
    fn resolve(
        &self,
        context: &ResolveContext<'_>,
        mut supplied: Arguments,
    ) -> Result<ResolvedArguments, ResolveError> {
        resolve_each(context, |parameter| {
            if self.leftover.as_deref() == Some(parameter.name()) {
                return Ok(Value::Map(supplied.clone()));
            }
            match Self::take_supplied(parameter, &mut supplied) {
                Some(value) => Ok(value),
                None => from_lookup_or_fallback(parameter, context),
            }
        })
    }
}
