use crate::resolver::{
    fits, from_lookup_or_fallback, from_supplied_lookup, resolve_each, ResolveContext,
    ResolveError, Resolver,
};
use crate::types::{ParamType, Parameter};
use crate::value::{Arguments, ResolvedArguments, Value};

/// Consumes supplied arguments strictly in order.
///
/// The next supplied argument is bound to the current parameter only if it
/// fits the declared type; otherwise the parameter is resolved from the
/// lookup service or its default and the argument stays in place for the
/// following parameter. A null argument is skipped when the parameter it
/// was offered to resolved to null anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedResolver;

impl OrderedResolver {
    fn match_by_type(
        parameter: &Parameter,
        candidate: &Value,
        context: &ResolveContext<'_>,
    ) -> Result<Option<Value>, ResolveError> {
        if *parameter.ty() == ParamType::Mixed {
            return Ok(Some(candidate.clone()));
        }
        for member in parameter.ty().members() {
            if fits(candidate, member, context.types()) {
                return Ok(Some(candidate.clone()));
            }
            if let Some(name) = member.name() {
                if let Some(value) = from_supplied_lookup(candidate, name, parameter, context)? {
                    return Ok(Some(value));
                }
            }
        }
        Ok(None)
    }
}

impl Resolver for OrderedResolver {
    fn resolve(
        &self,
        context: &ResolveContext<'_>,
        supplied: Arguments,
    ) -> Result<ResolvedArguments, ResolveError> {
        let mut index = 0;
        resolve_each(context, |parameter| {
            let candidate = supplied.nth(index);
            if let Some(candidate) = candidate {
                if let Some(value) = Self::match_by_type(parameter, candidate, context)? {
                    index += 1;
                    return Ok(value);
                }
            }

            let value = from_lookup_or_fallback(parameter, context)?;
            if value.is_null() && candidate.is_some_and(Value::is_null) {
                index += 1;
            }
            Ok(value)
        })
    }
}
