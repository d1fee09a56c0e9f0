use crate::resolver::{
    fits, from_lookup_or_fallback, from_supplied_lookup, resolve_each, ResolveContext,
    ResolveError, Resolver,
};
use crate::types::Parameter;
use crate::value::{Arguments, ResolvedArguments, Value};

/// Matches supplied arguments by runtime type instead of by key.
///
/// The supplied values are scanned in order for one whose class is the
/// declared type (or derives from it). A supplied lookup service is asked
/// for the declared type name and the parameter name too. Matched values are
/// not consumed, so one supplied object may satisfy several parameters.
#[derive(Debug, Clone, Default)]
pub struct InstanceResolver {
    leftover: Option<String>,
}

impl InstanceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leftover(name: impl Into<String>) -> Self {
        Self {
            leftover: Some(name.into()),
        }
    }

    fn match_supplied(
        parameter: &Parameter,
        supplied: &Arguments,
        context: &ResolveContext<'_>,
    ) -> Result<Option<Value>, ResolveError> {
        if let Some(ty) = parameter.ty().name() {
            for candidate in supplied.values() {
                let by_type = matches!(candidate, Value::Object(_) | Value::Lookup(_));
                if by_type && fits(candidate, parameter.ty(), context.types()) {
                    return Ok(Some(candidate.clone()));
                }
                if let Some(value) = from_supplied_lookup(candidate, ty, parameter, context)? {
                    return Ok(Some(value));
                }
            }
        }

        let name = parameter.name();
        for candidate in supplied.values() {
            if let Value::Object(object) = candidate {
                if context.types().is_a(object.class(), name) {
                    return Ok(Some(candidate.clone()));
                }
            }
            if let Some(value) = from_supplied_lookup(candidate, name, parameter, context)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

impl Resolver for InstanceResolver {
    fn resolve(
        &self,
        context: &ResolveContext<'_>,
        supplied: Arguments,
    ) -> Result<ResolvedArguments, ResolveError> {
        resolve_each(context, |parameter| {
            if self.leftover.as_deref() == Some(parameter.name()) {
                return Ok(Value::Map(supplied.clone()));
            }
            match Self::match_supplied(parameter, &supplied, context)? {
                Some(value) => Ok(value),
                None => from_lookup_or_fallback(parameter, context),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::lookup::{Lookup, ServiceMap};
    use crate::resolver::test_support::{db, empty_lookup, registry};

    use super::*;

    #[test]
    fn instance_resolver_matches_objects_by_class() {
        let types = registry();
        let lookup = empty_lookup();
        let context = ResolveContext::new(types.get("App\\Service").unwrap(), &lookup, &types);
        let db = db();

        // Scalars are never matched by type.
        let supplied = Arguments::new().with(5).with(db.clone());
        let res = InstanceResolver::new().resolve(&context, supplied).unwrap();

        assert_eq!(
            res.into_vec(),
            vec![Value::from(db), Value::from(10), Value::Null, Value::Null]
        );
    }

    #[test]
    fn instance_resolver_asks_supplied_lookups() {
        let types = registry();
        let lookup = empty_lookup();
        let context = ResolveContext::new(types.get("App\\Strict").unwrap(), &lookup, &types);
        let inner: Arc<dyn Lookup> = Arc::new(ServiceMap::new().with_service("token", "from-inner"));

        let supplied = Arguments::new().with(inner);
        let res = InstanceResolver::new().resolve(&context, supplied).unwrap();

        assert_eq!(res.into_vec(), vec![Value::from("from-inner")]);
    }

    #[test]
    fn instance_resolver_binds_all_supplied_as_leftover() {
        let types = registry();
        let lookup = empty_lookup();
        let context = ResolveContext::new(types.get("App\\Service").unwrap(), &lookup, &types);
        let db = db();

        let supplied = Arguments::new().with(db.clone()).with("tail");
        let res = InstanceResolver::with_leftover("extra")
            .resolve(&context, supplied.clone())
            .unwrap();

        assert_eq!(res.get(0), Some(&Value::from(db)));
        assert_eq!(res.get(3), Some(&Value::Map(supplied)));
    }
}
