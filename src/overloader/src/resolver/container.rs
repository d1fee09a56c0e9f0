use crate::resolver::{from_lookup_or_fallback, resolve_each, ResolveContext, ResolveError, Resolver};
use crate::value::{Arguments, ResolvedArguments};

/// Resolves every parameter from the lookup service or its default, ignoring
/// supplied arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerResolver;

impl Resolver for ContainerResolver {
    fn resolve(
        &self,
        context: &ResolveContext<'_>,
        _supplied: Arguments,
    ) -> Result<ResolvedArguments, ResolveError> {
        resolve_each(context, |parameter| from_lookup_or_fallback(parameter, context))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::lookup::{Lookup, LookupError, MockLookup, ServiceMap};
    use crate::resolver::test_support::{db, empty_lookup, registry};
    use crate::value::Value;

    use super::*;

    #[test]
    fn container_resolver_prefers_type_key_over_parameter_name() {
        let types = registry();
        let by_type = db();
        let lookup: Arc<dyn Lookup> = Arc::new(
            ServiceMap::new()
                .with_service("App\\Db", by_type.clone())
                .with_service("db", "by name"),
        );
        let context = ResolveContext::new(types.get("App\\Service").unwrap(), &lookup, &types);

        let res = ContainerResolver.resolve(&context, Arguments::new()).unwrap();
        assert_eq!(
            res.into_vec(),
            vec![Value::from(by_type), Value::from(10), Value::Null, Value::Null]
        );
    }

    #[test]
    fn container_resolver_falls_back_to_parameter_name() {
        let types = registry();
        let lookup: Arc<dyn Lookup> = Arc::new(ServiceMap::new().with_service("token", "t0k"));
        let context = ResolveContext::new(types.get("App\\Strict").unwrap(), &lookup, &types);

        let res = ContainerResolver
            .resolve(&context, Arguments::new().with("ignored"))
            .unwrap();
        assert_eq!(res.into_vec(), vec![Value::from("t0k")]);
    }

    #[test]
    fn container_resolver_fails_without_resolution() {
        let types = registry();
        let lookup = empty_lookup();
        let context = ResolveContext::new(types.get("App\\Strict").unwrap(), &lookup, &types);

        let res = ContainerResolver.resolve(&context, Arguments::new());
        assert!(matches!(
            res,
            Err(ResolveError::DependencyNotFound { ref parameter, ref class })
                if parameter == "token" && class == "App\\Strict"
        ));
    }

    #[test]
    fn container_resolver_fails_for_abstract_classes() {
        let types = registry();
        let lookup = empty_lookup();
        let context =
            ResolveContext::new(types.get("App\\AbstractService").unwrap(), &lookup, &types);

        assert!(matches!(
            ContainerResolver.resolve(&context, Arguments::new()),
            Err(ResolveError::ServiceNotCreated { .. })
        ));
    }

    #[test]
    fn container_resolver_propagates_lookup_failures() {
        let types = registry();
        let mut mock = MockLookup::new();
        mock.expect_has().returning(|key| key == "token");
        mock.expect_get().returning(|key| {
            Err(LookupError::NotFound {
                key: key.to_owned(),
            })
        });
        let lookup: Arc<dyn Lookup> = Arc::new(mock);
        let context = ResolveContext::new(types.get("App\\Strict").unwrap(), &lookup, &types);

        assert!(matches!(
            ContainerResolver.resolve(&context, Arguments::new()),
            Err(ResolveError::Lookup { .. })
        ));
    }

    #[test]
    fn container_resolver_binds_lookup_itself() {
        let types = registry();
        let lookup: Arc<dyn Lookup> = Arc::new(
            ServiceMap::new()
                .with_service("Lookup", "shadowed")
                .with_service("id", 42),
        );
        let context = ResolveContext::new(types.get("App\\Handler").unwrap(), &lookup, &types);

        let res = ContainerResolver.resolve(&context, Arguments::new()).unwrap();
        assert_eq!(
            res.into_vec(),
            vec![Value::Lookup(Arc::clone(&lookup)), Value::from(42)]
        );
    }
}
