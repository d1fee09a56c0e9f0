use crate::resolver::{ResolveContext, ResolveError, Resolver};
use crate::value::{Arguments, ResolvedArguments};

/// Passes the supplied arguments through untouched, in the order given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleResolver;

impl Resolver for SimpleResolver {
    fn resolve(
        &self,
        _context: &ResolveContext<'_>,
        supplied: Arguments,
    ) -> Result<ResolvedArguments, ResolveError> {
        Ok(ResolvedArguments::new(supplied.into_values()))
    }
}
