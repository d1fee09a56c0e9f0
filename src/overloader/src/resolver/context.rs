use std::sync::Arc;

use crate::lookup::Lookup;
use crate::types::{ClassDescriptor, TypeRegistry};

/// Everything a [`Resolver`] may consult besides the supplied arguments.
///
/// [`Resolver`]: crate::resolver::Resolver
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    class: &'a ClassDescriptor,
    lookup: &'a Arc<dyn Lookup>,
    types: &'a TypeRegistry,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        class: &'a ClassDescriptor,
        lookup: &'a Arc<dyn Lookup>,
        types: &'a TypeRegistry,
    ) -> Self {
        Self {
            class,
            lookup,
            types,
        }
    }

    /// The class whose constructor arguments are being resolved.
    pub fn class(&self) -> &'a ClassDescriptor {
        self.class
    }

    pub fn lookup(&self) -> &'a Arc<dyn Lookup> {
        self.lookup
    }

    pub fn types(&self) -> &'a TypeRegistry {
        self.types
    }
}
