use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::lookup::{Lookup, LookupError};
use crate::value::Value;

type ServiceFactory =
    Arc<dyn Fn(&ServiceMap) -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync>;

/// An in-memory [`Lookup`] holding ready-made services and lazily invoked
/// factories.
///
/// A factory runs at most once per successful call; its product is memoized
/// as a plain service afterwards. Both tables can be extended through a
/// shared reference.
#[derive(Default)]
pub struct ServiceMap {
    services: RwLock<HashMap<String, Value>>,
    factories: RwLock<HashMap<String, ServiceFactory>>,
}

impl ServiceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_service(key, value);
        self
    }

    pub fn with_factory<F>(self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ServiceMap) -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
    {
        self.set_factory(key, factory);
        self
    }

    pub fn set_service(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.services.write().insert(key.into(), value.into());
    }

    pub fn set_factory<F>(&self, key: impl Into<String>, factory: F)
    where
        F: Fn(&ServiceMap) -> Result<Value, Box<dyn Error + Send + Sync>> + Send + Sync + 'static,
    {
        self.factories.write().insert(key.into(), Arc::new(factory));
    }

    /// Drops every service and factory.
    ///
    /// A memoized product holding the overloader that reads from this map,
    /// such as a target injected with `"loader"`, keeps the map alive through
    /// a reference cycle. Clearing the map breaks it.
    pub fn clear(&self) {
        let services = std::mem::take(&mut *self.services.write());
        let factories = std::mem::take(&mut *self.factories.write());
        // Dropped after both locks are released.
        drop((services, factories));
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.services.read().keys().cloned().collect();
        keys.extend(self.factories.read().keys().cloned());
        keys.sort();
        keys.dedup();
        keys
    }

    fn invoke_factory(&self, key: &str) -> Result<Value, LookupError> {
        let Some(factory) = self.factories.read().get(key).cloned() else {
            return Err(LookupError::NotFound { key: key.to_owned() });
        };

        // The factory may fetch other services, so no lock is held here.
        let value = factory(self).map_err(|err| LookupError::Factory {
            key: key.to_owned(),
            source: Arc::from(err),
        })?;

        // A concurrent call may have stored its product first; that one wins.
        let stored = self
            .services
            .write()
            .entry(key.to_owned())
            .or_insert(value)
            .clone();
        Ok(stored)
    }
}

impl Lookup for ServiceMap {
    fn has(&self, key: &str) -> bool {
        self.services.read().contains_key(key) || self.factories.read().contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Value, LookupError> {
        if let Some(value) = self.services.read().get(key) {
            return Ok(value.clone());
        }
        self.invoke_factory(key)
    }
}

impl Debug for ServiceMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ServiceMap")
            .field("keys", &self.keys())
            .finish()
    }
}
