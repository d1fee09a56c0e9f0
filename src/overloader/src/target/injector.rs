use tracing::debug;

use crate::loader::Overloader;
use crate::lookup::{Lookup, LookupError};
use crate::target::{LegacyTarget, Target};
use crate::util::text;
use crate::value::Value;

/// The request name that is always answered with the injecting loader
/// itself when the lookup service has no entry for it.
pub const LOADER_REQUEST: &str = "loader";

/// An alternative collaborator that takes over legacy injection entirely.
pub trait Source: Send + Sync {
    /// Answers the target's requests and returns whether they were all
    /// satisfied.
    fn apply_source(&self, target: &mut dyn LegacyTarget) -> bool;
}

/// Fills the resource requests of a [`Target`] from a [`Lookup`].
pub struct Injector<'a> {
    lookup: &'a dyn Lookup,
    loader: &'a Overloader,
    verbose: bool,
}

impl<'a> Injector<'a> {
    pub fn new(lookup: &'a dyn Lookup, loader: &'a Overloader) -> Self {
        Self {
            lookup,
            loader,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Answers every request the lookup service (or the loader itself) can
    /// satisfy and returns the target's own verdict on completeness.
    ///
    /// Unmet requests are not an error; targets may declare optional
    /// resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup service claims to have a resource but
    /// fails to produce it.
    pub fn inject(&self, target: &mut dyn Target) -> Result<bool, LookupError> {
        for name in target.resource_requests() {
            if let Some(resource) = answer(self.lookup, self.loader, &name, &[])? {
                target.answer_resource_request(&name, resource);
            } else if self.verbose {
                debug!(request = %name, "could not find target resource");
            }
        }

        let answered = target.check_requests_answered();
        target.after_injection();
        Ok(answered)
    }
}

/// Fills the requests of a [`LegacyTarget`], probing the lookup service with
/// the older capitalised, optionally prefixed resource names as well.
pub struct LegacyInjector<'a> {
    lookup: &'a dyn Lookup,
    loader: &'a Overloader,
    prefix: &'a str,
    source: Option<&'a dyn Source>,
    verbose: bool,
}

impl<'a> LegacyInjector<'a> {
    pub fn new(lookup: &'a dyn Lookup, loader: &'a Overloader) -> Self {
        Self {
            lookup,
            loader,
            prefix: "",
            source: None,
            verbose: false,
        }
    }

    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn source(mut self, source: Option<&'a dyn Source>) -> Self {
        self.source = source;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Injects the target, or hands it to the configured [`Source`] and
    /// returns its verdict instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup service claims to have a resource but
    /// fails to produce it.
    pub fn inject(&self, target: &mut dyn LegacyTarget) -> Result<bool, LookupError> {
        if let Some(source) = self.source {
            return Ok(source.apply_source(target));
        }

        for name in target.registry_requests() {
            let legacy_name = format!("{}{}", self.prefix, text::upper_first(&name));
            if let Some(resource) = answer(self.lookup, self.loader, &name, &[&legacy_name])? {
                target.answer_registry_request(&name, resource);
            } else if self.verbose {
                debug!(request = %name, legacy = %legacy_name, "could not find legacy target resource");
            }
        }

        let answered = target.check_registry_requests_answers();
        target.after_registry();
        Ok(answered)
    }
}

fn answer(
    lookup: &dyn Lookup,
    loader: &Overloader,
    name: &str,
    aliases: &[&str],
) -> Result<Option<Value>, LookupError> {
    for key in std::iter::once(name).chain(aliases.iter().copied()) {
        if lookup.has(key) {
            return lookup.get(key).map(Some);
        }
    }
    if name == LOADER_REQUEST {
        Ok(Some(Value::Loader(loader.clone())))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::lookup::{LookupError, MockLookup, ServiceMap};
    use crate::target::ResourceSlots;
    use crate::types::TypeRegistry;

    use super::*;

    fn loader() -> Overloader {
        Overloader::new(Arc::new(ServiceMap::new()), Arc::new(TypeRegistry::empty()))
    }

    #[derive(Default)]
    struct Recorder {
        slots: ResourceSlots,
        after: usize,
        after_registry: usize,
    }

    impl Target for Recorder {
        fn resource_requests(&self) -> Vec<String> {
            self.slots.resource_requests()
        }

        fn answer_resource_request(&mut self, name: &str, resource: Value) -> bool {
            self.slots.answer_resource_request(name, resource)
        }

        fn check_requests_answered(&self) -> bool {
            self.slots.check_requests_answered()
        }

        fn after_injection(&mut self) {
            self.after += 1;
        }
    }

    impl LegacyTarget for Recorder {
        fn registry_requests(&self) -> Vec<String> {
            self.slots.registry_requests()
        }

        fn answer_registry_request(&mut self, name: &str, resource: Value) -> bool {
            self.slots.answer_registry_request(name, resource)
        }

        fn check_registry_requests_answers(&self) -> bool {
            self.slots.check_registry_requests_answers()
        }

        fn after_registry(&mut self) {
            self.after_registry += 1;
        }
    }

    #[test]
    fn injector_answers_available_requests() {
        let lookup = ServiceMap::new().with_service("a", 1);
        let loader = loader();
        let mut target = Recorder {
            slots: ResourceSlots::new().optional("a").required("b"),
            ..Default::default()
        };

        let answered = Injector::new(&lookup, &loader)
            .verbose(true)
            .inject(&mut target)
            .unwrap();

        assert!(!answered);
        assert_eq!(target.slots.get("a"), Some(&Value::from(1)));
        assert!(!target.slots.is_answered("b"));
        assert_eq!(target.after, 1);
    }

    #[test]
    fn injector_answers_loader_with_itself() {
        let lookup = ServiceMap::new();
        let loader = loader();
        let mut target = Recorder {
            slots: ResourceSlots::new().required(LOADER_REQUEST),
            ..Default::default()
        };

        assert!(Injector::new(&lookup, &loader).inject(&mut target).unwrap());
        let injected = target.slots.get_as::<Overloader>(LOADER_REQUEST).unwrap();
        assert!(injected.ptr_eq(&loader));
    }

    #[test]
    fn injector_prefers_lookup_entry_for_loader() {
        let lookup = ServiceMap::new().with_service(LOADER_REQUEST, "custom");
        let loader = loader();
        let mut target = Recorder {
            slots: ResourceSlots::new().optional(LOADER_REQUEST),
            ..Default::default()
        };

        Injector::new(&lookup, &loader).inject(&mut target).unwrap();
        assert_eq!(target.slots.get(LOADER_REQUEST), Some(&Value::from("custom")));
    }

    #[test]
    fn injector_propagates_lookup_failures() {
        let mut lookup = MockLookup::new();
        lookup.expect_has().returning(|_| true);
        lookup.expect_get().returning(|key| {
            Err(LookupError::NotFound {
                key: key.to_owned(),
            })
        });
        let loader = loader();
        let mut target = Recorder {
            slots: ResourceSlots::new().optional("a"),
            ..Default::default()
        };

        assert!(Injector::new(&lookup, &loader).inject(&mut target).is_err());
        assert_eq!(target.after, 0);
    }

    #[test]
    fn legacy_injector_probes_prefixed_names() {
        let lookup = ServiceMap::new()
            .with_service("Gems_Db", "legacy-db")
            .with_service("log", "plain-log");
        let loader = loader();
        let mut target = Recorder {
            slots: ResourceSlots::new().required("db").required("log"),
            ..Default::default()
        };

        let answered = LegacyInjector::new(&lookup, &loader)
            .prefix("Gems_")
            .inject(&mut target)
            .unwrap();

        assert!(answered);
        assert_eq!(target.slots.get("db"), Some(&Value::from("legacy-db")));
        assert_eq!(target.slots.get("log"), Some(&Value::from("plain-log")));
        assert_eq!(target.after_registry, 1);
    }

    struct Denying;

    impl Source for Denying {
        fn apply_source(&self, target: &mut dyn LegacyTarget) -> bool {
            target.answer_registry_request("db", Value::from("from-source"));
            false
        }
    }

    #[test]
    fn legacy_injector_delegates_to_source() {
        let lookup = ServiceMap::new().with_service("db", "from-lookup");
        let loader = loader();
        let mut target = Recorder {
            slots: ResourceSlots::new().optional("db"),
            ..Default::default()
        };

        let answered = LegacyInjector::new(&lookup, &loader)
            .source(Some(&Denying))
            .inject(&mut target)
            .unwrap();

        assert!(!answered);
        assert_eq!(target.slots.get("db"), Some(&Value::from("from-source")));
        assert_eq!(target.after_registry, 0);
    }
}
