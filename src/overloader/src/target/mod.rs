mod fill;
mod injector;
mod slots;

use crate::util::any::AsAny;
use crate::value::Value;

pub use fill::Fillable;
pub use injector::{Injector, LegacyInjector, Source, LOADER_REQUEST};
pub use slots::ResourceSlots;

/// Anything an overloader can construct.
///
/// The two capability queries let the overloader find out, after
/// construction, whether the object wants resources injected. Both default
/// to "no"; `#[derive(Target)]` answers "yes" for [`Target`].
pub trait Component: AsAny + Send + Sync + 'static {
    fn as_target(&mut self) -> Option<&mut dyn Target> {
        None
    }

    fn as_legacy_target(&mut self) -> Option<&mut dyn LegacyTarget> {
        None
    }
}

/// An object that declares the named resources it needs after construction.
///
/// The injector answers every request it can, then lets the object decide
/// whether what it received is enough through
/// [`Target::check_requests_answered`], and finally calls
/// [`Target::after_injection`].
pub trait Target {
    /// Names of the resources to inject.
    fn resource_requests(&self) -> Vec<String>;

    /// Stores one resource. Returns `false` if the resource was rejected.
    fn answer_resource_request(&mut self, name: &str, resource: Value) -> bool;

    /// Returns `false` if required resources are missing.
    fn check_requests_answered(&self) -> bool {
        true
    }

    fn after_injection(&mut self) {}
}

/// The older target contract, answered by [`LegacyInjector`].
pub trait LegacyTarget {
    fn registry_requests(&self) -> Vec<String>;

    fn answer_registry_request(&mut self, name: &str, resource: Value) -> bool;

    fn check_registry_requests_answers(&self) -> bool {
        true
    }

    fn after_registry(&mut self) {}
}
