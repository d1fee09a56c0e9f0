use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::target::Component;
use crate::util::any::{downcast_box, AsAny};
use crate::value::{Arguments, Object};

/// What [`Overloader::create`] is asked to produce.
///
/// [`Overloader::create`]: crate::loader::Overloader::create
pub enum Creation {
    /// A short or fully-qualified class name.
    Name(String),
    /// A class name bundled with its constructor arguments. Can't be
    /// combined with further arguments.
    Spec { name: String, args: Arguments },
    /// Called once to produce a class name or a ready instance.
    Factory(Box<dyn FnOnce() -> Produced + Send>),
    /// An instance built elsewhere; it is only injected.
    Instance(Instance),
}

impl Creation {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn spec(name: impl Into<String>, args: Arguments) -> Self {
        Self::Spec {
            name: name.into(),
            args,
        }
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: FnOnce() -> Produced + Send + 'static,
    {
        Self::Factory(Box::new(factory))
    }
}

impl From<&str> for Creation {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Creation {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Instance> for Creation {
    fn from(instance: Instance) -> Self {
        Self::Instance(instance)
    }
}

impl Debug for Creation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Spec { name, args } => f
                .debug_struct("Spec")
                .field("name", name)
                .field("args", args)
                .finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
        }
    }
}

/// The product of a [`Creation::Factory`].
#[derive(Debug)]
pub enum Produced {
    Name(String),
    Instance(Instance),
}

impl From<&str> for Produced {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<Instance> for Produced {
    fn from(instance: Instance) -> Self {
        Self::Instance(instance)
    }
}

/// A freshly created object, owned by the caller, tagged with the class
/// name it was built as.
pub struct Instance {
    class: Arc<str>,
    inner: Box<dyn Component>,
}

impl Instance {
    pub fn new<T: Component>(class: impl Into<Arc<str>>, value: T) -> Self {
        Self {
            class: class.into(),
            inner: Box::new(value),
        }
    }

    pub(crate) fn from_boxed(class: impl Into<Arc<str>>, inner: Box<dyn Component>) -> Self {
        Self {
            class: class.into(),
            inner,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn is<T: Any>(&self) -> bool {
        <dyn Component as AsAny>::as_any(&*self.inner).is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Component as AsAny>::as_any(&*self.inner).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Component as AsAny>::as_any_mut(&mut *self.inner).downcast_mut::<T>()
    }

    /// Moves the object out as its concrete type, or hands the instance back
    /// if it is something else.
    pub fn downcast<T: Any>(self) -> Result<Box<T>, Self> {
        let class = self.class;
        downcast_box::<dyn Component, T>(self.inner).map_err(|inner| Self { class, inner })
    }

    /// Shares the object, e.g. to register it with a lookup service.
    pub fn into_object(self) -> Object {
        Object::from_boxed(self.class, self.inner)
    }

    pub(crate) fn parts_mut(&mut self) -> (&str, &mut dyn Component) {
        (&self.class, &mut *self.inner)
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Instance")
            .field("class", &self.class)
            .field("type", &<dyn Component as AsAny>::type_name(&*self.inner))
            .finish()
    }
}
