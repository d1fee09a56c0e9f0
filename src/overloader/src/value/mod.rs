mod arguments;
mod convert;

use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::loader::Overloader;
use crate::lookup::Lookup;
use crate::target::Component;
use crate::util::any::AsAny;

pub use arguments::{ArgKey, Arguments, ResolvedArguments};
pub use convert::{ArgumentError, FromValue};

/// A dynamically typed value flowing through constructor resolution and
/// resource injection.
///
/// Primitive variants mirror the scalar kinds a constructor parameter can
/// declare. Everything richer travels as an [`Object`], a shared handle to a
/// [`Component`] tagged with the class name it was built as.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Arguments),
    Object(Object),
    Lookup(Arc<dyn Lookup>),
    Loader(Overloader),
}

impl Value {
    /// Returns the name of the primitive kind of this value, as used in
    /// parameter type checks.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) | Self::Map(_) => "array",
            Self::Object(_) => "object",
            Self::Lookup(_) => "lookup",
            Self::Loader(_) => "loader",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Arguments> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_lookup(&self) -> Option<&Arc<dyn Lookup>> {
        match self {
            Self::Lookup(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_loader(&self) -> Option<&Overloader> {
        match self {
            Self::Loader(l) => Some(l),
            _ => None,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::List(l) => f.debug_tuple("List").field(l).finish(),
            Self::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Self::Object(o) => f.debug_tuple("Object").field(o).finish(),
            Self::Lookup(_) => write!(f, "Lookup(..)"),
            Self::Loader(l) => f.debug_tuple("Loader").field(l).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Lookup(a), Self::Lookup(b)) => Arc::ptr_eq(a, b),
            (Self::Loader(a), Self::Loader(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Arguments> for Value {
    fn from(value: Arguments) -> Self {
        Self::Map(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Arc<dyn Lookup>> for Value {
    fn from(value: Arc<dyn Lookup>) -> Self {
        Self::Lookup(value)
    }
}

impl From<Overloader> for Value {
    fn from(value: Overloader) -> Self {
        Self::Loader(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A shared, type-erased instance together with the fully-qualified class
/// name it was registered under.
#[derive(Clone)]
pub struct Object {
    class: Arc<str>,
    inner: Arc<dyn Component>,
}

impl Object {
    pub fn new<T: Component>(class: impl Into<Arc<str>>, value: T) -> Self {
        Self {
            class: class.into(),
            inner: Arc::new(value),
        }
    }

    pub(crate) fn from_boxed(class: Arc<str>, inner: Box<dyn Component>) -> Self {
        Self {
            class,
            inner: Arc::from(inner),
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

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Object")
            .field("class", &self.class)
            .field("type", &<dyn Component as AsAny>::type_name(&*self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(i32);

    impl Component for Plain {}

    #[test]
    fn object_downcast_ref_succeeds() {
        let object = Object::new("App\\Plain", Plain(3));
        assert_eq!(object.class(), "App\\Plain");
        assert!(object.is::<Plain>());
        assert_eq!(object.downcast_ref::<Plain>().map(|p| p.0), Some(3));
        assert!(object.downcast_ref::<String>().is_none());
    }

    #[test]
    fn value_equality_compares_objects_by_identity() {
        let a = Object::new("App\\Plain", Plain(1));
        let b = Object::new("App\\Plain", Plain(1));
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn value_kind_matches_declared_primitive_names() {
        assert_eq!(Value::from(1).kind(), "int");
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::from(true).kind(), "bool");
        assert_eq!(Value::from(vec![Value::Null]).kind(), "array");
        assert_eq!(Value::from(Arguments::new()).kind(), "array");
        assert_eq!(Value::from(None::<i64>).kind(), "null");
    }
}
