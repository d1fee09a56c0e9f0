use std::sync::Arc;

use snafu::prelude::*;

use crate::loader::Overloader;
use crate::lookup::Lookup;
use crate::value::{Arguments, Object, Value};

/// Fallible conversion out of a [`Value`].
///
/// On failure the original value is handed back so callers can report what
/// they actually received.
pub trait FromValue: Sized {
    /// A short description of the accepted kind, used in error messages.
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Result<Self, Value>;
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ArgumentError {
    #[snafu(display("no constructor argument at position {index}"))]
    #[non_exhaustive]
    Missing { index: usize },
    #[snafu(display("constructor argument {index} should be {expected}, found {found}"))]
    #[non_exhaustive]
    Mismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(i) => Ok(i as f64),
            other => Err(other),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromValue for Vec<Value> {
    const EXPECTED: &'static str = "array";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(list) => Ok(list),
            Value::Map(map) => Ok(map.into_values()),
            other => Err(other),
        }
    }
}

impl FromValue for Arguments {
    const EXPECTED: &'static str = "array";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Map(map) => Ok(map),
            Value::List(list) => Ok(list.into()),
            other => Err(other),
        }
    }
}

impl FromValue for Object {
    const EXPECTED: &'static str = "object";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(other),
        }
    }
}

impl FromValue for Arc<dyn Lookup> {
    const EXPECTED: &'static str = "lookup service";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Lookup(lookup) => Ok(lookup),
            other => Err(other),
        }
    }
}

impl FromValue for Overloader {
    const EXPECTED: &'static str = "loader";

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Loader(loader) => Ok(loader),
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_maps_null_to_none() {
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(Value::from(4)).unwrap(), Some(4));
        assert!(Option::<i64>::from_value(Value::from("4")).is_err());
    }

    #[test]
    fn list_and_map_convert_into_each_other() {
        let list = Vec::<Value>::from_value(Value::from(Arguments::new().with(1).with(2))).unwrap();
        assert_eq!(list, vec![Value::from(1), Value::from(2)]);

        let args = Arguments::from_value(Value::from(vec![Value::from("a")])).unwrap();
        assert_eq!(args.nth(0), Some(&Value::from("a")));
    }
}
