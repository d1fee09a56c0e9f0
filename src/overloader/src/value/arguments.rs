use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::value::Value;
use crate::value::convert::{ArgumentError, FromValue};

/// The key of a single supplied argument: either its position among the
/// positional arguments or an explicit name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgKey {
    Index(usize),
    Name(String),
}

impl Display for ArgKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// An ordered bag of caller-supplied arguments.
///
/// Positional and named entries may be mixed; insertion order is kept for
/// both, so that a resolver consuming arguments strictly in order sees them
/// the way the caller wrote them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(ArgKey, Value)>,
    next_index: usize,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn push(&mut self, value: impl Into<Value>) {
        let key = ArgKey::Index(self.next_index);
        self.next_index += 1;
        self.entries.push((key, value.into()));
    }

    /// Sets a named argument, replacing an earlier one with the same name in
    /// place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| Self::is_name(key, &name)) {
            slot.1 = value;
        } else {
            self.entries.push((ArgKey::Name(name), value));
        }
    }

    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| Self::is_name(key, name))
    }

    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| Self::is_name(key, name))
            .map(|(_, value)| value)
    }

    /// Removes the named argument and returns it.
    pub fn take_named(&mut self, name: &str) -> Option<Value> {
        let pos = self
            .entries
            .iter()
            .position(|(key, _)| Self::is_name(key, name))?;
        Some(self.entries.remove(pos).1)
    }

    /// Returns the entry at `position` in insertion order, regardless of its
    /// key.
    pub fn nth(&self, position: usize) -> Option<&Value> {
        self.entries.get(position).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArgKey, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }

    fn is_name(key: &ArgKey, name: &str) -> bool {
        matches!(key, ArgKey::Name(n) if n == name)
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut args = Self::new();
        iter.into_iter().for_each(|value| args.push(value));
        args
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

/// Constructor arguments in declared parameter order, as produced by a
/// [`Resolver`].
///
/// [`Resolver`]: crate::resolver::Resolver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArguments {
    values: Vec<Value>,
}

impl ResolvedArguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Moves the argument at `index` out, leaving [`Value::Null`] behind, and
    /// converts it.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no argument at `index` or it has the
    /// wrong type.
    pub fn take<T: FromValue>(&mut self, index: usize) -> Result<T, ArgumentError> {
        let Some(slot) = self.values.get_mut(index) else {
            return Err(ArgumentError::Missing { index });
        };
        let value = std::mem::replace(slot, Value::Null);
        T::from_value(value).map_err(|value| ArgumentError::Mismatch {
            index,
            expected: T::EXPECTED,
            found: value.kind(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for ResolvedArguments {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
