use std::collections::{HashMap, HashSet};

use crate::target::{LegacyTarget, Target};
use crate::value::{FromValue, Value};

/// A reusable [`Target`] implementation to compose into objects that can't
/// use `#[derive(Target)]`.
///
/// Names starting with `_` are never requested. Only names marked as
/// required take part in [`Target::check_requests_answered`].
#[derive(Debug, Clone, Default)]
pub struct ResourceSlots {
    names: Vec<String>,
    required: HashSet<String>,
    values: HashMap<String, Value>,
}

impl ResourceSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.declare(name.into());
        self
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.declare(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.values
            .get(name)
            .cloned()
            .and_then(|value| T::from_value(value).ok())
    }

    pub fn is_answered(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Required names that have not been answered yet, in declaration order.
    pub fn missing(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| self.required.contains(*name) && !self.values.contains_key(*name))
            .map(String::as_str)
            .collect()
    }

    fn declare(&mut self, name: String) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    fn requests(&self) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !name.starts_with('_'))
            .cloned()
            .collect()
    }

    fn answer(&mut self, name: &str, resource: Value) -> bool {
        if self.names.iter().any(|n| n == name) {
            self.values.insert(name.to_owned(), resource);
            true
        } else {
            false
        }
    }
}

impl Target for ResourceSlots {
    fn resource_requests(&self) -> Vec<String> {
        self.requests()
    }

    fn answer_resource_request(&mut self, name: &str, resource: Value) -> bool {
        self.answer(name, resource)
    }

    fn check_requests_answered(&self) -> bool {
        self.missing().is_empty()
    }
}

impl LegacyTarget for ResourceSlots {
    fn registry_requests(&self) -> Vec<String> {
        self.requests()
    }

    fn answer_registry_request(&mut self, name: &str, resource: Value) -> bool {
        self.answer(name, resource)
    }

    fn check_registry_requests_answers(&self) -> bool {
        self.missing().is_empty()
    }
}
