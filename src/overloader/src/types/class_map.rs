use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::types::ClassDescriptor;

#[derive(Debug, Default)]
pub struct ClassMap {
    classes: BTreeMap<String, Arc<ClassDescriptor>>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: ClassDescriptor) -> Option<Arc<ClassDescriptor>> {
        self.classes
            .insert(class.name().to_owned(), Arc::new(class))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_a(&self, class: &str, ty: &str) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![class];

        while let Some(current) = pending.pop() {
            if current == ty {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(descriptor) = self.classes.get(current) {
                pending.extend(descriptor.ancestors().iter().map(String::as_str));
            }
        }
        false
    }
}
