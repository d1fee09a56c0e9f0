use std::error::Error;

use crate::types::class_map::ClassMap;
use crate::types::{ClassDescriptor, Configurer, RegistryError};

pub struct ConfigurerImpl {
    classes: ClassMap,
    errors: Vec<RegistryError>,
}

impl ConfigurerImpl {
    pub fn new() -> Self {
        Self {
            classes: ClassMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Result<ClassMap, RegistryError> {
        match self.errors.len() {
            0 => Ok(self.classes),
            1 => Err(self.errors.remove(0)),
            _ => Err(RegistryError::Aggregated {
                errors: self.errors,
            }),
        }
    }
}

impl Configurer for ConfigurerImpl {
    fn register(&mut self, class: ClassDescriptor) {
        if self.classes.get(class.name()).is_none() {
            self.classes.insert(class);
        } else {
            self.errors.push(RegistryError::ClassDuplicated {
                name: class.name().to_owned(),
            });
        }
    }

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }
}
