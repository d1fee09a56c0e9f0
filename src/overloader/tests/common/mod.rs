#![allow(dead_code)]

use std::convert::Infallible;
use std::error::Error;
use std::sync::Arc;

use overloader::prelude::*;

/// Every test class is one of these; the registered class name tells them
/// apart.
#[derive(Debug, Default)]
pub struct Plain {
    pub args: Vec<Value>,
}

impl Component for Plain {}

pub fn plain(args: ResolvedArguments) -> Result<Plain, Infallible> {
    Ok(Plain {
        args: args.into_vec(),
    })
}

/// Three project namespaces overloading each other, plus a few classes
/// spelled the legacy way.
pub struct ProjectModule;

impl ProjectModule {
    const CLASSES: &'static [(&'static str, &'static [&'static str])] = &[
        ("Test1\\OnlyIn1", &[]),
        ("Test1\\In3and2and1", &[]),
        ("Test1\\In3and1", &[]),
        ("Test1\\In2and1", &[]),
        ("Test1_Legacy1", &[]),
        ("Test2\\OnlyIn2", &[]),
        ("Test2\\In3and2and1", &["Test1\\In3and2and1"]),
        ("Test2\\In3and2", &[]),
        ("Test2\\In2and1", &["Test1\\In2and1"]),
        ("Test2\\Sub\\SubOnlyIn2", &[]),
        ("Test2_Legacy2", &[]),
        ("Test2_Sub_SubLegacy2", &[]),
        ("Test3\\OnlyIn3", &[]),
        ("Test3\\In3and2and1", &["Test2\\In3and2and1"]),
        ("Test3\\In3and2", &["Test2\\In3and2"]),
        ("Test3\\In3and1", &["Test1\\In3and1"]),
        ("Test3\\Sub\\SubOnlyIn3", &[]),
        ("Test3_Legacy3", &[]),
        ("Test3_Sub_SubLegacy3", &[]),
    ];
}

impl Module for ProjectModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        for (name, ancestors) in Self::CLASSES {
            let binding = ancestors
                .iter()
                .fold(class(*name), |binding, ancestor| binding.extends(*ancestor));
            binding.constructed_by(plain).set_on(configurer);
        }
        Ok(())
    }
}

pub fn project_types() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::init(ProjectModule).unwrap())
}

/// An overloader searching `Test3`, `Test2` and `Test1` ahead of the
/// defaults.
pub fn project_loader(lookup: Arc<dyn Lookup>) -> Overloader {
    Overloader::with_prefixes(lookup, project_types(), ["Test3", "Test2", "Test1"], true)
}
