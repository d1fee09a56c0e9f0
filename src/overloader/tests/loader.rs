mod common;

use std::sync::Arc;

use overloader::prelude::*;

use common::{project_loader, Plain};

fn loader() -> Overloader {
    project_loader(Arc::new(ServiceMap::new()))
}

fn legacy_loader() -> Overloader {
    let loader = loader();
    loader.enable_legacy_classes(LegacyNaming::new(""));
    loader
}

#[test]
fn prefixes_are_merged_ahead_of_defaults() {
    assert_eq!(
        loader().prefixes(),
        ["Test3", "Test2", "Test1", "Zalt", "Laminas", "Zend"]
    );
}

#[test]
fn find_uses_first_matching_prefix() {
    let loader = loader();
    let cases = [
        ("Test1", "OnlyIn1"),
        ("Test2", "OnlyIn2"),
        ("Test3", "OnlyIn3"),
        ("Test3", "In3and2and1"),
        ("Test3", "Sub\\SubOnlyIn3"),
    ];
    for (namespace, short) in cases {
        assert_eq!(loader.find(short).unwrap(), format!("{namespace}\\{short}"));
        // Stable on repeated calls.
        assert_eq!(loader.find(short).unwrap(), format!("{namespace}\\{short}"));
    }
}

#[test]
fn find_normalizes_short_names() {
    let loader = loader();
    assert_eq!(loader.find("onlyIn1").unwrap(), "Test1\\OnlyIn1");
    assert_eq!(loader.find("Sub/SubOnlyIn3").unwrap(), "Test3\\Sub\\SubOnlyIn3");
    assert_eq!(loader.find("Test1\\In2and1").unwrap(), "Test1\\In2and1");
}

#[test]
fn find_lists_tried_prefixes() {
    let err = loader().find("Nowhere").unwrap_err();
    match &err {
        LoadError::ClassNotFound { name, prefixes, .. } => {
            assert_eq!(name, "Nowhere");
            assert_eq!(prefixes, &["Test3", "Test2", "Test1", "Zalt", "Laminas", "Zend"]);
        }
        _ => panic!("unexpected error: {err}"),
    }
    assert!(err.to_string().contains("Test3, Test2, Test1"));
}

#[test]
fn create_returns_most_specific_class() {
    let loader = loader();
    let types = loader.types();
    let cases: [(&str, &[&str]); 4] = [
        (
            "In3and2and1",
            &["Test1\\In3and2and1", "Test2\\In3and2and1", "Test3\\In3and2and1"],
        ),
        ("In3and2", &["Test3\\In3and2", "Test2\\In3and2"]),
        ("In3and1", &["Test3\\In3and1", "Test1\\In3and1"]),
        ("In2and1", &["Test2\\In2and1", "Test1\\In2and1"]),
    ];
    for (short, ancestors) in cases {
        let instance = loader.create(short).unwrap();
        assert!(instance.is::<Plain>());
        for ancestor in ancestors {
            assert!(types.is_a(instance.class(), ancestor), "{short} is a {ancestor}");
        }
    }
}

#[test]
fn create_passes_arguments_through() {
    let instance = loader()
        .create_with("OnlyIn2", Arguments::new().with(1).with("two"))
        .unwrap();
    let plain = instance.downcast::<Plain>().unwrap();
    assert_eq!(plain.args, vec![Value::from(1), Value::from("two")]);
}

#[test]
fn find_legacy_classes() {
    let loader = legacy_loader();
    let cases = [
        ("Test1_Legacy1", "Legacy1"),
        ("Test2_Legacy2", "Legacy2"),
        ("Test3_Legacy3", "Legacy3"),
        ("Test3_Sub_SubLegacy3", "Sub_SubLegacy3"),
        ("Test3\\OnlyIn3", "OnlyIn3"),
        ("Test3\\Sub\\SubOnlyIn3", "Sub\\SubOnlyIn3"),
        ("Test1_Legacy1", "Legacy1"),
    ];
    for (expected, short) in cases {
        assert_eq!(loader.find(short).unwrap(), expected);
    }
}

#[test]
fn legacy_classes_are_ignored_by_default() {
    assert!(loader().find("Legacy1").is_err());
}

#[test]
fn find_in_sub_scope() {
    let sub = loader().create_sub_scope("Sub");
    assert_eq!(sub.find("SubOnlyIn2").unwrap(), "Test2\\Sub\\SubOnlyIn2");
    assert_eq!(sub.find("SubOnlyIn3").unwrap(), "Test3\\Sub\\SubOnlyIn3");
    assert!(sub.find("OnlyIn3").is_err());
}

#[test]
fn find_mixed_classes_in_legacy_sub_scope() {
    let main = legacy_loader();
    let sub = main.create_sub_scope("Sub");
    assert_eq!(sub.legacy_naming(), main.legacy_naming());

    let cases = [
        ("Test2\\Sub\\SubOnlyIn2", "SubOnlyIn2"),
        ("Test3\\Sub\\SubOnlyIn3", "SubOnlyIn3"),
        ("Test2_Sub_SubLegacy2", "SubLegacy2"),
        ("Test3_Sub_SubLegacy3", "SubLegacy3"),
    ];
    for (expected, short) in cases {
        assert_eq!(sub.find(short).unwrap(), expected);
    }
}

#[test]
fn added_last_priority_keeps_defaults_first() {
    let loader = Overloader::builder(Arc::new(ServiceMap::new()), common::project_types())
        .priority(PrefixPriority::AddedLast)
        .prefixes(["Test1", "Test2"], true)
        .build();
    assert_eq!(
        loader.prefixes(),
        ["Zalt", "Laminas", "Zend", "Test1", "Test2"]
    );
    assert_eq!(loader.find("In2and1").unwrap(), "Test1\\In2and1");
}

#[test]
fn legacy_first_order_prefers_legacy_spelling() {
    let types = Arc::new(
        TypeRegistry::init(module_fn(|configurer| {
            class("Test1\\Both").constructed_by(common::plain).set_on(configurer);
            class("Test1_Both").constructed_by(common::plain).set_on(configurer);
            Ok(())
        }))
        .unwrap(),
    );
    let loader = Overloader::with_prefixes(Arc::new(ServiceMap::new()), types, ["Test1"], false);

    loader.enable_legacy_classes(LegacyNaming::new(""));
    assert_eq!(loader.find("Both").unwrap(), "Test1\\Both");

    loader.enable_legacy_classes(LegacyNaming::new("").with_order(LegacyOrder::LegacyFirst));
    assert_eq!(loader.find("Both").unwrap(), "Test1_Both");
}

#[test]
fn registry_keeps_first_loader() {
    let registry = LoaderRegistry::new();
    let first = loader();
    registry.register(&first);
    registry.register(&loader());
    assert!(registry.get().unwrap().ptr_eq(&first));
}
