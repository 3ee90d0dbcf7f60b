use paperkit::config::{BoolCodec, IntCodec, StringCodec};

use crate::helpers::*;

// ===== BASE AND VALUE PATHS =====

#[test]
fn test_value_path_equals_base_path_without_children() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    let prefix = schema.prefix.id();
    assert!(!tree.has_children(prefix));
    assert_eq!(tree.base_path(prefix), "general.prefix");
    assert_eq!(tree.value_path(prefix), tree.base_path(prefix));
}

#[test]
fn test_value_path_appends_value_node_name_with_children() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    let spawning = schema.spawning.id();
    assert!(tree.has_children(spawning));
    assert_eq!(tree.base_path(spawning), "spawning");
    assert_eq!(tree.value_path(spawning), "spawning.enabled");
    assert_eq!(tree.base_path(schema.spawn_limit.id()), "spawning.limit");
}

#[test]
fn test_value_node_name_depends_on_codec() {
    let mut tree = test_tree();
    let root = tree.root();
    let count = tree.declare(root, "count", IntCodec::new(1)).unwrap();
    tree.declare(&count, "extra", StringCodec::default()).unwrap();
    let toggle = tree.declare(root, "toggle", BoolCodec::new(false)).unwrap();
    tree.declare(&toggle, "extra", StringCodec::default()).unwrap();

    assert_eq!(tree.value_path(count.id()), "count.value");
    assert_eq!(tree.value_path(toggle.id()), "toggle.enabled");
}

#[test]
fn test_root_paths_are_empty() {
    let tree = test_tree();
    let root = tree.root();

    assert!(!tree.is_sub_node(root));
    assert!(!tree.has_name(root));
    assert_eq!(tree.base_path(root), "");
    // The root always has `_version`, but is not a sub node
    assert_eq!(tree.value_path(root), "");
}

#[test]
fn test_value_moves_when_children_are_added() {
    let mut tree = test_tree();
    let root = tree.root();
    let feature = tree.declare(root, "feature", BoolCodec::new(false)).unwrap();
    tree.set_value(&feature, true);
    assert_eq!(tree.describe(feature.id()), "feature=true");

    tree.declare(&feature, "radius", IntCodec::new(4)).unwrap();
    // The old scalar sits at the base path, not at `feature.enabled`
    assert!(!tree.value(&feature));
    tree.set_value(&feature, true);
    assert_eq!(tree.describe(feature.id()), "feature.enabled=true");
}

// ===== NAMES =====

#[test]
fn test_invalid_names_are_rejected() {
    let mut tree = test_tree();
    let root = tree.root();

    for name in ["", "a.b"] {
        let err = tree.declare(root, name, IntCodec::new(0)).unwrap_err();
        assert_eq!(err.module(), "config");
    }
}

#[test]
fn test_container_describes_as_null() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    assert!(tree.is_container(schema.general));
    assert_eq!(tree.describe(schema.general), "general=null");
    assert_eq!(tree.children(schema.general).len(), 2);
}
