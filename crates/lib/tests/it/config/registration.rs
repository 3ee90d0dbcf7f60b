use paperkit::config::{BoolCodec, IntCodec, NodePriority, StringCodec};

use crate::helpers::*;

// ===== PRIORITY ARBITRATION =====

#[test]
fn test_equal_priority_keeps_existing_node() {
    let mut tree = test_tree();
    let root = tree.root();
    let first = tree.declare(root, "limit", IntCodec::new(1)).unwrap();
    let children_before = tree.children(root).len();

    let second = tree.declare(root, "limit", IntCodec::new(2)).unwrap();

    assert_eq!(tree.children(root).len(), children_before);
    assert!(tree.is_registered(first.id()));
    assert!(!tree.is_registered(second.id()));
}

#[test]
fn test_higher_priority_replaces_existing_node() {
    let mut tree = test_tree();
    let root = tree.root();
    let first = tree.declare(root, "limit", IntCodec::new(1)).unwrap();
    let children_before = tree.children(root).len();

    let second = tree
        .declare_with_priority(root, "limit", IntCodec::new(2), NodePriority::High)
        .unwrap();

    assert_eq!(tree.children(root).len(), children_before);
    assert!(!tree.is_registered(first.id()));
    assert!(tree.is_registered(second.id()));
    assert!(tree.children(root).contains(&second.id()));
}

#[test]
fn test_lowest_priority_node_is_always_replaced() {
    let mut tree = test_tree();
    let root = tree.root();
    let placeholder = tree
        .declare_with_priority(root, "motd", StringCodec::new("placeholder"), NodePriority::Lowest)
        .unwrap();
    let real = tree
        .declare_with_priority(root, "motd", StringCodec::new("Welcome"), NodePriority::Lowest)
        .unwrap();

    assert!(!tree.is_registered(placeholder.id()));
    assert!(tree.is_registered(real.id()));
}

#[test]
fn test_lower_priority_never_replaces() {
    let mut tree = test_tree();
    let root = tree.root();
    let pinned = tree
        .declare_with_priority(root, "pinned", BoolCodec::new(true), NodePriority::Highest)
        .unwrap();
    let late = tree
        .declare_with_priority(root, "pinned", BoolCodec::new(false), NodePriority::High)
        .unwrap();

    assert!(tree.is_registered(pinned.id()));
    assert!(!tree.is_registered(late.id()));
}

#[test]
fn test_version_node_cannot_be_shadowed() {
    let mut tree = test_tree();
    let root = tree.root();
    let version = tree.version_node().id();
    let impostor = tree
        .declare_with_priority(root, "_version", IntCodec::new(9), NodePriority::High)
        .unwrap();

    assert!(tree.is_registered(version));
    assert!(!tree.is_registered(impostor.id()));
}

#[test]
fn test_priority_ordering() {
    assert!(NodePriority::Lowest < NodePriority::Low);
    assert!(NodePriority::Normal < NodePriority::Highest);
    assert!(NodePriority::High.supersedes(NodePriority::Normal));
    assert!(!NodePriority::Normal.supersedes(NodePriority::Normal));
    assert!(NodePriority::Lowest.supersedes(NodePriority::Lowest));
}

// ===== EQUALITY =====

#[test]
fn test_equality_ignores_node_kind() {
    let mut tree = test_tree();
    let root = tree.root();
    let as_container = tree.container(root, "section").unwrap();
    let as_value = tree.declare(root, "section", StringCodec::default()).unwrap();

    assert!(tree.node_eq(as_container, as_value.id()));
    assert_eq!(tree.key(as_container), tree.key(as_value.id()));
}

#[test]
fn test_nodes_of_different_trees_differ() {
    let mut a = test_tree();
    let mut b = test_tree();
    let in_a = a.container(a.root(), "section").unwrap();
    let in_b = b.container(b.root(), "section").unwrap();

    assert_ne!(a.key(in_a), b.key(in_b));
    assert_eq!(a.key(in_a).base_path, b.key(in_b).base_path);
}

#[test]
fn test_shadowed_node_reads_through_shared_path() {
    let mut tree = test_tree();
    let root = tree.root();
    let kept = tree.declare(root, "greeting", StringCodec::new("hi")).unwrap();
    let shadowed = tree.declare(root, "greeting", StringCodec::new("hello")).unwrap();

    tree.set_value(&shadowed, "hey".to_string());
    assert_eq!(tree.value(&kept), "hey");
}
