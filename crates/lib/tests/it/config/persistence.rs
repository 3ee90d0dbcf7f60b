use paperkit::config::{ConfigStore, ConfigTree, ConfigValue, Difficulty, IntCodec, MemoryStore};

use crate::helpers::*;

// ===== SAVE =====

#[test]
fn test_save_materializes_defaults() {
    let mut tree = test_tree();
    declare_sample(&mut tree);

    tree.save();

    let store = tree.store();
    assert_eq!(store.get("general.debug"), Some(ConfigValue::Bool(false)));
    assert_eq!(store.get("general.prefix"), Some(ConfigValue::Text("[Kit]".into())));
    assert_eq!(store.get("spawning.enabled"), Some(ConfigValue::Bool(true)));
    assert_eq!(store.get("spawning.limit"), Some(ConfigValue::Int(16)));
    assert_eq!(store.get_string_list("worlds"), vec!["world"]);
    assert_eq!(store.get("_version"), Some(ConfigValue::Int(0)));
    // Containers have no value of their own
    assert!(store.get("general").unwrap().is_map());
}

#[test]
fn test_save_normalizes_out_of_range_values() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);
    tree.store_mut().set("spawning.limit", Some(ConfigValue::Int(500)));

    tree.save_node(schema.spawning.id());

    assert_eq!(tree.store().get("spawning.limit"), Some(ConfigValue::Int(64)));
    // Sibling sections are untouched by a partial save
    assert!(!tree.store().contains("general.debug"));
}

#[test]
fn test_save_writes_difficulty_tiers() {
    let mut tree = test_tree();
    let root = tree.root();
    tree.declare_difficulty(
        root,
        "damage",
        IntCodec::new(1),
        [
            (Difficulty::Peaceful, IntCodec::new(0)),
            (Difficulty::Hard, IntCodec::new(8)),
        ],
    )
    .unwrap();

    tree.save();

    let store = tree.store();
    assert_eq!(store.get("damage.default"), Some(ConfigValue::Int(1)));
    assert_eq!(store.get("damage.peaceful"), Some(ConfigValue::Int(0)));
    assert_eq!(store.get("damage.hard"), Some(ConfigValue::Int(8)));
    assert!(!store.contains("damage.easy"));
}

#[test]
fn test_shadowed_nodes_are_not_saved() {
    let mut tree = test_tree();
    let root = tree.root();
    tree.declare(root, "limit", IntCodec::new(1)).unwrap();
    tree.declare(root, "limit", IntCodec::new(2)).unwrap();

    tree.save();
    assert_eq!(tree.store().get("limit"), Some(ConfigValue::Int(1)));
}

// ===== FILES =====

#[test]
fn test_store_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plugins").join("config.json");

    let mut tree = ConfigTree::new(MemoryStore::load(&file).unwrap());
    let schema = declare_sample(&mut tree);
    tree.set_value(&schema.spawn_limit, 32);
    tree.save();
    tree.set_comments(schema.spawning.id(), true, ["Mob spawning", ""]);
    tree.store().save().unwrap();
    assert!(file.is_file());

    let mut reloaded = ConfigTree::new(MemoryStore::load(&file).unwrap());
    let schema = declare_sample(&mut reloaded);
    assert_eq!(reloaded.value(&schema.spawn_limit), 32);
    assert_eq!(
        reloaded.comments(schema.spawning.id(), true),
        vec!["Mob spawning".to_string(), String::new()]
    );
}

#[test]
fn test_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("absent.json");

    let store = MemoryStore::load(&file).unwrap();
    assert_eq!(store.keys().count(), 0);
    assert_eq!(store.file(), Some(file.as_path()));
}

#[test]
fn test_corrupt_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.json");
    std::fs::write(&file, "{ not json").unwrap();

    let err = MemoryStore::load(&file).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.module(), "config");
}

// ===== COMMENTS =====

#[test]
fn test_comments_attach_to_value_or_base_path() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);
    tree.save();

    let spawning = schema.spawning.id();
    tree.set_comments(spawning, false, ["Whether mobs spawn"]);
    tree.set_inline_comments(spawning, true, ["section"]);

    assert_eq!(tree.store().comments("spawning.enabled"), vec!["Whether mobs spawn"]);
    assert_eq!(tree.inline_comments(spawning, true), vec!["section"]);
    assert!(tree.comments(spawning, true).is_empty());

    tree.set_comments(spawning, false, Vec::<String>::new());
    assert!(tree.comments(spawning, false).is_empty());
}

#[test]
fn test_comments_need_an_existing_path() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    tree.set_comments(schema.prefix.id(), false, ["never stored"]);
    assert!(tree.comments(schema.prefix.id(), false).is_empty());
}
