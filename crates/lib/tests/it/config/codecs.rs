use std::{collections::HashMap, str::FromStr};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use paperkit::{
    config::{
        BigDecimalCodec, BigIntegerCodec, ConfigStore, ConfigValue, DoubleCodec, EnumListCodec,
        IntCodec, OptionalCodec, StringCodec, TypedMapListCodec,
    },
    storage::{StorageType, StorageTypeCodec},
};

use crate::helpers::*;

// ===== SCALARS =====

#[test]
fn test_int_reads_are_clamped_to_bounds() {
    let mut tree = test_tree();
    let root = tree.root();
    let level = tree.declare(root, "level", IntCodec::bounded(0, 10)).unwrap();

    tree.store_mut().set("level", Some(ConfigValue::Int(99)));
    assert_eq!(tree.value(&level), 10);

    tree.store_mut().set("level", Some(ConfigValue::Int(-5)));
    assert_eq!(tree.value(&level), 0);
}

#[test]
fn test_int_writes_are_clamped_to_bounds() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    tree.set_value(&schema.spawn_limit, 1000);
    assert_eq!(tree.raw_value(schema.spawn_limit.id()), Some(ConfigValue::Int(64)));
}

#[test]
fn test_unreadable_values_fall_back_to_default() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    tree.store_mut()
        .set("spawning.limit", Some(ConfigValue::Text("lots".into())));
    tree.store_mut()
        .set("general.debug", Some(ConfigValue::List(vec![])));

    assert_eq!(tree.value(&schema.spawn_limit), 16);
    assert!(!tree.value(&schema.debug));
}

#[test]
fn test_numeric_text_is_accepted() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    tree.store_mut()
        .set("spawning.limit", Some(ConfigValue::Text(" 12 ".into())));
    assert_eq!(tree.value(&schema.spawn_limit), 12);
}

#[test]
fn test_double_bounds() {
    let mut tree = test_tree();
    let root = tree.root();
    let chance = tree
        .declare(root, "chance", DoubleCodec::new(0.5).with_bounds(0.0, 1.0))
        .unwrap();

    assert_eq!(tree.value(&chance), 0.5);
    tree.store_mut().set("chance", Some(ConfigValue::Float(4.2)));
    assert_eq!(tree.value(&chance), 1.0);
    tree.store_mut().set("chance", Some(ConfigValue::Int(0)));
    assert_eq!(tree.value(&chance), 0.0);
}

#[test]
fn test_double_rejects_non_finite_values() {
    let mut tree = test_tree();
    let root = tree.root();
    let rate = tree.declare(root, "rate", DoubleCodec::bounded(0.0, 1.0)).unwrap();

    tree.store_mut().set("rate", Some(ConfigValue::Text("NaN".into())));
    assert_eq!(tree.value(&rate), 0.0);
    tree.store_mut().set("rate", Some(ConfigValue::Text("inf".into())));
    assert_eq!(tree.value(&rate), 0.0);

    tree.set_value(&rate, f64::NAN);
    assert_eq!(tree.store().get("rate"), Some(ConfigValue::Float(0.0)));
}

#[test]
fn test_string_reads_other_scalars_as_text() {
    let mut tree = test_tree();
    let root = tree.root();
    let motd = tree.declare(root, "motd", StringCodec::new("hi")).unwrap();

    tree.store_mut().set("motd", Some(ConfigValue::Int(42)));
    assert_eq!(tree.value(&motd), "42");
}

#[test]
fn test_big_numbers_round_trip_as_text() {
    let mut tree = test_tree();
    let root = tree.root();
    let supply = tree
        .declare(root, "supply", BigIntegerCodec::new(BigInt::from(0)))
        .unwrap();
    let rate = tree
        .declare(
            root,
            "rate",
            BigDecimalCodec::new(BigDecimal::from_str("0.5").unwrap()),
        )
        .unwrap();

    let huge = BigInt::from_str("123456789012345678901234567890").unwrap();
    tree.set_value(&supply, huge.clone());
    assert_eq!(tree.value(&supply), huge);
    assert_eq!(tree.value(&rate), BigDecimal::from_str("0.5").unwrap());
}

// ===== ENUMS =====

#[test]
fn test_enum_reads_by_name() {
    let mut tree = test_tree();
    let root = tree.root();
    let storage = tree.declare(root, "storage", StorageTypeCodec::default()).unwrap();

    assert_eq!(tree.value(&storage), StorageType::FlatFile);
    tree.store_mut().set("storage", Some("MYSQL".into()));
    assert_eq!(tree.value(&storage), StorageType::MySql);
    tree.store_mut().set("storage", Some("POSTGRES".into()));
    assert_eq!(tree.value(&storage), StorageType::FlatFile);
}

#[test]
fn test_enum_list_drops_unknown_entries() {
    let mut tree = test_tree();
    let root = tree.root();
    let backends = tree
        .declare(root, "backends", EnumListCodec::<StorageType>::new())
        .unwrap();

    tree.store_mut().set(
        "backends",
        Some(vec!["MYSQL", "SQLITE", "FLAT_FILE"].into()),
    );
    assert_eq!(
        tree.value(&backends),
        vec![StorageType::MySql, StorageType::FlatFile]
    );
}

// ===== LISTS AND MAPS =====

#[test]
fn test_string_list_default_and_write() {
    let mut tree = test_tree();
    let schema = declare_sample(&mut tree);

    assert_eq!(tree.value(&schema.worlds), vec!["world".to_string()]);
    tree.set_value(&schema.worlds, vec!["world".into(), "world_nether".into()]);
    assert_eq!(tree.store().get_string_list("worlds"), vec!["world", "world_nether"]);
}

#[test]
fn test_typed_map_list_discards_bad_entries() {
    let mut tree = test_tree();
    let root = tree.root();
    let rewards = tree
        .declare(root, "rewards", TypedMapListCodec::<String, i64>::new())
        .unwrap();

    let mut section = std::collections::BTreeMap::new();
    section.insert("diamond".to_string(), ConfigValue::Int(3));
    section.insert("emerald".to_string(), ConfigValue::Text("many".into()));
    tree.store_mut()
        .set("rewards", Some(ConfigValue::List(vec![ConfigValue::Map(section)])));

    let expected: Vec<HashMap<String, i64>> = vec![HashMap::from([("diamond".to_string(), 3)])];
    assert_eq!(tree.value(&rewards), expected);
}

#[test]
fn test_optional_value_can_be_removed() {
    let mut tree = test_tree();
    let root = tree.root();
    let nickname = tree
        .declare(root, "nickname", OptionalCodec::new(StringCodec::new("unused")))
        .unwrap();

    assert_eq!(tree.value(&nickname), None);
    tree.set_value(&nickname, Some("Alex".into()));
    assert_eq!(tree.value(&nickname), Some("Alex".to_string()));
    tree.set_value(&nickname, None);
    assert!(!tree.store().contains("nickname"));
}
