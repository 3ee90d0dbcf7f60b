use std::collections::BTreeMap;

use paperkit::{
    config::{ConfigStore, ConfigValue, MySqlConfig},
    storage::{MySqlSettings, StorageType, StorageTypeCodec},
};

use crate::helpers::*;

// ===== SETTINGS FROM CONFIGURATION =====

#[test]
fn test_defaults_build_a_local_url() {
    let mut tree = test_tree();
    let root = tree.root();
    let mysql = MySqlConfig::declare(&mut tree, root).unwrap();

    let settings = MySqlSettings::from_config(&tree, &mysql);
    assert_eq!(settings.jdbc_url(), "jdbc:mysql://localhost:3306/spigot");
    assert_eq!(settings.user_id, "root");
    assert_eq!(settings.password, "password");
    assert!(!tree.value(&mysql.enabled));
}

#[test]
fn test_stored_values_and_flags_reach_the_url() {
    let mut tree = test_tree();
    let root = tree.root();
    let storage = tree.container(root, "storage").unwrap();
    let mysql = MySqlConfig::declare(&mut tree, storage).unwrap();

    tree.set_value(&mysql.hostname, "db.internal".to_string());
    tree.set_value(&mysql.port, 3307);
    tree.set_value(&mysql.database, "survival".to_string());
    let mut flags = BTreeMap::new();
    flags.insert("useSSL".to_string(), ConfigValue::Bool(false));
    tree.set_value(&mysql.flags, vec![flags]);

    assert_eq!(tree.store().get("storage.mysql.port"), Some(ConfigValue::Int(3307)));
    let settings = MySqlSettings::from_config(&tree, &mysql);
    assert_eq!(
        settings.jdbc_url(),
        "jdbc:mysql://db.internal:3307/survival?useSSL=false"
    );
    assert!(settings.connect_options().is_ok());
}

#[test]
fn test_port_is_clamped_to_valid_range() {
    let mut tree = test_tree();
    let root = tree.root();
    let mysql = MySqlConfig::declare(&mut tree, root).unwrap();

    tree.store_mut().set("mysql.port", Some(ConfigValue::Int(700_000)));
    assert_eq!(MySqlSettings::from_config(&tree, &mysql).port, u16::MAX);
}

#[test]
fn test_table_prefix_underscore_rule() {
    let mut tree = test_tree();
    let root = tree.root();
    let mysql = MySqlConfig::declare(&mut tree, root).unwrap();

    assert_eq!(mysql.table_prefix(&tree), "");
    tree.set_value(&mysql.table_prefix, "kit".to_string());
    assert_eq!(mysql.table_prefix(&tree), "kit_");
    tree.set_value(&mysql.table_prefix, "kit_".to_string());
    assert_eq!(mysql.table_prefix(&tree), "kit_");
    tree.set_value(&mysql.append_underscore_to_prefix, false);
    tree.set_value(&mysql.table_prefix, "kit".to_string());
    assert_eq!(mysql.table_prefix(&tree), "kit");
}

#[test]
fn test_mysql_section_saves_with_expected_keys() {
    let mut tree = test_tree();
    let root = tree.root();
    MySqlConfig::declare(&mut tree, root).unwrap();
    tree.save();

    let store = tree.store();
    for key in [
        "mysql.enabled",
        "mysql.hostname",
        "mysql.port",
        "mysql.database",
        "mysql.userID",
        "mysql.password",
        "mysql.flags",
        "mysql.tablePrefix",
        "mysql.appendUnderscoreToPrefix",
    ] {
        assert!(store.contains(key), "{key}");
    }
}

// ===== STORAGE TYPE =====

#[test]
fn test_storage_type_switch() {
    let mut tree = test_tree();
    let root = tree.root();
    let storage_type = tree.declare(root, "storageType", StorageTypeCodec::default()).unwrap();

    assert!(!tree.value(&storage_type).uses_connection());
    tree.set_value(&storage_type, StorageType::MySql);
    assert_eq!(tree.store().get("storageType"), Some("MYSQL".into()));
    assert!(tree.value(&storage_type).uses_connection());
}
