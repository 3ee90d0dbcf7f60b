use paperkit::config::{ConfigStore, ConfigValue, Difficulty, IntCodec};

use crate::helpers::*;

// ===== WATERFALL =====

#[test]
fn test_only_normal_tier_answers_every_difficulty() {
    let mut tree = test_tree();
    let root = tree.root();
    let damage = tree
        .declare_difficulty(root, "damage", IntCodec::new(1), [(Difficulty::Normal, IntCodec::new(6))])
        .unwrap();

    for difficulty in Difficulty::ALL {
        assert_eq!(tree.value_for(&damage, difficulty), 6, "{difficulty}");
    }
}

#[test]
fn test_requested_tier_wins_over_fallback() {
    let mut tree = test_tree();
    let root = tree.root();
    let damage = tree
        .declare_difficulty(
            root,
            "damage",
            IntCodec::new(1),
            [
                (Difficulty::Easy, IntCodec::new(2)),
                (Difficulty::Hard, IntCodec::new(8)),
            ],
        )
        .unwrap();

    assert_eq!(tree.value_for(&damage, Difficulty::Peaceful), 2);
    assert_eq!(tree.value_for(&damage, Difficulty::Easy), 2);
    assert_eq!(tree.value_for(&damage, Difficulty::Normal), 8);
    assert_eq!(tree.value_for(&damage, Difficulty::Hard), 8);
}

#[test]
fn test_writes_follow_the_same_fallback() {
    let mut tree = test_tree();
    let root = tree.root();
    let damage = tree
        .declare_difficulty(root, "damage", IntCodec::new(1), [(Difficulty::Normal, IntCodec::new(6))])
        .unwrap();

    tree.set_value_for(&damage, Difficulty::Peaceful, 3);
    assert_eq!(tree.store().get("damage.normal"), Some(ConfigValue::Int(3)));
    assert_eq!(tree.value_for(&damage, Difficulty::Hard), 3);
}

// ===== PATHS =====

#[test]
fn test_tier_paths_and_default_value_path() {
    let mut tree = test_tree();
    let root = tree.root();
    let mobs = tree.container(root, "mobs").unwrap();
    let damage = tree
        .declare_difficulty(mobs, "damage", IntCodec::new(1), [(Difficulty::Hard, IntCodec::new(9))])
        .unwrap();

    assert_eq!(tree.value_path(damage.id()), "mobs.damage.default");
    let hard = damage.tier(Difficulty::Hard).unwrap();
    assert_eq!(tree.value_path(hard.id()), "mobs.damage.hard");
    assert!(damage.tier(Difficulty::Easy).is_none());
}

#[test]
fn test_difficulty_names_parse_case_insensitively() {
    assert_eq!("Normal".parse::<Difficulty>().unwrap(), Difficulty::Normal);
    assert_eq!(Difficulty::Peaceful.to_string(), "PEACEFUL");
    let err = "extreme".parse::<Difficulty>().unwrap_err();
    assert!(err.is_type_error());
}
