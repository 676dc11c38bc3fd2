use std::hash::Hasher;

use platetour_game::storage::{
    KEY_LEVEL, KEY_TOTAL_POINTS, KEY_VISITED_COUNTRIES, load_progress, save_progress,
};
use platetour_game::{BundledData, Catalog, GameConfig, GameEngine, KeyValueStore, MemoryStore};
use serde_json::Value;
use twox_hash::XxHash64;

fn snapshot_hash(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(bytes);
    hasher.finish()
}

// Update when assets/catalog.json changes on purpose.
const CATALOG_SNAPSHOT_DIGEST: u64 = 0xe57e_6d39_c39a_3b1d;

#[test]
fn bundled_catalog_matches_snapshot_digest() {
    let catalog = Catalog::bundled().unwrap();
    let pretty = serde_json::to_string_pretty(&catalog).unwrap();
    assert_eq!(
        snapshot_hash(pretty.as_bytes()),
        CATALOG_SNAPSHOT_DIGEST,
        "bundled catalog drifted from its snapshot\n{pretty}"
    );
    let reparsed = Catalog::from_json(&pretty).unwrap();
    assert_eq!(reparsed, catalog);
}

#[test]
fn bundled_catalog_has_expected_shape() {
    let catalog = Catalog::bundled().unwrap();
    let value = serde_json::to_value(&catalog).unwrap();
    let countries = value["countries"].as_array().unwrap();
    assert_eq!(countries.len(), 10);
    for country in countries {
        let Value::Object(fields) = country else {
            panic!("country entries are objects");
        };
        for key in ["id", "display_name", "unlock_level"] {
            assert!(fields.contains_key(key), "{key} missing in {country}");
        }
    }
    for level in 1..=10 {
        assert!(catalog.country_for_level(level).is_some(), "level {level}");
    }
    assert!(catalog.starter_vehicles().count() >= 1);
}

#[test]
fn partial_config_json_fills_in_defaults() {
    let cfg = GameConfig::from_json(r#"{ "bonus": { "special_plate": 250 } }"#).unwrap();
    let defaults = GameConfig::default();
    assert_eq!(cfg.bonus.special_plate, 250);
    assert_eq!(cfg.bonus.age_match, defaults.bonus.age_match);
    assert_eq!(cfg.progression, defaults.progression);
    assert!(cfg.validate().is_ok());
}

#[test]
fn progress_round_trips_through_store_keys() {
    let engine = GameEngine::new(BundledData);
    let mut session = engine.start_session(MemoryStore::new(), 77).unwrap();
    for _ in 0..40 {
        let plate = session.new_plate().clone();
        let word = format!("A{}A{}", plate.consonants()[0], plate.consonants()[1]);
        session.submit(&word);
        if let Some(id) = session.progression().progress().pending_visits().front().cloned() {
            session.confirm_country_visit(&id);
        }
    }

    let store = session.store().clone();
    let saved = store.snapshot();
    assert!(saved.contains_key(KEY_TOTAL_POINTS));
    let visited: Value = serde_json::from_str(&saved[KEY_VISITED_COUNTRIES]).unwrap();
    assert!(visited.is_array());

    let loaded = load_progress(&store).unwrap();
    assert_eq!(loaded.total_points(), session.progression().progress().total_points());
    assert_eq!(
        loaded.visited_countries(),
        session.progression().progress().visited_countries()
    );

    let copy = MemoryStore::new();
    save_progress(&copy, &loaded).unwrap();
    for (key, value) in copy.snapshot() {
        assert_eq!(saved.get(&key), Some(&value), "{key}");
    }
}

#[test]
fn corrupted_values_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(KEY_TOTAL_POINTS, "1200").unwrap();
    store.set(KEY_LEVEL, "not a number").unwrap();
    store.set(KEY_VISITED_COUNTRIES, "{broken").unwrap();

    let engine = GameEngine::new(BundledData);
    let session = engine.start_session(store, 5).unwrap();
    let progress = session.progression().progress();
    assert_eq!(progress.total_points(), 1200);
    // Level is recomputed from the points.
    assert_eq!(progress.level(), 3);
    assert!(progress.visited_countries().is_empty());
}
