//! Integration tests for loading the dataset and exact-point lookup.

mod common;

use common::{fixture_store, DatasetFile, FIXTURE_FEATURE_COUNT};
use routeguide_lib::{Error, Feature, FeatureStore, Point};

#[test]
fn fixture_loads_named_features_only() {
    let store = fixture_store();
    assert_eq!(store.len(), FIXTURE_FEATURE_COUNT);
    assert!(store.iter().all(|feature| !feature.name.is_empty()));
}

#[test]
fn every_stored_feature_is_found_at_its_location() {
    let store = fixture_store();
    for feature in &store {
        assert_eq!(&store.lookup_exact(feature.location), feature);
    }
}

#[test]
fn points_absent_from_dataset_return_sentinel() {
    let store = fixture_store();
    for point in [
        Point::new(0, 0),
        Point::new(408122808, -743999178),
        Point::new(-408122808, 743999179),
        Point::new(i32::MAX, i32::MIN),
    ] {
        let feature = store.lookup_exact(point);
        assert_eq!(feature.name, "");
        assert_eq!(feature.location, point);
    }
}

#[test]
fn patriots_path_scenario() {
    let store = FeatureStore::from_features(vec![Feature::new(
        "Patriots Path",
        Point::new(408122808, -743999179),
    )]);

    assert_eq!(
        store.lookup_exact(Point::new(408122808, -743999179)),
        Feature::new("Patriots Path", Point::new(408122808, -743999179))
    );
    assert_eq!(
        store.lookup_exact(Point::new(0, 0)),
        Feature::new("", Point::new(0, 0))
    );
}

#[test]
fn first_match_in_load_order_wins() {
    let file = DatasetFile::with_contents(
        r#"[
            {"name": "First", "location": {"latitude": 5, "longitude": 5}},
            {"name": "Second", "location": {"latitude": 5, "longitude": 5}}
        ]"#,
    );
    let store = FeatureStore::load(&file.path).expect("dataset loads");
    assert_eq!(store.lookup_exact(Point::new(5, 5)).name, "First");
}

#[test]
fn truncated_dataset_file_fails_to_load() {
    let file = DatasetFile::with_contents(r#"[{"name": "Cut", "location": {"latitude": 1"#);
    let err = FeatureStore::load(&file.path).unwrap_err();
    assert!(matches!(err, Error::Dataset { .. }), "unexpected error: {err}");
}

#[test]
fn empty_dataset_is_valid() {
    let file = DatasetFile::with_contents("[]");
    let store = FeatureStore::load(&file.path).expect("empty dataset loads");
    assert!(store.is_empty());
}
