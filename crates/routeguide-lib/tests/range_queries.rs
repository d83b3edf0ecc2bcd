//! Integration tests for rectangle range queries over the fixture dataset.

mod common;

use common::fixture_store;
use routeguide_lib::{Feature, FeatureStore, Point, Rectangle};

fn sample_bounds() -> Rectangle {
    Rectangle::new(
        Point::new(400000000, -750000000),
        Point::new(420000000, -730000000),
    )
}

#[test]
fn fixture_rectangle_returns_features_in_dataset_order() {
    let store = fixture_store();
    let found: Vec<&Feature> = store.within(&sample_bounds()).collect();

    assert_eq!(found.len(), 10);
    assert!(found.iter().all(|f| f.name != "Outside Sample Bounds, NY, USA"));

    let expected: Vec<&Feature> = store
        .iter()
        .filter(|f| f.name != "Outside Sample Bounds, NY, USA")
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn corner_order_does_not_matter() {
    let store = fixture_store();
    let rect = sample_bounds();
    let variants = [
        rect,
        Rectangle::new(rect.hi, rect.lo),
        Rectangle::new(
            Point::new(rect.lo.latitude, rect.hi.longitude),
            Point::new(rect.hi.latitude, rect.lo.longitude),
        ),
    ];

    let baseline: Vec<&Feature> = store.within(&variants[0]).collect();
    for variant in &variants[1..] {
        let result: Vec<&Feature> = store.within(variant).collect();
        assert_eq!(result, baseline);
    }
}

#[test]
fn two_of_three_with_edge_inclusion() {
    let store = FeatureStore::from_features(vec![
        Feature::new("West Edge", Point::new(410000000, -750000000)),
        Feature::new("North Of Box", Point::new(420000001, -740000000)),
        Feature::new("Middle", Point::new(410000000, -740000000)),
    ]);

    let names: Vec<&str> = store
        .within(&sample_bounds())
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["West Edge", "Middle"]);
}

#[test]
fn degenerate_rectangle_matches_single_point() {
    let store = fixture_store();
    let target = Point::new(413628156, -749015468);
    let names: Vec<&str> = store
        .within(&Rectangle::new(target, target))
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["U.S. 6, Shohola, PA 18458, USA"]);
}

#[test]
fn results_never_include_unnamed_features() {
    let store = fixture_store();
    let everything = Rectangle::new(
        Point::new(i32::MIN, i32::MIN),
        Point::new(i32::MAX, i32::MAX),
    );
    assert_eq!(store.within(&everything).count(), store.len());
    assert!(store.within(&everything).all(Feature::is_named));
}
