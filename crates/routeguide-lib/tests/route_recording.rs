//! Integration tests for route recording against the fixture dataset.

mod common;

use common::fixture_store;
use routeguide_lib::{
    great_circle_distance, record_route, DistanceAccumulator, Error, Point, RecorderState,
    EARTH_RADIUS_METERS,
};

#[test]
fn known_feature_in_the_middle_is_counted_once() {
    let store = fixture_store();
    let p1 = Point::new(100000000, 100000000);
    let p2 = Point::new(408122808, -743999179);
    let p3 = Point::new(200000000, -200000000);

    let summary = record_route(&store, [p1, p2, p3]).expect("route records");

    assert_eq!(summary.point_count, 3);
    assert_eq!(summary.feature_count, 1);
    assert_eq!(
        summary.distance_meters,
        (great_circle_distance(p1, p2) + great_circle_distance(p2, p3)) as u64
    );
}

#[test]
fn every_fixture_feature_counts_when_visited() {
    let store = fixture_store();
    let points: Vec<Point> = store.iter().map(|f| f.location).collect();
    let summary = record_route(&store, points.clone()).expect("route records");

    assert_eq!(summary.point_count, points.len() as u64);
    assert_eq!(summary.feature_count, points.len() as u64);
    assert!(summary.distance_meters > 0);
}

#[test]
fn repeated_point_adds_no_distance() {
    let store = fixture_store();
    let p = Point::new(407838351, -746143763);
    let summary = record_route(&store, [p, p, p]).expect("route records");
    assert_eq!(summary.point_count, 3);
    assert_eq!(summary.feature_count, 3);
    assert_eq!(summary.distance_meters, 0);
}

#[test]
fn long_routes_do_not_wrap() {
    let store = fixture_store();
    let north = Point::new(900000000, 0);
    let south = Point::new(-900000000, 0);
    let legs = 2_000;
    let points = (0..legs).map(|i| if i % 2 == 0 { north } else { south });

    let summary = record_route(&store, points).expect("route records");
    let per_leg = great_circle_distance(north, south);
    assert!(summary.distance_meters > u64::from(u32::MAX));
    assert!(summary.distance_meters as f64 <= per_leg * (legs - 1) as f64 + 1.0);
}

#[test]
fn antipodal_legs_stay_finite() {
    let store = fixture_store();
    let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
    let pairs = [
        (Point::new(17_283_938, 0), Point::new(-17_283_938, 1_800_000_000)),
        (Point::new(0, 0), Point::new(0, 1_800_000_000)),
        (Point::new(408122808, -743999179), Point::new(-408122808, 1_056_000_821)),
    ];

    for (a, b) in pairs {
        let d = great_circle_distance(a, b);
        assert!(d.is_finite(), "{a} to {b} gave {d}");
        assert!((d - half_circumference).abs() < 1.0, "{a} to {b} gave {d}");

        let summary = record_route(&store, [Point::new(0, 0), Point::new(10_000_000, 0), a, b])
            .expect("route records");
        assert!(summary.distance_meters as f64 >= half_circumference - 1.0);
    }
}

#[test]
fn accumulator_rejects_use_after_finish() {
    let store = fixture_store();
    let mut recorder = DistanceAccumulator::new(&store);
    recorder.record(Point::new(1, 1)).expect("records");
    recorder.finish().expect("finishes");

    assert_eq!(recorder.state(), RecorderState::Done);
    assert!(matches!(
        recorder.finish(),
        Err(Error::InvalidState { .. })
    ));
    assert!(matches!(
        recorder.record(Point::new(2, 2)),
        Err(Error::InvalidState { .. })
    ));
}

#[test]
fn out_of_range_coordinates_are_accepted() {
    let store = fixture_store();
    let summary = record_route(
        &store,
        [Point::new(i32::MAX, i32::MAX), Point::new(i32::MIN, i32::MIN)],
    )
    .expect("route records");
    assert_eq!(summary.point_count, 2);
}
