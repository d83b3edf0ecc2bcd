//! Test utilities for handler testing.
//!
//! This module provides fixtures and helpers for testing HTTP handlers with
//! the shared JSON fixture dataset.

use std::path::PathBuf;
use std::sync::OnceLock;

use routeguide_lib::Point;

use crate::state::AppState;

/// Path to the test fixture dataset.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/route_guide_db.json"
);

/// Store loaded once per test binary; each [`test_state`] gets a fresh note log.
static TEST_STORE: OnceLock<routeguide_lib::FeatureStore> = OnceLock::new();

/// Get an AppState backed by the fixture dataset.
///
/// The dataset is parsed once and cached. The note log is fresh for every
/// call so route chat tests do not observe each other.
///
/// # Panics
///
/// Panics if the fixture dataset cannot be loaded. This indicates a test
/// configuration issue.
pub fn test_state() -> AppState {
    let store = TEST_STORE.get_or_init(|| {
        let path = PathBuf::from(TEST_FIXTURE_PATH);
        routeguide_lib::FeatureStore::load(&path)
            .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
    });
    AppState::from_store(store.clone())
}

/// Get the absolute path to the test fixture dataset.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Known locations in the test fixture for use in tests.
pub mod fixture_points {
    use super::Point;

    /// "Patriots Path, Mendham, NJ 07945, USA".
    pub const PATRIOTS_PATH: Point = Point::new(407838351, -746143763);

    /// "101 New Jersey 10, Whippany, NJ 07981, USA".
    pub const WHIPPANY: Point = Point::new(408122808, -743999179);

    /// "U.S. 6, Shohola, PA 18458, USA".
    pub const SHOHOLA: Point = Point::new(413628156, -749015468);

    /// An unnamed record in the fixture file; looks up as the sentinel.
    pub const UNNAMED: Point = Point::new(416855156, -744420597);

    /// Nothing is stored here.
    pub const ORIGIN: Point = Point::new(0, 0);
}
