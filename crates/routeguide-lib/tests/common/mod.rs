//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests,
//! including the JSON fixture dataset and scratch dataset files.

use std::fs;
use std::path::PathBuf;

use routeguide_lib::FeatureStore;
use tempfile::TempDir;

/// Number of named features in the fixture (one unnamed record is dropped).
#[allow(dead_code)]
pub const FIXTURE_FEATURE_COUNT: usize = 11;

/// Path to the fixture dataset shared by all crates.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/route_guide_db.json")
}

/// Load the fixture dataset.
#[allow(dead_code)]
pub fn fixture_store() -> FeatureStore {
    FeatureStore::load(&fixture_path()).expect("fixture dataset loads")
}

/// Temporary directory holding a dataset file with arbitrary contents.
#[allow(dead_code)]
pub struct DatasetFile {
    /// Temp directory (dropped on struct drop)
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl DatasetFile {
    pub fn with_contents(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("route_guide_db.json");
        fs::write(&path, contents).expect("write dataset");
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }
}
