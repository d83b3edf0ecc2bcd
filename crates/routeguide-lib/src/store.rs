//! Immutable in-memory feature dataset.
//!
//! The store is built once before serving and never mutated afterwards, so it
//! can be shared across any number of concurrent calls behind an `Arc` without
//! locking.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::{Feature, Point};

/// Read-only collection of named features in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Build a store from already-decoded features.
    ///
    /// Records without a name are dropped: the empty name is reserved for the
    /// lookup-miss sentinel.
    pub fn from_features(features: impl IntoIterator<Item = Feature>) -> Self {
        let mut dropped = 0usize;
        let features: Vec<Feature> = features
            .into_iter()
            .filter(|feature| {
                let keep = feature.is_named();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if dropped > 0 {
            debug!(dropped, "skipped unnamed dataset records");
        }

        Self { features }
    }

    /// Parse a JSON array of `{name, location}` records.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let features: Vec<Feature> = serde_json::from_str(data).map_err(Error::dataset)?;
        Ok(Self::from_features(features))
    }

    /// Parse a JSON dataset from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let features: Vec<Feature> =
            serde_json::from_reader(io::BufReader::new(reader)).map_err(Error::dataset)?;
        Ok(Self::from_features(features))
    }

    /// Load the dataset file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::DatasetNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => return Err(err.into()),
        };

        let store = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            feature_count = store.len(),
            "feature dataset loaded"
        );
        Ok(store)
    }

    /// Return the first feature located exactly at `point`, or the unnamed
    /// sentinel carrying `point` when nothing is stored there.
    pub fn lookup_exact(&self, point: Point) -> Feature {
        self.find(point)
            .cloned()
            .unwrap_or_else(|| Feature::unnamed(point))
    }

    /// Borrowing variant of [`lookup_exact`](Self::lookup_exact).
    pub fn find(&self, point: Point) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature.location == point)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<'a> IntoIterator for &'a FeatureStore {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"location": {"latitude": 408122808, "longitude": -743999179}, "name": "Patriots Path"},
        {"location": {"latitude": 416855156, "longitude": -744420597}, "name": ""},
        {"location": {"latitude": 408122808, "longitude": -743999179}, "name": "Shadowed Duplicate"}
    ]"#;

    #[test]
    fn lookup_hit_returns_stored_feature() {
        let store = FeatureStore::from_json_str(DATASET).unwrap();
        let feature = store.lookup_exact(Point::new(408122808, -743999179));
        assert_eq!(feature.name, "Patriots Path");
    }

    #[test]
    fn lookup_miss_returns_sentinel_at_query_point() {
        let store = FeatureStore::from_json_str(DATASET).unwrap();
        let feature = store.lookup_exact(Point::new(0, 0));
        assert_eq!(feature, Feature::unnamed(Point::new(0, 0)));
    }

    #[test]
    fn unnamed_records_are_dropped() {
        let store = FeatureStore::from_json_str(DATASET).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(Feature::is_named));

        let dropped_location = Point::new(416855156, -744420597);
        assert_eq!(
            store.lookup_exact(dropped_location),
            Feature::unnamed(dropped_location)
        );
    }

    #[test]
    fn malformed_dataset_is_rejected() {
        let err = FeatureStore::from_json_str(r#"{"name": "not a list"}"#).unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn record_without_location_is_rejected() {
        let err = FeatureStore::from_json_str(r#"[{"name": "Nowhere"}]"#).unwrap_err();
        assert!(matches!(err, Error::Dataset { .. }));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let err = FeatureStore::load(Path::new("/nonexistent/route_guide_db.json")).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound { .. }));
    }
}
