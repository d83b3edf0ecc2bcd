//! Rectangle range queries over a [`FeatureStore`].
//!
//! Results are produced lazily in dataset order. [`RangeCursor`] holds only
//! the normalized bounds and a position, so a caller can resume the scan
//! between polls without keeping the store borrowed.

use crate::geo::{Bounds, Feature, Rectangle};
use crate::store::FeatureStore;

/// Resumable position within a range scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCursor {
    bounds: Bounds,
    position: usize,
}

impl RangeCursor {
    pub fn new(rectangle: &Rectangle) -> Self {
        Self {
            bounds: rectangle.bounds(),
            position: 0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance to the next named feature inside the bounds.
    pub fn next_match<'s>(&mut self, store: &'s FeatureStore) -> Option<&'s Feature> {
        let features = store.features();
        while let Some(feature) = features.get(self.position) {
            self.position += 1;
            if feature.is_named() && self.bounds.contains(&feature.location) {
                return Some(feature);
            }
        }
        None
    }
}

/// Lazy iterator over the features inside a rectangle.
#[derive(Debug, Clone)]
pub struct RangeQuery<'s> {
    store: &'s FeatureStore,
    cursor: RangeCursor,
}

impl<'s> Iterator for RangeQuery<'s> {
    type Item = &'s Feature;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_match(self.store)
    }
}

impl FeatureStore {
    /// Features inside `rectangle` (edges inclusive, corners in any order).
    pub fn within(&self, rectangle: &Rectangle) -> RangeQuery<'_> {
        RangeQuery {
            store: self,
            cursor: RangeCursor::new(rectangle),
        }
    }
}
