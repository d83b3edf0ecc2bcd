//! Route recording: per-call accumulation of trip statistics.
//!
//! A [`DistanceAccumulator`] is created when a recording call begins, fed each
//! point in arrival order, and finished once the input stream ends. It is never
//! shared between calls.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Point;
use crate::store::FeatureStore;

/// Mean Earth radius used by the haversine formula, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine).
pub fn great_circle_distance(a: Point, b: Point) -> f64 {
    let lat1 = a.latitude_degrees().to_radians();
    let lat2 = b.latitude_degrees().to_radians();
    let delta_lat = (b.latitude_degrees() - a.latitude_degrees()).to_radians();
    let delta_lon = (b.longitude_degrees() - a.longitude_degrees()).to_radians();

    // Rounding can push `h` just past 1 for antipodal points.
    let h = ((delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Statistics for one completed recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub point_count: u64,
    pub feature_count: u64,
    #[serde(rename = "distance")]
    pub distance_meters: u64,
    #[serde(rename = "elapsed_time")]
    pub elapsed_seconds: u64,
}

/// Lifecycle of a [`DistanceAccumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Recording,
    Finalizing,
    Done,
}

impl RecorderState {
    fn as_str(self) -> &'static str {
        match self {
            RecorderState::Recording => "recording",
            RecorderState::Finalizing => "finalizing",
            RecorderState::Done => "done",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates point count, known-feature count, and distance for one route.
#[derive(Debug)]
pub struct DistanceAccumulator<'s> {
    store: &'s FeatureStore,
    started_at: Instant,
    state: RecorderState,
    point_count: u64,
    feature_count: u64,
    distance: f64,
    previous: Option<Point>,
}

impl<'s> DistanceAccumulator<'s> {
    /// Start recording now.
    pub fn new(store: &'s FeatureStore) -> Self {
        Self::started_at(store, Instant::now())
    }

    /// Start recording with an explicit start time.
    pub fn started_at(store: &'s FeatureStore, started_at: Instant) -> Self {
        Self {
            store,
            started_at,
            state: RecorderState::Recording,
            point_count: 0,
            feature_count: 0,
            distance: 0.0,
            previous: None,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn point_count(&self) -> u64 {
        self.point_count
    }

    pub fn feature_count(&self) -> u64 {
        self.feature_count
    }

    /// Running distance in meters, before truncation.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Ingest the next point of the route.
    pub fn record(&mut self, point: Point) -> Result<()> {
        self.expect_recording("record a point on")?;

        self.point_count += 1;
        if self.store.find(point).is_some() {
            self.feature_count += 1;
        }
        if let Some(previous) = self.previous {
            self.distance += great_circle_distance(previous, point);
        }
        self.previous = Some(point);

        Ok(())
    }

    /// Close the recording and produce its summary.
    ///
    /// Succeeds exactly once; later calls fail with [`Error::InvalidState`].
    pub fn finish(&mut self) -> Result<RouteSummary> {
        self.expect_recording("finish")?;
        self.state = RecorderState::Finalizing;

        let summary = RouteSummary {
            point_count: self.point_count,
            feature_count: self.feature_count,
            // Saturating float-to-int cast; truncates toward zero.
            distance_meters: self.distance as u64,
            elapsed_seconds: self.started_at.elapsed().as_secs(),
        };

        self.state = RecorderState::Done;
        Ok(summary)
    }

    fn expect_recording(&self, operation: &'static str) -> Result<()> {
        match self.state {
            RecorderState::Recording => Ok(()),
            other => Err(Error::InvalidState {
                operation,
                state: other.as_str(),
            }),
        }
    }
}

/// Record a complete route in one go.
pub fn record_route(
    store: &FeatureStore,
    points: impl IntoIterator<Item = Point>,
) -> Result<RouteSummary> {
    let mut recorder = DistanceAccumulator::new(store);
    for point in points {
        recorder.record(point)?;
    }
    recorder.finish()
}
