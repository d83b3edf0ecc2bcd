//! Route guide library entry points.
//!
//! This crate holds the feature dataset, rectangle range queries, route
//! recording, and the note log used by route chat. Higher-level consumers
//! (the HTTP service and the CLI client) should only depend on the items
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod ndjson;
pub mod notes;
pub mod route;
pub mod spatial;
pub mod store;

pub use error::{Error, Result};
pub use geo::{Bounds, Feature, Point, Rectangle, RouteNote, COORD_FACTOR};
pub use ndjson::{encode_line, LineDecoder, NdjsonError, NDJSON_CONTENT_TYPE};
pub use notes::NoteLog;
pub use route::{
    great_circle_distance, record_route, DistanceAccumulator, RecorderState, RouteSummary,
    EARTH_RADIUS_METERS,
};
pub use spatial::{RangeCursor, RangeQuery};
pub use store::FeatureStore;
