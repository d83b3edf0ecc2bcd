//! Scaled-integer geographic primitives shared by every layer.
//!
//! Coordinates travel as `i32` values holding degrees multiplied by
//! [`COORD_FACTOR`]. Equality is exact integer equality, which is what feature
//! lookup relies on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scale factor between stored coordinates and decimal degrees.
pub const COORD_FACTOR: f64 = 1e7;

/// A position expressed in degrees scaled by [`COORD_FACTOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub latitude: i32,
    pub longitude: i32,
}

impl Point {
    pub const fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in decimal degrees.
    pub fn latitude_degrees(&self) -> f64 {
        f64::from(self.latitude) / COORD_FACTOR
    }

    /// Longitude in decimal degrees.
    pub fn longitude_degrees(&self) -> f64 {
        f64::from(self.longitude) / COORD_FACTOR
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            self.latitude_degrees(),
            self.longitude_degrees()
        )
    }
}

/// A named location. An empty name marks "no feature here".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub name: String,
    pub location: Point,
}

impl Feature {
    pub fn new(name: impl Into<String>, location: Point) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// The sentinel returned when nothing is known at `location`.
    pub fn unnamed(location: Point) -> Self {
        Self {
            name: String::new(),
            location,
        }
    }

    /// Whether this feature carries a name, i.e. is not the sentinel.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A latitude/longitude rectangle given by two opposite corners.
///
/// The corners are not required to be ordered; see [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub lo: Point,
    pub hi: Point,
}

impl Rectangle {
    pub const fn new(lo: Point, hi: Point) -> Self {
        Self { lo, hi }
    }

    /// Normalize the corners into inclusive per-axis bounds.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.lo.longitude.min(self.hi.longitude),
            right: self.lo.longitude.max(self.hi.longitude),
            top: self.lo.latitude.max(self.hi.latitude),
            bottom: self.lo.latitude.min(self.hi.latitude),
        }
    }
}

/// Inclusive, normalized rectangle bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Inclusive containment test on all four edges.
    pub fn contains(&self, point: &Point) -> bool {
        (self.bottom..=self.top).contains(&point.latitude)
            && (self.left..=self.right).contains(&point.longitude)
    }
}

/// A message pinned to a location, exchanged over route chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNote {
    pub location: Point,
    #[serde(default)]
    pub message: String,
}

impl RouteNote {
    pub fn new(location: Point, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}
