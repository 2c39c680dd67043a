//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Build a bounding box from coordinate extrema. Axis order does not
    /// matter; descending axes produce the same box as ascending ones.
    pub fn from_axes(lats: &[f64], lons: &[f64]) -> Option<Self> {
        let (mut south, mut north) = (f64::INFINITY, f64::NEG_INFINITY);
        for &lat in lats {
            south = south.min(lat);
            north = north.max(lat);
        }
        let (mut west, mut east) = (f64::INFINITY, f64::NEG_INFINITY);
        for &lon in lons {
            west = west.min(lon);
            east = east.max(lon);
        }
        if south.is_finite() && west.is_finite() {
            Some(Self::new(south, west, north, east))
        } else {
            None
        }
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Check if a point is contained within this bbox.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }
}
