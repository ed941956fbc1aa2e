use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// equatorial circumference used to convert a margin in meters into degrees.
pub const EARTH_CIRCUMFERENCE_METERS: f64 = 40_075_000.0;

/// extent of a set of stops in WGS84 degrees. displays in the
/// `south,west,north,east` order expected by an overpass `bbox` setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// builds the box enclosing all coordinates, or None if there are none.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        coordinates
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, (lat, lon)| match acc {
                None => Some(BoundingBox {
                    min_lat: lat,
                    min_lon: lon,
                    max_lat: lat,
                    max_lon: lon,
                }),
                Some(b) => Some(BoundingBox {
                    min_lat: b.min_lat.min(lat),
                    min_lon: b.min_lon.min(lon),
                    max_lat: b.max_lat.max(lat),
                    max_lon: b.max_lon.max(lon),
                }),
            })
    }

    /// grows the box by a margin in meters. the longitude delta uses the
    /// circumference scaled by the cosine of the minimum latitude. all four
    /// bounds are rounded to 6 decimals.
    pub fn with_margin(&self, margin_meters: f64) -> Self {
        let lat_delta = margin_meters * 360.0 / EARTH_CIRCUMFERENCE_METERS;
        let parallel_length = (self.min_lat * std::f64::consts::PI / 180.0).cos()
            * EARTH_CIRCUMFERENCE_METERS;
        let lon_delta = margin_meters * 360.0 / parallel_length;
        BoundingBox {
            min_lat: round_6(self.min_lat - lat_delta),
            min_lon: round_6(self.min_lon - lon_delta),
            max_lat: round_6(self.max_lat + lat_delta),
            max_lon: round_6(self.max_lon + lon_delta),
        }
    }
}

/// decimal rounding through the formatter, which rounds the exact binary
/// value and therefore gives the same result on every platform.
fn round_6(value: f64) -> f64 {
    format!("{value:.6}").parse().unwrap_or(value)
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
