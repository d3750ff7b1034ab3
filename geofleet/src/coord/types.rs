//! Coordinate type definitions

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Latitude is positive north of the equator, longitude positive east of
/// the prime meridian. The registry stores whatever it is given and does
/// no range validation; coordinate hygiene is owned by the transport
/// layer's callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Location {
    /// Creates a location from latitude and longitude in decimal degrees.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
