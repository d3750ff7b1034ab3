//! Geographic coordinate module
//!
//! Provides the [`Location`] type shared by the registry, the spatial
//! index, and the HTTP transport, plus a great-circle distance helper.

mod types;

pub use types::Location;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Computes the great-circle distance between two locations in meters.
///
/// Uses the haversine formula, which is comfortably accurate at the
/// city scale the registry deals in.
#[inline]
pub fn haversine_meters(a: Location, b: Location) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_for_identical_points() {
        let bishkek = Location::new(42.8746, 74.5698);
        assert_eq!(haversine_meters(bishkek, bishkek), 0.0);
    }

    #[test]
    fn test_paris_to_london_distance() {
        // Paris: 48.8566°N, 2.3522°E / London: 51.5074°N, 0.1278°W
        let paris = Location::new(48.8566, 2.3522);
        let london = Location::new(51.5074, -0.1278);

        let d = haversine_meters(paris, london);

        // Great-circle distance is roughly 344 km
        assert!(
            (d - 344_000.0).abs() < 2_000.0,
            "Paris-London should be ~344 km, got {:.1} km",
            d / 1_000.0
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Location::new(42.875_799, 74.588_279);
        let b = Location::new(42.874_942, 74.585_908);

        assert!((haversine_meters(a, b) - haversine_meters(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_city_block_scale() {
        // Two points ~35 m apart on the same street
        let a = Location::new(42.876_420, 74.588_332);
        let b = Location::new(42.876_106, 74.588_204);

        let d = haversine_meters(a, b);

        assert!(d > 20.0 && d < 50.0, "expected a few tens of meters, got {d}");
    }
}
