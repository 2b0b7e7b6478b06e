//! Great-circle distance calculation.
//!
//! This module provides the Haversine distance used to decide whether an
//! employee is close enough to the office to check in or stay checked in.

use crate::models::GeoPoint;

/// Mean Earth radius in meters used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates.
///
/// Inputs are in degrees and the result is in meters. Coordinates must be
/// finite and in range; validating them is the caller's job (see
/// [`GeoPoint::is_valid`]).
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::distance_meters;
///
/// let d = distance_meters(12.971599, 77.594566, 12.971599, 77.594566);
/// assert_eq!(d, 0.0);
///
/// // One degree of latitude is roughly 111.2 km.
/// let d = distance_meters(0.0, 0.0, 1.0, 0.0);
/// assert!((d - 111_194.9).abs() < 1.0);
/// ```
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` fractionally outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Calculates the distance between two points in meters.
pub fn distance_between(from: GeoPoint, to: GeoPoint) -> f64 {
    distance_meters(from.latitude, from.longitude, to.latitude, to.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const OFFICE: GeoPoint = GeoPoint {
        latitude: 12.971599,
        longitude: 77.594566,
    };

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_between(OFFICE, OFFICE), 0.0);
    }

    #[test]
    fn test_short_northward_offset() {
        // 0.00135 degrees of latitude is about 150 meters.
        let north = GeoPoint::new(OFFICE.latitude + 0.00135, OFFICE.longitude);
        let d = distance_between(OFFICE, north);
        assert!((d - 150.1).abs() < 0.5, "got {}", d);
    }

    #[test]
    fn test_known_city_distance() {
        // Bengaluru to Chennai, roughly 290 km.
        let chennai = GeoPoint::new(13.0827, 80.2707);
        let d = distance_between(OFFICE, chennai);
        assert!((d - 290_000.0).abs() < 5_000.0, "got {}", d);
    }

    #[test]
    fn test_antipodal_points() {
        let d = distance_meters(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - half_circumference).abs() < 1.0);
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let forward = distance_meters(lat1, lon1, lat2, lon2);
            let backward = distance_meters(lat2, lon2, lat1, lon1);
            prop_assert!((forward - backward).abs() < 1e-6);
        }

        #[test]
        fn prop_distance_to_self_is_zero(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
        ) {
            prop_assert_eq!(distance_meters(lat, lon, lat, lon), 0.0);
        }

        #[test]
        fn prop_distance_is_bounded(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let d = distance_meters(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_METERS + 1e-6);
        }
    }
}
