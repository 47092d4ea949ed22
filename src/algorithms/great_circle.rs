//! Great-circle geometry on the WGS84 sphere
//!
//! Bearing-and-distance math between geographic coordinates. Distances in the
//! operating range of an AR session (meters to a few kilometers) are far below
//! the scale where the spherical model diverges from the ellipsoid.

use crate::core::constants::EARTH_RADIUS_WGS84;
use crate::core::types::GeoCoordinate;

/// Great-circle distance between two coordinates (meters), haversine formula
pub fn distance_m(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_WGS84 * c
}

/// Initial bearing from one coordinate to another (radians, clockwise from true north)
pub fn initial_bearing(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    y.atan2(x)
}

/// Coordinate reached by travelling `distance` meters along `bearing` (radians,
/// clockwise from true north) from `origin`.
///
/// Altitude, accuracy, and timestamp of the origin carry through unchanged.
pub fn destination(origin: &GeoCoordinate, bearing: f64, distance: f64) -> GeoCoordinate {
    let angular = distance / EARTH_RADIUS_WGS84;
    let phi1 = origin.latitude.to_radians();
    let lambda1 = origin.longitude.to_radians();

    let phi2 = (phi1.sin() * angular.cos() + phi1.cos() * angular.sin() * bearing.cos()).asin();
    let lambda2 = lambda1
        + (bearing.sin() * angular.sin() * phi1.cos())
            .atan2(angular.cos() - phi1.sin() * phi2.sin());

    GeoCoordinate {
        latitude: phi2.to_degrees(),
        longitude: lambda2.to_degrees(),
        ..origin.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon, 0)
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_m(&coord(0.0, 0.0), &coord(1.0, 0.0));
        // R * pi / 180
        assert!((d - 111_319.49).abs() < 1.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = coord(51.5074, -0.1278);
        let b = coord(51.5080, -0.1290);
        assert!((distance_m(&a, &b) - distance_m(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = coord(0.0, 0.0);
        assert!((initial_bearing(&origin, &coord(1.0, 0.0)) - 0.0).abs() < 1e-12);
        assert!((initial_bearing(&origin, &coord(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((initial_bearing(&origin, &coord(-1.0, 0.0)).abs() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_destination_due_north() {
        let origin = coord(0.0, 0.0);
        let dest = destination(&origin, 0.0, 111_319.49);
        assert!((dest.latitude - 1.0).abs() < 1e-6);
        assert!(dest.longitude.abs() < 1e-9);
    }

    #[test]
    fn test_destination_longitude_widens_at_high_latitude() {
        // One kilometer east spans twice the longitude at 60 degrees north
        let equator = destination(&coord(0.0, 0.0), FRAC_PI_2, 1_000.0);
        let north = destination(&coord(60.0, 0.0), FRAC_PI_2, 1_000.0);
        let ratio = north.longitude / equator.longitude;
        assert!((ratio - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_destination_round_trip() {
        let origin = coord(47.6062, -122.3321);
        let dest = destination(&origin, 1.25, 250.0);
        assert!((distance_m(&origin, &dest) - 250.0).abs() < 1e-6);
        assert!((initial_bearing(&origin, &dest) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_destination_preserves_altitude_and_timestamp() {
        let origin = GeoCoordinate::new(10.0, 20.0, 42).with_altitude(100.0);
        let dest = destination(&origin, 0.0, 50.0);
        assert_eq!(dest.altitude, Some(100.0));
        assert_eq!(dest.timestamp_ms, 42);
    }
}
