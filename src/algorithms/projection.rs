//! Projection between geographic offsets and scene-local coordinates
//!
//! Scene convention: x points east, y points up, and -z points true north,
//! matching a north-aligned AR session frame. A marker 40 m north of the
//! device therefore lands at local offset (0, 0, -40).

use nalgebra::Vector3;

use crate::algorithms::great_circle;
use crate::core::types::GeoCoordinate;

/// Scene-local displacement from `origin` to `target`.
///
/// The y component is the altitude difference when both coordinates carry an
/// altitude; otherwise zero, leaving the target at the origin's height.
pub fn scene_offset(origin: &GeoCoordinate, target: &GeoCoordinate) -> Vector3<f64> {
    let distance = great_circle::distance_m(origin, target);
    let bearing = great_circle::initial_bearing(origin, target);

    let east = distance * bearing.sin();
    let north = distance * bearing.cos();
    let up = match (origin.altitude, target.altitude) {
        (Some(origin_alt), Some(target_alt)) => target_alt - origin_alt,
        _ => 0.0,
    };

    Vector3::new(east, up, -north)
}

/// Candidate scene position for `target`, seen from a device whose scene
/// position is `device_position` and whose geographic fix is `origin`
pub fn project(
    origin: &GeoCoordinate,
    target: &GeoCoordinate,
    device_position: &Vector3<f64>,
) -> Vector3<f64> {
    device_position + scene_offset(origin, target)
}

/// Geographic coordinate at a scene-space displacement from `origin`.
///
/// Inverse of [`scene_offset`]: carries a stored geographic fix through the
/// scene motion the tracker has measured since the fix was captured.
pub fn displace(origin: &GeoCoordinate, displacement: &Vector3<f64>) -> GeoCoordinate {
    let east = displacement.x;
    let north = -displacement.z;
    let distance = east.hypot(north);
    let bearing = east.atan2(north);

    let mut moved = great_circle::destination(origin, bearing, distance);
    if let Some(altitude) = moved.altitude {
        moved.altitude = Some(altitude + displacement.y);
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> GeoCoordinate {
        GeoCoordinate::new(0.0, 0.0, 0)
    }

    #[test]
    fn test_offset_due_north() {
        let target = great_circle::destination(&origin(), 0.0, 40.0);
        let offset = scene_offset(&origin(), &target);

        assert!(offset.x.abs() < 1e-6);
        assert!(offset.y.abs() < 1e-12);
        assert!((offset.z - (-40.0)).abs() < 1e-6);
    }

    #[test]
    fn test_offset_due_east() {
        let target = great_circle::destination(&origin(), std::f64::consts::FRAC_PI_2, 25.0);
        let offset = scene_offset(&origin(), &target);

        assert!((offset.x - 25.0).abs() < 1e-6);
        assert!(offset.z.abs() < 1e-6);
    }

    #[test]
    fn test_offset_uses_altitude_difference() {
        let low = origin().with_altitude(10.0);
        let high = great_circle::destination(&low, 0.0, 40.0).with_altitude(25.0);

        let offset = scene_offset(&low, &high);
        assert!((offset.y - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset_ignores_altitude_when_either_side_lacks_one() {
        let target = great_circle::destination(&origin(), 0.0, 40.0).with_altitude(25.0);
        let offset = scene_offset(&origin(), &target);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_project_adds_device_position() {
        let target = great_circle::destination(&origin(), 0.0, 40.0);
        let device = Vector3::new(3.0, 1.5, 2.0);
        let position = project(&origin(), &target, &device);

        assert!((position.x - 3.0).abs() < 1e-6);
        assert!((position.y - 1.5).abs() < 1e-12);
        assert!((position.z - (2.0 - 40.0)).abs() < 1e-6);
    }

    #[test]
    fn test_displace_inverts_scene_offset() {
        let displacement = Vector3::new(120.0, 0.0, -80.0);
        let moved = displace(&origin(), &displacement);
        let recovered = scene_offset(&origin(), &moved);

        assert!((recovered.x - displacement.x).abs() < 1e-6);
        assert!((recovered.z - displacement.z).abs() < 1e-6);
    }

    #[test]
    fn test_displace_zero_is_identity() {
        let start = GeoCoordinate::new(48.8584, 2.2945, 7).with_altitude(35.0);
        let moved = displace(&start, &Vector3::zeros());

        assert!((moved.latitude - start.latitude).abs() < 1e-12);
        assert!((moved.longitude - start.longitude).abs() < 1e-12);
        assert_eq!(moved.altitude, Some(35.0));
    }

    #[test]
    fn test_displace_applies_vertical_component() {
        let start = origin().with_altitude(10.0);
        let moved = displace(&start, &Vector3::new(0.0, 4.0, 0.0));
        assert_eq!(moved.altitude, Some(14.0));
    }
}
