//! Core data types for geo-referenced scene placement

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A geographic point as delivered by the geolocation service.
///
/// Immutable once captured: a refined fix is a new `GeoCoordinate`, never an
/// in-place mutation of an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Altitude above the reference ellipsoid (meters), if the fix carried one
    pub altitude: Option<f64>,
    /// Horizontal accuracy radius (meters), if the fix carried one
    pub horizontal_accuracy: Option<f64>,
    /// Capture time (milliseconds since epoch)
    pub timestamp_ms: u64,
}

impl GeoCoordinate {
    /// Create a coordinate with no altitude or accuracy information
    pub fn new(latitude: f64, longitude: f64, timestamp_ms: u64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            horizontal_accuracy: None,
            timestamp_ms,
        }
    }

    /// Attach an altitude (meters)
    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude = Some(altitude_m);
        self
    }

    /// Attach a horizontal accuracy radius (meters)
    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.horizontal_accuracy = Some(accuracy_m);
        self
    }
}

/// Device pose in scene-local coordinates, one per tracking frame
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePose {
    /// Device position in scene-local coordinates (meters)
    pub position: Vector3<f64>,
    /// Device orientation in scene-local coordinates
    pub orientation: UnitQuaternion<f64>,
}

impl DevicePose {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self { position, orientation }
    }

    /// Pose at a position with identity orientation
    pub fn at(position: Vector3<f64>) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// Committed transform the renderer reads back from a placed node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Scene-local position (meters)
    pub position: Vector3<f64>,
    /// Uniform world-space scale applied to the node's surface
    pub scale: f64,
}

impl NodeTransform {
    pub fn new(position: Vector3<f64>, scale: f64) -> Self {
        Self { position, scale }
    }
}

/// Natural pixel dimensions of annotation content
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_builders() {
        let coord = GeoCoordinate::new(51.5074, -0.1278, 1_000)
            .with_altitude(35.0)
            .with_accuracy(8.0);

        assert_eq!(coord.latitude, 51.5074);
        assert_eq!(coord.longitude, -0.1278);
        assert_eq!(coord.altitude, Some(35.0));
        assert_eq!(coord.horizontal_accuracy, Some(8.0));
        assert_eq!(coord.timestamp_ms, 1_000);
    }

    #[test]
    fn test_coordinate_defaults_to_no_altitude_or_accuracy() {
        let coord = GeoCoordinate::new(0.0, 0.0, 0);
        assert!(coord.altitude.is_none());
        assert!(coord.horizontal_accuracy.is_none());
    }

    #[test]
    fn test_pose_at_uses_identity_orientation() {
        let pose = DevicePose::at(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(pose.orientation, UnitQuaternion::identity());
        assert_eq!(pose.position.x, 1.0);
    }
}
