//! Physical constants and placement policy parameters

/// Earth radius in meters (WGS84 semi-major axis)
pub const EARTH_RADIUS_WGS84: f64 = 6378137.0;

/// Distance inside which an unconfirmed node's location is considered settled (meters)
pub const LOCATION_CONFIRMATION_DISTANCE_M: f64 = 100.0;

/// Divisor converting content pixels to scene units for annotation surfaces
pub const PIXELS_PER_SCENE_UNIT: f64 = 100.0;

/// Distance at which a fixed-apparent-size surface renders at its natural size (meters)
pub const APPARENT_SIZE_REFERENCE_M: f64 = 100.0;
