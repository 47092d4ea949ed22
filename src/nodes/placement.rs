//! Placement state for a single geo-referenced marker

use serde::{Deserialize, Serialize};

use crate::core::types::{GeoCoordinate, NodeTransform};
use crate::utils::config::NodeDefaults;

/// How a node's coordinate came to be set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    /// Supplied by the caller at creation or relocate
    Explicit,
    /// Derived from the engine's best location estimate
    DerivedFromEstimate,
}

/// How the engine forms the location estimate this node confirms against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EstimateMode {
    /// Fused geolocation and scene tracking; confirmation waits for the
    /// distance gate
    #[default]
    Fused,
    /// Raw geolocation samples only; confirmation happens as soon as any
    /// estimate exists
    RawGeolocation,
}

/// The placement/state unit for one marker.
///
/// Computes nothing by itself: coordinate, confirmation, and the committed
/// transform are mutated by the positioning engine's update cycle, never
/// externally once placed, except through [`relocate`](Self::relocate).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementNode {
    coordinate: Option<GeoCoordinate>,
    coordinate_source: CoordinateSource,
    location_confirmed: bool,
    transform: Option<NodeTransform>,
    /// Free-form lookup tag; collisions are permitted and not deduplicated
    pub tag: Option<String>,
    /// Keep nudging a confirmed node while the device is within the
    /// confirmation distance
    pub continually_adjust_when_within_range: bool,
    /// Recompute position and scale every cycle; takes effect on the next
    /// cycle, never retroactively
    pub continually_update_position_and_scale: bool,
    /// Estimation mode used for confirmation
    pub estimate_mode: EstimateMode,
}

impl PlacementNode {
    /// Create a node. `location_confirmed` is set exactly when a coordinate
    /// is supplied; a node without one is in the valid "not yet geolocated"
    /// state until the engine derives a coordinate for it.
    pub fn new(coordinate: Option<GeoCoordinate>) -> Self {
        let location_confirmed = coordinate.is_some();
        Self {
            coordinate,
            coordinate_source: CoordinateSource::Explicit,
            location_confirmed,
            transform: None,
            tag: None,
            continually_adjust_when_within_range: true,
            continually_update_position_and_scale: true,
            estimate_mode: EstimateMode::default(),
        }
    }

    /// Create a node with flags taken from configuration defaults
    pub fn from_defaults(coordinate: Option<GeoCoordinate>, defaults: &NodeDefaults) -> Self {
        let mut node = Self::new(coordinate);
        node.continually_adjust_when_within_range = defaults.continually_adjust_when_within_range;
        node.continually_update_position_and_scale =
            defaults.continually_update_position_and_scale;
        node.estimate_mode = defaults.estimate_mode;
        node
    }

    /// Attach a lookup tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn coordinate(&self) -> Option<&GeoCoordinate> {
        self.coordinate.as_ref()
    }

    pub fn coordinate_source(&self) -> CoordinateSource {
        self.coordinate_source
    }

    pub fn location_confirmed(&self) -> bool {
        self.location_confirmed
    }

    /// Last transform committed by the engine; absent until first placement
    pub fn transform(&self) -> Option<NodeTransform> {
        self.transform
    }

    /// Replace the coordinate. Confirmation is deliberately untouched; the
    /// engine's relocate operation offers the reset variant.
    pub fn relocate(&mut self, coordinate: GeoCoordinate) {
        self.coordinate = Some(coordinate);
        self.coordinate_source = CoordinateSource::Explicit;
    }

    pub(crate) fn set_coordinate_from_estimate(&mut self, coordinate: GeoCoordinate) {
        self.coordinate = Some(coordinate);
        self.coordinate_source = CoordinateSource::DerivedFromEstimate;
    }

    pub(crate) fn confirm(&mut self) {
        self.location_confirmed = true;
    }

    pub(crate) fn reset_confirmation(&mut self) {
        self.location_confirmed = false;
    }

    pub(crate) fn commit_transform(&mut self, transform: NodeTransform) {
        self.transform = Some(transform);
    }
}
