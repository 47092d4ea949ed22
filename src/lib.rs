//! Geo-referenced marker placement for augmented-reality scenes
//!
//! Places virtual markers at geographic coordinates inside a live AR scene,
//! fusing a coarse geolocation stream with the tracker's centimeter-level
//! scene pose. Each marker's scene position is progressively trusted
//! ("confirmed") as estimates settle, then deliberately frozen against
//! further GPS noise; annotation surfaces are rescaled every frame so distant
//! labels stay legible.

pub mod algorithms;
pub mod core;
pub mod engine;
pub mod nodes;
pub mod processing;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{DevicePose, GeoCoordinate, NodeTransform, PixelSize};
pub use engine::{NodeId, PositioningEngine, SceneNode};
pub use nodes::{
    AnnotationContent, AnnotationNode, ContentId, CoordinateSource, EstimateMode, PlacementNode,
    SurfaceConstraint, SurfaceExtent,
};
pub use processing::{LocationEstimator, SceneLocationEstimate};
pub use utils::config::{ConfigError, EngineConfig, EstimatorConfig, NodeDefaults};
