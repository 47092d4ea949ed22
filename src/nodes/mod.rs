//! Marker node types: placement state, annotation surfaces, and content

pub mod annotation;
pub mod content;
pub mod placement;

pub use annotation::{AnnotationNode, SurfaceConstraint, SurfaceExtent};
pub use content::{AnnotationContent, ContentId};
pub use placement::{CoordinateSource, EstimateMode, PlacementNode};
