//! Annotation nodes: a placement plus a billboarded content surface

use crate::core::constants::PIXELS_PER_SCENE_UNIT;
use crate::core::types::GeoCoordinate;
use crate::nodes::content::AnnotationContent;
use crate::nodes::placement::PlacementNode;
use crate::utils::config::NodeDefaults;

/// Constraint descriptor the renderer applies to a node's surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceConstraint {
    /// Rotate about the vertical axis only: the surface always faces the
    /// viewer's horizontal bearing while its vertical tilt is unaffected
    BillboardVertical,
}

/// Planar surface extent in scene units, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceExtent {
    /// Width in scene units
    pub width: f64,
    /// Height in scene units
    pub height: f64,
}

/// A marker carrying renderable content.
///
/// Composition, not inheritance: the placement state is a plain field, and
/// the engine treats annotation and bare placement nodes uniformly through
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationNode {
    /// Placement state shared with bare markers
    pub placement: PlacementNode,
    content: AnnotationContent,
    surface: SurfaceExtent,
    constraint: SurfaceConstraint,
    /// false (the default): rescaled every cycle so the surface subtends a
    /// constant apparent size and distant labels stay legible. true: natural
    /// size, perspective shrinks it like any ordinary scene object.
    pub scale_relative_to_distance: bool,
}

impl AnnotationNode {
    /// Create an annotation node. The surface is sized from the content's
    /// natural pixel dimensions at 100 pixels per scene unit and never
    /// resized afterwards; only the committed scale varies.
    pub fn new(coordinate: Option<GeoCoordinate>, content: AnnotationContent) -> Self {
        let pixels = content.size();
        let surface = SurfaceExtent {
            width: pixels.width / PIXELS_PER_SCENE_UNIT,
            height: pixels.height / PIXELS_PER_SCENE_UNIT,
        };
        Self {
            placement: PlacementNode::new(coordinate),
            content,
            surface,
            constraint: SurfaceConstraint::BillboardVertical,
            scale_relative_to_distance: false,
        }
    }

    /// Create an annotation node with flags taken from configuration defaults
    pub fn from_defaults(
        coordinate: Option<GeoCoordinate>,
        content: AnnotationContent,
        defaults: &NodeDefaults,
    ) -> Self {
        let mut node = Self::new(coordinate, content);
        node.placement = PlacementNode::from_defaults(node.placement.coordinate().cloned(), defaults);
        node.scale_relative_to_distance = defaults.scale_relative_to_distance;
        node
    }

    /// Attach a lookup tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.placement.tag = Some(tag.into());
        self
    }

    /// The content attached at construction; immutable thereafter
    pub fn content(&self) -> &AnnotationContent {
        &self.content
    }

    /// Surface extent in scene units
    pub fn surface(&self) -> SurfaceExtent {
        self.surface
    }

    /// Orientation constraint for the renderer
    pub fn constraint(&self) -> SurfaceConstraint {
        self.constraint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PixelSize;
    use crate::nodes::content::ContentId;

    fn content() -> AnnotationContent {
        AnnotationContent::image(ContentId(1), PixelSize::new(420.0, 120.0))
    }

    #[test]
    fn test_surface_sized_from_pixels() {
        let node = AnnotationNode::new(None, content());
        let surface = node.surface();
        assert!((surface.width - 4.2).abs() < 1e-12);
        assert!((surface.height - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_billboard_constraint_installed() {
        let node = AnnotationNode::new(None, content());
        assert_eq!(node.constraint(), SurfaceConstraint::BillboardVertical);
    }

    #[test]
    fn test_fixed_apparent_size_is_the_default() {
        let node = AnnotationNode::new(None, content());
        assert!(!node.scale_relative_to_distance);
    }

    #[test]
    fn test_confirmation_follows_coordinate_presence() {
        let located = AnnotationNode::new(Some(GeoCoordinate::new(1.0, 2.0, 0)), content());
        assert!(located.placement.location_confirmed());

        let unlocated = AnnotationNode::new(None, content());
        assert!(!unlocated.placement.location_confirmed());
    }
}
