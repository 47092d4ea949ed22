//! Annotation content payloads
//!
//! The engine treats content as opaque: it reads the natural pixel size once
//! at construction and otherwise just hands the renderer an identifier.
//! Exactly one content kind exists for the lifetime of a node. Absence is
//! not representable, so a contentless marker cannot be constructed.

use crate::core::types::PixelSize;

/// Opaque handle the renderer resolves to the actual texture or view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

/// Visual payload carried by an annotation node
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationContent {
    /// A static image
    Image {
        /// Renderer handle for the image
        id: ContentId,
        /// Natural pixel dimensions of the image
        size: PixelSize,
    },
    /// An interactive surface
    InteractiveView {
        /// Renderer handle for the view
        id: ContentId,
        /// Natural pixel dimensions of the view
        size: PixelSize,
    },
}

impl AnnotationContent {
    /// Static image content. Panics on a non-positive pixel size: a marker
    /// with no visible extent is a contract violation, not a runtime state.
    pub fn image(id: ContentId, size: PixelSize) -> Self {
        assert!(
            size.width > 0.0 && size.height > 0.0,
            "annotation content requires a positive pixel size"
        );
        Self::Image { id, size }
    }

    /// Interactive view content. Same size contract as [`Self::image`].
    pub fn interactive_view(id: ContentId, size: PixelSize) -> Self {
        assert!(
            size.width > 0.0 && size.height > 0.0,
            "annotation content requires a positive pixel size"
        );
        Self::InteractiveView { id, size }
    }

    /// Natural pixel size of the payload
    pub fn size(&self) -> PixelSize {
        match self {
            Self::Image { size, .. } | Self::InteractiveView { size, .. } => *size,
        }
    }

    /// Renderer handle of the payload
    pub fn id(&self) -> ContentId {
        match self {
            Self::Image { id, .. } | Self::InteractiveView { id, .. } => *id,
        }
    }
}
