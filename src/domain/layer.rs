//! Layer types placed on the print canvas
//!
//! A layer is either a placed bitmap or a line of text. Both variants carry
//! the same similarity transform; payloads differ. Coordinates are canvas
//! pixel space throughout.

use crate::config::LayerColor;
use crate::domain::geometry::LayerTransform;

/// Opaque layer identity, unique for the lifetime of a scene and never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub(crate) u64);

/// Bitmap layer payload
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    /// Key into the decoded-bitmap cache
    pub source: String,
    /// Intrinsic bitmap width in pixels, fixed at creation
    pub natural_width: u32,
    /// Intrinsic bitmap height in pixels, fixed at creation
    pub natural_height: u32,
}

/// Text layer payload
///
/// The local bounding box is not stored: it depends on measured metrics at
/// the current content/family/size and is recomputed wherever it is needed.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub font_family: String,
    /// Font size in canvas pixels, pre-scale
    pub font_size: f32,
    pub color: LayerColor,
}

/// Variant-specific payload for a [`Layer`]
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    Image(ImageLayer),
    Text(TextLayer),
}

/// One placeable entity on the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub transform: LayerTransform,
    pub kind: LayerKind,
}

impl Layer {
    /// The image payload, if this is an image layer
    pub fn as_image(&self) -> Option<&ImageLayer> {
        match &self.kind {
            LayerKind::Image(img) => Some(img),
            LayerKind::Text(_) => None,
        }
    }

    /// The text payload, if this is a text layer
    pub fn as_text(&self) -> Option<&TextLayer> {
        match &self.kind {
            LayerKind::Text(text) => Some(text),
            LayerKind::Image(_) => None,
        }
    }
}
