//! Pointer hit-testing through the inverse layer transform
//!
//! The pointer arrives in view space (display-scaled canvas pixels). Each
//! layer is tested in reverse insertion order — topmost first — by mapping
//! the pointer into the layer's local frame and checking the origin-centered
//! bounding box. Text boxes are measured at test time from current content,
//! family, and size, never from a cached value.

use crate::domain::{Layer, LayerId, LayerKind, Point, Scene, centered_box_contains};
use crate::text::FontStore;

/// A successful hit: which layer, and where inside it the pointer landed
///
/// `local_offset` is the pointer position in the layer's local frame; drags
/// use it to preserve the grab point instead of re-centering on the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub id: LayerId,
    pub local_offset: Point,
}

/// Local-space bounding box extents for a layer, measured fresh for text
fn local_extents(layer: &Layer, fonts: &FontStore) -> (f32, f32) {
    match &layer.kind {
        LayerKind::Image(img) => (img.natural_width as f32, img.natural_height as f32),
        LayerKind::Text(text) => {
            let metrics = fonts.measure(&text.font_family, text.font_size, &text.text);
            (metrics.width, metrics.height)
        }
    }
}

/// Find the topmost layer containing a view-space pointer position
///
/// Returns None when no layer contains the pointer (including the empty
/// scene); the caller decides whether that clears the selection.
pub fn hit_test(scene: &Scene, fonts: &FontStore, view: Point, display_scale: f32) -> Option<Hit> {
    if !(display_scale.is_finite() && display_scale > 0.0) {
        log::warn!("hit_test: invalid display scale {display_scale}");
        return None;
    }
    let canvas = Point::new(view.x / display_scale, view.y / display_scale);
    for layer in scene.layers().iter().rev() {
        let local = layer.transform.unapply(canvas);
        let (width, height) = local_extents(layer, fonts);
        if centered_box_contains(local, width, height) {
            return Some(Hit {
                id: layer.id,
                local_offset: local,
            });
        }
    }
    None
}
