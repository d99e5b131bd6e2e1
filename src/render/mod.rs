//! Layer compositing shared by the preview and export targets
//!
//! Both renderers call [`paint_layers`] with the only difference being the
//! display scale and the selection outline, so export is by construction
//! the preview evaluated at unit scale.

pub mod export;
pub mod preview;

use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::bitmap::BitmapCache;
use crate::domain::{LayerKind, LayerTransform, Scene};
use crate::text::FontStore;

pub use export::{export_file_name, render_export, write_png};
pub use preview::render_preview;

/// Surface-space transform for a layer: uniform scale, rotation, then
/// translation, with the display scale folded into scale and translation
fn surface_transform(t: &LayerTransform, display_scale: f32) -> Transform {
    let k = t.scale * display_scale;
    Transform::from_rotate(t.rotation_deg)
        .pre_scale(k, k)
        .post_translate(t.position.x * display_scale, t.position.y * display_scale)
}

/// Paint every layer in insertion order onto the surface
///
/// Content is drawn in local space, centered at the layer origin: bitmaps
/// at their natural size, text rasterized at its font size. Layers whose
/// bitmap has not decoded yet, or whose font family is unregistered, are
/// skipped — that is the not-ready state, not an error.
pub fn paint_layers(
    surface: &mut Pixmap,
    scene: &Scene,
    display_scale: f32,
    fonts: &FontStore,
    bitmaps: &BitmapCache,
) {
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };

    for layer in scene.layers() {
        let ts = surface_transform(&layer.transform, display_scale);
        match &layer.kind {
            LayerKind::Image(img) => {
                let Some(decoded) = bitmaps.get(&img.source) else {
                    log::debug!("paint: bitmap '{}' not decoded yet, skipping", img.source);
                    continue;
                };
                let local = ts.pre_translate(
                    -(img.natural_width as f32) / 2.0,
                    -(img.natural_height as f32) / 2.0,
                );
                surface.draw_pixmap(0, 0, decoded.pixmap(), &paint, local, None);
            }
            LayerKind::Text(text) => {
                let Some(mask) =
                    fonts.rasterize(&text.font_family, text.font_size, &text.text, text.color)
                else {
                    continue;
                };
                let local = ts.pre_translate(
                    -(mask.width() as f32) / 2.0,
                    -(mask.height() as f32) / 2.0,
                );
                surface.draw_pixmap(0, 0, mask.as_ref(), &paint, local, None);
            }
        }
    }
}
