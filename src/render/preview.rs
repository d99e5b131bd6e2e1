//! On-screen preview rendering at a display scale
//!
//! The preview surface is the canvas scaled down to fit the screen. After
//! all layers paint, the selected layer's bounding box is stroked dashed on
//! top, mapped through the same forward transform the paint used and sized
//! from metrics measured on this call.

use anyhow::Context;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::bitmap::BitmapCache;
use crate::domain::{CanvasSpace, LayerKind, Point, Scene};
use crate::text::FontStore;

use super::paint_layers;

const OUTLINE_WIDTH: f32 = 2.0;
const OUTLINE_DASH: [f32; 2] = [6.0, 4.0];

/// Render the scene into a display-scaled surface with a selection outline
pub fn render_preview(
    scene: &Scene,
    canvas: &CanvasSpace,
    display_scale: f32,
    fonts: &FontStore,
    bitmaps: &BitmapCache,
) -> anyhow::Result<Pixmap> {
    anyhow::ensure!(
        display_scale.is_finite() && display_scale > 0.0,
        "Invalid display scale {display_scale}"
    );
    let width = ((canvas.width as f32) * display_scale).round().max(1.0) as u32;
    let height = ((canvas.height as f32) * display_scale).round().max(1.0) as u32;
    let mut surface =
        Pixmap::new(width, height).context("Failed to allocate preview surface")?;

    surface.fill(Color::WHITE);
    paint_layers(&mut surface, scene, display_scale, fonts, bitmaps);
    draw_selection_outline(&mut surface, scene, display_scale, fonts);

    Ok(surface)
}

/// Stroke the selected layer's bounding box, dashed, over the composite
fn draw_selection_outline(
    surface: &mut Pixmap,
    scene: &Scene,
    display_scale: f32,
    fonts: &FontStore,
) {
    let Some(id) = scene.selected() else {
        return;
    };
    let Some(layer) = scene.layer(id) else {
        return;
    };

    // Text extents come from a fresh measurement so the outline always
    // matches what the hit-tester would see.
    let (w, h) = match &layer.kind {
        LayerKind::Image(img) => (img.natural_width as f32, img.natural_height as f32),
        LayerKind::Text(text) => {
            let m = fonts.measure(&text.font_family, text.font_size, &text.text);
            (m.width, m.height)
        }
    };

    let corners = [
        Point::new(-w / 2.0, -h / 2.0),
        Point::new(w / 2.0, -h / 2.0),
        Point::new(w / 2.0, h / 2.0),
        Point::new(-w / 2.0, h / 2.0),
    ];

    let mut pb = PathBuilder::new();
    for (i, corner) in corners.iter().enumerate() {
        let p = layer.transform.apply(*corner);
        let (x, y) = (p.x * display_scale, p.y * display_scale);
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(30, 110, 230, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: OUTLINE_WIDTH,
        dash: StrokeDash::new(OUTLINE_DASH.to_vec(), 0.0),
        ..Default::default()
    };
    surface.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayerColor;
    use crate::domain::LayerTransform;
    use image::RgbaImage;

    fn solid_cache(key: &str, w: u32, h: u32, px: [u8; 4]) -> BitmapCache {
        let mut cache = BitmapCache::new();
        cache
            .insert(key, &RgbaImage::from_pixel(w, h, image::Rgba(px)))
            .unwrap();
        cache
    }

    fn canvas() -> CanvasSpace {
        CanvasSpace {
            width: 200,
            height: 100,
        }
    }

    #[test]
    fn test_surface_size_scales_with_display() {
        let scene = Scene::new();
        let surface = render_preview(
            &scene,
            &canvas(),
            0.5,
            &FontStore::new(),
            &BitmapCache::new(),
        )
        .unwrap();
        assert_eq!((surface.width(), surface.height()), (100, 50));
    }

    #[test]
    fn test_empty_scene_is_white() {
        let scene = Scene::new();
        let surface = render_preview(
            &scene,
            &canvas(),
            1.0,
            &FontStore::new(),
            &BitmapCache::new(),
        )
        .unwrap();
        assert!(
            surface
                .pixels()
                .iter()
                .all(|p| p.red() == 255 && p.green() == 255 && p.blue() == 255)
        );
    }

    #[test]
    fn test_image_layer_paints_at_position() {
        let mut scene = Scene::new();
        scene.add_image_layer(
            "red",
            20,
            20,
            LayerTransform::new(Point::new(100.0, 50.0), 0.0, 1.0),
        );
        scene.select(None);
        let cache = solid_cache("red", 20, 20, [255, 0, 0, 255]);
        let surface =
            render_preview(&scene, &canvas(), 1.0, &FontStore::new(), &cache).unwrap();
        let center = surface.pixel(100, 50).unwrap();
        assert_eq!((center.red(), center.green(), center.blue()), (255, 0, 0));
        let outside = surface.pixel(10, 10).unwrap();
        assert_eq!(outside.red(), 255);
        assert_eq!(outside.green(), 255);
    }

    #[test]
    fn test_undecoded_bitmap_skips_paint() {
        let mut scene = Scene::new();
        scene.add_image_layer(
            "missing",
            20,
            20,
            LayerTransform::new(Point::new(100.0, 50.0), 0.0, 1.0),
        );
        scene.select(None);
        let surface = render_preview(
            &scene,
            &canvas(),
            1.0,
            &FontStore::new(),
            &BitmapCache::new(),
        )
        .unwrap();
        let center = surface.pixel(100, 50).unwrap();
        assert_eq!((center.red(), center.green(), center.blue()), (255, 255, 255));
    }

    #[test]
    fn test_later_layer_occludes_earlier() {
        let mut scene = Scene::new();
        let t = LayerTransform::new(Point::new(100.0, 50.0), 0.0, 1.0);
        scene.add_image_layer("red", 20, 20, t);
        scene.add_image_layer("blue", 20, 20, t);
        scene.select(None);
        let mut cache = solid_cache("red", 20, 20, [255, 0, 0, 255]);
        cache
            .insert(
                "blue",
                &RgbaImage::from_pixel(20, 20, image::Rgba([0, 0, 255, 255])),
            )
            .unwrap();
        let surface =
            render_preview(&scene, &canvas(), 1.0, &FontStore::new(), &cache).unwrap();
        let center = surface.pixel(100, 50).unwrap();
        assert_eq!((center.red(), center.blue()), (0, 255));
    }

    #[test]
    fn test_selection_outline_marks_surface() {
        let mut scene = Scene::new();
        scene.add_image_layer(
            "red",
            20,
            20,
            LayerTransform::new(Point::new(100.0, 50.0), 0.0, 1.0),
        );
        let cache = solid_cache("red", 20, 20, [255, 0, 0, 255]);
        let selected =
            render_preview(&scene, &canvas(), 1.0, &FontStore::new(), &cache).unwrap();
        scene.select(None);
        let unselected =
            render_preview(&scene, &canvas(), 1.0, &FontStore::new(), &cache).unwrap();
        assert_ne!(selected.data(), unselected.data());
    }
}
