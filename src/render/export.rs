//! Print-resolution export rendering
//!
//! Export is the preview pipeline evaluated at unit scale: same paint
//! routine, same transform order, no selection outline, opaque white
//! background. The result is a flattened bitmap at exactly the canvas
//! pixel dimensions; file placement and naming beyond the suggested
//! pattern are collaborator concerns.

use std::io;

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{Color, Pixmap};

use crate::bitmap::BitmapCache;
use crate::config::{PRINT_DPI, SizePreset};
use crate::domain::{CanvasSpace, Scene};
use crate::text::FontStore;

use super::paint_layers;

/// Flatten the scene into an opaque bitmap at canvas pixel dimensions
pub fn render_export(
    scene: &Scene,
    canvas: &CanvasSpace,
    fonts: &FontStore,
    bitmaps: &BitmapCache,
) -> anyhow::Result<RgbaImage> {
    let mut surface = Pixmap::new(canvas.width, canvas.height)
        .context("Failed to allocate export surface")?;

    surface.fill(Color::WHITE);
    paint_layers(&mut surface, scene, 1.0, fonts, bitmaps);

    // The white fill makes every pixel opaque, so the premultiplied surface
    // data is already straight RGBA.
    RgbaImage::from_raw(canvas.width, canvas.height, surface.take())
        .context("Export surface size mismatch")
}

/// Encode an exported bitmap as lossless RGBA PNG
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Suggested artifact name embedding physical size and resolution
pub fn export_file_name(preset: &SizePreset) -> String {
    format!(
        "design_{}x{}_in_{}dpi.png",
        preset.width_in, preset.height_in, PRINT_DPI as u32
    )
}
