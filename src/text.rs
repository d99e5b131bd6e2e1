//! Font registry, text measurement, and glyph rasterization
//!
//! Text layers are measured and painted from the same metrics, recomputed
//! on every call, so a stale bounding box can never disagree with painted
//! pixels. Fonts are registered by family name; when a family has no
//! registered font, measurement falls back to a size-proportional estimate
//! and painting is skipped (same policy as an undecoded bitmap).

use std::collections::HashMap;

use ab_glyph::{Font as _, FontArc, ScaleFont as _, point};
use anyhow::Context;
use tiny_skia::Pixmap;

use crate::config::LayerColor;

/// Measured extents of a single line of text, in canvas pixels (pre-scale)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// Fonts available to text layers, keyed by family name
#[derive(Default)]
pub struct FontStore {
    fonts: HashMap<String, FontArc>,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes under a family name
    pub fn insert(&mut self, family: impl Into<String>, bytes: Vec<u8>) -> anyhow::Result<()> {
        let family = family.into();
        let font = FontArc::try_from_vec(bytes)
            .with_context(|| format!("Failed to parse font data for family '{family}'"))?;
        self.fonts.insert(family, font);
        Ok(())
    }

    pub fn get(&self, family: &str) -> Option<&FontArc> {
        self.fonts.get(family)
    }

    /// Try to register a common system sans-serif under the given family
    /// name; returns false if none of the candidate files exist
    pub fn load_system_fallback(&mut self, family: &str) -> bool {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        ];
        for path in CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                if self.insert(family, bytes).is_ok() {
                    log::debug!("Loaded system font {path} as family '{family}'");
                    return true;
                }
            }
        }
        log::warn!("No system font found for family '{family}'");
        false
    }

    /// Measure a line at the given family and size
    ///
    /// Width is the kerned advance sum; height is the ascent-to-descent
    /// line box, the same extents the rasterizer fills. Unregistered
    /// families get a proportional estimate so hit-testing still tracks
    /// content length.
    pub fn measure(&self, family: &str, size: f32, text: &str) -> TextMetrics {
        let Some(font) = self.get(family) else {
            return TextMetrics {
                width: size * 0.5 * text.chars().count() as f32,
                height: size * 1.2,
            };
        };
        let scaled = font.as_scaled(size);
        let mut width = 0.0f32;
        let mut prev = None;
        for ch in text.chars() {
            let gid = font.glyph_id(ch);
            if let Some(prev_id) = prev {
                width += scaled.kern(prev_id, gid);
            }
            width += scaled.h_advance(gid);
            prev = Some(gid);
        }
        TextMetrics {
            width,
            height: scaled.ascent() - scaled.descent(),
        }
    }

    /// Rasterize a line into a tight pixmap at 1:1 canvas pixels
    ///
    /// Returns None when the family is unregistered or the line has no ink;
    /// callers skip the paint in that case.
    pub fn rasterize(
        &self,
        family: &str,
        size: f32,
        text: &str,
        color: LayerColor,
    ) -> Option<Pixmap> {
        let font = self.get(family)?;
        let metrics = self.measure(family, size, text);
        let width = metrics.width.ceil().max(1.0) as u32;
        let height = metrics.height.ceil().max(1.0) as u32;
        let mut pixmap = Pixmap::new(width, height)?;

        let scaled = font.as_scaled(size);
        let ascent = scaled.ascent();
        let [r, g, b, _] = color.to_rgba_u8();

        let mut x_cursor = 0.0f32;
        let mut prev = None;
        let mut inked = false;
        for ch in text.chars() {
            let gid = font.glyph_id(ch);
            if let Some(prev_id) = prev {
                x_cursor += scaled.kern(prev_id, gid);
            }
            let glyph = gid.with_scale_and_position(size, point(x_cursor, ascent));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let pm_w = pixmap.width() as i32;
                let pm_h = pixmap.height() as i32;
                let pixels = pixmap.pixels_mut();
                outlined.draw(|px, py, cov| {
                    let x = bounds.min.x as i32 + px as i32;
                    let y = bounds.min.y as i32 + py as i32;
                    if x < 0 || y < 0 || x >= pm_w || y >= pm_h {
                        return;
                    }
                    let alpha = (cov * 255.0).round().clamp(0.0, 255.0) as u8;
                    if alpha == 0 {
                        return;
                    }
                    let idx = (y * pm_w + x) as usize;
                    // Overlapping glyph edges keep the denser coverage
                    if pixels[idx].alpha() < alpha {
                        let c = tiny_skia::ColorU8::from_rgba(r, g, b, alpha).premultiply();
                        pixels[idx] = c;
                    }
                });
                inked = true;
            }
            x_cursor += scaled.h_advance(gid);
            prev = Some(gid);
        }

        if inked { Some(pixmap) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_metrics_track_content_length() {
        let fonts = FontStore::new();
        let short = fonts.measure("Missing", 48.0, "A");
        let long = fonts.measure("Missing", 48.0, "A very long line of text");
        assert!(long.width > short.width);
        assert_eq!(short.height, long.height);
    }

    #[test]
    fn test_measure_recomputes_per_call() {
        // Metrics must reflect the string passed in, never a cached one,
        // with or without a real font registered.
        let mut fonts = FontStore::new();
        fonts.load_system_fallback("Sans");
        let a = fonts.measure("Sans", 48.0, "A");
        let b = fonts.measure("Sans", 48.0, "A very long line of text");
        assert!(b.width > a.width);
    }

    #[test]
    fn test_rasterize_without_font_is_none() {
        let fonts = FontStore::new();
        assert!(
            fonts
                .rasterize("Missing", 48.0, "A", LayerColor::default())
                .is_none()
        );
    }

    #[test]
    fn test_rasterize_produces_ink() {
        let mut fonts = FontStore::new();
        if !fonts.load_system_fallback("Sans") {
            // No system font on this machine; nothing to rasterize against
            return;
        }
        let pixmap = fonts
            .rasterize("Sans", 48.0, "Ag", LayerColor::default())
            .expect("glyphs should produce ink");
        assert!(pixmap.pixels().iter().any(|p| p.alpha() > 0));
        let metrics = fonts.measure("Sans", 48.0, "Ag");
        assert_eq!(pixmap.width(), metrics.width.ceil().max(1.0) as u32);
    }

    #[test]
    fn test_insert_rejects_garbage() {
        let mut fonts = FontStore::new();
        assert!(fonts.insert("Bad", vec![0u8; 16]).is_err());
    }
}
