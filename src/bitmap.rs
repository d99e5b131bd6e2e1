//! Decoded-bitmap cache for image layers
//!
//! Layers reference bitmaps by source key; the cache is append-only, so a
//! key that resolves once resolves to the same pixels forever and reads
//! during painting are always safe. A layer whose key has no entry yet
//! simply does not paint (decode in flight, or the collaborator never
//! delivered) — that is an expected state, not an error.

use std::collections::HashMap;

use anyhow::Context;
use image::RgbaImage;
use tiny_skia::{IntSize, Pixmap};

/// One decoded bitmap, held as a premade tiny-skia pixmap for compositing
#[derive(Clone, Debug)]
pub struct DecodedBitmap {
    pub width: u32,
    pub height: u32,
    pixmap: Pixmap,
}

impl DecodedBitmap {
    fn from_rgba(rgba: &RgbaImage) -> anyhow::Result<Self> {
        let (width, height) = (rgba.width(), rgba.height());
        let size =
            IntSize::from_wh(width, height).context("Bitmap has zero width or height")?;
        let pixmap = Pixmap::from_vec(rgba.as_raw().clone(), size)
            .context("Bitmap dimensions do not match pixel data")?;
        Ok(Self {
            width,
            height,
            pixmap,
        })
    }

    pub fn pixmap(&self) -> tiny_skia::PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

/// Append-only map from source key to decoded bitmap
#[derive(Default)]
pub struct BitmapCache {
    entries: HashMap<String, DecodedBitmap>,
}

impl BitmapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoded bitmap under its source key
    ///
    /// A key already present keeps its existing pixels; entries are added,
    /// never replaced, so repeated layers sharing one source decode once.
    pub fn insert(&mut self, key: impl Into<String>, rgba: &RgbaImage) -> anyhow::Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            log::debug!("BitmapCache: key '{key}' already decoded, keeping existing entry");
            return Ok(());
        }
        let decoded = DecodedBitmap::from_rgba(rgba)
            .with_context(|| format!("Failed to cache bitmap for '{key}'"))?;
        self.entries.insert(key, decoded);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&DecodedBitmap> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into straight-alpha RGBA
pub fn decode_rgba(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image bytes")?;
    Ok(img.to_rgba8())
}

/// Decode off the event loop; the only asynchronous boundary in the core
pub async fn decode_rgba_async(bytes: Vec<u8>) -> anyhow::Result<RgbaImage> {
    tokio::task::spawn_blocking(move || decode_rgba(&bytes))
        .await
        .context("Bitmap decode task failed")?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba(px))
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = BitmapCache::new();
        cache.insert("gen-1", &solid(4, 2, [10, 20, 30, 255])).unwrap();
        let decoded = cache.get("gen-1").unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert!(cache.get("gen-2").is_none());
    }

    #[test]
    fn test_insert_never_replaces() {
        let mut cache = BitmapCache::new();
        cache.insert("k", &solid(2, 2, [1, 2, 3, 255])).unwrap();
        cache.insert("k", &solid(9, 9, [9, 9, 9, 255])).unwrap();
        assert_eq!(cache.get("k").unwrap().width, 2);
    }

    #[test]
    fn test_insert_rejects_empty_bitmap() {
        let mut cache = BitmapCache::new();
        let empty = RgbaImage::new(0, 0);
        assert!(cache.insert("bad", &empty).is_err());
        assert!(!cache.contains("bad"));
    }

    #[tokio::test]
    async fn test_decode_rgba_async_round_trip() {
        let img = solid(3, 3, [200, 100, 50, 255]);
        let mut png_bytes = Vec::new();
        {
            use std::io::Cursor;
            img.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)
                .unwrap();
        }
        let decoded = decode_rgba_async(png_bytes).await.unwrap();
        assert_eq!(decoded.dimensions(), (3, 3));
        assert_eq!(decoded.get_pixel(1, 1).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_rgba(&[0u8; 32]).is_err());
    }
}
