//! Size presets and fixed editor configuration
//!
//! The editor consumes this configuration but does not own its persistence;
//! a preset table can be loaded from JSON or taken from the built-in list.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Fixed print resolution in pixels per inch
pub const PRINT_DPI: f32 = 300.0;

/// Maximum on-screen dimension of the preview surface, used only to derive
/// the display scale
pub const MAX_DISPLAY_DIM: f32 = 900.0;

/// Serializable color for text layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for LayerColor {
    fn default() -> Self {
        // Near-black default for print text
        Self {
            r: 0.1,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl LayerColor {
    /// Convert to image crate RGBA format (0-255), always opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// One selectable canvas size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizePreset {
    /// Human-readable name shown in the preset picker
    pub label: String,
    pub width_in: f32,
    pub height_in: f32,
    /// Size token forwarded to the image generation collaborator
    pub generation_size: String,
}

/// Built-in preset table used when no external table is supplied
pub fn default_presets() -> Vec<SizePreset> {
    vec![
        SizePreset {
            label: "Postcard 7.5\u{d7}4.5 in".to_string(),
            width_in: 7.5,
            height_in: 4.5,
            generation_size: "1536x1024".to_string(),
        },
        SizePreset {
            label: "Square 6\u{d7}6 in".to_string(),
            width_in: 6.0,
            height_in: 6.0,
            generation_size: "1024x1024".to_string(),
        },
        SizePreset {
            label: "Tall 4.5\u{d7}7.5 in".to_string(),
            width_in: 4.5,
            height_in: 7.5,
            generation_size: "1024x1536".to_string(),
        },
    ]
}

/// Load a preset table from a JSON array
pub fn load_presets(json: &str) -> anyhow::Result<Vec<SizePreset>> {
    let presets: Vec<SizePreset> =
        serde_json::from_str(json).context("Failed to parse size preset table")?;
    anyhow::ensure!(!presets.is_empty(), "Preset table is empty");
    Ok(presets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_color_to_rgba() {
        let c = LayerColor {
            r: 1.0,
            g: 0.5,
            b: 0.0,
        };
        assert_eq!(c.to_rgba_u8(), [255, 128, 0, 255]);
    }

    #[test]
    fn test_load_presets_round_trip() {
        let json = serde_json::to_string(&default_presets()).unwrap();
        let loaded = load_presets(&json).unwrap();
        assert_eq!(loaded, default_presets());
    }

    #[test]
    fn test_load_presets_rejects_empty() {
        assert!(load_presets("[]").is_err());
        assert!(load_presets("not json").is_err());
    }
}
