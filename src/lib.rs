//! printproof: layer editor core for a text-to-print-design pipeline
//!
//! A scene of image and text layers placed on a fixed-resolution print
//! canvas, each carrying a position, rotation, and uniform scale. The crate
//! provides inverse-transform hit-testing, a display-scaled live preview,
//! and a print-resolution export renderer that is the preview evaluated at
//! unit scale. Prompting, the generation network call, and file persistence
//! are collaborators: the core consumes decoded bitmaps and produces a
//! flattened bitmap, nothing more.
//!
//! Typical flow:
//!
//! ```no_run
//! use printproof::config::{LayerColor, default_presets};
//! use printproof::session::EditorSession;
//!
//! # fn demo(generated: image::RgbaImage) -> anyhow::Result<()> {
//! let mut session = EditorSession::new(default_presets()[0].clone());
//! session.fonts_mut().load_system_fallback("Sans");
//!
//! // The generation collaborator delivers a decoded bitmap
//! session.on_bitmap_ready("gen-1", &generated)?;
//! let _caption = session.add_text_layer("Greetings!", "Sans", 96.0, LayerColor::default());
//!
//! let _preview = session.render_preview()?;
//! let _flattened = session.request_export_bitmap()?;
//! # Ok(())
//! # }
//! ```

pub mod bitmap;
pub mod config;
pub mod domain;
pub mod hittest;
pub mod render;
pub mod session;
pub mod text;

pub use bitmap::{BitmapCache, decode_rgba, decode_rgba_async};
pub use domain::{CanvasSpace, Layer, LayerId, LayerKind, LayerPatch, LayerTransform, Point, Scene};
pub use hittest::{Hit, hit_test};
pub use session::{EditorSession, SessionMsg, Step, handle_session_msg};
pub use text::FontStore;
