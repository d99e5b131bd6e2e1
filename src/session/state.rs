//! The editor session: owned state and orchestration
//!
//! One `EditorSession` owns the scene, the font and bitmap caches, and the
//! active preset. Renderers and the hit-tester only ever borrow that state
//! immutably; every mutation goes through the session so the single-threaded
//! event model holds.

use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::bitmap::BitmapCache;
use crate::config::{LayerColor, MAX_DISPLAY_DIM, PRINT_DPI, SizePreset};
use crate::domain::{
    CanvasSpace, LayerId, LayerPatch, LayerTransform, Point, Scene, cover_scale,
};
use crate::hittest::hit_test;
use crate::render::{export_file_name, render_export, render_preview};
use crate::text::FontStore;

/// Which screen the user is on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    /// Prompt entry and generation; the scene is hidden but kept
    #[default]
    Compose,
    /// Layer placement and transformation on the canvas
    Edit,
}

/// An in-flight drag, begun on pointer-down over a layer
#[derive(Clone, Copy, Debug)]
struct DragState {
    layer: LayerId,
    /// Pointer position in the grabbed layer's local frame
    grab_local: Point,
}

/// Owned editor state and the entry points the UI collaborator calls
pub struct EditorSession {
    preset: SizePreset,
    canvas: CanvasSpace,
    step: Step,
    scene: Scene,
    fonts: FontStore,
    bitmaps: BitmapCache,
    drag: Option<DragState>,
}

impl EditorSession {
    pub fn new(preset: SizePreset) -> Self {
        let canvas = CanvasSpace::from_physical(preset.width_in, preset.height_in, PRINT_DPI);
        Self {
            preset,
            canvas,
            step: Step::Compose,
            scene: Scene::new(),
            fonts: FontStore::new(),
            bitmaps: BitmapCache::new(),
            drag: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn preset(&self) -> &SizePreset {
        &self.preset
    }

    pub fn canvas(&self) -> CanvasSpace {
        self.canvas
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn fonts(&self) -> &FontStore {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontStore {
        &mut self.fonts
    }

    /// Scale at which the canvas fits the maximum on-screen dimension
    pub fn display_scale(&self) -> f32 {
        self.canvas.display_scale(MAX_DISPLAY_DIM)
    }

    /// Switch the active size preset
    ///
    /// Re-derives the canvas pixel space; existing layers keep their pixel
    /// coordinates. Only a scene created after the switch is centered in
    /// the new space.
    pub fn set_preset(&mut self, preset: SizePreset) {
        self.canvas = CanvasSpace::from_physical(preset.width_in, preset.height_in, PRINT_DPI);
        log::debug!(
            "Preset '{}': canvas {}x{}px",
            preset.label,
            self.canvas.width,
            self.canvas.height
        );
        self.preset = preset;
    }

    /// A generated bitmap finished decoding: replace the scene with a single
    /// cover-scaled, centered image layer and enter the edit step
    pub fn on_bitmap_ready(&mut self, source: impl Into<String>, rgba: &RgbaImage) -> anyhow::Result<()> {
        let source = source.into();
        anyhow::ensure!(
            rgba.width() > 0 && rgba.height() > 0,
            "Generated bitmap is empty"
        );
        self.bitmaps.insert(source.clone(), rgba)?;

        let scale = cover_scale(
            self.canvas.width as f32,
            self.canvas.height as f32,
            rgba.width() as f32,
            rgba.height() as f32,
        );
        // One-way replacement: any prior edit scene is discarded here.
        let mut scene = Scene::new();
        scene.add_image_layer(
            source,
            rgba.width(),
            rgba.height(),
            LayerTransform::new(self.canvas.center(), 0.0, scale),
        );
        self.scene = scene;
        self.drag = None;
        self.step = Step::Edit;
        Ok(())
    }

    /// Return to edit without a new generation; redisplays the kept scene.
    /// No-op while the scene is empty.
    pub fn enter_edit(&mut self) {
        if self.scene.is_empty() {
            log::debug!("enter_edit: no scene to show yet");
            return;
        }
        self.step = Step::Edit;
    }

    /// Back to the compose step; the scene stays in memory
    pub fn back_to_compose(&mut self) {
        self.step = Step::Compose;
        self.drag = None;
    }

    /// Append a text layer at the canvas center; it becomes the selection
    pub fn add_text_layer(
        &mut self,
        text: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f32,
        color: LayerColor,
    ) -> Option<LayerId> {
        if self.step != Step::Edit {
            log::warn!("add_text_layer: not in edit step");
            return None;
        }
        Some(self.scene.add_text_layer(
            text,
            font_family,
            font_size,
            color,
            LayerTransform::new(self.canvas.center(), 0.0, 1.0),
        ))
    }

    /// Delete the selected layer, if any
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.scene.selected() {
            if self.drag.map(|d| d.layer) == Some(id) {
                self.drag = None;
            }
            self.scene.remove_layer(id);
        }
    }

    pub fn select(&mut self, id: Option<LayerId>) {
        self.scene.select(id);
    }

    pub fn update_layer(&mut self, id: LayerId, patch: LayerPatch) {
        self.scene.update_layer(id, patch);
    }

    /// Pointer press in view space: select the hit layer and begin a drag,
    /// or clear the selection on a miss
    pub fn pointer_down(&mut self, view_x: f32, view_y: f32) {
        let view = Point::new(view_x, view_y);
        match hit_test(&self.scene, &self.fonts, view, self.display_scale()) {
            Some(hit) => {
                self.scene.select(Some(hit.id));
                self.drag = Some(DragState {
                    layer: hit.id,
                    grab_local: hit.local_offset,
                });
            }
            None => {
                self.scene.select(None);
                self.drag = None;
            }
        }
    }

    /// Pointer move: keep the grabbed point under the pointer
    pub fn pointer_move(&mut self, view_x: f32, view_y: f32) {
        let Some(drag) = self.drag else {
            return;
        };
        let Some(layer) = self.scene.layer(drag.layer) else {
            // Layer deleted mid-gesture
            self.drag = None;
            return;
        };
        let ds = self.display_scale();
        let canvas = Point::new(view_x / ds, view_y / ds);
        let grab = layer.transform.apply_vector(drag.grab_local);
        self.scene.update_layer(
            drag.layer,
            LayerPatch {
                position: Some(Point::new(canvas.x - grab.x, canvas.y - grab.y)),
                ..Default::default()
            },
        );
    }

    /// Pointer release: end the drag, selection stays
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Render the display-scaled preview with the selection outline
    pub fn render_preview(&self) -> anyhow::Result<Pixmap> {
        render_preview(
            &self.scene,
            &self.canvas,
            self.display_scale(),
            &self.fonts,
            &self.bitmaps,
        )
    }

    /// Flatten the scene at print resolution for the save collaborator
    pub fn request_export_bitmap(&self) -> anyhow::Result<RgbaImage> {
        render_export(&self.scene, &self.canvas, &self.fonts, &self.bitmaps)
    }

    /// Suggested file name for the exported bitmap
    pub fn export_file_name(&self) -> String {
        export_file_name(&self.preset)
    }
}
