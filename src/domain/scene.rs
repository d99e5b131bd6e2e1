//! The ordered layer list and current selection
//!
//! Insertion order is paint order: later layers occlude earlier ones, and
//! hit-testing walks the list in reverse. Mutations referencing an unknown
//! id are best-effort no-ops; invalid geometry is rejected here so a
//! singular transform can never reach the renderer or hit-tester.

use crate::config::LayerColor;
use crate::domain::geometry::{LayerTransform, Point};
use crate::domain::layer::{ImageLayer, Layer, LayerId, LayerKind, TextLayer};

/// Partial update applied to a layer by [`Scene::update_layer`]
///
/// Transform fields apply to both variants; text fields are ignored on
/// image layers. Fields failing validation are dropped individually.
#[derive(Clone, Debug, Default)]
pub struct LayerPatch {
    pub position: Option<Point>,
    pub rotation_deg: Option<f32>,
    pub scale: Option<f32>,
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub color: Option<LayerColor>,
}

/// Ordered layers plus the current selection
#[derive(Clone, Debug, Default)]
pub struct Scene {
    layers: Vec<Layer>,
    selected: Option<LayerId>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers in paint order (first is bottom-most)
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    fn push(&mut self, transform: LayerTransform, kind: LayerKind) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer {
            id,
            transform,
            kind,
        });
        self.selected = Some(id);
        id
    }

    /// Append an image layer; it becomes the selection
    pub fn add_image_layer(
        &mut self,
        source: impl Into<String>,
        natural_width: u32,
        natural_height: u32,
        transform: LayerTransform,
    ) -> LayerId {
        self.push(
            transform,
            LayerKind::Image(ImageLayer {
                source: source.into(),
                natural_width,
                natural_height,
            }),
        )
    }

    /// Append a text layer; it becomes the selection
    pub fn add_text_layer(
        &mut self,
        text: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f32,
        color: LayerColor,
        transform: LayerTransform,
    ) -> LayerId {
        self.push(
            transform,
            LayerKind::Text(TextLayer {
                text: text.into(),
                font_family: font_family.into(),
                font_size: font_size.max(1.0),
                color,
            }),
        )
    }

    /// Remove a layer by id; clears the selection if it pointed at the
    /// removed layer. No-op if the id is absent.
    pub fn remove_layer(&mut self, id: LayerId) {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() == before {
            log::debug!("remove_layer: id {id:?} not in scene");
            return;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Merge a patch into a layer. Unknown ids no-op; individual fields
    /// carrying non-finite or non-positive values are dropped with a
    /// warning rather than clamped.
    pub fn update_layer(&mut self, id: LayerId, patch: LayerPatch) {
        let Some(layer) = self.layer_mut(id) else {
            log::debug!("update_layer: id {id:?} not in scene, dropping patch");
            return;
        };

        if let Some(position) = patch.position {
            if position.is_finite() {
                layer.transform.position = position;
            } else {
                log::warn!("update_layer: non-finite position {position:?} rejected");
            }
        }
        if let Some(rotation) = patch.rotation_deg {
            if rotation.is_finite() {
                layer.transform.rotation_deg = rotation;
            } else {
                log::warn!("update_layer: non-finite rotation {rotation} rejected");
            }
        }
        if let Some(scale) = patch.scale {
            // Zero or negative scale would make the inverse transform
            // singular, so it never gets in.
            if scale.is_finite() && scale > 0.0 {
                layer.transform.scale = scale;
            } else {
                log::warn!("update_layer: invalid scale {scale} rejected");
            }
        }

        if let LayerKind::Text(text_layer) = &mut layer.kind {
            if let Some(text) = patch.text {
                text_layer.text = text;
            }
            if let Some(family) = patch.font_family {
                text_layer.font_family = family;
            }
            if let Some(size) = patch.font_size {
                if size.is_finite() && size > 0.0 {
                    text_layer.font_size = size;
                } else {
                    log::warn!("update_layer: invalid font size {size} rejected");
                }
            }
            if let Some(color) = patch.color {
                text_layer.color = color;
            }
        } else if patch.text.is_some() || patch.font_family.is_some() || patch.font_size.is_some() {
            log::debug!("update_layer: text fields ignored on image layer {id:?}");
        }
    }

    /// Set or clear the selection; selecting an unknown id clears instead
    /// so the selection can never dangle
    pub fn select(&mut self, id: Option<LayerId>) {
        self.selected = match id {
            Some(id) if self.layer(id).is_some() => Some(id),
            Some(id) => {
                log::debug!("select: id {id:?} not in scene, clearing selection");
                None
            }
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> LayerTransform {
        LayerTransform::new(Point::new(100.0, 100.0), 0.0, 1.0)
    }

    fn text_scene() -> (Scene, LayerId) {
        let mut scene = Scene::new();
        let id = scene.add_text_layer("hello", "Sans", 48.0, LayerColor::default(), transform());
        (scene, id)
    }

    #[test]
    fn test_create_appends_and_selects() {
        let mut scene = Scene::new();
        let a = scene.add_image_layer("img-a", 640, 480, transform());
        assert_eq!(scene.selected(), Some(a));
        let b = scene.add_text_layer("x", "Sans", 24.0, LayerColor::default(), transform());
        assert_eq!(scene.selected(), Some(b));
        assert_eq!(scene.layers().len(), 2);
        assert_eq!(scene.layers()[0].id, a, "insertion order preserved");
    }

    #[test]
    fn test_ids_never_reused() {
        let mut scene = Scene::new();
        let a = scene.add_image_layer("img", 10, 10, transform());
        scene.remove_layer(a);
        let b = scene.add_image_layer("img", 10, 10, transform());
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let (mut scene, id) = text_scene();
        scene.remove_layer(id);
        assert_eq!(scene.selected(), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_remove_unselected_keeps_selection() {
        let mut scene = Scene::new();
        let a = scene.add_image_layer("img", 10, 10, transform());
        let b = scene.add_text_layer("x", "Sans", 24.0, LayerColor::default(), transform());
        scene.remove_layer(a);
        assert_eq!(scene.selected(), Some(b));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut scene, id) = text_scene();
        scene.remove_layer(id);
        scene.remove_layer(id);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_update_absent_is_noop() {
        let mut scene = Scene::new();
        scene.update_layer(
            LayerId(99),
            LayerPatch {
                scale: Some(2.0),
                ..Default::default()
            },
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn test_update_rejects_invalid_geometry() {
        let (mut scene, id) = text_scene();
        scene.update_layer(
            id,
            LayerPatch {
                scale: Some(0.0),
                rotation_deg: Some(f32::NAN),
                position: Some(Point::new(f32::NAN, 1.0)),
                ..Default::default()
            },
        );
        let t = scene.layer(id).unwrap().transform;
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.rotation_deg, 0.0);
        assert_eq!(t.position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_update_merges_valid_fields() {
        let (mut scene, id) = text_scene();
        scene.update_layer(
            id,
            LayerPatch {
                position: Some(Point::new(5.0, 6.0)),
                scale: Some(2.5),
                text: Some("longer".to_string()),
                ..Default::default()
            },
        );
        let layer = scene.layer(id).unwrap();
        assert_eq!(layer.transform.position, Point::new(5.0, 6.0));
        assert_eq!(layer.transform.scale, 2.5);
        assert_eq!(layer.as_text().unwrap().text, "longer");
    }

    #[test]
    fn test_select_unknown_clears() {
        let (mut scene, id) = text_scene();
        scene.select(Some(LayerId(id.0 + 40)));
        assert_eq!(scene.selected(), None);
        scene.select(Some(id));
        assert_eq!(scene.selected(), Some(id));
    }
}
