//! Geometric primitives for canvas coordinates and layer transforms
//!
//! All layer math lives in canvas pixel space: the coordinate system derived
//! from a size preset's physical dimensions at the fixed print resolution.

/// A point or vector in canvas, view, or layer-local coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Convert a physical length to pixels at the given resolution
///
/// Nearest-integer rounding. The result is computed once per preset and
/// reused across preview, hit-testing, and export so the three paths can
/// never disagree about canvas dimensions.
#[inline]
pub fn physical_to_pixels(length: f32, resolution: f32) -> u32 {
    (length * resolution).round() as u32
}

/// Minimum uniform scale that makes a source rectangle fully cover a target
/// rectangle (excess is cropped, never letterboxed)
#[inline]
pub fn cover_scale(target_w: f32, target_h: f32, source_w: f32, source_h: f32) -> f32 {
    (target_w / source_w).max(target_h / source_h)
}

/// Per-layer similarity transform: uniform scale, then rotation, then
/// translation to `position`
///
/// Rotation is in degrees, clockwise-positive (y-down coordinates), applied
/// about `position`. `scale` is kept positive by the mutation layer, so the
/// inverse is always defined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    /// Layer origin (its visual center) in canvas pixel space
    pub position: Point,
    /// Clockwise rotation in degrees
    pub rotation_deg: f32,
    /// Uniform scale, > 0
    pub scale: f32,
}

impl LayerTransform {
    pub fn new(position: Point, rotation_deg: f32, scale: f32) -> Self {
        Self {
            position,
            rotation_deg,
            scale,
        }
    }

    /// Map a layer-local point into canvas space: rotate, scale, translate
    pub fn apply(&self, local: Point) -> Point {
        let rad = to_radians(self.rotation_deg);
        let (sin, cos) = rad.sin_cos();
        let rx = local.x * cos - local.y * sin;
        let ry = local.x * sin + local.y * cos;
        Point::new(
            rx * self.scale + self.position.x,
            ry * self.scale + self.position.y,
        )
    }

    /// Map a canvas-space point into layer-local space
    ///
    /// Exact inverse of [`apply`](Self::apply): translate by −position,
    /// rotate by −θ, divide by scale. Hit-testing and drag math use this,
    /// never an approximation.
    pub fn unapply(&self, canvas: Point) -> Point {
        let dx = canvas.x - self.position.x;
        let dy = canvas.y - self.position.y;
        let rad = to_radians(-self.rotation_deg);
        let (sin, cos) = rad.sin_cos();
        let rx = dx * cos - dy * sin;
        let ry = dx * sin + dy * cos;
        Point::new(rx / self.scale, ry / self.scale)
    }

    /// Map a layer-local vector (rotation and scale only, no translation)
    /// into canvas space
    pub fn apply_vector(&self, local: Point) -> Point {
        let rad = to_radians(self.rotation_deg);
        let (sin, cos) = rad.sin_cos();
        Point::new(
            (local.x * cos - local.y * sin) * self.scale,
            (local.x * sin + local.y * cos) * self.scale,
        )
    }
}

/// Integer pixel dimensions of the canvas at print resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSpace {
    pub width: u32,
    pub height: u32,
}

impl CanvasSpace {
    /// Derive the canvas pixel space from physical inches at a resolution
    pub fn from_physical(width_in: f32, height_in: f32, dpi: f32) -> Self {
        Self {
            width: physical_to_pixels(width_in, dpi),
            height: physical_to_pixels(height_in, dpi),
        }
    }

    /// Canvas center point
    pub fn center(&self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// Display scale that fits the canvas within `max_dim` on screen,
    /// capped at 1.0
    pub fn display_scale(&self, max_dim: f32) -> f32 {
        let largest = self.width.max(self.height).max(1) as f32;
        (max_dim / largest).min(1.0)
    }
}

/// Containment test against an origin-centered box of the given full extents
#[inline]
pub fn centered_box_contains(local: Point, width: f32, height: f32) -> bool {
    local.x >= -width / 2.0
        && local.x <= width / 2.0
        && local.y >= -height / 2.0
        && local.y <= height / 2.0
}
