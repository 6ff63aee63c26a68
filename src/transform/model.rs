//! Component placement state and the geometry derived from it.

use crate::composition::blend::BlendMode;
use crate::foundation::core::{Affine, PixelSize, Point, Rect};
use crate::foundation::error::ComposeError;

/// Axis-aligned rectangle covered by the scaled, unrotated component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint(pub Rect);

impl Footprint {
    /// Top-left corner (the stored position).
    pub fn top_left(&self) -> Point {
        self.0.origin()
    }

    /// Visual center; the pivot for rotation and scale.
    pub fn center(&self) -> Point {
        self.0.center()
    }

    /// Inclusive point-in-rectangle test on all four edges.
    ///
    /// Rotation is ignored: at non-zero rotation the grab region stays the unrotated box.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.0.x0 && p.x <= self.0.x1 && p.y >= self.0.y0 && p.y <= self.0.y1
    }
}

/// Position, scale, rotation, opacity and blend of the component raster.
///
/// Coordinates are in surface space. `scale > 0` always holds, including for deserialized
/// values, which go through the same checks as the setters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawTransform")]
pub struct TransformModel {
    position: Point,
    scale: f64,
    rotation_deg: f64,
    opacity: f32,
    blend: BlendMode,
}

impl Default for TransformModel {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: 1.0,
            rotation_deg: 0.0,
            opacity: 1.0,
            blend: BlendMode::Normal,
        }
    }
}

#[derive(serde::Deserialize)]
struct RawTransform {
    position: Point,
    scale: f64,
    rotation_deg: f64,
    opacity: f32,
    blend: BlendMode,
}

impl TryFrom<RawTransform> for TransformModel {
    type Error = ComposeError;

    fn try_from(raw: RawTransform) -> Result<Self, Self::Error> {
        if !(raw.position.x.is_finite() && raw.position.y.is_finite()) {
            return Err(ComposeError::validation("position must be finite"));
        }
        if !raw.rotation_deg.is_finite() || raw.opacity.is_nan() {
            return Err(ComposeError::validation(
                "rotation and opacity must be numbers",
            ));
        }
        let mut t = Self::default();
        if !t.set_scale(raw.scale) {
            return Err(ComposeError::validation(format!(
                "scale must be positive and finite, got {}",
                raw.scale
            )));
        }
        t.set_position(raw.position);
        t.set_rotation_degrees(raw.rotation_deg);
        t.set_opacity(raw.opacity);
        t.set_blend(raw.blend);
        Ok(t)
    }
}

impl TransformModel {
    /// Top-left of the footprint in surface space.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation in degrees, normalized to `[0, 360)`.
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_deg
    }

    /// Global alpha in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Blend operator.
    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Move the footprint's top-left corner.
    pub fn set_position(&mut self, p: Point) {
        self.position = p;
    }

    /// Set the scale; returns `false` (and changes nothing) for `s <= 0` or non-finite `s`.
    pub fn set_scale(&mut self, s: f64) -> bool {
        if !s.is_finite() || s <= 0.0 {
            return false;
        }
        self.scale = s;
        true
    }

    /// Any degree value is accepted, including negatives; stored modulo 360.
    pub fn set_rotation_degrees(&mut self, deg: f64) {
        let r = deg.rem_euclid(360.0);
        self.rotation_deg = if r >= 360.0 { 0.0 } else { r };
    }

    /// Clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Select the blend operator.
    pub fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// Restore defaults, placing the component at `position`.
    pub fn reset(&mut self, position: Point) {
        *self = Self {
            position,
            ..Self::default()
        };
    }

    /// Footprint of a component with the given intrinsic size.
    pub fn footprint(&self, component: PixelSize) -> Footprint {
        let size = component.to_size() * self.scale;
        Footprint(Rect::from_origin_size(self.position, size))
    }

    /// Position that centers a component of `component` size on a `surface`.
    pub fn centered_position(&self, surface: PixelSize, component: PixelSize) -> Point {
        let s = surface.to_size();
        let c = component.to_size() * self.scale;
        Point::new((s.width - c.width) / 2.0, (s.height - c.height) / 2.0)
    }

    /// Component-local to surface transform.
    ///
    /// `translate(center) * rotate * scale * translate(-w/2, -h/2)`: the raster is drawn
    /// centered on the local origin so rotation and scale pivot around the footprint center.
    /// Positive angles turn clockwise on the y-down surface.
    pub fn render_affine(&self, component: PixelSize) -> Affine {
        let half = component.to_size().to_vec2() * 0.5;
        let center = self.footprint(component).center().to_vec2();

        Affine::translate(center)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-half)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/model.rs"]
mod tests;
