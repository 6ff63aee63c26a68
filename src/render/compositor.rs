use rayon::prelude::*;

use crate::assets::decode::RasterHandle;
use crate::composition::blend::BlendMode;
use crate::foundation::core::{Affine, PixelSize, Point, Rect, Rgba8};
use crate::foundation::error::{ComposeError, ComposeResult};
use crate::render::raster::{composite_px, sample_bilinear};
use crate::render::surface::Surface;
use crate::transform::model::TransformModel;

/// Current drawing parameters, scoped by [`Compositor::save`] / [`Compositor::restore`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// Source-image to surface transform.
    pub transform: Affine,
    /// Global alpha in `[0, 1]`.
    pub alpha: f32,
    /// Blend operator.
    pub blend: BlendMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            blend: BlendMode::Normal,
        }
    }
}

/// Owns the output surface and draws base + component into it.
///
/// The surface is recreated by [`Compositor::resize`] and written in place by every render.
#[derive(Debug, Default)]
pub struct Compositor {
    surface: Option<Surface>,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Compositor {
    /// Compositor with no surface yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current surface, if a base has established one.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Replace the surface with a fresh transparent one of `size`.
    pub fn resize(&mut self, size: PixelSize) {
        tracing::debug!(width = size.width, height = size.height, "recreate surface");
        self.surface = Some(Surface::new(size));
    }

    /// Swap in a processed copy of the surface; dimensions must match.
    pub fn replace_surface(&mut self, surface: Surface) -> ComposeResult<()> {
        match &self.surface {
            Some(cur) if cur.size() == surface.size() => {
                self.surface = Some(surface);
                Ok(())
            }
            Some(_) => Err(ComposeError::state("replacement surface size mismatch")),
            None => Err(ComposeError::state("no surface to replace")),
        }
    }

    /// Current draw state.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Push the current draw state.
    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    /// Pop the last saved draw state; unbalanced calls leave the state untouched.
    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.state = s;
        }
    }

    /// Set the global alpha (clamped).
    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Set the blend operator for subsequent draws.
    pub fn set_blend(&mut self, blend: BlendMode) {
        self.state.blend = blend;
    }

    /// Post-multiply `t` onto the current transform.
    pub fn transform(&mut self, t: Affine) {
        self.state.transform = self.state.transform * t;
    }

    /// Render the composite: clear, stretch `base` over the whole surface, then draw
    /// `component` with `transform` inside a save/restore bracket.
    ///
    /// Drawing starts from [`DrawState::default`] regardless of the caller's state, which is
    /// restored afterwards.
    ///
    /// Without a surface there is nothing to draw into; that is a no-op.
    #[tracing::instrument(skip_all)]
    pub fn render(
        &mut self,
        base: &RasterHandle,
        component: Option<&RasterHandle>,
        transform: &TransformModel,
    ) {
        let Some(size) = self.surface.as_ref().map(Surface::size) else {
            tracing::debug!("render skipped: no surface");
            return;
        };
        if let Some(s) = self.surface.as_mut() {
            s.clear();
        }

        self.save();
        self.state = DrawState::default();

        self.save();
        self.transform(Affine::scale_non_uniform(
            f64::from(size.width) / f64::from(base.width),
            f64::from(size.height) / f64::from(base.height),
        ));
        self.draw_raster(base);
        self.restore();

        if let Some(component) = component {
            self.save();
            self.set_alpha(transform.opacity());
            self.set_blend(transform.blend());
            self.transform(transform.render_affine(component.size()));
            self.draw_raster(component);
            self.restore();
        }

        self.restore();
    }

    /// Fill the whole surface with `color` using the current alpha and blend.
    pub fn fill(&mut self, color: Rgba8) {
        let DrawState { alpha, blend, .. } = self.state;
        if let Some(s) = self.surface.as_mut() {
            s.fill(color, alpha, blend);
        }
    }

    /// Draw `src` (local coordinates `[0, w] x [0, h]`) through the current draw state.
    ///
    /// Each destination pixel center inside the transformed bounds is mapped back through the
    /// inverse transform and bilinearly sampled.
    pub fn draw_raster(&mut self, src: &RasterHandle) {
        let DrawState {
            transform,
            alpha,
            blend,
        } = self.state;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if alpha <= 0.0 || transform.determinant().abs() < f64::EPSILON {
            return;
        }

        let width = surface.width() as usize;
        let height = surface.height() as usize;
        let local = Rect::new(0.0, 0.0, f64::from(src.width), f64::from(src.height));
        let bounds = transform.transform_rect_bbox(local);
        let y_start = bounds.y0.floor().max(0.0) as usize;
        let y_end = (bounds.y1.ceil().max(0.0) as usize).min(height);
        let x_start = bounds.x0.floor().max(0.0) as usize;
        let x_end = (bounds.x1.ceil().max(0.0) as usize).min(width);
        if y_start >= y_end || x_start >= x_end {
            return;
        }

        let inverse = transform.inverse();
        let kernel = blend.kernel();
        let row_bytes = width * 4;

        surface.data_mut()[y_start * row_bytes..y_end * row_bytes]
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(i, row)| {
                let y = (y_start + i) as f64 + 0.5;
                for x in x_start..x_end {
                    let p = inverse * Point::new(x as f64 + 0.5, y);
                    if let Some(px) = sample_bilinear(src, p.x, p.y) {
                        composite_px(&mut row[x * 4..x * 4 + 4], px, alpha, kernel);
                    }
                }
            });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
