//! Bounded display sizing for base rasters.

use crate::foundation::config::DisplayBounds;
use crate::foundation::core::PixelSize;

/// Fit `intrinsic` inside `bounds`, preserving aspect ratio.
///
/// Rasters already within bounds pass through unchanged (no upscaling). Oversized rasters are
/// scaled by `min(max_w / w, max_h / h)`; fractional results truncate to whole pixels and never
/// drop below 1.
pub fn fit_within(intrinsic: PixelSize, bounds: DisplayBounds) -> PixelSize {
    let PixelSize { width, height } = intrinsic;
    if width <= bounds.max_width && height <= bounds.max_height {
        return intrinsic;
    }

    let w = f64::from(width);
    let h = f64::from(height);
    let ratio = (f64::from(bounds.max_width) / w).min(f64::from(bounds.max_height) / h);

    PixelSize::new(truncate_px(w * ratio), truncate_px(h * ratio))
}

fn truncate_px(v: f64) -> u32 {
    // Tolerate float noise like 399.99999999999994 for an exact 2:1 reduction.
    let snapped = if (v - v.round()).abs() < 1e-9 {
        v.round()
    } else {
        v.floor()
    };
    (snapped as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
