use crate::assets::decode::RasterHandle;
use crate::composition::blend::BlendKernel;
use crate::foundation::math::{add_sat_u8, mul_div255_u8, opacity_to_u8, unit_to_u8};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Composite one premultiplied source pixel onto `dst` (4 bytes) with global `opacity`.
///
/// `kernel == None` is integer source-over; otherwise the separable blend is applied to
/// unpremultiplied channels:
/// `out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da`.
#[inline]
pub(crate) fn composite_px(
    dst: &mut [u8],
    src: PremulRgba8,
    opacity: f32,
    kernel: Option<BlendKernel>,
) {
    match kernel {
        None => over_px(dst, src, opacity_to_u8(opacity)),
        Some(blend) => blend_px(dst, src, opacity.clamp(0.0, 1.0), blend),
    }
}

fn over_px(d: &mut [u8], s: PremulRgba8, op: u16) {
    if op == 0 {
        return;
    }
    let sa = mul_div255_u8(u16::from(s[3]), op);
    if sa == 0 {
        return;
    }
    let inv = 255u16 - u16::from(sa);

    d[3] = add_sat_u8(sa, mul_div255_u8(u16::from(d[3]), inv));
    for c in 0..3 {
        let sc = mul_div255_u8(u16::from(s[c]), op);
        let dc = mul_div255_u8(u16::from(d[c]), inv);
        d[c] = add_sat_u8(sc, dc);
    }
}

fn blend_px(d: &mut [u8], s: PremulRgba8, opacity: f32, blend: BlendKernel) {
    let sa = (f32::from(s[3]) / 255.0) * opacity;
    if sa <= 0.0 {
        return;
    }
    let da = f32::from(d[3]) / 255.0;
    let out_a = (sa + da * (1.0 - sa)).clamp(0.0, 1.0);

    for c in 0..3 {
        let sp = (f32::from(s[c]) / 255.0) * opacity;
        let dp = f32::from(d[c]) / 255.0;
        let sc = (sp / sa).clamp(0.0, 1.0);
        let dc = if da > 0.0 { (dp / da).clamp(0.0, 1.0) } else { 0.0 };
        let b = blend(sc, dc).clamp(0.0, 1.0);
        let out_p = (sp * (1.0 - da) + dp * (1.0 - sa) + b * sa * da).clamp(0.0, 1.0);
        d[c] = unit_to_u8(out_p);
    }
    d[3] = unit_to_u8(out_a);
}

/// Bilinear sample of `src` at continuous image coordinates `(x, y)`.
///
/// Coordinates outside `[0, w) x [0, h)` are transparent; inside, neighbours clamp to the edge
/// so drawn rasters keep hard borders.
pub(crate) fn sample_bilinear(src: &RasterHandle, x: f64, y: f64) -> Option<PremulRgba8> {
    let w = f64::from(src.width);
    let h = f64::from(src.height);
    if !(x >= 0.0 && y >= 0.0 && x < w && y < h) {
        return None;
    }

    let fx = (x - 0.5).clamp(0.0, w - 1.0);
    let fy = (y - 0.5).clamp(0.0, h - 1.0);
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);
    let x1 = (x0 + 1).min(i64::from(src.width) - 1);
    let y1 = (y0 + 1).min(i64::from(src.height) - 1);

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) * (1.0 - tx) + f64::from(p10[c]) * tx;
        let bottom = f64::from(p01[c]) * (1.0 - tx) + f64::from(p11[c]) * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
