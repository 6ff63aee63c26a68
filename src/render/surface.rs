use std::io::Cursor;

use anyhow::Context;

use crate::composition::blend::BlendMode;
use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{ComposeError, ComposeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::raster::composite_px;

/// The composite pixel buffer.
///
/// Pixels are **premultiplied** RGBA8, tightly packed, row-major. Encoders convert to straight
/// alpha at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(size: PixelSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.rgba_len()],
        }
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Surface dimensions.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`.
    ///
    /// Panics when the coordinate is outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.data[idx..idx + 4];
        [p[0], p[1], p[2], p[3]]
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Flood the whole surface with `color` at `opacity` using `blend`.
    pub fn fill(&mut self, color: Rgba8, opacity: f32, blend: BlendMode) {
        let src = color.to_premul();
        let kernel = blend.kernel();
        for d in self.data.chunks_exact_mut(4) {
            composite_px(d, src, opacity, kernel);
        }
    }

    /// Copy out as a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> ComposeResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| ComposeError::state("surface buffer does not match its dimensions"))
    }

    /// Encode as PNG (lossless, straight alpha).
    pub fn encode_png(&self) -> ComposeResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode surface as png")?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
