use std::sync::Arc;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{ComposeError, ComposeResult};
use crate::foundation::math::premultiply_rgba8_in_place;

#[derive(Clone, Debug)]
/// Decoded raster in premultiplied RGBA8 form.
///
/// Immutable once built; clones share the pixel buffer.
pub struct RasterHandle {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterHandle {
    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ComposeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposeError::decode("raster must be at least 1x1"));
        }
        if rgba8_premul.len() != PixelSize::new(width, height).rgba_len() {
            return Err(ComposeError::decode(
                "raster byte length does not match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Build a raster filled with one premultiplied color.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> ComposeResult<Self> {
        let px = premul.repeat(PixelSize::new(width, height).rgba_len() / 4);
        Self::from_premul(width, height, px)
    }

    /// Intrinsic size.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the raster.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        [p[0], p[1], p[2], p[3]]
    }
}

/// Turns encoded image bytes into a [`RasterHandle`].
pub trait RasterDecoder: Send + Sync {
    /// Decode `bytes`; malformed input yields [`ComposeError::Decode`].
    fn decode(&self, bytes: &[u8]) -> ComposeResult<RasterHandle>;
}

/// Decoder backed by the `image` crate (format sniffed from the bytes).
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl RasterDecoder for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> ComposeResult<RasterHandle> {
        decode_raster(bytes)
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_raster(bytes: &[u8]) -> ComposeResult<RasterHandle> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ComposeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    RasterHandle::from_premul(width, height, rgba8_premul)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
