use crate::compose::LayerStack;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::StableHasher;

/// An owned raster image.
///
/// Pixels are **straight-alpha** RGBA8, row-major and tightly packed, which is the layout the PNG
/// and JPEG encoders consume directly. A buffer is produced once by a rasterizer and moved into
/// the encoder; it is deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing RGBA8 bytes; `data.len()` must equal `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> BackdropResult<Self> {
        let expected = Canvas::new(width, height)
            .rgba8_len()
            .ok_or_else(|| BackdropError::render("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(BackdropError::render(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA8 of one pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = (self.width as usize) * 4;
        let start = (y as usize) * stride;
        Some(&self.data[start..start + stride])
    }

    /// Stable digest of dimensions and pixel bytes, for snapshot comparisons.
    pub fn fingerprint(&self) -> u64 {
        let mut h = StableHasher::new();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }
}

/// Something that turns a layer stack into pixels.
///
/// Implementations must be deterministic: identical stacks and canvases produce identical
/// buffers regardless of what was rendered before.
pub trait RasterBackend {
    fn rasterize(&mut self, layers: &LayerStack, canvas: Canvas) -> BackdropResult<PixelBuffer>;
}

impl<B: RasterBackend + ?Sized> RasterBackend for Box<B> {
    fn rasterize(&mut self, layers: &LayerStack, canvas: Canvas) -> BackdropResult<PixelBuffer> {
        (**self).rasterize(layers, canvas)
    }
}
