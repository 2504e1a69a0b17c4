use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage, RgbaImage};

use crate::color::Color;
use crate::encode::format::OutputFormat;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::backend::PixelBuffer;

/// Near-lossless default used by the export UI.
pub const DEFAULT_QUALITY: f64 = 0.97;

/// Format-specific encoder parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodeOptions {
    /// Lossy compression quality in `(0, 1]`; ignored for PNG.
    pub quality: f64,
    /// Opaque color translucent pixels are flattened onto for containers without alpha.
    pub matte: Color,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            matte: Color::WHITE,
        }
    }
}

impl EncodeOptions {
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_matte(mut self, matte: Color) -> Self {
        self.matte = matte;
        self
    }

    /// JPEG quality on the encoder's `1..=100` scale.
    pub(crate) fn jpeg_quality(&self) -> BackdropResult<u8> {
        let q = self.quality;
        if !q.is_finite() || q <= 0.0 || q > 1.0 {
            return Err(BackdropError::invalid_request(format!(
                "quality must be in (0, 1], got {q}"
            )));
        }
        Ok((q * 100.0).round().clamp(1.0, 100.0) as u8)
    }
}

/// Serializes pixel buffers into container bytes.
pub trait ImageEncoder {
    /// Consume `buffer` and return the encoded file contents.
    fn encode(
        &mut self,
        buffer: PixelBuffer,
        format: OutputFormat,
        opts: &EncodeOptions,
    ) -> BackdropResult<Vec<u8>>;
}

impl<E: ImageEncoder + ?Sized> ImageEncoder for Box<E> {
    fn encode(
        &mut self,
        buffer: PixelBuffer,
        format: OutputFormat,
        opts: &EncodeOptions,
    ) -> BackdropResult<Vec<u8>> {
        (**self).encode(buffer, format, opts)
    }
}

/// Encoder backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEncoder;

impl ImageEncoder for DefaultEncoder {
    fn encode(
        &mut self,
        buffer: PixelBuffer,
        format: OutputFormat,
        opts: &EncodeOptions,
    ) -> BackdropResult<Vec<u8>> {
        encode(buffer, format, opts)
    }
}

#[tracing::instrument(skip(buffer, opts), fields(width = buffer.width(), height = buffer.height()))]
pub fn encode(
    buffer: PixelBuffer,
    format: OutputFormat,
    opts: &EncodeOptions,
) -> BackdropResult<Vec<u8>> {
    if !format.is_encodable() {
        return Err(BackdropError::UnsupportedFormat(format));
    }

    let (width, height) = (buffer.width(), buffer.height());
    let mut out = Vec::new();
    let mut cursor = Cursor::new(&mut out);

    match format {
        OutputFormat::Png => {
            let img = RgbaImage::from_raw(width, height, buffer.into_bytes())
                .ok_or_else(|| BackdropError::render("PNG: buffer does not match dimensions"))?;
            img.write_to(&mut cursor, ImageFormat::Png)
                .map_err(|e| BackdropError::render(format!("PNG: {e}")))?;
        }
        OutputFormat::Jpeg => {
            let quality = opts.jpeg_quality()?;
            let rgb = flatten_onto(buffer.as_bytes(), opts.matte);
            let img = RgbImage::from_raw(width, height, rgb)
                .ok_or_else(|| BackdropError::render("JPEG: buffer does not match dimensions"))?;
            let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
            img.write_with_encoder(encoder)
                .map_err(|e| BackdropError::render(format!("JPEG: {e}")))?;
        }
        OutputFormat::Heic => return Err(BackdropError::UnsupportedFormat(format)),
    }

    tracing::debug!(bytes = out.len(), %format, "encoded image");
    Ok(out)
}

/// Composite straight-alpha RGBA8 over an opaque matte, producing RGB8.
fn flatten_onto(rgba: &[u8], matte: Color) -> Vec<u8> {
    let [mr, mg, mb, _] = matte.to_rgba8();
    let matte = [mr, mg, mb];
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = u32::from(px[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let v = (u32::from(px[c]) * a + u32::from(matte[c]) * inv + 127) / 255;
            rgb.push(v as u8);
        }
    }
    rgb
}
