use rayon::prelude::*;

use crate::compose::LayerStack;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::backend::{PixelBuffer, RasterBackend};
use crate::render::composite::to_straight_rgba8;
use crate::render::ramp::ColorRamp;

/// Options for the CPU rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CpuRasterizerOpts {
    /// Worker threads; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Rows handed to a worker at a time.
    pub band_rows: usize,
}

impl Default for CpuRasterizerOpts {
    fn default() -> Self {
        Self {
            threads: None,
            band_rows: 64,
        }
    }
}

impl CpuRasterizerOpts {
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_band_rows(mut self, band_rows: usize) -> Self {
        self.band_rows = band_rows;
        self
    }
}

/// Software rasterizer.
///
/// The layer stack is collapsed into a [`ColorRamp`] once, then rows are filled in parallel
/// bands. Each pixel depends only on its own coordinates, so output does not depend on thread
/// count or band size.
pub struct CpuRasterizer {
    opts: CpuRasterizerOpts,
    pool: Option<rayon::ThreadPool>,
}

impl CpuRasterizer {
    pub fn new(opts: CpuRasterizerOpts) -> BackdropResult<Self> {
        let pool = match opts.threads {
            None => None,
            Some(0) => {
                return Err(BackdropError::invalid_request(
                    "rasterizer 'threads' must be >= 1 when set",
                ));
            }
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| {
                        BackdropError::render(format!("failed to build rayon thread pool: {e}"))
                    })?,
            ),
        };
        Ok(Self { opts, pool })
    }

    pub fn opts(&self) -> CpuRasterizerOpts {
        self.opts
    }

    fn fill(&self, ramp: &ColorRamp, canvas: Canvas, data: &mut [u8]) {
        let stride = (canvas.width as usize) * 4;
        let band_bytes = stride * self.opts.band_rows.max(1);
        let axis = *ramp.axis();

        let work = |data: &mut [u8]| {
            data.par_chunks_mut(band_bytes)
                .enumerate()
                .for_each(|(band, chunk)| {
                    let first_row = band * self.opts.band_rows.max(1);
                    for (i, row) in chunk.chunks_exact_mut(stride).enumerate() {
                        let py = (first_row + i) as f64 + 0.5;
                        for (x, px) in row.chunks_exact_mut(4).enumerate() {
                            let d = axis.distance(x as f64 + 0.5, py);
                            px.copy_from_slice(&to_straight_rgba8(ramp.sample(d)));
                        }
                    }
                });
        };

        match &self.pool {
            Some(pool) => pool.install(|| work(data)),
            None => work(data),
        }
    }
}

impl RasterBackend for CpuRasterizer {
    #[tracing::instrument(skip(self, layers))]
    fn rasterize(&mut self, layers: &LayerStack, canvas: Canvas) -> BackdropResult<PixelBuffer> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(BackdropError::render(format!(
                "cannot rasterize a {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        let len = canvas
            .rgba8_len()
            .ok_or_else(|| BackdropError::render("pixel buffer size overflow"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BackdropError::OutOfMemory {
                width: canvas.width,
                height: canvas.height,
                bytes: len,
            })?;
        data.resize(len, 0u8);

        let ramp = ColorRamp::build(layers, canvas)?;
        tracing::debug!(samples = ramp.len(), "built color ramp");

        self.fill(&ramp, canvas, &mut data);
        PixelBuffer::from_rgba8(canvas.width, canvas.height, data)
    }
}

/// Rasterize with a default [`CpuRasterizer`].
pub fn rasterize(layers: &LayerStack, canvas: Canvas) -> BackdropResult<PixelBuffer> {
    CpuRasterizer::new(CpuRasterizerOpts::default())?.rasterize(layers, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
