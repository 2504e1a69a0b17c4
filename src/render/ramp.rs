//! One-dimensional color ramp along a gradient axis.
//!
//! Every layer a [`LayerStack`] can hold is constant perpendicular to the fill's axis, so the
//! composited stack is a function of the signed distance along that axis alone. The ramp samples
//! that function once per pixel of distance over the span the frame covers; rasterization then
//! only interpolates.

use crate::compose::{Layer, LayerStack, LinearGradientLayer, MaterialLayer};
use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::composite::{PremulRgba, TRANSPARENT, mix, over};

/// Distance between ramp samples, in pixels.
const SAMPLE_STEP_PX: f64 = 1.0;
/// Gaussian support in multiples of sigma.
const KERNEL_SIGMAS: f64 = 3.0;

/// Axis geometry of the base fill in pixel space.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Axis {
    origin: Point,
    /// Unit direction, zero for a degenerate axis.
    dir: Vec2,
    /// Axis length in pixels.
    len: f64,
}

impl Axis {
    pub(crate) fn new(fill: &LinearGradientLayer, canvas: Canvas) -> Self {
        let origin = fill.start().to_pixels(canvas);
        let v = fill.end().to_pixels(canvas) - origin;
        let len = v.hypot();
        if len <= 1e-9 {
            return Self {
                origin,
                dir: Vec2::ZERO,
                len,
            };
        }
        let axis = Self {
            origin,
            dir: v / len,
            len,
        };
        if fill.is_clipped_to_frame() {
            axis.clipped(canvas)
        } else {
            axis
        }
    }

    /// Shrink the axis to the span the frame covers along it, so the frame runs from `t = 0`
    /// to `t = 1`. Ends already inside the frame are kept.
    fn clipped(self, canvas: Canvas) -> Self {
        let (lo, hi) = self.frame_extent(canvas);
        let (from, to) = (lo.max(0.0), hi.min(self.len));
        if to - from <= 1e-9 {
            return self;
        }
        Self {
            origin: self.origin + self.dir * from,
            dir: self.dir,
            len: to - from,
        }
    }

    /// Minimum and maximum signed distance of the frame's corners.
    fn frame_extent(&self, canvas: Canvas) -> (f64, f64) {
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
            .into_iter()
            .map(|(x, y)| self.distance(x, y))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    pub(crate) fn is_degenerate(&self) -> bool {
        self.dir == Vec2::ZERO
    }

    /// Signed distance of `(x, y)` along the axis from the start point.
    pub(crate) fn distance(&self, x: f64, y: f64) -> f64 {
        (x - self.origin.x) * self.dir.x + (y - self.origin.y) * self.dir.y
    }

    /// Gradient parameter for a distance, before clamping.
    fn t_at(&self, d: f64) -> f64 {
        if self.is_degenerate() { 1.0 } else { d / self.len }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ColorRamp {
    axis: Axis,
    /// Distance of sample 0.
    d0: f64,
    samples: Vec<PremulRgba>,
}

impl ColorRamp {
    /// Paint `stack` back-to-front into a ramp covering `canvas`.
    pub(crate) fn build(stack: &LayerStack, canvas: Canvas) -> BackdropResult<Self> {
        let axis = Axis::new(stack.base(), canvas);
        let halo = stack
            .overlay()
            .map(|m| kernel_radius(m.blur_sigma_px))
            .unwrap_or(0) as f64;

        let (d0, count) = if axis.is_degenerate() {
            (0.0, 1usize)
        } else {
            let (lo, hi) = axis.frame_extent(canvas);
            let (lo, hi) = (lo - halo, hi + halo);
            let count = ((hi - lo) / SAMPLE_STEP_PX).ceil() as usize + 1;
            (lo, count.max(1))
        };

        let mut ramp = Self {
            axis,
            d0,
            samples: vec![TRANSPARENT; count],
        };
        for layer in stack.layers() {
            match layer {
                Layer::Fill(fill) => ramp.paint_fill(fill),
                Layer::Material(material) => ramp.paint_material(material)?,
            }
        }
        Ok(ramp)
    }

    pub(crate) fn axis(&self) -> &Axis {
        &self.axis
    }

    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    fn paint_fill(&mut self, fill: &LinearGradientLayer) {
        for (k, dst) in self.samples.iter_mut().enumerate() {
            let d = self.d0 + k as f64 * SAMPLE_STEP_PX;
            let src = fill.color_at(self.axis.t_at(d)).premultiplied();
            *dst = over(*dst, src);
        }
    }

    /// Frost the backdrop: Gaussian blur, then the tint source-over.
    fn paint_material(&mut self, material: &MaterialLayer) -> BackdropResult<()> {
        let radius = kernel_radius(material.blur_sigma_px);
        if radius > 0 && self.samples.len() > 1 {
            let kernel = gaussian_kernel(radius, material.blur_sigma_px)?;
            self.samples = blur_samples(&self.samples, &kernel);
        }
        let tint = material.tint.premultiplied();
        for px in &mut self.samples {
            *px = over(*px, tint);
        }
        Ok(())
    }

    /// Composited color at signed axis distance `d`, linearly interpolated between samples.
    pub(crate) fn sample(&self, d: f64) -> PremulRgba {
        let last = self.samples.len() - 1;
        if last == 0 {
            return self.samples[0];
        }
        let f = ((d - self.d0) / SAMPLE_STEP_PX).clamp(0.0, last as f64);
        let k = (f.floor() as usize).min(last - 1);
        mix(self.samples[k], self.samples[k + 1], f - k as f64)
    }
}

fn kernel_radius(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * KERNEL_SIGMAS).ceil() as u32
}

/// Normalized Gaussian weights for offsets `-radius..=radius`.
fn gaussian_kernel(radius: u32, sigma: f64) -> BackdropResult<Vec<f64>> {
    if radius == 0 {
        return Ok(vec![1.0]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BackdropError::render("blur sigma must be > 0"));
    }

    let r = radius as i64;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Err(BackdropError::render("gaussian kernel sum is zero"));
    }
    for w in &mut weights {
        *w /= sum;
    }
    Ok(weights)
}

/// Convolve with edge clamping.
fn blur_samples(src: &[PremulRgba], kernel: &[f64]) -> Vec<PremulRgba> {
    let radius = (kernel.len() / 2) as i64;
    let last = src.len() as i64 - 1;
    (0..src.len() as i64)
        .map(|i| {
            let mut acc = [0.0f64; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                let si = (i + ki as i64 - radius).clamp(0, last) as usize;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += kw * src[si][c];
                }
            }
            acc
        })
        .collect()
}
