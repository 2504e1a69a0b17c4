//! Perceptually uniform mixing in OKLab.
//!
//! Conversions go sRGB (gamma-encoded) -> linear RGB -> OKLab and back. Alpha is carried
//! alongside and interpolated linearly.

use super::Color;
use crate::foundation::math::lerp;

/// A color in the OKLab space (`l` is perceived lightness in roughly `[0, 1]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl OkLab {
    pub fn from_color(c: Color) -> Self {
        let r = srgb_to_linear(c.r.clamp(0.0, 1.0));
        let g = srgb_to_linear(c.g.clamp(0.0, 1.0));
        let b = srgb_to_linear(c.b.clamp(0.0, 1.0));

        let l_ = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
        let m_ = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
        let s_ = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

        Self {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    /// Convert back to an sRGB color with the given alpha; out-of-gamut results are clamped.
    pub fn to_color(self, alpha: f64) -> Color {
        let l_ = self.l + 0.3963377774 * self.a + 0.2158037573 * self.b;
        let m_ = self.l - 0.1055613458 * self.a - 0.0638541728 * self.b;
        let s_ = self.l - 0.0894841775 * self.a - 1.2914855480 * self.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
        let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
        let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

        Color::rgba(
            linear_to_srgb(r.clamp(0.0, 1.0)),
            linear_to_srgb(g.clamp(0.0, 1.0)),
            linear_to_srgb(b.clamp(0.0, 1.0)),
            alpha,
        )
    }
}

/// Mix `base` toward `target` by `t` in OKLab (`t = 0` is `base`, `t = 1` is `target`).
pub fn mix_perceptual(base: Color, target: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let p = OkLab::from_color(base);
    let q = OkLab::from_color(target);
    let mixed = OkLab {
        l: lerp(p.l, q.l, t),
        a: lerp(p.a, q.a, t),
        b: lerp(p.b, q.b, t),
    };
    mixed.to_color(lerp(base.a, target.a, t))
}

/// WCAG relative luminance of the opaque color.
pub fn relative_luminance(c: Color) -> f64 {
    0.2126 * srgb_to_linear(c.r.clamp(0.0, 1.0))
        + 0.7152 * srgb_to_linear(c.g.clamp(0.0, 1.0))
        + 0.0722 * srgb_to_linear(c.b.clamp(0.0, 1.0))
}
