use crate::foundation::math::unit_to_u8;

/// Premultiplied RGBA in `[0, 1]`.
pub(crate) type PremulRgba = [f64; 4];

pub(crate) const TRANSPARENT: PremulRgba = [0.0; 4];

/// Source-over: `out = src + dst * (1 - src.a)` on premultiplied channels, which is
/// `src * srcA + dst * (1 - srcA)` in straight terms.
pub(crate) fn over(dst: PremulRgba, src: PremulRgba) -> PremulRgba {
    let inv = 1.0 - src[3].clamp(0.0, 1.0);
    [
        src[0] + dst[0] * inv,
        src[1] + dst[1] * inv,
        src[2] + dst[2] * inv,
        src[3] + dst[3] * inv,
    ]
}

pub(crate) fn mix(a: PremulRgba, b: PremulRgba, t: f64) -> PremulRgba {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Quantize to straight-alpha RGBA8. Fully transparent pixels become `[0, 0, 0, 0]`.
pub(crate) fn to_straight_rgba8(px: PremulRgba) -> [u8; 4] {
    let a = px[3].clamp(0.0, 1.0);
    let a8 = unit_to_u8(a);
    if a8 == 0 {
        return [0, 0, 0, 0];
    }
    [
        unit_to_u8(px[0] / a),
        unit_to_u8(px[1] / a),
        unit_to_u8(px[2] / a),
        a8,
    ]
}
