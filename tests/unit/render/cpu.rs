use super::*;
use crate::color::Color;
use crate::compose::{BackgroundSpec, ColorScheme, compose};
use crate::direction::{Compass, GradientDirection};

fn gradient(stops: Vec<Color>, direction: GradientDirection) -> BackgroundSpec {
    BackgroundSpec::LinearGradient { stops, direction }
}

fn bw(direction: GradientDirection) -> LayerStack {
    compose(
        &gradient(vec![Color::BLACK, Color::WHITE], direction),
        ColorScheme::Light,
        false,
    )
    .unwrap()
}

#[test]
fn buffer_has_exact_dimensions() {
    let stack = bw(GradientDirection::default());
    for (w, h) in [(64, 64), (65, 130), (300, 71)] {
        let buf = rasterize(&stack, Canvas::new(w, h)).unwrap();
        assert_eq!((buf.width(), buf.height()), (w, h));
        assert_eq!(buf.as_bytes().len(), (w * h * 4) as usize);
    }
}

#[test]
fn zero_sized_canvas_is_a_render_failure() {
    let stack = bw(GradientDirection::default());
    let err = rasterize(&stack, Canvas::new(0, 10)).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::RenderFailure);
}

#[test]
fn output_is_independent_of_threads_and_bands() {
    let stack = compose(&BackgroundSpec::default(), ColorScheme::Dark, true).unwrap();
    let canvas = Canvas::new(97, 203);
    let a = CpuRasterizer::new(CpuRasterizerOpts::default().with_threads(Some(1)))
        .unwrap()
        .rasterize(&stack, canvas)
        .unwrap();
    let b = CpuRasterizer::new(
        CpuRasterizerOpts::default()
            .with_threads(Some(3))
            .with_band_rows(7),
    )
    .unwrap()
    .rasterize(&stack, canvas)
    .unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a, b);
}

#[test]
fn zero_threads_is_rejected() {
    assert!(CpuRasterizer::new(CpuRasterizerOpts::default().with_threads(Some(0))).is_err());
}

#[test]
fn leading_gradient_runs_left_to_right() {
    let buf = rasterize(
        &bw(GradientDirection::Preset(Compass::Leading)),
        Canvas::new(100, 64),
    )
    .unwrap();
    let left = buf.pixel(0, 10).unwrap();
    let right = buf.pixel(99, 10).unwrap();
    assert!(left[0] < 5, "{left:?}");
    assert!(right[0] > 250, "{right:?}");
    // Constant down each column.
    assert_eq!(buf.pixel(40, 0), buf.pixel(40, 63));
}

#[test]
fn angle_gradient_spans_the_frame() {
    let buf = rasterize(&bw(GradientDirection::Angle(0.0)), Canvas::new(128, 64)).unwrap();
    let left = buf.pixel(0, 32).unwrap();
    let right = buf.pixel(127, 32).unwrap();
    assert!(left[0] <= 2, "{left:?}");
    assert!(right[0] >= 253, "{right:?}");
    assert_eq!(buf.pixel(64, 0), buf.pixel(64, 63));

    // 90 degrees points down, so the top row takes the first stop.
    let buf = rasterize(&bw(GradientDirection::Angle(90.0)), Canvas::new(64, 128)).unwrap();
    assert!(buf.pixel(10, 0).unwrap()[0] <= 2);
    assert!(buf.pixel(10, 127).unwrap()[0] >= 253);
}

#[test]
fn diagonal_angle_reaches_both_corners() {
    let buf = rasterize(&bw(GradientDirection::Angle(45.0)), Canvas::new(300, 120)).unwrap();
    assert!(buf.pixel(0, 0).unwrap()[0] <= 3);
    assert!(buf.pixel(299, 119).unwrap()[0] >= 252);
}

#[test]
fn degenerate_axis_uses_last_stop() {
    let p = crate::UnitPoint::CENTER;
    let buf = rasterize(
        &bw(GradientDirection::Points { start: p, end: p }),
        Canvas::new(64, 64),
    )
    .unwrap();
    assert_eq!(buf.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(buf.pixel(63, 63), Some([255, 255, 255, 255]));
}

#[test]
fn translucent_base_keeps_alpha() {
    let stack = compose(&BackgroundSpec::default(), ColorScheme::Light, false).unwrap();
    let buf = rasterize(&stack, Canvas::new(64, 64)).unwrap();
    let top = buf.pixel(10, 0).unwrap();
    let bottom = buf.pixel(10, 63).unwrap();
    assert!(top[3].abs_diff(230) <= 1, "{top:?}");
    assert!(bottom[3].abs_diff(217) <= 1, "{bottom:?}");
}

#[test]
fn material_overlay_raises_alpha_and_tints() {
    let plain = compose(&BackgroundSpec::default(), ColorScheme::Light, false).unwrap();
    let frosted = compose(&BackgroundSpec::default(), ColorScheme::Light, true).unwrap();
    let canvas = Canvas::new(64, 128);
    let a = rasterize(&plain, canvas).unwrap();
    let b = rasterize(&frosted, canvas).unwrap();
    let pa = a.pixel(32, 64).unwrap();
    let pb = b.pixel(32, 64).unwrap();
    assert!(pb[3] > pa[3]);
    assert_ne!(pa, pb);
}
