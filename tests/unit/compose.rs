use super::*;
use crate::color::perceptual::relative_luminance;
use crate::direction::Compass;

fn blue() -> Color {
    Color::rgb(0.0, 0.0, 1.0)
}
fn purple() -> Color {
    Color::rgb(0.5, 0.0, 0.5)
}
fn teal() -> Color {
    Color::rgb(0.0, 0.5, 0.5)
}

#[test]
fn deepened_is_darker_in_dark_and_lighter_in_light() {
    for h in [0.0, 0.13, 0.33, 0.58, 0.8] {
        for s in [0.2, 0.75, 1.0] {
            for b in [0.1, 0.5, 0.9] {
                let base = Color::from_hsb(h, s, b);
                let y = relative_luminance(base);
                assert!(
                    relative_luminance(deepened(base, ColorScheme::Dark)) < y,
                    "dark {base:?}"
                );
                assert!(
                    relative_luminance(deepened(base, ColorScheme::Light)) > y,
                    "light {base:?}"
                );
            }
        }
    }
}

#[test]
fn perceptual_is_vertical_two_stop_blend() {
    let base = Color::from_hsb(0.58, 0.75, 0.9);
    let stack = compose(
        &BackgroundSpec::Perceptual { base_color: base },
        ColorScheme::Dark,
        false,
    )
    .unwrap();
    let fill = stack.base();
    assert_eq!(fill.start(), UnitPoint::TOP);
    assert_eq!(fill.end(), UnitPoint::BOTTOM);
    assert!(!fill.is_clipped_to_frame());
    let stops = fill.stops();
    assert_eq!(stops.len(), 2);
    assert!((stops[0].color.a - 0.9).abs() < 1e-12);
    assert!((stops[1].color.a - 0.85).abs() < 1e-12);
    assert_eq!(stops[0].color.with_opacity(1.0), base);
    assert!(stack.overlay().is_none());
    assert_eq!(stack.len(), 1);
}

#[test]
fn gradient_stops_are_evenly_spaced_and_ordered() {
    let spec = BackgroundSpec::LinearGradient {
        stops: vec![blue(), purple(), teal()],
        direction: GradientDirection::Preset(Compass::TopLeading),
    };
    let stack = compose(&spec, ColorScheme::Light, false).unwrap();
    let offsets: Vec<f64> = stack.base().stops().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    assert_eq!(stack.base().stops()[0].color, blue());
    assert_eq!(stack.base().stops()[2].color, teal());
    assert_eq!(stack.base().start(), UnitPoint::TOP_LEADING);
    assert!(!stack.base().is_clipped_to_frame());
}

#[test]
fn fewer_than_two_stops_is_rejected() {
    for stops in [vec![], vec![blue()]] {
        let spec = BackgroundSpec::LinearGradient {
            stops,
            direction: GradientDirection::default(),
        };
        let err = compose(&spec, ColorScheme::Light, true).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidRequest);
    }
}

#[test]
fn non_finite_inputs_are_rejected() {
    let spec = BackgroundSpec::Perceptual {
        base_color: Color::rgb(f64::NAN, 0.0, 0.0),
    };
    assert!(compose(&spec, ColorScheme::Light, false).is_err());

    let spec = BackgroundSpec::LinearGradient {
        stops: vec![blue(), teal()],
        direction: GradientDirection::Angle(f64::INFINITY),
    };
    assert!(compose(&spec, ColorScheme::Light, false).is_err());
}

#[test]
fn overlay_is_appended_last_with_scheme_tint() {
    let light = compose(&BackgroundSpec::default(), ColorScheme::Light, true).unwrap();
    let dark = compose(&BackgroundSpec::default(), ColorScheme::Dark, true).unwrap();

    let layers: Vec<Layer<'_>> = light.layers().collect();
    assert_eq!(layers.len(), 2);
    assert!(matches!(layers[0], Layer::Fill(_)));
    let Layer::Material(m) = layers[1] else {
        panic!("overlay must be the top layer");
    };
    assert_eq!(m.tint, ColorScheme::Light.material_tint());
    assert_ne!(
        light.overlay().map(|m| m.tint),
        dark.overlay().map(|m| m.tint)
    );
}

#[test]
fn layer_requires_two_ordered_stops() {
    let one = evenly_spaced(&[Color::BLACK]);
    let err = LinearGradientLayer::new(one, UnitPoint::TOP, UnitPoint::BOTTOM).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::InvalidRequest);

    let backwards = vec![
        GradientStop {
            offset: 1.0,
            color: Color::BLACK,
        },
        GradientStop {
            offset: 0.0,
            color: Color::WHITE,
        },
    ];
    assert!(LinearGradientLayer::new(backwards, UnitPoint::TOP, UnitPoint::BOTTOM).is_err());

    let nan = vec![
        GradientStop {
            offset: 0.0,
            color: Color::BLACK,
        },
        GradientStop {
            offset: f64::NAN,
            color: Color::WHITE,
        },
    ];
    assert!(LinearGradientLayer::new(nan, UnitPoint::TOP, UnitPoint::BOTTOM).is_err());
}

#[test]
fn angle_directions_are_clipped_to_the_frame() {
    let spec = BackgroundSpec::LinearGradient {
        stops: vec![blue(), teal()],
        direction: GradientDirection::Angle(30.0),
    };
    let stack = compose(&spec, ColorScheme::Light, false).unwrap();
    assert!(stack.base().is_clipped_to_frame());
}

#[test]
fn color_at_interpolates_between_stops() {
    let layer = LinearGradientLayer::new(
        evenly_spaced(&[Color::BLACK, Color::WHITE]),
        UnitPoint::TOP,
        UnitPoint::BOTTOM,
    )
    .unwrap();
    assert_eq!(layer.color_at(-1.0), Color::BLACK);
    assert_eq!(layer.color_at(2.0), Color::WHITE);
    let mid = layer.color_at(0.5);
    assert!((mid.r - 0.5).abs() < 1e-12);
}

#[test]
fn background_json_uses_mode_tag() {
    let spec: BackgroundSpec =
        serde_json::from_str(r##"{"mode":"perceptual","baseColor":"#3366cc"}"##).unwrap();
    assert!(matches!(spec, BackgroundSpec::Perceptual { .. }));

    let spec: BackgroundSpec = serde_json::from_str(
        r##"{"mode":"linearGradient","stops":["#0000ff","#800080"],"direction":{"angle":45}}"##,
    )
    .unwrap();
    let BackgroundSpec::LinearGradient { stops, direction } = spec else {
        panic!("expected gradient");
    };
    assert_eq!(stops.len(), 2);
    assert_eq!(direction, GradientDirection::Angle(45.0));
}

#[test]
fn scheme_parses_case_insensitively() {
    assert_eq!("Dark".parse::<ColorScheme>().unwrap(), ColorScheme::Dark);
    assert!("sepia".parse::<ColorScheme>().is_err());
}
