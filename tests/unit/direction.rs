use super::*;

fn unit_dir(d: GradientDirection) -> (f64, f64) {
    let (s, e) = d.resolve();
    let (dx, dy) = (e.x - s.x, e.y - s.y);
    let len = dx.hypot(dy);
    (dx / len, dy / len)
}

#[test]
fn presets_match_fixed_table() {
    let (s, e) = GradientDirection::Preset(Compass::Top).resolve();
    assert_eq!(s, UnitPoint::new(0.5, 0.0));
    assert_eq!(e, UnitPoint::new(0.5, 1.0));

    let (s, e) = GradientDirection::Preset(Compass::TopLeading).resolve();
    assert_eq!(s, UnitPoint::new(0.0, 0.0));
    assert_eq!(e, UnitPoint::new(1.0, 1.0));

    let (s, e) = GradientDirection::Preset(Compass::BottomTrailing).resolve();
    assert_eq!(s, UnitPoint::new(1.0, 1.0));
    assert_eq!(e, UnitPoint::new(0.0, 0.0));
}

#[test]
fn opposite_presets_swap_endpoints() {
    let pairs = [
        (Compass::Top, Compass::Bottom),
        (Compass::Leading, Compass::Trailing),
        (Compass::TopLeading, Compass::BottomTrailing),
        (Compass::TopTrailing, Compass::BottomLeading),
    ];
    for (a, b) in pairs {
        let (sa, ea) = a.start_end();
        let (sb, eb) = b.start_end();
        assert_eq!((sa, ea), (eb, sb), "{a:?} vs {b:?}");
    }
}

#[test]
fn angle_zero_is_horizontal_left_to_right() {
    let (s, e) = GradientDirection::Angle(0.0).resolve();
    assert_eq!(s.y, e.y);
    assert!(s.x < e.x);
    assert!(s.x < 0.0 && e.x > 1.0);
}

#[test]
fn angle_ninety_points_down() {
    let (dx, dy) = unit_dir(GradientDirection::Angle(90.0));
    assert!(dx.abs() < 1e-12);
    assert!((dy - 1.0).abs() < 1e-12);
}

#[test]
fn angle_is_periodic() {
    for deg in [0.0, 33.0, 120.0, 271.5, -45.0] {
        let a = unit_dir(GradientDirection::Angle(deg));
        let b = unit_dir(GradientDirection::Angle(deg + 360.0));
        assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9, "{deg}");
    }
}

#[test]
fn angle_line_passes_through_center() {
    let (s, e) = GradientDirection::Angle(120.0).resolve();
    assert!(((s.x + e.x) / 2.0 - 0.5).abs() < 1e-9);
    assert!(((s.y + e.y) / 2.0 - 0.5).abs() < 1e-9);
}

#[test]
fn points_pass_through() {
    let start = UnitPoint::new(0.2, 0.3);
    let end = UnitPoint::new(0.9, 0.1);
    assert_eq!(GradientDirection::Points { start, end }.resolve(), (start, end));
}

#[test]
fn compass_parses_loose_spellings() {
    assert_eq!("topLeading".parse::<Compass>().unwrap(), Compass::TopLeading);
    assert_eq!("bottom-trailing".parse::<Compass>().unwrap(), Compass::BottomTrailing);
    assert_eq!("LEADING".parse::<Compass>().unwrap(), Compass::Leading);
    assert!("diagonal".parse::<Compass>().is_err());
}

#[test]
fn direction_json_forms() {
    let d: GradientDirection = serde_json::from_str(r#"{"preset":"topTrailing"}"#).unwrap();
    assert_eq!(d, GradientDirection::Preset(Compass::TopTrailing));
    let d: GradientDirection = serde_json::from_str(r#"{"angle":120.0}"#).unwrap();
    assert_eq!(d, GradientDirection::Angle(120.0));
    let d: GradientDirection = serde_json::from_str(
        r#"{"points":{"start":{"x":0.0,"y":0.5},"end":{"x":1.0,"y":0.5}}}"#,
    )
    .unwrap();
    assert_eq!(d.resolve(), Compass::Leading.start_end());
}
