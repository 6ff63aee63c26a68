use super::*;

fn near(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn defaults() {
    let t = TransformModel::default();
    assert_eq!(t.position(), Point::ORIGIN);
    assert_eq!(t.scale(), 1.0);
    assert_eq!(t.rotation_degrees(), 0.0);
    assert_eq!(t.opacity(), 1.0);
    assert_eq!(t.blend(), BlendMode::Normal);
}

#[test]
fn non_positive_scale_is_rejected() {
    let mut t = TransformModel::default();
    assert!(t.set_scale(1.5));
    assert!(!t.set_scale(0.0));
    assert!(!t.set_scale(-2.0));
    assert!(!t.set_scale(f64::NAN));
    assert!(!t.set_scale(f64::INFINITY));
    assert_eq!(t.scale(), 1.5);
}

#[test]
fn rotation_is_stored_mod_360() {
    let mut t = TransformModel::default();
    t.set_rotation_degrees(-90.0);
    assert_eq!(t.rotation_degrees(), 270.0);
    t.set_rotation_degrees(720.0);
    assert_eq!(t.rotation_degrees(), 0.0);
    t.set_rotation_degrees(405.0);
    assert_eq!(t.rotation_degrees(), 45.0);
}

#[test]
fn opacity_is_clamped() {
    let mut t = TransformModel::default();
    t.set_opacity(1.7);
    assert_eq!(t.opacity(), 1.0);
    t.set_opacity(-0.2);
    assert_eq!(t.opacity(), 0.0);
}

#[test]
fn footprint_scales_intrinsic_size() {
    let mut t = TransformModel::default();
    t.set_position(Point::new(10.0, 20.0));
    t.set_scale(2.0);
    let fp = t.footprint(PixelSize::new(30, 40));
    assert_eq!(fp.0, Rect::new(10.0, 20.0, 70.0, 100.0));
    assert_eq!(fp.center(), Point::new(40.0, 60.0));
}

#[test]
fn hit_test_is_inclusive_on_both_corners() {
    let mut t = TransformModel::default();
    t.set_position(Point::new(10.0, 10.0));
    let fp = t.footprint(PixelSize::new(20, 10));

    assert!(fp.contains(Point::new(10.0, 10.0)));
    assert!(fp.contains(Point::new(30.0, 20.0)));
    assert!(!fp.contains(Point::new(31.0, 20.0)));
    assert!(!fp.contains(Point::new(30.0, 21.0)));
    assert!(!fp.contains(Point::new(9.0, 10.0)));
    assert!(!fp.contains(Point::new(10.0, 9.0)));
}

#[test]
fn hit_test_ignores_rotation() {
    let mut t = TransformModel::default();
    t.set_rotation_degrees(45.0);
    let fp = t.footprint(PixelSize::new(10, 10));
    // The unrotated corner is still grabbable even though it is not drawn at 45 degrees.
    assert!(fp.contains(Point::new(0.0, 0.0)));
}

#[test]
fn centered_position_uses_current_scale() {
    let mut t = TransformModel::default();
    assert_eq!(
        t.centered_position(PixelSize::new(600, 400), PixelSize::new(100, 50)),
        Point::new(250.0, 175.0)
    );
    t.set_scale(2.0);
    assert_eq!(
        t.centered_position(PixelSize::new(600, 400), PixelSize::new(100, 50)),
        Point::new(200.0, 150.0)
    );
}

#[test]
fn reset_restores_defaults_at_given_position() {
    let mut t = TransformModel::default();
    t.set_scale(3.0);
    t.set_rotation_degrees(30.0);
    t.set_opacity(0.2);
    t.set_blend(BlendMode::Screen);
    t.reset(Point::new(5.0, 6.0));
    assert_eq!(t.position(), Point::new(5.0, 6.0));
    assert_eq!(t.scale(), 1.0);
    assert_eq!(t.rotation_degrees(), 0.0);
    assert_eq!(t.opacity(), 1.0);
    assert_eq!(t.blend(), BlendMode::Normal);
}

#[test]
fn render_affine_identity_without_rotation_or_scale() {
    let mut t = TransformModel::default();
    t.set_position(Point::new(7.0, 3.0));
    let a = t.render_affine(PixelSize::new(10, 4));
    assert!(near(a * Point::new(0.0, 0.0), Point::new(7.0, 3.0)));
    assert!(near(a * Point::new(10.0, 4.0), Point::new(17.0, 7.0)));
}

#[test]
fn render_affine_pivots_on_footprint_center() {
    let mut t = TransformModel::default();
    t.set_position(Point::new(10.0, 10.0));
    t.set_scale(2.0);
    t.set_rotation_degrees(90.0);
    let size = PixelSize::new(10, 4);
    let a = t.render_affine(size);
    let center = t.footprint(size).center();

    // The local center lands on the footprint center for any rotation and scale.
    assert!(near(a * Point::new(5.0, 2.0), center));
    // Clockwise on a y-down surface: local +x maps to surface +y.
    let right_mid = a * Point::new(10.0, 2.0);
    assert!(near(right_mid, Point::new(center.x, center.y + 10.0)));
}

#[test]
fn deserialize_rejects_non_positive_scale() {
    let json = r#"{"position":{"x":10.0,"y":10.0},"scale":-2.0,"rotation_deg":0.0,"opacity":1.0,"blend":"normal"}"#;
    assert!(serde_json::from_str::<TransformModel>(json).is_err());

    let zero = json.replace("-2.0", "0.0");
    assert!(serde_json::from_str::<TransformModel>(&zero).is_err());
}

#[test]
fn deserialize_normalizes_like_the_setters() {
    let json = r#"{"position":{"x":10.0,"y":10.0},"scale":2.0,"rotation_deg":725.0,"opacity":7.5,"blend":"multiply"}"#;
    let t: TransformModel = serde_json::from_str(json).unwrap();
    assert_eq!(t.scale(), 2.0);
    assert_eq!(t.rotation_degrees(), 5.0);
    assert_eq!(t.opacity(), 1.0);
    assert_eq!(t.blend(), BlendMode::Multiply);
    assert_eq!(t.footprint(PixelSize::new(4, 4)).top_left(), t.position());
}

#[test]
fn serialized_model_reads_back() {
    let mut t = TransformModel::default();
    t.set_position(Point::new(3.0, -4.0));
    t.set_scale(0.5);
    t.set_rotation_degrees(-30.0);
    let back: TransformModel = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
    assert_eq!(back, t);
}
