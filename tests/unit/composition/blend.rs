use super::*;

#[test]
fn every_mode_parses_from_its_own_name() {
    for mode in BlendMode::ALL {
        assert_eq!(mode.as_str().parse::<BlendMode>().unwrap(), mode);
        assert_eq!(mode.to_string(), mode.as_str());
    }
}

#[test]
fn parse_is_case_insensitive_and_accepts_source_over() {
    assert_eq!(
        " Soft-Light ".parse::<BlendMode>().unwrap(),
        BlendMode::SoftLight
    );
    assert_eq!(
        "source-over".parse::<BlendMode>().unwrap(),
        BlendMode::Normal
    );
}

#[test]
fn unknown_mode_is_configuration_error() {
    let err = "hue-ish".parse::<BlendMode>().unwrap_err();
    assert!(matches!(err, ComposeError::Configuration(_)));
    assert!(err.to_string().contains("hue-ish"));
}

#[test]
fn serde_uses_kebab_case_names() {
    let json = serde_json::to_string(&BlendMode::ColorDodge).unwrap();
    assert_eq!(json, "\"color-dodge\"");
    let back: BlendMode = serde_json::from_str("\"hard-light\"").unwrap();
    assert_eq!(back, BlendMode::HardLight);
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn kernels_match_reference_values() {
    let k = |m: BlendMode| m.kernel().unwrap();
    assert!(BlendMode::Normal.kernel().is_none());
    assert!(approx(k(BlendMode::Multiply)(0.5, 0.5), 0.25));
    assert!(approx(k(BlendMode::Screen)(0.5, 0.5), 0.75));
    assert!(approx(k(BlendMode::Darken)(0.2, 0.7), 0.2));
    assert!(approx(k(BlendMode::Lighten)(0.2, 0.7), 0.7));
    assert!(approx(k(BlendMode::Difference)(0.2, 0.7), 0.5));
    assert!(approx(k(BlendMode::Exclusion)(0.5, 0.5), 0.5));
    // Overlay keys on the destination, hard-light on the source.
    assert!(approx(k(BlendMode::Overlay)(1.0, 0.25), 0.5));
    assert!(approx(k(BlendMode::HardLight)(0.25, 1.0), 0.5));
    // Soft-light with a mid-grey source is the identity.
    assert!(approx(k(BlendMode::SoftLight)(0.5, 0.3), 0.3));
    assert!(approx(k(BlendMode::ColorDodge)(1.0, 0.5), 1.0));
    assert!(approx(k(BlendMode::ColorBurn)(0.0, 0.5), 0.0));
}

#[test]
fn serde_and_from_str_accept_the_same_names() {
    let via_serde: BlendMode = serde_json::from_str("\"source-over\"").unwrap();
    assert_eq!(via_serde, BlendMode::Normal);
    for mode in BlendMode::ALL {
        let json = format!("\"{}\"", mode.as_str());
        assert_eq!(serde_json::from_str::<BlendMode>(&json).unwrap(), mode);
        assert_eq!(mode.as_str().parse::<BlendMode>().unwrap(), mode);
    }
    // Serialization keeps the canonical name.
    assert_eq!(serde_json::to_string(&BlendMode::Normal).unwrap(), "\"normal\"");
}
