use super::*;

fn bounds() -> DisplayBounds {
    DisplayBounds {
        max_width: 600,
        max_height: 400,
    }
}

#[test]
fn oversized_base_scales_to_bounds() {
    assert_eq!(
        fit_within(PixelSize::new(1200, 800), bounds()),
        PixelSize::new(600, 400)
    );
}

#[test]
fn small_base_is_not_upscaled() {
    assert_eq!(
        fit_within(PixelSize::new(300, 200), bounds()),
        PixelSize::new(300, 200)
    );
}

#[test]
fn tall_base_is_limited_by_height() {
    // ratio = min(600/1000, 400/2000) = 0.2
    assert_eq!(
        fit_within(PixelSize::new(1000, 2000), bounds()),
        PixelSize::new(200, 400)
    );
}

#[test]
fn single_axis_overflow_still_scales_both() {
    // ratio = min(600/700, 400/100) = 6/7
    let out = fit_within(PixelSize::new(700, 100), bounds());
    assert_eq!(out, PixelSize::new(600, 85));
}

#[test]
fn extreme_aspect_never_collapses_to_zero() {
    let out = fit_within(PixelSize::new(100_000, 1), bounds());
    assert_eq!(out, PixelSize::new(600, 1));
}
