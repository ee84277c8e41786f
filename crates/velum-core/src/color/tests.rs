//! Tests for color conversion functions

use super::*;

#[test]
fn test_srgb_linear_endpoints() {
    assert!(srgb_to_linear(0.0).abs() < 1e-7);
    assert!((srgb_to_linear(255.0) - 1.0).abs() < 1e-6);
    assert!(linear_to_srgb(0.0).abs() < 1e-4);
    assert!((linear_to_srgb(1.0) - 255.0).abs() < 1e-3);
}

#[test]
fn test_srgb_roundtrip_is_stable_after_rounding() {
    for v in 0..=255u32 {
        let value = v as f32;
        let back = linear_to_srgb(srgb_to_linear(value));
        assert_eq!(
            back.round() as u32,
            v,
            "Round trip drifted for {}: got {}",
            v,
            back
        );
    }
}

#[test]
fn test_mid_gray_is_dark_in_linear() {
    // sRGB 128 is roughly 21.6% linear light
    let lin = srgb_to_linear(128.0);
    assert!((lin - 0.2158).abs() < 0.001, "got {}", lin);
}

#[test]
fn test_linear_to_srgb_clamps() {
    assert_eq!(linear_to_srgb(-0.5), 0.0);
    assert_eq!(linear_to_srgb(4.0), 255.0);
}

#[test]
fn test_luminance_weights_sum_to_one() {
    let sum: f32 = LUMA_WEIGHTS.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!((luminance(0.5, 0.5, 0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn test_luminance_ratio_guards_black() {
    assert_eq!(luminance_ratio(0.0, 0.3), 1.0);
    assert_eq!(luminance_ratio(1e-9, 0.3), 1.0);
    assert!((luminance_ratio(0.2, 0.4) - 2.0).abs() < 1e-6);
}

#[test]
fn test_rescale_preserves_channel_proportions() {
    let lin = [0.2, 0.1, 0.05];
    let out = rescale_linear(lin, 1.5);
    assert!((out[0] / out[1] - 2.0).abs() < 1e-5);
    assert!((out[1] / out[2] - 2.0).abs() < 1e-5);

    let clipped = rescale_linear([0.9, 0.5, 0.1], 2.0);
    assert_eq!(clipped[0], 1.0);
}
