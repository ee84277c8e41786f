//! Tone reshaping in linear light
//!
//! The global curve (shadow lift, highlight hold, contrast, black deepen) and
//! the local dodge/burn masks both act on linear luminance. The result is
//! pushed back into the channels by a single luminance ratio so hue and
//! saturation survive the reshape.

mod curves;
mod local;


pub use curves::{
    apply_tone_curve_point, black_deepen, contrast_s_curve, highlight_hold, shadow_lift,
    ToneControls,
};
pub use local::{apply_local_adjustments, burn, dodge, mask_strengths, LOCAL_ADJUST_GAIN};

use crate::color::{linear_to_rgb, luminance, luminance_ratio, rescale_linear, rgb_to_linear};

/// Reshape one sRGB pixel (0.0-255.0 scale) through the curve and local masks.
///
/// Returns the pixel on the same scale, clamped to `[0, 255]`.
pub fn apply_tone_pixel(
    rgb: [f32; 3],
    controls: &ToneControls,
    dodge_strength: f32,
    burn_strength: f32,
) -> [f32; 3] {
    let linear = rgb_to_linear(rgb);
    let y = luminance(linear[0], linear[1], linear[2]);

    let curved = apply_tone_curve_point(y, controls);
    let target = apply_local_adjustments(curved, dodge_strength, burn_strength).clamp(0.0, 1.0);

    let ratio = luminance_ratio(y, target);
    linear_to_rgb(rescale_linear(linear, ratio))
}
