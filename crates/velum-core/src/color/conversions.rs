//! sRGB transfer function and linear-light luminance

/// Rec.709 luminance weights (R, G, B)
pub const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Linear luminance below which a ratio rescale is not attempted
pub const LUMINANCE_EPSILON: f32 = 1e-6;

/// Decode an 8-bit-scale sRGB value (0.0-255.0) to linear light (0.0-1.0).
///
/// Uses the standard piecewise transfer function. Input is not clamped, so
/// callers holding out-of-range intermediates should clamp first.
#[inline]
pub fn srgb_to_linear(value: f32) -> f32 {
    let v = value / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a linear value (0.0-1.0) back to the 8-bit sRGB scale (0.0-255.0).
///
/// The result is clamped to `[0, 255]` but not rounded; quantization happens
/// once, at the very end of the pipeline.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let x = linear.max(0.0);
    let v = if x <= 0.003_130_8 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).clamp(0.0, 255.0)
}

/// Luminance of a linear RGB triple
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Convert an sRGB triple (0.0-255.0 scale, clamped) to linear light.
#[inline]
pub fn rgb_to_linear(rgb: [f32; 3]) -> [f32; 3] {
    [
        srgb_to_linear(rgb[0].clamp(0.0, 255.0)),
        srgb_to_linear(rgb[1].clamp(0.0, 255.0)),
        srgb_to_linear(rgb[2].clamp(0.0, 255.0)),
    ]
}

/// Convert a linear triple back to the sRGB 0.0-255.0 scale.
#[inline]
pub fn linear_to_rgb(linear: [f32; 3]) -> [f32; 3] {
    [
        linear_to_srgb(linear[0]),
        linear_to_srgb(linear[1]),
        linear_to_srgb(linear[2]),
    ]
}

/// Ratio that carries luminance `from` to `to`, forced to 1.0 near black.
///
/// Multiplying every linear channel by this ratio changes luminance while
/// keeping the channel proportions (chroma) intact.
#[inline]
pub fn luminance_ratio(from: f32, to: f32) -> f32 {
    if from > LUMINANCE_EPSILON {
        to / from
    } else {
        1.0
    }
}

/// Rescale linear channels by a luminance ratio, clamping to `[0, 1]`.
#[inline]
pub fn rescale_linear(linear: [f32; 3], ratio: f32) -> [f32; 3] {
    [
        (linear[0] * ratio).clamp(0.0, 1.0),
        (linear[1] * ratio).clamp(0.0, 1.0),
        (linear[2] * ratio).clamp(0.0, 1.0),
    ]
}
